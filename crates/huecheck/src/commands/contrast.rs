use crate::output::{compliance_label, swatch, write_json};
use crate::Result;
use color_engine::{check_contrast, normalize_hex, ContrastResult};
use serde::Serialize;

pub struct ContrastArgs<'a, W: std::io::Write> {
    pub foreground: &'a str,
    pub background: &'a str,
    pub large_text: bool,
    pub json: bool,
    pub stdout: &'a mut W,
}

#[derive(Debug, Serialize)]
struct ContrastReport {
    foreground: String,
    background: String,
    large_text: bool,
    #[serde(flatten)]
    result: ContrastResult,
}

pub fn run<W: std::io::Write>(args: ContrastArgs<W>) -> Result<()> {
    let foreground = normalize_hex(args.foreground)?;
    let background = normalize_hex(args.background)?;
    let result = check_contrast(&foreground, &background, args.large_text);

    if args.json {
        return write_json(
            args.stdout,
            &ContrastReport {
                foreground,
                background,
                large_text: args.large_text,
                result,
            },
        );
    }

    writeln!(
        args.stdout,
        "{} {} on {} {}",
        swatch(&foreground),
        foreground,
        swatch(&background),
        background
    )?;
    writeln!(args.stdout, "Ratio:      {:.2}:1", result.ratio)?;
    writeln!(
        args.stdout,
        "Compliance: {}",
        compliance_label(result.compliance)
    )?;

    Ok(())
}
