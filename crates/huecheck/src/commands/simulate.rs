use crate::output::{swatch, write_json};
use crate::Result;
use color_engine::{normalize_hex, simulate, svg_filter_defs, CvdVariant};
use serde::Serialize;

pub struct SimulateArgs<'a, W: std::io::Write> {
    pub colors: &'a [String],
    /// Only this variant, instead of all of them.
    pub variant: Option<CvdVariant>,
    /// Print the SVG filter definitions instead of simulating colors.
    pub svg: bool,
    pub json: bool,
    pub stdout: &'a mut W,
}

#[derive(Debug, Serialize)]
struct Simulation {
    color: String,
    variant: CvdVariant,
    simulated: String,
    css_filter: &'static str,
}

pub fn run<W: std::io::Write>(args: SimulateArgs<W>) -> Result<()> {
    if args.svg {
        write!(args.stdout, "{}", svg_filter_defs())?;
        return Ok(());
    }

    if args.colors.is_empty() {
        return Err(crate::Error::General(String::from(
            "Pass at least one color to simulate, or --svg",
        )));
    }

    let variants: Vec<CvdVariant> = match args.variant {
        Some(variant) => vec![variant],
        None => CvdVariant::ALL.to_vec(),
    };

    let mut simulations = Vec::with_capacity(args.colors.len() * variants.len());
    for color in args.colors {
        let color = normalize_hex(color)?;

        for variant in &variants {
            simulations.push(Simulation {
                simulated: simulate(&color, *variant),
                color: color.clone(),
                variant: *variant,
                css_filter: variant.css_filter(),
            });
        }
    }

    if args.json {
        return write_json(args.stdout, &simulations);
    }

    for color in simulations.chunk_by(|a, b| a.color == b.color) {
        writeln!(args.stdout, "{} {}", swatch(&color[0].color), color[0].color)?;

        for simulation in color {
            writeln!(
                args.stdout,
                "  {:<14} {} {}",
                simulation.variant.as_str(),
                swatch(&simulation.simulated),
                simulation.simulated
            )?;
        }
    }

    if let Some(variant) = args.variant {
        writeln!(args.stdout, "Page preview filter: {}", variant.css_filter())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(colors: &[&str], variant: Option<CvdVariant>, svg: bool) -> String {
        let colors: Vec<String> = colors.iter().map(|s| s.to_string()).collect();
        let mut fake_stdout = std::io::Cursor::new(Vec::new());

        let result = run(SimulateArgs {
            colors: &colors,
            variant,
            svg,
            json: false,
            stdout: &mut fake_stdout,
        });

        if let Err(err) = result {
            panic!("{}", err);
        }

        String::from_utf8(fake_stdout.into_inner()).unwrap()
    }

    #[test]
    fn lists_every_variant_by_default() {
        let output = output(&["#ff0000"], None, false);

        for variant in CvdVariant::ALL {
            assert!(output.contains(variant.as_str()), "missing {variant}");
        }
        assert!(output.contains("#918e00"));
    }

    #[test]
    fn single_variant_includes_the_page_filter() {
        let output = output(&["#ff0000", "#00ff00"], Some(CvdVariant::Achromatopsia), false);

        assert_eq!(output.matches("achromatopsia").count(), 2);
        assert!(output.contains("Page preview filter: grayscale(1) contrast(1.2)"));
    }

    #[test]
    fn prints_svg_filters() {
        let output = output(&[], None, true);

        assert_eq!(output, svg_filter_defs());
    }

    #[test]
    fn needs_colors_without_svg() {
        let mut fake_stdout = std::io::sink();

        let result = run(SimulateArgs {
            colors: &[],
            variant: None,
            svg: false,
            json: false,
            stdout: &mut fake_stdout,
        });

        assert!(result.is_err());
    }
}
