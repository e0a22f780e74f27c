use crate::output::{compliance_label, swatch, write_json};
use crate::Result;
use color_engine::{
    normalize_hex, suggest_best_multi_contrast_color, suggest_closest_accessible_color,
};

pub struct SuggestArgs<'a, W: std::io::Write> {
    pub base: &'a str,
    pub backgrounds: &'a [String],
    pub min_ratio: f64,
    pub json: bool,
    pub stdout: &'a mut W,
}

/// One background runs the closest-color search against `min_ratio`; several
/// run the multi-background search, which always aims for AAA.
pub fn run<W: std::io::Write>(args: SuggestArgs<W>) -> Result<()> {
    let base = normalize_hex(args.base)?;
    let backgrounds = args
        .backgrounds
        .iter()
        .map(|bg| normalize_hex(bg))
        .collect::<color_engine::Result<Vec<String>>>()?;

    match backgrounds.as_slice() {
        [] => Err(crate::Error::General(String::from(
            "At least one background color is required",
        ))),
        [background] => {
            let suggestion = suggest_closest_accessible_color(&base, background, args.min_ratio);

            if args.json {
                return write_json(args.stdout, &suggestion);
            }

            if suggestion.found {
                writeln!(
                    args.stdout,
                    "{} {} -> {} {} on {} ({:.2}:1, {})",
                    swatch(&base),
                    base,
                    swatch(&suggestion.color),
                    suggestion.color,
                    background,
                    suggestion.ratio,
                    compliance_label(suggestion.compliance)
                )?;
            } else {
                writeln!(
                    args.stdout,
                    "No lightness of {} reaches {:.2}:1 on {}; keeping it ({:.2}:1, {})",
                    base,
                    args.min_ratio,
                    background,
                    suggestion.ratio,
                    compliance_label(suggestion.compliance)
                )?;
            }

            Ok(())
        }
        _ => {
            let suggestion = suggest_best_multi_contrast_color(&base, &backgrounds);

            if args.json {
                return write_json(args.stdout, &suggestion);
            }

            writeln!(
                args.stdout,
                "{} {} -> {} {} (AAA: {}, AA: {}, Fail: {})",
                swatch(&base),
                base,
                swatch(&suggestion.color),
                suggestion.color,
                suggestion.aaa,
                suggestion.aa,
                suggestion.fail
            )?;

            for detail in &suggestion.details {
                writeln!(
                    args.stdout,
                    "  on {} {}: {:.2}:1 {}",
                    swatch(&detail.background),
                    detail.background,
                    detail.ratio,
                    compliance_label(detail.compliance)
                )?;
            }

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_engine::DEFAULT_MIN_RATIO;

    fn output(base: &str, backgrounds: &[&str], min_ratio: f64, json: bool) -> String {
        let backgrounds: Vec<String> = backgrounds.iter().map(|s| s.to_string()).collect();
        let mut fake_stdout = std::io::Cursor::new(Vec::new());

        let result = run(SuggestArgs {
            base,
            backgrounds: &backgrounds,
            min_ratio,
            json,
            stdout: &mut fake_stdout,
        });

        if let Err(err) = result {
            panic!("{}", err);
        }

        String::from_utf8(fake_stdout.into_inner()).unwrap()
    }

    #[test]
    fn single_background_suggestion() {
        let output = output("#4A90E2", &["#ffffff"], DEFAULT_MIN_RATIO, true);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["found"], true);
        assert!(value["ratio"].as_f64().unwrap() >= DEFAULT_MIN_RATIO);
    }

    #[test]
    fn explains_when_nothing_qualifies() {
        let output = output("#4a90e2", &["#808080"], 21.0, false);

        assert!(output.contains("No lightness of #4a90e2 reaches 21.00:1"));
    }

    #[test]
    fn multi_background_lists_every_background() {
        let output = output("#4a90e2", &["#ffffff", "#f5f5f5"], DEFAULT_MIN_RATIO, false);

        assert!(output.contains("AAA: 2"));
        assert!(output.contains("on"));
        assert_eq!(output.lines().count(), 3);
    }

    #[test]
    fn requires_a_background() {
        let mut fake_stdout = std::io::sink();

        let result = run(SuggestArgs {
            base: "#4a90e2",
            backgrounds: &[],
            min_ratio: DEFAULT_MIN_RATIO,
            json: false,
            stdout: &mut fake_stdout,
        });

        assert!(matches!(result, Err(crate::Error::General(_))));
    }
}
