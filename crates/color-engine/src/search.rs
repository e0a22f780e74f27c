use serde::{Deserialize, Serialize};

use crate::contrast::{check_contrast, Compliance};
use crate::conversion::{hex_to_hsl, hsl_to_hex, HslColor};

pub const DEFAULT_MIN_RATIO: f64 = 4.5;

/// Lightness offsets scanned by both searches, in HSL percentage points.
const MAX_DELTA: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub color: String,
    pub ratio: f64,
    pub compliance: Compliance,
    /// `false` when nothing in range met the minimum ratio and `color` is the
    /// unchanged base color.
    pub found: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundScore {
    pub background: String,
    pub ratio: f64,
    pub compliance: Compliance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSuggestion {
    pub color: String,
    pub details: Vec<BackgroundScore>,
    pub aaa: usize,
    pub aa: usize,
    pub fail: usize,
}

impl MultiSuggestion {
    fn score(color: String, backgrounds: &[String]) -> Self {
        let details: Vec<BackgroundScore> = backgrounds
            .iter()
            .map(|background| {
                let result = check_contrast(&color, background, false);
                BackgroundScore {
                    background: background.clone(),
                    ratio: result.ratio,
                    compliance: result.compliance,
                }
            })
            .collect();

        let count = |c: Compliance| details.iter().filter(|d| d.compliance == c).count();
        let (aaa, aa, fail) = (
            count(Compliance::Aaa),
            count(Compliance::Aa),
            count(Compliance::Fail),
        );

        MultiSuggestion {
            color,
            details,
            aaa,
            aa,
            fail,
        }
    }

    /// Most AAA, then most AA, then fewest failures.
    fn beats(&self, other: &MultiSuggestion) -> bool {
        self.aaa > other.aaa
            || (self.aaa == other.aaa && self.aa > other.aa)
            || (self.aaa == other.aaa && self.aa == other.aa && self.fail < other.fail)
    }

    pub fn all_aaa(&self) -> bool {
        self.aaa == self.details.len()
    }
}

/// Lighter then darker candidate at a given offset from `hsl`'s lightness.
fn candidates(hsl: HslColor, delta: u32) -> [String; 2] {
    let delta = delta as f64;
    [
        hsl_to_hex(hsl.with_lightness((hsl.lightness + delta).min(100.0))),
        hsl_to_hex(hsl.with_lightness((hsl.lightness - delta).max(0.0))),
    ]
}

/// Walks the base color's lightness outward, lighter first, and returns the
/// first candidate that reaches `min_ratio` against `background`.
///
/// When no candidate qualifies the base color itself comes back with its own
/// score and `found == false`, even if some candidate came closer.
pub fn suggest_closest_accessible_color(
    base: &str,
    background: &str,
    min_ratio: f64,
) -> Suggestion {
    let hsl = hex_to_hsl(base);

    for delta in 0..=MAX_DELTA {
        for candidate in candidates(hsl, delta) {
            let result = check_contrast(&candidate, background, false);

            if result.ratio >= min_ratio {
                tracing::debug!(base, background, %candidate, delta, ratio = result.ratio, "found accessible color");

                return Suggestion {
                    color: candidate,
                    ratio: result.ratio,
                    compliance: result.compliance,
                    found: true,
                };
            }
        }
    }

    let result = check_contrast(base, background, false);
    tracing::debug!(base, background, min_ratio, "no accessible color in range, keeping base");

    Suggestion {
        color: base.to_string(),
        ratio: result.ratio,
        compliance: result.compliance,
        found: false,
    }
}

/// Lightness-only search for the variant of `base` with the best compliance
/// across every background. Hue and saturation are never changed.
pub fn suggest_best_multi_contrast_color(base: &str, backgrounds: &[String]) -> MultiSuggestion {
    let mut best = MultiSuggestion::score(base.to_string(), backgrounds);

    if backgrounds.is_empty() || best.all_aaa() {
        return best;
    }

    let hsl = hex_to_hsl(base);

    for delta in 0..=MAX_DELTA {
        for candidate in candidates(hsl, delta) {
            let scored = MultiSuggestion::score(candidate, backgrounds);

            if scored.beats(&best) {
                best = scored;
            }

            if best.all_aaa() {
                tracing::debug!(base, color = %best.color, delta, "AAA against every background");
                return best;
            }
        }
    }

    tracing::debug!(
        base,
        color = %best.color,
        aaa = best.aaa,
        aa = best.aa,
        fail = best.fail,
        "best multi-background candidate"
    );

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::contrast_ratio;

    #[test]
    fn compliant_base_is_returned_unchanged() {
        let suggestion = suggest_closest_accessible_color("#000000", "#ffffff", DEFAULT_MIN_RATIO);

        assert!(suggestion.found);
        assert_eq!(suggestion.color, "#000000");
        assert_eq!(suggestion.compliance, Compliance::Aaa);
    }

    #[test]
    fn darkens_when_lightening_cannot_help() {
        let suggestion = suggest_closest_accessible_color("#4a90e2", "#ffffff", DEFAULT_MIN_RATIO);

        assert!(suggestion.found);
        assert!(suggestion.ratio >= DEFAULT_MIN_RATIO);
        assert!(hex_to_hsl(&suggestion.color).lightness < hex_to_hsl("#4a90e2").lightness);
    }

    #[test]
    fn prefers_lightening_at_equal_delta() {
        // Against itself, one step in either direction clears a ratio just
        // above 1, so only the tie-break decides.
        let suggestion = suggest_closest_accessible_color("#808080", "#808080", 1.0001);

        assert!(suggestion.found);
        assert!(hex_to_hsl(&suggestion.color).lightness > hex_to_hsl("#808080").lightness);
    }

    #[test]
    fn reported_ratio_matches_the_suggested_color() {
        let backgrounds = ["#ffffff", "#000000", "#f5f5f5", "#2e2e2e", "#4a90e2"];

        for background in backgrounds {
            let suggestion = suggest_closest_accessible_color("#f8c471", background, 4.5);

            assert_eq!(suggestion.ratio, contrast_ratio(&suggestion.color, background));
            if suggestion.found {
                assert!(suggestion.ratio >= 4.5);
            }
        }
    }

    #[test]
    fn unreachable_ratio_falls_back_to_base() {
        // Nothing reaches 21:1 against mid gray.
        let suggestion = suggest_closest_accessible_color("#4a90e2", "#808080", 21.0);

        assert!(!suggestion.found);
        assert_eq!(suggestion.color, "#4a90e2");
        assert_eq!(suggestion.ratio, contrast_ratio("#4a90e2", "#808080"));
        assert_eq!(suggestion.compliance, Compliance::Fail);
    }

    #[test]
    fn multi_search_reaches_aaa_on_light_backgrounds() {
        let backgrounds = vec!["#ffffff".to_string(), "#f5f5f5".to_string()];
        let suggestion = suggest_best_multi_contrast_color("#4a90e2", &backgrounds);

        assert_eq!(suggestion.aaa, 2);
        assert_eq!(suggestion.fail, 0);
        assert!(suggestion.all_aaa());
        for detail in &suggestion.details {
            assert_eq!(detail.ratio, contrast_ratio(&suggestion.color, &detail.background));
        }
    }

    #[test]
    fn multi_search_keeps_base_when_nothing_beats_it() {
        let backgrounds = vec!["#ffffff".to_string()];
        let suggestion = suggest_best_multi_contrast_color("#000000", &backgrounds);

        assert_eq!(suggestion.color, "#000000");
        assert_eq!(suggestion.aaa, 1);
    }

    #[test]
    fn multi_search_prefers_one_aaa_over_two_aa() {
        let backgrounds = vec!["#ffffff".to_string(), "#000000".to_string()];
        let suggestion = suggest_best_multi_contrast_color("#4a90e2", &backgrounds);

        // AAA on black is a small step lighter; nothing is AAA on one side
        // and still AA on the other.
        assert_eq!((suggestion.aaa, suggestion.aa, suggestion.fail), (1, 0, 1));
        assert!(hex_to_hsl(&suggestion.color).lightness > hex_to_hsl("#4a90e2").lightness);
    }

    #[test]
    fn multi_search_with_no_backgrounds() {
        let suggestion = suggest_best_multi_contrast_color("#4a90e2", &[]);

        assert_eq!(suggestion.color, "#4a90e2");
        assert!(suggestion.details.is_empty());
    }

    #[test]
    fn ordering_is_lexicographic() {
        let make = |aaa, aa, fail| MultiSuggestion {
            color: String::new(),
            details: vec![],
            aaa,
            aa,
            fail,
        };

        assert!(make(1, 0, 2).beats(&make(0, 3, 0)));
        assert!(make(1, 1, 1).beats(&make(1, 0, 0)));
        assert!(make(1, 1, 0).beats(&make(1, 1, 1)));
        assert!(!make(1, 1, 1).beats(&make(1, 1, 1)));
    }
}
