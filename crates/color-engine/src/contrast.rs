use serde::{Deserialize, Serialize};

use crate::conversion::{hex_to_rgb, Rgb};

/// WCAG conformance label for a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compliance {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AA (Large Text)")]
    AaLargeText,
    #[serde(rename = "Fail")]
    Fail,
}

impl Compliance {
    pub const AAA_RATIO: f64 = 7.0;
    pub const AA_RATIO: f64 = 4.5;
    pub const AA_LARGE_RATIO: f64 = 3.0;

    /// Classifies a ratio. The range `[3, 4.5)` only passes when the caller
    /// says the text is large; text size is never inferred.
    pub fn classify(ratio: f64, is_large_text: bool) -> Self {
        if ratio >= Self::AAA_RATIO {
            Compliance::Aaa
        } else if ratio >= Self::AA_RATIO {
            Compliance::Aa
        } else if is_large_text && ratio >= Self::AA_LARGE_RATIO {
            Compliance::AaLargeText
        } else {
            Compliance::Fail
        }
    }

    pub fn passes(self) -> bool {
        self != Compliance::Fail
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Compliance::Aaa => "AAA",
            Compliance::Aa => "AA",
            Compliance::AaLargeText => "AA (Large Text)",
            Compliance::Fail => "Fail",
        }
    }
}

impl std::fmt::Display for Compliance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    pub ratio: f64,
    pub compliance: Compliance,
}

fn linearize(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;

    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn relative_luminance_rgb(rgb: Rgb) -> f64 {
    0.2126 * linearize(rgb.red) + 0.7152 * linearize(rgb.green) + 0.0722 * linearize(rgb.blue)
}

/// WCAG relative luminance, in `[0, 1]`.
pub fn relative_luminance(hex: &str) -> f64 {
    relative_luminance_rgb(hex_to_rgb(hex))
}

/// WCAG contrast ratio, in `[1, 21]` and symmetric in its arguments.
pub fn contrast_ratio(a: &str, b: &str) -> f64 {
    let l1 = relative_luminance(a);
    let l2 = relative_luminance(b);

    (l1.max(l2) + 0.05) / (l1.min(l2) + 0.05)
}

pub fn wcag_compliance(ratio: f64, is_large_text: bool) -> Compliance {
    Compliance::classify(ratio, is_large_text)
}

pub fn check_contrast(foreground: &str, background: &str, is_large_text: bool) -> ContrastResult {
    let ratio = contrast_ratio(foreground, background);

    ContrastResult {
        ratio,
        compliance: wcag_compliance(ratio, is_large_text),
    }
}
