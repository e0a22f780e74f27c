//! Color vision deficiency simulation.
//!
//! There are two rendering tiers. The exact tier multiplies each swatch by a
//! 3x3 matrix from [`CVD_MATRICES`], and the SVG `feColorMatrix` definitions
//! for whole-page previews are generated from that same table. The CSS filter
//! chains in [`CvdVariant::css_filter`] are a separate, hand-tuned
//! approximation and are not expected to match the matrices pixel for pixel.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::conversion::{hex_to_rgb, rgb_to_hex};
use crate::site_palette::{Role, SitePalette};
use crate::Error;

/// Row-major 3x3 matrix: `[r_r, r_g, r_b, g_r, g_g, g_b, b_r, b_g, b_b]`.
pub type CvdMatrix = [f64; 9];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CvdVariant {
    Normal,
    Protanopia,
    Deuteranopia,
    Tritanopia,
    Protanomaly,
    Deuteranomaly,
    Tritanomaly,
    Achromatopsia,
}

pub const IDENTITY_MATRIX: CvdMatrix = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

pub const CVD_MATRICES: [(CvdVariant, CvdMatrix); 8] = [
    (CvdVariant::Normal, IDENTITY_MATRIX),
    (
        CvdVariant::Protanopia,
        [0.567, 0.433, 0.0, 0.558, 0.442, 0.0, 0.0, 0.242, 0.758],
    ),
    (
        CvdVariant::Deuteranopia,
        [0.625, 0.375, 0.0, 0.7, 0.3, 0.0, 0.0, 0.3, 0.7],
    ),
    (
        CvdVariant::Tritanopia,
        [0.95, 0.05, 0.0, 0.0, 0.433, 0.567, 0.0, 0.475, 0.525],
    ),
    (
        CvdVariant::Protanomaly,
        [0.817, 0.183, 0.0, 0.333, 0.667, 0.0, 0.0, 0.125, 0.875],
    ),
    (
        CvdVariant::Deuteranomaly,
        [0.8, 0.2, 0.0, 0.258, 0.742, 0.0, 0.0, 0.142, 0.858],
    ),
    (
        CvdVariant::Tritanomaly,
        [0.967, 0.033, 0.0, 0.0, 0.733, 0.267, 0.0, 0.183, 0.817],
    ),
    (
        CvdVariant::Achromatopsia,
        [0.299, 0.587, 0.114, 0.299, 0.587, 0.114, 0.299, 0.587, 0.114],
    ),
];

impl CvdVariant {
    pub const ALL: [CvdVariant; 8] = [
        CvdVariant::Normal,
        CvdVariant::Protanopia,
        CvdVariant::Deuteranopia,
        CvdVariant::Tritanopia,
        CvdVariant::Protanomaly,
        CvdVariant::Deuteranomaly,
        CvdVariant::Tritanomaly,
        CvdVariant::Achromatopsia,
    ];

    pub fn matrix(self) -> &'static CvdMatrix {
        // Every variant has exactly one entry in the table.
        CVD_MATRICES
            .iter()
            .find(|(variant, _)| *variant == self)
            .map(|(_, matrix)| matrix)
            .unwrap_or(&IDENTITY_MATRIX)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CvdVariant::Normal => "normal",
            CvdVariant::Protanopia => "protanopia",
            CvdVariant::Deuteranopia => "deuteranopia",
            CvdVariant::Tritanopia => "tritanopia",
            CvdVariant::Protanomaly => "protanomaly",
            CvdVariant::Deuteranomaly => "deuteranomaly",
            CvdVariant::Tritanomaly => "tritanomaly",
            CvdVariant::Achromatopsia => "achromatopsia",
        }
    }

    /// Approximate CSS `filter` chain for previewing a whole page.
    pub fn css_filter(self) -> &'static str {
        match self {
            CvdVariant::Normal => "none",
            CvdVariant::Protanopia => "sepia(0.6) hue-rotate(-20deg) saturate(0.7) contrast(1.05)",
            CvdVariant::Deuteranopia => "sepia(0.5) hue-rotate(-35deg) saturate(0.6)",
            CvdVariant::Tritanopia => "sepia(0.3) hue-rotate(150deg) saturate(0.8)",
            CvdVariant::Protanomaly => "sepia(0.3) hue-rotate(-10deg) saturate(0.85)",
            CvdVariant::Deuteranomaly => "sepia(0.25) hue-rotate(-18deg) saturate(0.8)",
            CvdVariant::Tritanomaly => "sepia(0.15) hue-rotate(75deg) saturate(0.9)",
            CvdVariant::Achromatopsia => "grayscale(1) contrast(1.2)",
        }
    }

    /// The `id` used for this variant's SVG `<filter>` element.
    pub fn filter_id(self) -> String {
        format!("cvd-{}", self.as_str())
    }
}

impl std::fmt::Display for CvdVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CvdVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();

        CvdVariant::ALL
            .into_iter()
            .find(|variant| variant.as_str() == needle)
            .ok_or_else(|| Error::UnknownVariant(s.to_string()))
    }
}

/// Applies a 3x3 matrix to a color's RGB channels, clamping and rounding each
/// result back into `0..=255`.
pub fn apply_color_blind_matrix(hex: &str, matrix: &CvdMatrix) -> String {
    let rgb = hex_to_rgb(hex);
    let (r, g, b) = (rgb.red as f64, rgb.green as f64, rgb.blue as f64);

    let new_r = r * matrix[0] + g * matrix[1] + b * matrix[2];
    let new_g = r * matrix[3] + g * matrix[4] + b * matrix[5];
    let new_b = r * matrix[6] + g * matrix[7] + b * matrix[8];

    rgb_to_hex(new_r, new_g, new_b)
}

pub fn simulate(hex: &str, variant: CvdVariant) -> String {
    apply_color_blind_matrix(hex, variant.matrix())
}

/// Every role of the palette as seen with the given deficiency.
pub fn simulate_palette(palette: &SitePalette, variant: CvdVariant) -> SitePalette {
    let mut simulated = palette.clone();

    for role in Role::ALL {
        simulated.set(role, simulate(palette.get(role), variant));
    }

    simulated
}

/// `values` attribute for an SVG `feColorMatrix type="matrix"`: each RGB row
/// padded with zero alpha and offset columns, followed by the alpha row.
pub fn svg_color_matrix_values(variant: CvdVariant) -> String {
    let m = variant.matrix();
    let mut values: Vec<String> = Vec::with_capacity(20);

    for row in m.chunks(3) {
        values.extend(row.iter().map(|v| v.to_string()));
        values.push("0".to_string());
        values.push("0".to_string());
    }
    values.extend(["0", "0", "0", "1", "0"].map(String::from));

    values.join(" ")
}

static SVG_FILTER_DEFS: Lazy<String> = Lazy::new(|| {
    let mut svg = String::new();

    svg.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"0\" height=\"0\" aria-hidden=\"true\">\n");
    svg.push_str("  <defs>\n");

    for variant in CvdVariant::ALL {
        svg.push_str(&format!(
            "    <filter id=\"{}\" color-interpolation-filters=\"sRGB\">\n",
            variant.filter_id()
        ));
        svg.push_str(&format!(
            "      <feColorMatrix type=\"matrix\" values=\"{}\" />\n",
            svg_color_matrix_values(variant)
        ));
        svg.push_str("    </filter>\n");
    }

    svg.push_str("  </defs>\n");
    svg.push_str("</svg>\n");

    svg
});

/// Inline SVG holding one `<filter>` per variant, built from [`CVD_MATRICES`].
pub fn svg_filter_defs() -> &'static str {
    &SVG_FILTER_DEFS
}
