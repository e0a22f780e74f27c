use palette::{white_point::D65, FromColor, Lab, Mix, Srgb};
use serde::{Deserialize, Serialize};

use crate::contrast::relative_luminance;
use crate::conversion::{hex_to_hsl, hex_to_rgb, hsl_to_hex, rgb_to_hex, rgb_to_hex_u8};
use crate::site_palette::{canonical, Role, SitePalette};
use crate::Error;

pub const PALETTE_SIZE: usize = 5;

const BACKGROUND_MIN_LUMINANCE: f64 = 0.85;
const TEXT_MAX_LUMINANCE: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmonyType {
    Complement,
    Analogous,
    Triad,
    Tetrad,
}

impl HarmonyType {
    pub const ALL: [HarmonyType; 4] = [
        HarmonyType::Complement,
        HarmonyType::Analogous,
        HarmonyType::Triad,
        HarmonyType::Tetrad,
    ];

    /// Hue offsets, in degrees, of the stops this harmony is built from.
    pub fn hue_offsets(self) -> &'static [f64] {
        match self {
            HarmonyType::Complement => &[0.0, 180.0],
            HarmonyType::Analogous => &[-30.0, 0.0, 30.0],
            HarmonyType::Triad => &[0.0, 120.0, -120.0],
            HarmonyType::Tetrad => &[0.0, 90.0, 180.0, 270.0],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HarmonyType::Complement => "complement",
            HarmonyType::Analogous => "analogous",
            HarmonyType::Triad => "triad",
            HarmonyType::Tetrad => "tetrad",
        }
    }
}

impl std::fmt::Display for HarmonyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HarmonyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "complement" | "complementary" => Ok(HarmonyType::Complement),
            "analogous" => Ok(HarmonyType::Analogous),
            "triad" | "triadic" => Ok(HarmonyType::Triad),
            "tetrad" | "tetradic" => Ok(HarmonyType::Tetrad),
            _ => Err(Error::UnknownHarmony(s.to_string())),
        }
    }
}

/// Both luminance bounds are exclusive.
fn light_enough_for_background(luminance: f64) -> bool {
    luminance > BACKGROUND_MIN_LUMINANCE
}

fn dark_enough_for_text(luminance: f64) -> bool {
    luminance < TEXT_MAX_LUMINANCE
}

fn to_lab(hex: &str) -> Lab<D65, f64> {
    let srgb: Srgb<f64> = hex_to_rgb(hex).into_format();
    Lab::from_color(srgb)
}

fn from_lab(lab: Lab<D65, f64>) -> String {
    let srgb = Srgb::<f64>::from_color(lab);
    rgb_to_hex(srgb.red * 255.0, srgb.green * 255.0, srgb.blue * 255.0)
}

/// Samples `count` evenly spaced points along the piecewise-linear path
/// through `stops` in Lab space. Points that land exactly on a stop return
/// that stop unchanged.
pub fn interpolate_lab(stops: &[String], count: usize) -> Vec<String> {
    match stops {
        [] => return Vec::new(),
        [only] => return vec![only.clone(); count],
        _ => {}
    }

    let segments = stops.len() - 1;
    let last = count.saturating_sub(1).max(1) as f64;

    (0..count)
        .map(|i| {
            let position = i as f64 / last * segments as f64;
            let segment = (position.floor() as usize).min(segments - 1);
            let factor = position - segment as f64;

            if factor.abs() < 1e-9 {
                stops[segment].clone()
            } else if (1.0 - factor).abs() < 1e-9 {
                stops[segment + 1].clone()
            } else {
                from_lab(to_lab(&stops[segment]).mix(to_lab(&stops[segment + 1]), factor))
            }
        })
        .collect()
}

/// Builds a five-color harmony from `base` by rotating its hue, then filling
/// the gaps with Lab interpolation.
pub fn generate_palette(base: &str, harmony: HarmonyType) -> Vec<String> {
    let base = rgb_to_hex_u8(hex_to_rgb(base));
    let hsl = hex_to_hsl(&base);

    let stops: Vec<String> = harmony
        .hue_offsets()
        .iter()
        .map(|offset| {
            if *offset == 0.0 {
                base.clone()
            } else {
                hsl_to_hex(hsl.rotate(*offset))
            }
        })
        .collect();

    let mut colors = if stops.len() < PALETTE_SIZE {
        interpolate_lab(&stops, PALETTE_SIZE)
    } else {
        stops
    };
    colors.truncate(PALETTE_SIZE);

    tracing::trace!(%base, %harmony, ?colors, "generated harmony");

    colors
}

/// Assigns generated colors to site roles: `base` is primary, the next two
/// distinct colors are secondary and tertiary, the lightest leftover above
/// 0.85 luminance is the background and the darkest below 0.25 is the text.
/// Any role left unfilled gets its default, and duplicates are resolved with
/// [`SitePalette::ensure_unique_roles`].
pub fn map_to_site_palette(base: &str, generated: &[String]) -> SitePalette {
    let primary = canonical(base);

    let mut accents = generated
        .iter()
        .enumerate()
        .filter(|(_, hex)| canonical(hex) != primary);
    let secondary = accents.next();
    let tertiary = accents.next();

    let used: Vec<usize> = [secondary, tertiary]
        .iter()
        .flatten()
        .map(|(i, _)| *i)
        .collect();
    let claimed: Vec<String> = [secondary, tertiary]
        .iter()
        .flatten()
        .map(|(_, hex)| canonical(hex))
        .chain(std::iter::once(primary.clone()))
        .collect();

    let remaining: Vec<(usize, String, f64)> = generated
        .iter()
        .enumerate()
        .filter(|(i, hex)| !used.contains(i) && !claimed.contains(&canonical(hex)))
        .map(|(i, hex)| (i, canonical(hex), relative_luminance(hex)))
        .collect();

    let background = remaining
        .iter()
        .filter(|(_, _, luminance)| light_enough_for_background(*luminance))
        .max_by(|a, b| a.2.total_cmp(&b.2));

    let text = remaining
        .iter()
        .filter(|(i, _, _)| background.map(|(b, _, _)| b != i).unwrap_or(true))
        .filter(|(_, _, luminance)| dark_enough_for_text(*luminance))
        .min_by(|a, b| a.2.total_cmp(&b.2));

    let pick = |found: Option<String>, role: Role| {
        found.unwrap_or_else(|| canonical(role.default_hex()))
    };

    let mut palette = SitePalette {
        primary,
        secondary: pick(secondary.map(|(_, hex)| canonical(hex)), Role::Secondary),
        tertiary: pick(tertiary.map(|(_, hex)| canonical(hex)), Role::Tertiary),
        background: pick(background.map(|(_, hex, _)| hex.clone()), Role::Background),
        text: pick(text.map(|(_, hex, _)| hex.clone()), Role::Text),
    };
    palette.ensure_unique_roles();

    palette
}
