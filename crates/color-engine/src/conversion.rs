use palette::{FromColor, Hsl, Srgb};

use crate::{Error, Result};

/// An sRGB color with integer channels in `0..=255`.
pub type Rgb = Srgb<u8>;

/// Hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl HslColor {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        HslColor {
            hue,
            saturation,
            lightness,
        }
    }

    /// Same hue and saturation, different lightness (clamped to `[0, 100]`).
    pub fn with_lightness(self, lightness: f64) -> Self {
        HslColor {
            lightness: lightness.clamp(0.0, 100.0),
            ..self
        }
    }

    /// Rotates the hue, wrapping around the color wheel.
    pub fn rotate(self, degrees: f64) -> Self {
        HslColor {
            hue: (self.hue + degrees).rem_euclid(360.0),
            ..self
        }
    }
}

fn split_channels(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;

    Some((r, g, b))
}

/// Parses `#RRGGBB` (the `#` is optional, digits are case-insensitive).
///
/// This is the permissive entry point used by every engine computation:
/// anything that isn't six hex digits is read as black. Callers that need to
/// reject bad input should go through [`parse_hex`] first.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    let (r, g, b) = split_channels(hex).unwrap_or((0, 0, 0));
    Rgb::new(r, g, b)
}

/// Strict version of [`hex_to_rgb`].
pub fn parse_hex(hex: &str) -> Result<Rgb> {
    split_channels(hex)
        .map(|(r, g, b)| Rgb::new(r, g, b))
        .ok_or_else(|| Error::InvalidColorFormat(hex.to_string()))
}

/// Canonical lowercase `#rrggbb` form of a valid hex color.
pub fn normalize_hex(hex: &str) -> Result<String> {
    parse_hex(hex).map(rgb_to_hex_u8)
}

/// Rounds to the nearest integer and clamps into `0..=255`. NaN becomes 0.
pub(crate) fn to_channel(c: f64) -> u8 {
    if c.is_nan() {
        0
    } else {
        c.round().clamp(0.0, 255.0) as u8
    }
}

/// Rounds and clamps each channel, then formats as lowercase `#rrggbb`.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        to_channel(r),
        to_channel(g),
        to_channel(b)
    )
}

pub(crate) fn rgb_to_hex_u8(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}

pub fn rgb_to_hsl(rgb: Rgb) -> HslColor {
    let srgb: Srgb<f64> = rgb.into_format();
    let hsl: Hsl<palette::encoding::Srgb, f64> = Hsl::from_color(srgb);

    HslColor {
        hue: hsl.hue.into_positive_degrees() % 360.0,
        saturation: hsl.saturation * 100.0,
        lightness: hsl.lightness * 100.0,
    }
}

pub fn hsl_to_rgb(hsl: HslColor) -> Rgb {
    let hsl: Hsl<palette::encoding::Srgb, f64> = Hsl::new(
        hsl.hue.rem_euclid(360.0),
        (hsl.saturation / 100.0).clamp(0.0, 1.0),
        (hsl.lightness / 100.0).clamp(0.0, 1.0),
    );
    let srgb = Srgb::<f64>::from_color(hsl);

    Rgb::new(
        to_channel(srgb.red * 255.0),
        to_channel(srgb.green * 255.0),
        to_channel(srgb.blue * 255.0),
    )
}

pub fn hex_to_hsl(hex: &str) -> HslColor {
    rgb_to_hsl(hex_to_rgb(hex))
}

pub fn hsl_to_hex(hsl: HslColor) -> String {
    rgb_to_hex_u8(hsl_to_rgb(hsl))
}
