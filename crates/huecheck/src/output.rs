use color_engine::{hex_to_rgb, Compliance};
use owo_colors::{OwoColorize as _, Stream};
use serde::Serialize;

/// A two-character block painted in `hex`, when the terminal allows it.
pub(crate) fn swatch(hex: &str) -> String {
    let rgb = hex_to_rgb(hex);

    "██"
        .if_supports_color(Stream::Stdout, |s| s.truecolor(rgb.red, rgb.green, rgb.blue))
        .to_string()
}

pub(crate) fn compliance_label(compliance: Compliance) -> String {
    let label = compliance.as_str();

    if compliance.passes() {
        label
            .if_supports_color(Stream::Stdout, |s| s.green())
            .to_string()
    } else {
        label
            .if_supports_color(Stream::Stdout, |s| s.red())
            .to_string()
    }
}

pub(crate) fn write_json<W: std::io::Write, T: Serialize>(
    stdout: &mut W,
    value: &T,
) -> crate::Result<()> {
    serde_json::to_writer_pretty(&mut *stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
