use crate::output::{swatch, write_json};
use crate::Result;
use color_engine::{
    generate_palette, map_to_site_palette, normalize_hex, HarmonyType, PaletteStore, Role,
    SitePalette,
};
use owo_colors::{OwoColorize as _, Stream};
use serde::Serialize;

pub struct GenerateArgs<'a, W: std::io::Write, S: PaletteStore> {
    pub base: &'a str,
    pub harmony: HarmonyType,
    /// Persist the mapped palette through `store`.
    pub save: bool,
    pub store: &'a mut S,
    pub json: bool,
    pub stdout: &'a mut W,
}

#[derive(Debug, Serialize)]
struct GeneratedPalette {
    harmony: HarmonyType,
    colors: Vec<String>,
    palette: SitePalette,
}

pub fn run<W: std::io::Write, S: PaletteStore>(args: GenerateArgs<W, S>) -> Result<()> {
    let base = normalize_hex(args.base)?;
    let colors = generate_palette(&base, args.harmony);
    let palette = map_to_site_palette(&base, &colors);

    if args.save {
        args.store.save(&palette)?;
    }

    if args.json {
        return write_json(
            args.stdout,
            &GeneratedPalette {
                harmony: args.harmony,
                colors,
                palette,
            },
        );
    }

    writeln!(args.stdout, "{} harmony for {}", args.harmony, base)?;
    for color in &colors {
        writeln!(args.stdout, "  {} {}", swatch(color), color)?;
    }

    writeln!(args.stdout)?;
    writeln!(args.stdout, "Site palette")?;
    for role in Role::ALL {
        let hex = palette.get(role);
        writeln!(args.stdout, "  {:<10} {} {}", role.as_str(), swatch(hex), hex)?;
    }

    if args.save {
        writeln!(
            args.stdout,
            "Saved palette {}",
            "✓".if_supports_color(Stream::Stdout, |s| s.green())
        )?;
    }

    Ok(())
}
