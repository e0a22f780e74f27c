use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use color_engine::{CvdVariant, HarmonyType, DEFAULT_MIN_RATIO};
use huecheck::commands::audit::{run as audit, AuditArgs};
use huecheck::commands::contrast::{run as contrast, ContrastArgs};
use huecheck::commands::generate::{run as generate, GenerateArgs};
use huecheck::commands::simulate::{run as simulate, SimulateArgs};
use huecheck::commands::suggest::{run as suggest, SuggestArgs};
use huecheck::store::{JsonFileStore, DEFAULT_PALETTE_FILE};

#[derive(Parser, Debug, Clone)]
#[command(about = "Huecheck, an accessible color palette toolkit", long_about = None)]
#[command(version, about, long_about = None)]
struct Args {
    #[clap(long, global = true, default_value = "auto")]
    color: Color,

    /// Print machine-readable JSON instead of text
    #[clap(long, global = true)]
    json: bool,

    /// Log search and store details to stderr
    #[clap(short, long, global = true)]
    verbose: bool,

    /// Palette file used by `generate --save` and `audit`
    #[clap(long, global = true, default_value = DEFAULT_PALETTE_FILE)]
    palette: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[clap(rename_all = "lowercase")]
enum Color {
    Always,
    Auto,
    Never,
}

impl Color {
    fn init(self) {
        // Set a supports-color override based on the variable passed in.
        match self {
            Color::Always => owo_colors::set_override(true),
            Color::Auto => {}
            Color::Never => owo_colors::set_override(false),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Contrast ratio and WCAG compliance of a foreground on a background
    Contrast {
        foreground: String,
        background: String,
        /// Treat the text as large (18pt, or 14pt bold)
        #[arg(long)]
        large: bool,
    },
    /// Find an accessible lightness for a color on one or more backgrounds
    Suggest {
        base: String,
        #[arg(required = true)]
        backgrounds: Vec<String>,
        /// Minimum ratio when a single background is given
        #[arg(long, default_value_t = DEFAULT_MIN_RATIO)]
        min_ratio: f64,
    },
    /// Show colors as seen with color vision deficiencies
    Simulate {
        colors: Vec<String>,
        #[arg(long)]
        variant: Option<CvdVariant>,
        /// Print SVG feColorMatrix filters for page previews
        #[arg(long)]
        svg: bool,
    },
    /// Generate a harmony palette from a seed color and map it to site roles
    Generate {
        base: String,
        #[arg(long, default_value = "complement")]
        harmony: HarmonyType,
        /// Save the site palette to the palette file
        #[arg(long)]
        save: bool,
    },
    /// Check every contrast pair of the saved palette
    Audit {
        /// Apply the suggested colors and save the palette
        #[arg(long)]
        fix: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_help<W: std::io::Write>(out: &mut W) -> std::io::Result<()> {
    Args::command().write_help(out)
}

fn main() {
    let args = Args::parse();
    args.color.init();
    init_tracing(args.verbose);

    let mut stdout = std::io::stdout();
    let mut store = JsonFileStore::new(&args.palette);
    let json = args.json;

    let result = match args.command {
        Some(Commands::Contrast {
            foreground,
            background,
            large,
        }) => contrast(ContrastArgs {
            foreground: &foreground,
            background: &background,
            large_text: large,
            json,
            stdout: &mut stdout,
        }),
        Some(Commands::Suggest {
            base,
            backgrounds,
            min_ratio,
        }) => suggest(SuggestArgs {
            base: &base,
            backgrounds: &backgrounds,
            min_ratio,
            json,
            stdout: &mut stdout,
        }),
        Some(Commands::Simulate {
            colors,
            variant,
            svg,
        }) => simulate(SimulateArgs {
            colors: &colors,
            variant,
            svg,
            json,
            stdout: &mut stdout,
        }),
        Some(Commands::Generate {
            base,
            harmony,
            save,
        }) => generate(GenerateArgs {
            base: &base,
            harmony,
            save,
            store: &mut store,
            json,
            stdout: &mut stdout,
        }),
        Some(Commands::Audit { fix }) => audit(AuditArgs {
            store: &mut store,
            fix,
            json,
            stdout: &mut stdout,
        }),
        None => {
            if let Err(e) = print_help(&mut stdout) {
                eprintln!("{}", e);
            }
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, palette = %store.path().display(), "command failed");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn help_lists_every_command() {
        let mut out = Vec::new();
        print_help(&mut out).unwrap();
        let help = String::from_utf8(out).unwrap();

        for command in ["contrast", "suggest", "simulate", "generate", "audit"] {
            assert!(help.contains(command), "{command} missing from:\n{help}");
        }
    }
}
