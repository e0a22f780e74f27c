//! Accessible color engine.
//!
//! Pure functions over `#rrggbb` strings: color space conversion, WCAG
//! contrast and compliance, color vision deficiency simulation, accessible
//! color search and harmony palette generation. Nothing here keeps state
//! between calls; palettes are owned by the caller and persisted through a
//! [`PaletteStore`] the caller provides.

use thiserror::Error;

pub mod contrast;
pub mod conversion;
pub mod cvd;
pub mod harmony;
pub mod search;
pub mod site_palette;

pub use contrast::{
    check_contrast, contrast_ratio, relative_luminance, wcag_compliance, Compliance,
    ContrastResult,
};
pub use conversion::{
    hex_to_hsl, hex_to_rgb, hsl_to_hex, normalize_hex, parse_hex, rgb_to_hex, HslColor, Rgb,
};
pub use cvd::{
    apply_color_blind_matrix, simulate, simulate_palette, svg_filter_defs, CvdVariant,
    CVD_MATRICES,
};
pub use harmony::{generate_palette, map_to_site_palette, HarmonyType};
pub use search::{
    suggest_best_multi_contrast_color, suggest_closest_accessible_color, MultiSuggestion,
    Suggestion, DEFAULT_MIN_RATIO,
};
pub use site_palette::{
    audit_palette, repair_palette, suggest_role_color, MemoryStore, PairCheck, PaletteStore,
    Role, SitePalette,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid color `{0}`, expected #RRGGBB")]
    InvalidColorFormat(String),
    #[error("Unknown harmony type `{0}`")]
    UnknownHarmony(String),
    #[error("Unknown color vision deficiency `{0}`")]
    UnknownVariant(String),
    #[error("Palette store error: {0}")]
    Store(String),
}
