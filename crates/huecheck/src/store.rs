use color_engine::{PaletteStore, SitePalette};
use std::path::{Path, PathBuf};

pub const DEFAULT_PALETTE_FILE: &str = "huecheck.json";

/// Keeps the palette as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn store_error(path: &Path, err: impl std::fmt::Display) -> color_engine::Error {
    color_engine::Error::Store(format!("{}: {}", path.display(), err))
}

impl PaletteStore for JsonFileStore {
    fn load(&self) -> color_engine::Result<Option<SitePalette>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store_error(&self.path, e)),
        };

        let palette: SitePalette =
            serde_json::from_str(&contents).map_err(|e| store_error(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), "loaded palette");

        palette.normalized().map(Some)
    }

    fn save(&mut self, palette: &SitePalette) -> color_engine::Result<()> {
        let json = serde_json::to_string_pretty(palette).map_err(|e| store_error(&self.path, e))?;

        std::fs::write(&self.path, json + "\n").map_err(|e| store_error(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), "saved palette");

        Ok(())
    }
}
