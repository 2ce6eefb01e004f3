//! Application configuration
//!
//! Settings are read once at startup from `config.json` in the user's
//! config directory:
//! - Linux: ~/.config/lego-grid/config.json
//! - macOS: ~/Library/Application Support/lego-grid/config.json
//! - Windows: %APPDATA%\lego-grid\config.json
//!
//! Every field is optional; a missing or unreadable file yields defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::color::Color;
use crate::error::Result;
use crate::state::grid::DEFAULT_GRID_SIZE;
use crate::state::library::{GalleryRepository, JsonFileRepository, SqliteRepository};

/// Directory name used under the platform config/data/cache roots
pub const APP_DIR: &str = "lego-grid";

/// Where the gallery is persisted
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GalleryBackend {
    /// One JSON array in `legoGallery.json`
    #[default]
    Json,
    /// Rows in `gallery.db`
    Sqlite,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Unsigned upload endpoint of the image host
    pub upload_endpoint: String,
    /// Unsigned upload preset sent with every upload
    pub upload_preset: String,
    pub gallery_backend: GalleryBackend,
    /// Grid size shown in the size input at startup
    pub default_grid_size: usize,
    /// Edge length of one cell in exported pixels
    pub cell_px: u32,
    /// Color unpainted cells are drawn and exported with
    pub empty_cell_color: String,
    /// Initial paint color
    pub paint_color: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload_endpoint: "https://api.cloudinary.com/v1_1/dntmpd3o4/upload".to_string(),
            upload_preset: "legoapp".to_string(),
            gallery_backend: GalleryBackend::Json,
            default_grid_size: DEFAULT_GRID_SIZE,
            cell_px: 20,
            empty_cell_color: "#ffffff".to_string(),
            paint_color: "#000000".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("⚠️  No config directory on this platform, using defaults");
                Self::default()
            }
        }
    }

    /// Load from an explicit file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("⚠️  Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("⚙️  Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("⚠️  Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Empty-cell color, white if the configured value is not a color
    pub fn empty_cell(&self) -> Color {
        Color::from_hex(&self.empty_cell_color).unwrap_or(Color::WHITE)
    }

    /// Starting paint color, black if the configured value is not a color
    pub fn initial_color(&self) -> Color {
        Color::from_hex(&self.paint_color).unwrap_or_default()
    }

    /// Open the configured gallery backend inside `data_dir`
    pub fn open_repository(&self, data_dir: &Path) -> Result<Box<dyn GalleryRepository>> {
        Ok(match self.gallery_backend {
            GalleryBackend::Json => Box::new(JsonFileRepository::in_dir(data_dir)),
            GalleryBackend::Sqlite => Box::new(SqliteRepository::open(&data_dir.join("gallery.db"))?),
        })
    }
}

/// `<config_dir>/lego-grid/config.json`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
}

/// `<data_dir>/lego-grid`, where the gallery lives
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}
