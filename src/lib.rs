//! LEGO Grid
//!
//! A pixel-art grid editor: paint cells on an N×N grid, export the result
//! as PNG, upload it to an image host and keep a local gallery of past
//! creations.
//!
//! The crate is split so that everything except the window itself runs
//! headless:
//! - `state` - grid, paint controller, gallery store, status and save state
//! - `render` - PNG export and the thumbnail cache
//! - `upload` - image host client
//! - `ui` / `app` - the iced front end

pub mod app;
pub mod color;
pub mod config;
pub mod error;
pub mod render;
pub mod state;
pub mod ui;
pub mod upload;

pub use app::{LegoGrid, Message};
pub use color::Color;
pub use config::AppConfig;
pub use error::{Error, Result};
pub use render::png::{export_png, rasterize, ExportOptions};
pub use state::data::GalleryEntry;
pub use state::editor::{EditorState, PaintMode, PointerButtons};
pub use state::gallery::Gallery;
pub use state::grid::{parse_grid_size, Grid, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
pub use state::library::{GalleryRepository, JsonFileRepository, MemoryRepository, SqliteRepository};
pub use upload::{UploadClient, UploadConfig};
