//! Image output module
//!
//! This module handles:
//! - Rasterizing the grid and encoding PNG (png.rs)
//! - Caching gallery thumbnails on disk (thumbnail.rs)

pub mod png;
pub mod thumbnail;
