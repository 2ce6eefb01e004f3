//! State management module
//!
//! This module holds all headless application state:
//! - The cell matrix (grid.rs)
//! - Paint/erase mode and pointer handling (editor.rs)
//! - Gallery entries and persistence backends (data.rs, library.rs)
//! - The gallery store the UI renders from (gallery.rs)
//! - Status line and save pipeline state (status.rs, save.rs)

pub mod data;
pub mod editor;
pub mod gallery;
pub mod grid;
pub mod library;
pub mod save;
pub mod status;
