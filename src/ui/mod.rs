//! iced widgets for the editor window
//!
//! - `canvas.rs` - the paintable grid
//! - `gallery.rs` - saved-art cards

pub mod canvas;
pub mod gallery;

pub use canvas::GridCanvas;
pub use gallery::gallery_view;
