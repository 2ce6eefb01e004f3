//! Grid to PNG export
//!
//! The exported image is a direct projection of the cell matrix at scale 1:
//! every cell becomes a `cell_px × cell_px` block of its color, unpainted
//! cells take the configured empty-cell color.

use image::error::{LimitError, LimitErrorKind};
use image::{ImageError, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use tokio::task;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::state::grid::Grid;

/// Largest exported image edge in pixels
pub const MAX_EXPORT_SIDE: u32 = 16_384;

/// How a grid is turned into pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// Edge length of one cell in output pixels
    pub cell_px: u32,
    /// Color of unpainted cells
    pub empty_cell: Color,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            cell_px: 20,
            empty_cell: Color::WHITE,
        }
    }
}

/// Edge length of the exported image, if it fits under [`MAX_EXPORT_SIDE`]
fn export_side(grid_size: usize, cell_px: u32) -> Option<u32> {
    u32::try_from(grid_size)
        .ok()?
        .checked_mul(cell_px)
        .filter(|side| *side <= MAX_EXPORT_SIDE)
}

/// Rasterize the grid into an RGBA image of `size * cell_px` pixels square.
///
/// Fails with a dimension error when the image would exceed
/// [`MAX_EXPORT_SIDE`].
pub fn rasterize(grid: &Grid, opts: &ExportOptions) -> Result<RgbaImage> {
    let cell_px = opts.cell_px.max(1);
    let side = export_side(grid.size(), cell_px).ok_or_else(|| {
        log::warn!(
            "⚠️  Export too large: {} cells at {}px",
            grid.size(),
            cell_px
        );
        Error::Image(ImageError::Limits(LimitError::from_kind(
            LimitErrorKind::DimensionError,
        )))
    })?;

    // Transparent backdrop; every pixel is covered by a cell below
    let mut img = RgbaImage::from_pixel(side, side, Rgba([0, 0, 0, 0]));

    for ((row, col), fill) in grid.cells() {
        let pixel = Rgba(fill.unwrap_or(opts.empty_cell).to_rgba());
        let x0 = col as u32 * cell_px;
        let y0 = row as u32 * cell_px;
        for y in y0..y0 + cell_px {
            for x in x0..x0 + cell_px {
                img.put_pixel(x, y, pixel);
            }
        }
    }

    Ok(img)
}

/// Encode an image as PNG bytes
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Rasterize and encode in one go
pub fn export_png(grid: &Grid, opts: &ExportOptions) -> Result<Vec<u8>> {
    encode_png(&rasterize(grid, opts)?)
}

/// [`export_png`] on a blocking worker, so large grids don't stall the UI
pub async fn export_png_async(grid: Grid, opts: ExportOptions) -> Result<Vec<u8>> {
    task::spawn_blocking(move || export_png(&grid, &opts))
        .await
        .map_err(|e| Error::Task(e.to_string()))?
}
