//! The paintable cell matrix
//!
//! A grid is a square, row-major matrix of optional colors. `None` is the
//! unpainted state; rendering (canvas or PNG export) is a projection of this
//! matrix and never the other way round.

use crate::color::Color;

/// Grid size used when the size input is absent or unusable
pub const DEFAULT_GRID_SIZE: usize = 16;

/// Largest accepted grid size; bigger requests are clamped to it
pub const MAX_GRID_SIZE: usize = 256;

/// Parse the grid-size input leniently.
///
/// Leading whitespace and an optional sign are accepted, then as many
/// decimal digits as are present ("12px" reads as 12). Anything that does
/// not produce a positive number falls back to [`DEFAULT_GRID_SIZE`].
pub fn parse_grid_size(input: &str) -> usize {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = {
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        &digits[..end]
    };

    if negative || digits.is_empty() {
        return DEFAULT_GRID_SIZE;
    }

    // Leading zeros don't change the value; past that, too many digits
    // can only mean "too big"
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return DEFAULT_GRID_SIZE;
    }
    match digits.parse::<usize>() {
        Ok(n) => n.min(MAX_GRID_SIZE),
        Err(_) => MAX_GRID_SIZE,
    }
}

/// An N×N matrix of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Grid {
    /// Create a fresh, fully unpainted grid.
    ///
    /// A size of zero is replaced by [`DEFAULT_GRID_SIZE`], anything above
    /// [`MAX_GRID_SIZE`] is clamped.
    pub fn new(size: usize) -> Self {
        let size = match size {
            0 => DEFAULT_GRID_SIZE,
            n => n.min(MAX_GRID_SIZE),
        };
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Number of cells along one side
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (size²)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }

    /// Color of a cell, `None` when unpainted or out of range
    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        self.index(row, col).and_then(|i| self.cells[i])
    }

    /// Set or reset one cell. Returns `false` for out-of-range addresses.
    pub fn set(&mut self, row: usize, col: usize, fill: Option<Color>) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = fill;
                true
            }
            None => false,
        }
    }

    /// Reset every cell to unpainted
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    /// Iterate over `((row, col), fill)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Option<Color>)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, fill)| ((i / size, i % size), *fill))
    }

    /// Number of painted cells
    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}
