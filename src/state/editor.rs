//! Paint controller state
//!
//! The current color and the paint/erase mode are explicit fields of
//! [`EditorState`], so painting can be driven (and tested) against a bare
//! [`Grid`] without any window.

use crate::color::Color;
use crate::state::grid::Grid;

/// Whether a pointer activation paints or erases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintMode {
    #[default]
    Paint,
    Erase,
}

/// Set of pointer buttons currently held, as a bitmask
///
/// Bit values follow the usual pointer-event convention: 1 = primary,
/// 2 = secondary, 4 = auxiliary (middle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerButtons(u8);

impl PointerButtons {
    pub const NONE: PointerButtons = PointerButtons(0);
    pub const PRIMARY: PointerButtons = PointerButtons(1);
    pub const SECONDARY: PointerButtons = PointerButtons(2);
    pub const AUXILIARY: PointerButtons = PointerButtons(4);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn insert(&mut self, other: PointerButtons) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: PointerButtons) {
        self.0 &= !other.0;
    }

    pub fn contains(self, other: PointerButtons) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for PointerButtons {
    type Output = PointerButtons;

    fn bitor(self, rhs: Self) -> Self::Output {
        PointerButtons(self.0 | rhs.0)
    }
}

/// Transient editor state owned by the UI shell
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    color: Color,
    mode: PaintMode,
}

impl EditorState {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            mode: PaintMode::Paint,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    pub fn is_erasing(&self) -> bool {
        self.mode == PaintMode::Erase
    }

    /// Pick a new paint color. Always leaves erase mode.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.mode = PaintMode::Paint;
    }

    /// Flip between paint and erase; returns `true` if erase is now active
    pub fn toggle_erase(&mut self) -> bool {
        self.mode = match self.mode {
            PaintMode::Paint => PaintMode::Erase,
            PaintMode::Erase => PaintMode::Paint,
        };
        self.is_erasing()
    }

    /// Back to paint mode (used when the grid is recreated)
    pub fn reset_mode(&mut self) {
        self.mode = PaintMode::Paint;
    }

    /// What a cell becomes under the current mode
    pub fn fill(&self) -> Option<Color> {
        match self.mode {
            PaintMode::Paint => Some(self.color),
            PaintMode::Erase => None,
        }
    }

    /// Direct activation of a single cell
    pub fn click(&self, grid: &mut Grid, row: usize, col: usize) -> bool {
        log::trace!("paint ({}, {}) -> {:?}", row, col, self.fill());
        grid.set(row, col, self.fill())
    }

    /// Pointer entered a cell while `buttons` were held.
    ///
    /// Only the primary button on its own drag-paints; any other
    /// combination (including primary plus secondary) is ignored.
    pub fn hover(&self, grid: &mut Grid, row: usize, col: usize, buttons: PointerButtons) -> bool {
        if buttons != PointerButtons::PRIMARY {
            return false;
        }
        self.click(grid, row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_then_erase_restores_unpainted() {
        let mut grid = Grid::new(4);
        let mut editor = EditorState::new(Color::RED);

        editor.click(&mut grid, 1, 1);
        assert_eq!(grid.get(1, 1), Some(Color::RED));

        assert!(editor.toggle_erase());
        editor.click(&mut grid, 1, 1);
        assert_eq!(grid.get(1, 1), None);
        assert_eq!(grid, Grid::new(4));
    }

    #[test]
    fn test_latest_color_wins() {
        let mut grid = Grid::new(4);
        let mut editor = EditorState::new(Color::RED);
        editor.click(&mut grid, 0, 0);
        editor.set_color(Color::BLACK);
        editor.click(&mut grid, 0, 0);
        assert_eq!(grid.get(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_drag_requires_primary_only() {
        let mut grid = Grid::new(4);
        let editor = EditorState::new(Color::RED);

        let rejected = [
            PointerButtons::NONE,
            PointerButtons::SECONDARY,
            PointerButtons::AUXILIARY,
            PointerButtons::PRIMARY | PointerButtons::SECONDARY,
            PointerButtons::PRIMARY | PointerButtons::AUXILIARY,
        ];
        for buttons in rejected {
            assert!(!editor.hover(&mut grid, 2, 2, buttons));
        }
        assert_eq!(grid.painted_count(), 0);

        assert!(editor.hover(&mut grid, 2, 2, PointerButtons::PRIMARY));
        assert_eq!(grid.get(2, 2), Some(Color::RED));
    }

    #[test]
    fn test_color_change_cancels_erase() {
        let mut editor = EditorState::new(Color::RED);
        editor.toggle_erase();
        assert!(editor.is_erasing());
        editor.set_color(Color::WHITE);
        assert!(!editor.is_erasing());
        assert_eq!(editor.fill(), Some(Color::WHITE));
    }

    #[test]
    fn test_toggle_twice_returns_to_paint() {
        let mut editor = EditorState::default();
        assert!(editor.toggle_erase());
        assert!(!editor.toggle_erase());
        assert_eq!(editor.mode(), PaintMode::Paint);
    }

    #[test]
    fn test_button_mask_ops() {
        let mut held = PointerButtons::NONE;
        held.insert(PointerButtons::PRIMARY);
        held.insert(PointerButtons::AUXILIARY);
        assert!(held.contains(PointerButtons::PRIMARY));
        assert_eq!(held.bits(), 5);
        held.remove(PointerButtons::AUXILIARY);
        assert_eq!(held, PointerButtons::PRIMARY);
    }
}
