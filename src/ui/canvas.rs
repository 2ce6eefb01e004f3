use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Path, Program, Stroke};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use crate::app::Message;
use crate::state::editor::PointerButtons;
use crate::state::grid::Grid;

/// Canvas view of the cell matrix
///
/// Draws the grid as a pure projection of [`Grid`] and turns pointer
/// activity into cell-addressed messages. Painting itself happens in the
/// app's update, through the editor state.
pub struct GridCanvas<'a> {
    pub grid: &'a Grid,
    /// Color unpainted cells are drawn with
    pub empty_cell: Color,
}

impl GridCanvas<'_> {
    /// Edge length of one cell for the given bounds
    fn cell_size(&self, bounds: Size) -> f32 {
        bounds.width.min(bounds.height) / self.grid.size() as f32
    }

    /// Cell under a point relative to the canvas origin
    fn cell_at(&self, bounds: Size, position: Point) -> Option<(usize, usize)> {
        let cell = self.cell_size(bounds);
        if cell <= 0.0 || position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let col = (position.x / cell) as usize;
        let row = (position.y / cell) as usize;
        (row < self.grid.size() && col < self.grid.size()).then_some((row, col))
    }
}

impl Program<Message> for GridCanvas<'_> {
    type State = PointerState;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let cell = self.cell_size(bounds.size());
        let side = cell * self.grid.size() as f32;

        for ((row, col), fill) in self.grid.cells() {
            let color = fill.map(Color::from).unwrap_or(self.empty_cell);
            frame.fill_rectangle(
                Point::new(col as f32 * cell, row as f32 * cell),
                Size::new(cell, cell),
                color,
            );
        }

        // Cell borders
        let mut lines = canvas::path::Builder::new();
        for i in 0..=self.grid.size() {
            let offset = i as f32 * cell;
            lines.move_to(Point::new(offset, 0.0));
            lines.line_to(Point::new(offset, side));
            lines.move_to(Point::new(0.0, offset));
            lines.line_to(Point::new(side, offset));
        }
        let lines: Path = lines.build();
        frame.stroke(
            &lines,
            Stroke::default()
                .with_color(Color::from_rgba(0.0, 0.0, 0.0, 0.12))
                .with_width(1.0),
        );

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        let canvas::Event::Mouse(event) = event else {
            return (canvas::event::Status::Ignored, None);
        };

        match event {
            mouse::Event::ButtonPressed(button) => {
                // Presses elsewhere in the window count too, so a drag that
                // starts off the grid paints once it arrives
                state.held.insert(button_bit(button));
                let Some(position) = cursor.position_in(bounds) else {
                    state.last_cell = None;
                    return (canvas::event::Status::Ignored, None);
                };

                let cell = self.cell_at(bounds.size(), position);
                state.last_cell = cell;

                // Only the primary button activates a cell directly
                if let (mouse::Button::Left, Some((row, col))) = (button, cell) {
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::CellClicked { row, col }),
                    );
                }
                (canvas::event::Status::Captured, None)
            }

            mouse::Event::ButtonReleased(button) => {
                // Tracked even outside the canvas so a release elsewhere
                // doesn't leave a button stuck down
                state.held.remove(button_bit(button));
                (canvas::event::Status::Ignored, None)
            }

            mouse::Event::CursorMoved { .. } => {
                let cell = cursor
                    .position_in(bounds)
                    .and_then(|p| self.cell_at(bounds.size(), p));

                if cell == state.last_cell {
                    return (canvas::event::Status::Ignored, None);
                }
                state.last_cell = cell;

                match cell {
                    Some((row, col)) if state.held != PointerButtons::NONE => (
                        canvas::event::Status::Captured,
                        Some(Message::CellEntered {
                            row,
                            col,
                            buttons: state.held,
                        }),
                    ),
                    _ => (canvas::event::Status::Ignored, None),
                }
            }

            mouse::Event::CursorLeft => {
                state.last_cell = None;
                (canvas::event::Status::Ignored, None)
            }

            _ => (canvas::event::Status::Ignored, None),
        }
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

fn button_bit(button: mouse::Button) -> PointerButtons {
    match button {
        mouse::Button::Left => PointerButtons::PRIMARY,
        mouse::Button::Right => PointerButtons::SECONDARY,
        mouse::Button::Middle => PointerButtons::AUXILIARY,
        _ => PointerButtons::NONE,
    }
}

/// Pointer tracking between events
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    /// Buttons currently held down
    pub held: PointerButtons,
    /// Cell the pointer was last over
    pub last_cell: Option<(usize, usize)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_maps_points_to_cells() {
        let grid = Grid::new(4);
        let view = GridCanvas {
            grid: &grid,
            empty_cell: Color::WHITE,
        };
        let bounds = Size::new(400.0, 400.0);

        assert_eq!(view.cell_at(bounds, Point::new(5.0, 5.0)), Some((0, 0)));
        assert_eq!(view.cell_at(bounds, Point::new(399.0, 399.0)), Some((3, 3)));
        assert_eq!(view.cell_at(bounds, Point::new(150.0, 250.0)), Some((2, 1)));
        assert_eq!(view.cell_at(bounds, Point::new(400.0, 10.0)), None);
        assert_eq!(view.cell_at(bounds, Point::new(-1.0, 10.0)), None);
    }

    #[test]
    fn test_non_square_bounds_use_shorter_side() {
        let grid = Grid::new(2);
        let view = GridCanvas {
            grid: &grid,
            empty_cell: Color::WHITE,
        };
        let bounds = Size::new(300.0, 100.0);
        assert_eq!(view.cell_at(bounds, Point::new(60.0, 60.0)), Some((1, 1)));
        assert_eq!(view.cell_at(bounds, Point::new(150.0, 10.0)), None);
    }

    fn bounds() -> Rectangle {
        Rectangle::new(Point::ORIGIN, Size::new(400.0, 400.0))
    }

    fn at(x: f32, y: f32) -> Cursor {
        Cursor::Available(Point::new(x, y))
    }

    fn press(button: mouse::Button) -> canvas::Event {
        canvas::Event::Mouse(mouse::Event::ButtonPressed(button))
    }

    fn moved(x: f32, y: f32) -> canvas::Event {
        canvas::Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(x, y),
        })
    }

    #[test]
    fn test_press_then_drag_emits_cell_messages() {
        let grid = Grid::new(4);
        let view = GridCanvas {
            grid: &grid,
            empty_cell: Color::WHITE,
        };
        let mut state = PointerState::default();

        let (status, message) =
            view.update(&mut state, press(mouse::Button::Left), bounds(), at(5.0, 5.0));
        assert_eq!(status, canvas::event::Status::Captured);
        assert!(matches!(message, Some(Message::CellClicked { row: 0, col: 0 })));
        assert_eq!(state.held, PointerButtons::PRIMARY);

        // Moving inside the same cell is not a new entry
        let (_, message) = view.update(&mut state, moved(50.0, 50.0), bounds(), at(50.0, 50.0));
        assert!(message.is_none());

        let (_, message) =
            view.update(&mut state, moved(150.0, 50.0), bounds(), at(150.0, 50.0));
        assert!(matches!(
            message,
            Some(Message::CellEntered { row: 0, col: 1, buttons }) if buttons == PointerButtons::PRIMARY
        ));

        let release = canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));
        let _ = view.update(&mut state, release, bounds(), at(150.0, 50.0));
        assert_eq!(state.held, PointerButtons::NONE);

        let (_, message) =
            view.update(&mut state, moved(250.0, 50.0), bounds(), at(250.0, 50.0));
        assert!(message.is_none());
    }

    #[test]
    fn test_drag_started_off_the_grid_paints_on_entry() {
        let grid = Grid::new(4);
        let view = GridCanvas {
            grid: &grid,
            empty_cell: Color::WHITE,
        };
        let mut state = PointerState::default();

        let (status, message) =
            view.update(&mut state, press(mouse::Button::Left), bounds(), at(-20.0, 5.0));
        assert_eq!(status, canvas::event::Status::Ignored);
        assert!(message.is_none());
        assert_eq!(state.held, PointerButtons::PRIMARY);

        let (_, message) = view.update(&mut state, moved(5.0, 5.0), bounds(), at(5.0, 5.0));
        assert!(matches!(
            message,
            Some(Message::CellEntered { row: 0, col: 0, buttons }) if buttons == PointerButtons::PRIMARY
        ));
    }

    #[test]
    fn test_secondary_press_is_not_a_click() {
        let grid = Grid::new(4);
        let view = GridCanvas {
            grid: &grid,
            empty_cell: Color::WHITE,
        };
        let mut state = PointerState::default();

        let (_, message) =
            view.update(&mut state, press(mouse::Button::Right), bounds(), at(5.0, 5.0));
        assert!(message.is_none());
        assert_eq!(state.held, PointerButtons::SECONDARY);
    }

    #[test]
    fn test_button_bits() {
        assert_eq!(button_bit(mouse::Button::Left), PointerButtons::PRIMARY);
        assert_eq!(button_bit(mouse::Button::Right), PointerButtons::SECONDARY);
        assert_eq!(button_bit(mouse::Button::Middle), PointerButtons::AUXILIARY);
    }
}
