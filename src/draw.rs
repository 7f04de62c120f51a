use std::io;

use ratatui::style::Color;

use crate::food::Food;
use crate::grid::Position;
use crate::snake::Snake;

/// Cell-level drawing surface.
///
/// Drawn cells stay visible until erased; `present` pushes the surface to
/// the display once per tick.
pub trait Canvas {
    fn draw_cell(&mut self, position: Position, color: Color);

    fn erase_cell(&mut self, position: Position);

    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Anything that occupies one grid cell with a solid color.
pub trait Drawable {
    fn position(&self) -> Position;

    fn color(&self) -> Color;

    fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.draw_cell(self.position(), self.color());
    }
}

/// One snake segment as seen by the renderer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SegmentView {
    position: Position,
    color: Color,
}

impl Drawable for SegmentView {
    fn position(&self) -> Position {
        self.position
    }

    fn color(&self) -> Color {
        self.color
    }
}

/// The food item as seen by the renderer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FoodView {
    position: Position,
    color: Color,
}

impl Drawable for FoodView {
    fn position(&self) -> Position {
        self.position
    }

    fn color(&self) -> Color {
        self.color
    }
}

impl Snake {
    /// Returns drawable views of every segment, tail first.
    pub fn segment_views(&self, color: Color) -> impl Iterator<Item = SegmentView> + '_ {
        self.segments().map(move |position| SegmentView {
            position: *position,
            color,
        })
    }
}

impl Food {
    #[must_use]
    pub fn view(&self, color: Color) -> FoodView {
        FoodView {
            position: self.position,
            color,
        }
    }
}
