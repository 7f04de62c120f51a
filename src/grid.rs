use rand::Rng;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }
}

/// Toroidal playing field: leaving one edge re-enters at the opposite edge.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSpace {
    size: GridSize,
}

impl GridSpace {
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        debug_assert!(size.width > 0 && size.height > 0);
        Self { size }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.size.total_cells()
    }

    /// Returns the start cell, `(width / 2, height / 2)`.
    #[must_use]
    pub fn center(&self) -> Position {
        Position {
            x: i32::from(self.size.width / 2),
            y: i32::from(self.size.height / 2),
        }
    }

    /// Steps one cell from `position` in `direction`, wrapping at the edges.
    #[must_use]
    pub fn wrap_move(&self, position: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        Position {
            x: position.x + dx,
            y: position.y + dy,
        }
        .wrapped(self.size)
    }

    /// Draws a uniformly random cell.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position {
            x: rng.gen_range(0..i32::from(self.size.width)),
            y: rng.gen_range(0..i32::from(self.size.height)),
        }
    }
}
