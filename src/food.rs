use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grid::{GridSpace, Position};
use crate::snake::Snake;

/// Food item currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

/// Places food on free cells using an injectable random source.
#[derive(Debug, Clone)]
pub struct FoodSpawner<R = StdRng> {
    rng: R,
}

impl FoodSpawner<StdRng> {
    /// Creates a spawner with a reproducible placement sequence.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> FoodSpawner<R> {
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Places food on a cell the snake does not occupy.
    ///
    /// Never returns when the snake covers the whole grid.
    #[must_use]
    pub fn place(&mut self, grid: &GridSpace, snake: &Snake) -> Food {
        if snake.len() >= grid.total_cells() {
            warn!(
                "placing food on a full {}x{} board; this will not terminate",
                grid.size().width,
                grid.size().height
            );
        }

        let position = spawn_position(&mut self.rng, grid, |cell| snake.occupies(cell));
        debug!("food placed at ({}, {})", position.x, position.y);
        Food::new(position)
    }
}

/// Rejection-samples random cells until one is not occupied.
#[must_use]
pub fn spawn_position<R, F>(rng: &mut R, grid: &GridSpace, is_occupied: F) -> Position
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    loop {
        let candidate = grid.random_cell(rng);
        if !is_occupied(candidate) {
            return candidate;
        }
    }
}
