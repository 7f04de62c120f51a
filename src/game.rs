use log::{debug, info};

use crate::config::{GridSize, Palette};
use crate::draw::{Canvas, Drawable};
use crate::food::{Food, FoodSpawner};
use crate::grid::{GridSpace, Position};
use crate::input::GameInput;
use crate::snake::{MoveResult, Snake};

/// What happened during one tick, including the cells the renderer must clear.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TickReport {
    pub moved: MoveResult,
    pub ate_food: bool,
    pub reset: bool,
    /// Cells that were drawn before this tick and are no longer occupied.
    pub erased: Vec<Position>,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub tick_count: u64,
    pub reset_count: u64,
    grid: GridSpace,
    spawner: FoodSpawner,
}

impl GameState {
    /// Creates a state whose food placement is seeded from entropy.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_spawner(bounds, FoodSpawner::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_spawner(bounds, FoodSpawner::from_seed(seed))
    }

    fn with_spawner(bounds: GridSize, mut spawner: FoodSpawner) -> Self {
        let grid = GridSpace::new(bounds);
        let snake = Snake::new(grid.center());
        let food = spawner.place(&grid, &snake);

        Self {
            snake,
            food,
            tick_count: 0,
            reset_count: 0,
            grid,
            spawner,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &GridSpace {
        &self.grid
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.grid.size()
    }

    /// Applies one external input event. Quit is handled by the loop.
    pub fn apply_input(&mut self, input: GameInput) {
        if let GameInput::Direction(direction) = input {
            self.snake.request_direction(direction);
        }
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Order: commit direction, move, eat, then self-collision. A tick that
    /// both eats and collides grows first and then resets, losing the growth.
    pub fn tick(&mut self) -> TickReport {
        self.tick_count += 1;

        self.snake.update_direction();
        let moved = self.snake.move_forward(&self.grid);
        let mut erased: Vec<Position> = moved.removed_tail.into_iter().collect();

        let ate_food = moved.head == self.food.position;
        if ate_food {
            self.food = self.spawner.place(&self.grid, &self.snake);
            self.snake.grow();
            debug!(
                "food eaten at ({}, {}), target length now {}",
                moved.head.x,
                moved.head.y,
                self.snake.target_length()
            );
        }

        let reset = self.snake.head_overlaps_body();
        if reset {
            info!(
                "self-collision at ({}, {}) with length {}; resetting",
                moved.head.x,
                moved.head.y,
                self.snake.len()
            );
            erased.extend(self.snake.segments().copied());
            self.snake.reset(&self.grid);
            self.reset_count += 1;
        }

        TickReport {
            moved,
            ate_food,
            reset,
            erased,
        }
    }

    /// Draws the outcome of `report`: erasures first, then food, then the snake.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, report: &TickReport, palette: &Palette) {
        for position in &report.erased {
            canvas.erase_cell(*position);
        }

        self.food.view(palette.food_color()).draw(canvas);
        for segment in self.snake.segment_views(palette.snake_color()) {
            segment.draw(canvas);
        }
    }
}
