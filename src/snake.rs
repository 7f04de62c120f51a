use std::collections::VecDeque;

use crate::grid::{GridSpace, Position};
use crate::input::{Direction, direction_change_is_valid};

/// Outcome of one movement step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MoveResult {
    /// Head position after the step.
    pub head: Position,
    /// Tail segment dropped by the step, if the snake was not growing.
    pub removed_tail: Option<Position>,
}

/// Mutable snake state and direction buffering behavior.
///
/// The body is stored oldest-first, so the head is the last segment.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
    target_length: usize,
}

impl Snake {
    /// Creates a one-cell snake at `start` heading right.
    #[must_use]
    pub fn new(start: Position) -> Self {
        Self {
            body: VecDeque::from([start]),
            direction: Direction::Right,
            pending_direction: None,
            target_length: 1,
        }
    }

    /// Creates a snake from explicit body segments (tail first, head last).
    ///
    /// The target length matches the segment count, so the next move keeps
    /// the length stable.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        let target_length = segments.len();

        Self {
            body: VecDeque::from(segments),
            direction,
            pending_direction: None,
            target_length,
        }
    }

    /// Buffers a direction for the next commit.
    ///
    /// Requests that reverse the committed direction are dropped silently.
    /// Later requests overwrite earlier ones until [`Snake::update_direction`].
    pub fn request_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.pending_direction = Some(direction);
        }
    }

    /// Commits the buffered direction, if any.
    pub fn update_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    /// Advances the head one cell, dropping the tail unless growth is pending.
    pub fn move_forward(&mut self, grid: &GridSpace) -> MoveResult {
        let head = grid.wrap_move(self.head(), self.direction);

        let removed_tail = if self.body.len() >= self.target_length {
            self.body.pop_front()
        } else {
            None
        };
        self.body.push_back(head);

        MoveResult { head, removed_tail }
    }

    /// Raises the target length by one; the body catches up on the next move.
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body
            .iter()
            .rev()
            .skip(1)
            .any(|segment| *segment == head)
    }

    /// Restores the single-segment starting snake at the grid center.
    pub fn reset(&mut self, grid: &GridSpace) {
        self.body.clear();
        self.body.push_back(grid.center());
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.target_length = 1;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Returns the committed movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Iterates over body segments from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
