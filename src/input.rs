use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit step `(dx, dy)`; y grows downwards.
    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Non-blocking source of game input.
pub trait InputSource {
    /// Returns the next pending input, or `None` once the queue is empty.
    fn poll_input(&mut self) -> io::Result<Option<GameInput>>;
}

/// Maps one terminal key event to a game input.
#[must_use]
pub fn map_key_event(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Direction::Up,
        KeyCode::Down | KeyCode::Char('s' | 'S') => Direction::Down,
        KeyCode::Left | KeyCode::Char('a' | 'A') => Direction::Left,
        KeyCode::Right | KeyCode::Char('d' | 'D') => Direction::Right,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => return Some(GameInput::Quit),
        _ => return None,
    };

    Some(GameInput::Direction(direction))
}

/// Reads key presses from the crossterm event queue without blocking.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TerminalInput {
    fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key_event(key) {
                    return Ok(Some(input));
                }
            }
        }

        Ok(None)
    }
}
