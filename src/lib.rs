pub mod clock;
pub mod config;
pub mod draw;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod runtime;
pub mod snake;
