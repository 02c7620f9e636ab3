//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The board wraps around at every edge; running into your own body resets the snake.

pub mod action;
pub mod apple;
pub mod board;
pub mod config;
pub mod engine;
pub mod render_state;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use apple::Apple;
pub use board::Board;
pub use config::{CELL_SIZE, GameConfig};
pub use engine::{GameSession, TickOutcome};
pub use render_state::{RenderState, Sprite};
pub use state::{MoveOutcome, Position, Snake};
