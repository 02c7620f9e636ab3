//! The Snake - a terminal Snake game on a wrap-around grid
//!
//! This library provides:
//! - Core game logic: board, snake, apple and the tick loop (game module)
//! - High-score storage (persistence module)
//! - TUI rendering and keyboard input (render and input modules)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
