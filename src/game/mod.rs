//! Core simulation for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies:
//! the grid model, both snakes, food placement, the greedy computer player and the
//! tick state machine that ties them together.

pub mod ai;
pub mod arena;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use ai::{AiSnake, Surroundings};
pub use arena::{ArenaSize, Wall};
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{AdvanceResult, GameEngine, TickInfo};
pub use error::GameError;
pub use state::{GameState, Outcome, Position, Rgb, Snake};
