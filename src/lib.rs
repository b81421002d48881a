//! SNAKE-O-TRON - Snake against a greedy computer rival
//!
//! This library provides:
//! - Core simulation: arena, snakes, food, AI and the tick state machine (game module)
//! - TUI rendering (render module)
//! - Keyboard input mapping (input module)
//! - Session metrics (metrics module)
//! - The interactive play loop and its fixed-timestep clock (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
