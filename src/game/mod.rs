//! Core game logic module for Snake
//!
//! This module contains all the game rules without any terminal or audio
//! backend. Time, randomness and sound reach it through narrow seams, so it
//! can be driven headless from tests.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod food;
pub mod state;
pub mod tick;

// Re-export commonly used types
pub use config::{GameConfig, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use direction::Direction;
pub use engine::{DirectionInput, Game, GameOverReason, Phase, TickOutcome};
pub use error::GameError;
pub use food::Food;
pub use state::{occupied, Position, Snake};
pub use tick::{Clock, MonotonicClock, TickScheduler};
