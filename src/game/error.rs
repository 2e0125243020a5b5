use thiserror::Error;

use super::state::Position;

/// Errors raised by the core game logic.
///
/// Game over is not an error; it is reported through
/// [`TickOutcome`](super::TickOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid snake layout: {0}")]
    InvalidLayout(String),

    #[error("cell ({}, {}) is off the board or under the snake", .0.x, .0.y)]
    CellUnavailable(Position),

    #[error("no free cell left on the {grid_size}x{grid_size} board")]
    NoFreeCell { grid_size: i32 },
}
