use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::direction::Direction;
use super::state::Position;

/// Smallest board the rules can play on
pub const MIN_GRID_SIZE: i32 = 2;
/// Largest board; two terminal columns per cell must fit a `u16` width
pub const MAX_GRID_SIZE: i32 = 255;

/// Configuration for the game
///
/// Every tunable the rules depend on lives here; the game never reads
/// global state. Missing fields in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells along each side of the square board
    pub grid_size: i32,
    /// Body the snake starts with and returns to after game over, head first
    pub initial_body: Vec<Position>,
    /// Direction the snake starts moving in
    pub initial_direction: Direction,

    /// Seconds between ticks at the start of a session
    pub initial_pace: f64,
    /// Multiplier applied to the pace every time food is eaten
    pub pace_factor: f64,
    /// Lower bound for the pace
    pub min_pace: f64,

    /// Random draws tried before falling back to a scan of the free cells
    pub food_max_attempts: u32,

    /// Frames drawn per second by the terminal front end
    pub frame_rate: u32,
    /// Seed for food placement; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Whether audio cues are emitted
    pub audio_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 25,
            initial_body: vec![
                Position::new(6, 9),
                Position::new(5, 9),
                Position::new(4, 9),
            ],
            initial_direction: Direction::Right,
            initial_pace: 0.2,
            pace_factor: 0.95,
            min_pace: 0.05,
            food_max_attempts: 64,
            frame_rate: 60,
            seed: None,
            audio_enabled: true,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(grid_size: i32) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    ///
    /// The default starting body still fits on it.
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        (self.grid_size.max(0) as usize).pow(2)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        (0..self.grid_size).contains(&pos.x) && (0..self.grid_size).contains(&pos.y)
    }

    /// Validate configuration parameters
    ///
    /// Returns `Err` with a message describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(format!(
                "grid_size must be between {} and {}, got {}",
                MIN_GRID_SIZE, MAX_GRID_SIZE, self.grid_size
            ));
        }

        self.check_layout(&self.initial_body, self.initial_direction)
            .map_err(|err| format!("initial_body: {err}"))?;

        if !(self.initial_pace > 0.0) {
            return Err(format!(
                "initial_pace must be positive, got {}",
                self.initial_pace
            ));
        }

        if !(self.min_pace > 0.0) {
            return Err(format!("min_pace must be positive, got {}", self.min_pace));
        }

        if self.min_pace > self.initial_pace {
            return Err(format!(
                "min_pace ({}) cannot exceed initial_pace ({})",
                self.min_pace, self.initial_pace
            ));
        }

        if !(self.pace_factor > 0.0 && self.pace_factor <= 1.0) {
            return Err(format!(
                "pace_factor must be in (0, 1], got {}",
                self.pace_factor
            ));
        }

        if self.food_max_attempts == 0 {
            return Err("food_max_attempts must be at least 1".to_string());
        }

        if self.frame_rate == 0 {
            return Err("frame_rate must be at least 1".to_string());
        }

        Ok(())
    }

    /// Check that `body` is a snake that fits this board heading `direction`
    ///
    /// The body must be non-empty, on the board, made of distinct cells that
    /// touch edge to edge, leave at least one cell free, and `direction`
    /// must not lead the head into the second cell.
    pub fn check_layout(&self, body: &[Position], direction: Direction) -> Result<(), String> {
        if body.is_empty() {
            return Err("body must contain at least one cell".to_string());
        }

        if let Some(pos) = body.iter().find(|pos| !self.in_bounds(**pos)) {
            return Err(format!(
                "cell ({}, {}) is outside the {}x{} board",
                pos.x, pos.y, self.grid_size, self.grid_size
            ));
        }

        let unique: HashSet<_> = body.iter().collect();
        if unique.len() != body.len() {
            return Err("body cells must be distinct".to_string());
        }

        if body.len() >= self.cell_count() {
            return Err(format!(
                "{} cells leave no room for food on a {}x{} board",
                body.len(),
                self.grid_size,
                self.grid_size
            ));
        }

        for pair in body.windows(2) {
            if Direction::from_delta(pair[0].x - pair[1].x, pair[0].y - pair[1].y).is_none() {
                return Err(format!(
                    "cells ({}, {}) and ({}, {}) are not adjacent",
                    pair[0].x, pair[0].y, pair[1].x, pair[1].y
                ));
            }
        }

        if let [head, neck, ..] = body {
            if head.moved_in_direction(direction) == *neck {
                return Err(format!("direction {direction:?} points into the second body cell"));
            }
        }

        Ok(())
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml_ng::from_str(content).context("Failed to parse game config")
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).context("Failed to serialize game config")
    }

    /// Load a YAML config file
    ///
    /// The result is not validated; [`Game::new`](super::Game::new) does that.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("Invalid config file {:?}", path))
    }
}
