use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::config::GameConfig;
use super::direction::Direction;

/// A cell on the game grid
///
/// Coordinates one step past the board edge (`-1` or `grid_size`) are
/// representable so the edge check can see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Returns true if any of `cells` equals `target`.
pub fn occupied<'a>(cells: impl IntoIterator<Item = &'a Position>, target: Position) -> bool {
    cells.into_iter().any(|cell| *cell == target)
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    direction: Direction,
    grow_pending: bool,
    initial_body: Vec<Position>,
    initial_direction: Direction,
}

impl Snake {
    /// Create the snake described by the config's starting layout
    pub fn new(config: &GameConfig) -> Self {
        Self {
            body: config.initial_body.iter().copied().collect(),
            direction: config.initial_direction,
            grow_pending: false,
            initial_body: config.initial_body.clone(),
            initial_direction: config.initial_direction,
        }
    }

    /// Replace the current body and direction, keeping the reset layout.
    ///
    /// Callers check the layout first with [`GameConfig::check_layout`].
    pub(crate) fn place(&mut self, body: &[Position], direction: Direction) {
        self.body = body.iter().copied().collect();
        self.direction = direction;
        self.grow_pending = false;
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Body segments after the head
    pub fn body_segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter().skip(1)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        occupied(self.body_segments(), pos)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Turn the snake, unless `candidate` would reverse it onto its own neck.
    ///
    /// A candidate is rejected when it is the opposite of the current
    /// direction, or when it would move the head onto the second segment.
    /// The second check covers two turns queued between ticks.
    ///
    /// Returns whether the change was accepted.
    pub fn set_direction(&mut self, candidate: Direction) -> bool {
        if self.direction.is_opposite(candidate) || self.leads_into_neck(candidate) {
            return false;
        }
        self.direction = candidate;
        true
    }

    fn leads_into_neck(&self, candidate: Direction) -> bool {
        match self.body.get(1) {
            Some(neck) => self.head().moved_in_direction(candidate) == *neck,
            None => false,
        }
    }

    /// Grow by one segment on the next [`update`](Self::update)
    pub fn request_growth(&mut self) {
        self.grow_pending = true;
    }

    pub fn is_growth_pending(&self) -> bool {
        self.grow_pending
    }

    /// Advance one cell in the current direction
    pub fn update(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.push_front(new_head);

        if self.grow_pending {
            self.grow_pending = false;
        } else {
            self.body.pop_back();
        }
    }

    /// Restore the starting body and direction, dropping any pending growth
    pub fn reset(&mut self) {
        self.body = self.initial_body.iter().copied().collect();
        self.direction = self.initial_direction;
        self.grow_pending = false;
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
