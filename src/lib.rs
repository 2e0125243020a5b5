//! Retro Snake - the classic grid snake game for the terminal
//!
//! This library provides:
//! - Core game rules: snake, food, scoring, pace and collisions (game module)
//! - Audio cue seam with terminal-bell and recording backends (audio module)
//! - Keyboard mapping (input module) and TUI rendering (render module)
//! - The interactive game loop (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
