//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of Context Tetris: the context-window grid,
//! the seven token-block pieces, the bag randomizer, scoring and the level
//! table. It has no dependencies on the terminal or on wall-clock time; the
//! frame loop drives it with [`GameState::tick`] and [`GameState::apply_action`].
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks, locking and row removal
//! - [`game_state`]: phase machine, gravity, hold, line-clear scheduling
//! - [`levels`]: model-generation level table and drop intervals
//! - [`pieces`]: piece definitions, matrix rotation and horizontal kicks
//! - [`rng`]: seeded 7-bag randomizer and the next queue
//! - [`scoring`]: token awards and token formatting
//! - [`snapshot`]: read-only views for rendering
//!
//! # Example
//!
//! ```
//! use context_tetris_core::GameState;
//! use context_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards tokens
//! ```
//!
//! # Timing
//!
//! - **Frame**: ~16ms; pass the measured elapsed time to `tick`
//! - **Gravity**: `max(80, 1000 / speed)` ms, speed taken from the level table
//! - **Line clear**: full rows flash for 12 frames and are removed after 200ms

pub mod board;
pub mod game_state;
pub mod levels;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use context_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LockOutcome};
pub use game_state::GameState;
pub use levels::{get_drop_interval_ms, level_info, LevelInfo, LEVELS};
pub use pieces::{definition, get_shape, try_rotate, ActivePiece, PieceDefinition, Shape};
pub use rng::{Bag, NextQueue, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_line_score, format_tokens};
pub use snapshot::{ActiveSnapshot, GameSnapshot, HudSnapshot};
