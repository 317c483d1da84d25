//! Terminal input module.
//!
//! Maps `crossterm` key events into [`types::GameAction`]s. The mapping holds no
//! state and knows nothing about the game; whether an action does anything is
//! decided by the game state.

pub mod map;

pub use context_tetris_types as types;

pub use map::{map_key_event, should_quit};
