//! Context Tetris (workspace facade crate).
//!
//! Re-exports the member crates under `context_tetris::{core,input,term,types}`
//! and hosts the pieces only the binary needs: environment configuration and
//! log setup.

pub mod config;
pub mod logging;

pub use context_tetris_core as core;
pub use context_tetris_input as input;
pub use context_tetris_term as term;
pub use context_tetris_types as types;

pub use config::AppConfig;
