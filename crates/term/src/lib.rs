//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: [`GameView`] draws a
//! [`core::GameSnapshot`] into a [`FrameBuffer`] of styled cells, and
//! [`TerminalRenderer`] flushes framebuffers to the terminal with diff encoding.
//!
//! Board cells are drawn 2 columns wide to compensate for the terminal glyph
//! aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use context_tetris_core as core;
pub use context_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::TerminalRenderer;
