//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The context window is a 10x20 grid:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn row**: -1 (one row above the visible grid)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Default frame interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity at speed 1.0x |
//! | `MIN_DROP_MS` | 80 | Gravity floor |
//! | `LINE_CLEAR_DELAY_MS` | 200 | Delay before flashed rows are removed |
//! | `CLEAR_FLASH_FRAMES` | 12 | Frames a cleared row flashes |
//!
//! # Examples
//!
//! ```
//! use context_tetris_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::ALL.len(), 7);
//! assert_eq!(PieceKind::T.as_str(), "T");
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Row at which new pieces enter (above the visible grid).
pub const SPAWN_Y: i8 = -1;

/// Default frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at speed multiplier 1.0 (one row per second)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity never gets faster than this
pub const MIN_DROP_MS: u32 = 80;

/// Simulated time between detecting full rows and removing them
pub const LINE_CLEAR_DELAY_MS: u32 = 200;

/// Number of frames a cleared row is drawn highlighted
pub const CLEAR_FLASH_FRAMES: u8 = 12;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Length of the upcoming-piece preview
pub const NEXT_QUEUE_LEN: usize = 3;

/// Tokens awarded per soft-dropped row
pub const SOFT_DROP_SCORE: u32 = 1;

/// Tokens awarded per hard-dropped row
pub const HARD_DROP_SCORE: u32 = 2;

/// Line clear scoring table, indexed by `min(lines, 4)`.
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven piece kinds, each standing in for a kind of context payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in definition order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Single-letter uppercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Lifecycle phase of a game.
///
/// `NotStarted -> Running <-> Paused`, `Running -> GameOver`.
/// A new game can be started from `NotStarted` or `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Logical actions emitted by the input mapper.
///
/// Each action maps to a specific game mechanic; none of them carries device
/// details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (1 token)
    SoftDrop,
    /// Drop piece to its resting row and lock (2 tokens per row)
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Swap with the hold slot (once per lock)
    Hold,
    /// Toggle pause
    Pause,
    /// Start a new game, or resume a paused one
    Start,
}

/// Rotation direction for matrix rotation and kick order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDir {
    Cw,
    Ccw,
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a piece of that kind (and its color)
pub type Cell = Option<PieceKind>;
