//! Read-only views of a game for the render adapter and the HUD.

use crate::levels::level_info;
use crate::pieces::{ActivePiece, Shape};
use crate::types::{Cell, GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, NEXT_QUEUE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

/// Values the score panel shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    pub score: u32,
    pub lines: u32,
    /// 0-based level index
    pub level: u32,
    pub level_name: &'static str,
    pub context_label: &'static str,
    pub speed: f32,
    pub game_over: bool,
    /// Score and level at the moment the game ended.
    pub final_score: Option<u32>,
    pub final_level: Option<u32>,
}

impl HudSnapshot {
    pub fn for_level(score: u32, lines: u32, level: u32) -> Self {
        let info = level_info(level);
        Self {
            score,
            lines,
            level,
            level_name: info.name,
            context_label: info.context,
            speed: info.speed,
            game_over: false,
            final_score: None,
            final_level: None,
        }
    }
}

impl Default for HudSnapshot {
    fn default() -> Self {
        Self::for_level(0, 0, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next_queue: [Option<PieceKind>; NEXT_QUEUE_LEN],
    /// Rows detected as full and waiting for removal.
    pub flashing_rows: [bool; BOARD_HEIGHT as usize],
    /// Frames left in the flash highlight (0 = not flashing).
    pub flash_frames: u8,
    pub phase: GamePhase,
    pub hud: HudSnapshot,
}

impl GameSnapshot {
    /// Whether row `y` should be drawn highlighted this frame.
    pub fn is_flashing(&self, y: usize) -> bool {
        self.flash_frames > 0 && self.flashing_rows.get(y).copied().unwrap_or(false)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            can_hold: true,
            next_queue: [None; NEXT_QUEUE_LEN],
            flashing_rows: [false; BOARD_HEIGHT as usize],
            flash_frames: 0,
            phase: GamePhase::NotStarted,
            hud: HudSnapshot::default(),
        }
    }
}
