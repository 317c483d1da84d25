//! Level table - model generations, their context sizes and gravity speed.

use crate::types::{BASE_DROP_MS, LINES_PER_LEVEL, MIN_DROP_MS};

/// One row of the level table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelInfo {
    /// Model name shown in the HUD
    pub name: &'static str,
    /// Context window size label
    pub context: &'static str,
    /// Gravity speed multiplier
    pub speed: f32,
}

pub const LEVELS: [LevelInfo; 10] = [
    LevelInfo { name: "GPT-3.5", context: "4K", speed: 1.0 },
    LevelInfo { name: "GPT-4", context: "8K", speed: 1.2 },
    LevelInfo { name: "Claude 2", context: "100K", speed: 1.5 },
    LevelInfo { name: "GPT-4 Turbo", context: "128K", speed: 1.8 },
    LevelInfo { name: "Claude 3", context: "200K", speed: 2.2 },
    LevelInfo { name: "Gemini 1.5", context: "1M", speed: 2.6 },
    LevelInfo { name: "Gemini 2.0", context: "2M", speed: 3.0 },
    LevelInfo { name: "Claude 4", context: "∞", speed: 3.5 },
    LevelInfo { name: "GPT-5", context: "???", speed: 4.0 },
    LevelInfo { name: "AGI Mode", context: "♾️", speed: 5.0 },
];

/// Highest reachable level index.
pub const MAX_LEVEL: u32 = (LEVELS.len() - 1) as u32;

/// Level index for a cleared-line total, clamped to the last table entry.
pub fn level_for_lines(lines: u32) -> u32 {
    (lines / LINES_PER_LEVEL).min(MAX_LEVEL)
}

/// Table entry for a level index (clamped).
pub fn level_info(level: u32) -> &'static LevelInfo {
    &LEVELS[level.min(MAX_LEVEL) as usize]
}

/// Gravity interval for a level: `max(80, 1000 / speed)` milliseconds.
///
/// The quotient is truncated to whole milliseconds, so speed 1.5x gives 666.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let interval = (BASE_DROP_MS as f32 / level_info(level).speed) as u32;
    interval.max(MIN_DROP_MS)
}
