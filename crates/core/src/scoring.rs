//! Scoring module - tokens awarded for drops and line clears
//!
//! A multi-line clear is scored once from the bonus table, never as a sum of
//! single-line clears.

use crate::types::{HARD_DROP_SCORE, LINE_SCORES, SOFT_DROP_SCORE};

/// Calculate line clear score
/// lines: number of rows cleared by one lock
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES[lines.min(4)].saturating_mul(level + 1)
}

/// Calculate drop score: 1 token per soft-dropped row, 2 per hard-dropped row.
pub fn calculate_drop_score(rows: u32, is_hard_drop: bool) -> u32 {
    let per_row = if is_hard_drop {
        HARD_DROP_SCORE
    } else {
        SOFT_DROP_SCORE
    };
    rows.saturating_mul(per_row)
}

/// Human-readable token count: `950`, `12.3K`, `4.5M`.
pub fn format_tokens(tokens: u32) -> String {
    if tokens >= 1_000_000 {
        format!("{:.1}M", tokens as f64 / 1_000_000.0)
    } else if tokens >= 1_000 {
        format!("{:.1}K", tokens as f64 / 1_000.0)
    } else {
        tokens.to_string()
    }
}
