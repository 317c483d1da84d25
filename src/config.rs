//! Runtime configuration read from `CONTEXT_TETRIS_*` environment variables.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const SEED_VAR: &str = "CONTEXT_TETRIS_SEED";
pub const FRAME_MS_VAR: &str = "CONTEXT_TETRIS_FRAME_MS";
pub const LOG_FILE_VAR: &str = "CONTEXT_TETRIS_LOG_FILE";
pub const AUTOSTART_VAR: &str = "CONTEXT_TETRIS_AUTOSTART";

/// Frame interval bounds, in milliseconds.
pub const MIN_FRAME_MS: u32 = 1;
pub const MAX_FRAME_MS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bag seed. `None` picks a random seed at startup.
    pub seed: Option<u32>,
    /// Target frame interval.
    pub frame_ms: u32,
    /// Log destination; logging is off when unset.
    pub log_file: Option<PathBuf>,
    /// Skip the title overlay.
    pub autostart: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frame_ms: crate::types::TICK_MS,
            log_file: None,
            autostart: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    ///
    /// Unset or blank variables take their defaults; a malformed value is an
    /// error naming the variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = var(SEED_VAR)
            .map(|s| {
                s.parse::<u32>()
                    .with_context(|| format!("{SEED_VAR} must be an unsigned 32-bit integer, got {s:?}"))
            })
            .transpose()?;

        let frame_ms = match var(FRAME_MS_VAR) {
            Some(s) => s
                .parse::<u32>()
                .with_context(|| format!("{FRAME_MS_VAR} must be a number of milliseconds, got {s:?}"))?
                .clamp(MIN_FRAME_MS, MAX_FRAME_MS),
            None => crate::types::TICK_MS,
        };

        let log_file = var(LOG_FILE_VAR).map(PathBuf::from);

        let autostart = match var(AUTOSTART_VAR).as_deref() {
            None => false,
            Some(s) => parse_flag(s).with_context(|| format!("invalid {AUTOSTART_VAR}"))?,
        };

        Ok(Self {
            seed,
            frame_ms,
            log_file,
            autostart,
        })
    }

    /// The configured seed, or a fresh random one.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(rand::random::<u32>)
    }
}

fn parse_flag(s: &str) -> Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected 1/0 or true/false, got {other:?}"),
    }
}
