//! Log bootstrap for the binary.
//!
//! The terminal belongs to the renderer, so records only ever go to a file.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Send `log` records to `path`, appending. Level defaults to `info` and
/// follows `RUST_LOG` when set.
pub fn init_file_logger(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialised")?;

    Ok(())
}
