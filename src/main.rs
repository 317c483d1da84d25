//! Context Tetris runner (default binary).
//!
//! Reads configuration from the environment, takes over the terminal and runs
//! the frame loop: poll input until the next frame is due, apply the mapped
//! actions, tick the game with the measured elapsed time, redraw.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{info, warn};

use context_tetris::config::AppConfig;
use context_tetris::core::{GameSnapshot, GameState};
use context_tetris::input::{map_key_event, should_quit};
use context_tetris::logging::init_file_logger;
use context_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(path) = &config.log_file {
        init_file_logger(path)?;
    }

    let seed = config.resolve_seed();
    info!("starting with seed {} and {}ms frames", seed, config.frame_ms);

    let mut term = TerminalRenderer::new();
    term.enter().context("failed to set up terminal")?;

    let result = run(&mut term, &config, seed);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!("failed to restore terminal: {:#}", err);
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig, seed: u32) -> Result<()> {
    let mut game = GameState::new(seed);
    if config.autostart {
        game.start();
    }

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(config.frame_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next frame, then whatever is already queued.
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if drain_events(timeout, event::poll, event::read, &mut game, term)? == Flow::Quit {
            info!("quit at {} tokens", game.score());
            return Ok(());
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            game.tick(elapsed_ms);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Wait up to `timeout` for the first event, then handle every event that is
/// already pending without waiting again.
fn drain_events<P, R>(
    timeout: Duration,
    mut poll: P,
    mut read: R,
    game: &mut GameState,
    term: &mut TerminalRenderer,
) -> io::Result<Flow>
where
    P: FnMut(Duration) -> io::Result<bool>,
    R: FnMut() -> io::Result<Event>,
{
    let mut wait = timeout;
    while poll(wait)? {
        if handle_event(read()?, game, term) == Flow::Quit {
            return Ok(Flow::Quit);
        }
        wait = Duration::ZERO;
    }
    Ok(Flow::Continue)
}

fn handle_event(event: Event, game: &mut GameState, term: &mut TerminalRenderer) -> Flow {
    match event {
        Event::Key(key) if should_quit(key) => return Flow::Quit,
        Event::Key(key) => {
            if let Some(action) = map_key_event(key) {
                game.apply_action(action);
            }
        }
        Event::Resize(_, _) => term.invalidate(),
        _ => {}
    }
    Flow::Continue
}
