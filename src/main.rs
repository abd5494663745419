//! Terminal runner (default binary).
//!
//! One cooperative loop: redraw when something changed, wait for input until the
//! next gravity tick is due, then apply the input and/or the tick.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockfall::config::Args;
use blockfall::core::Board;
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer};
use blockfall::types::GameAction;

/// Poll timeout when automatic ticks are off.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_file)?;

    let seed = args.seed_or_clock();
    info!(seed, gravity_ms = args.gravity_ms, "starting");

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, &args, seed));

    // Always try to restore terminal state.
    let _ = term.exit();
    let board = result?;

    if board.is_game_over() {
        println!("Game Over! Score {}", board.score());
    } else {
        println!("Score: {}", board.score());
    }
    Ok(())
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))
}

fn run(term: &mut TerminalRenderer, args: &Args, seed: u32) -> Result<Board> {
    let mut board = Board::new(seed);
    let view = GameView::new(args.block_width, args.block_height);
    let (w, h) = view.frame_size();
    let mut fb = FrameBuffer::new(w, h);

    let gravity = args.gravity();
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            view.render_into(&board, &mut fb);
            term.present(&mut fb)?;
            info!(score = board.score(), "score");
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = gravity.map_or(IDLE_POLL, |g| g.saturating_sub(last_tick.elapsed()));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(board);
                    }
                    if let Some(action) = handle_key_event(key) {
                        dirty |= board.apply_action(action);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if let Some(g) = gravity {
            if last_tick.elapsed() >= g {
                last_tick = Instant::now();
                dirty |= board.apply_action(GameAction::Tick);
            }
        }
    }
}
