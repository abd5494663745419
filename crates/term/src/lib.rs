//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders the board into a fixed-size framebuffer that is flushed to the
//! terminal with crossterm, re-emitting only the cells that changed.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Map one grid block to a fixed rectangle of terminal cells (2x1 by default)
//! - Show the next piece in a side panel without touching its grid position

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::GameView;
pub use renderer::TerminalRenderer;
