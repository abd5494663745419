//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state. It has no dependencies on
//! the terminal, input handling, or timing, so it can run headless in tests and
//! benches as well as behind the terminal front end.
//!
//! # Module Structure
//!
//! - [`block`]: a single cell with a color, an empty flag and a grid position
//! - [`grid`]: the 10x20 settled cells and the [`Occupancy`] collision predicate
//! - [`piece`]: tetromino shapes, moves and matrix rotations
//! - [`board`]: active/next piece slots, locking, scoring, spawning and game over
//! - [`rng`]: seeded uniform piece selection
//!
//! # Game Rules
//!
//! - A piece moves left, right or down one cell, or rotates a quarter turn, only
//!   if the result stays on the board and off the settled cells
//! - A tick moves the active piece down; if it cannot move it locks in place and
//!   scores its kind's fixed value
//! - The next tick spawns the next piece at the top, or ends the game if there is
//!   no room for it
//! - Rows are never cleared
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Board, TickOutcome};
//! use blockfall_types::{GameAction, PieceKind};
//!
//! let mut board = Board::with_pieces(12345, PieceKind::O, PieceKind::T);
//! board.apply_action(GameAction::MoveLeft);
//!
//! let mut outcome = board.tick();
//! while outcome == TickOutcome::Fell {
//!     outcome = board.tick();
//! }
//! assert_eq!(outcome, TickOutcome::Locked { points: 20 });
//! assert_eq!(board.score(), 20);
//! ```

pub mod block;
pub mod board;
pub mod grid;
pub mod piece;
pub mod rng;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use block::Block;
pub use board::{Board, Phase, TickOutcome};
pub use grid::{Grid, Occupancy};
pub use piece::{base_shape, Piece, PieceSize, ShapeMatrix, ShapeRow};
pub use rng::SimpleRng;
