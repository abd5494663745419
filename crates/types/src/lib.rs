//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data with no external dependencies, so they can be used by
//! the core rules, the terminal view, and the input mapping alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn column**: 5; pieces are centered on it at row 0
//!
//! # Lock Scores
//!
//! | Piece | Score |
//! |-------|-------|
//! | I | 40 |
//! | J, L, S, T, Z | 30 |
//! | O | 20 |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GridPos, MoveDir, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::I.as_str(), "I");
//! assert_eq!(PieceKind::I.lock_score(), 40);
//!
//! let pos = GridPos::new(4, 0) + MoveDir::Down.offset();
//! assert_eq!(pos, GridPos::new(4, 1));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::ops::Add;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Largest bounding-box side of any piece (the I piece is 4 long).
///
/// Also the width of the next-piece preview panel, in blocks.
pub const MAX_PIECE_SIZE: u8 = 4;

/// Column new pieces are centered on.
pub const SPAWN_COLUMN: i8 = (BOARD_WIDTH / 2) as i8;

/// Default interval between automatic gravity ticks.
pub const DEFAULT_GRAVITY_MS: u32 = 800;

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
}

/// Color of an empty grid cell.
pub const EMPTY_COLOR: Rgb = Rgb::new(0, 0, 0);

/// Window background behind the playfield and side panel.
pub const BACKGROUND_COLOR: Rgb = Rgb::new(30, 30, 40);

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, straight bar
/// - **J**: Blue
/// - **L**: Orange (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green
/// - **T**: Magenta
/// - **Z**: Red (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in declaration order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Points awarded when a piece of this kind locks.
    pub fn lock_score(&self) -> u32 {
        match self {
            PieceKind::I => 40,
            PieceKind::O => 20,
            PieceKind::J | PieceKind::L | PieceKind::S | PieceKind::T | PieceKind::Z => 30,
        }
    }

    /// Fill color for blocks of this kind.
    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(0, 255, 255),
            PieceKind::J => Rgb::new(0, 0, 255),
            PieceKind::L => Rgb::new(255, 165, 0),
            PieceKind::O => Rgb::new(255, 255, 0),
            PieceKind::S => Rgb::new(0, 255, 0),
            PieceKind::T => Rgb::new(255, 0, 255),
            PieceKind::Z => Rgb::new(255, 0, 0),
        }
    }

    /// Uppercase letter, used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// A position on the grid: `x` grows to the right, `y` grows downwards.
///
/// Signed so that candidate positions just outside the board can be expressed
/// and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPos {
    pub x: i8,
    pub y: i8,
}

impl GridPos {
    pub const ZERO: GridPos = GridPos { x: 0, y: 0 };

    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// True if the position lies on a `BOARD_WIDTH` x `BOARD_HEIGHT` grid.
    pub fn in_bounds(&self) -> bool {
        self.x >= 0 && self.x < BOARD_WIDTH as i8 && self.y >= 0 && self.y < BOARD_HEIGHT as i8
    }
}

impl Add for GridPos {
    type Output = GridPos;

    fn add(self, rhs: GridPos) -> Self::Output {
        GridPos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Translation directions. There is no "up".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDir {
    Left,
    Right,
    Down,
}

impl MoveDir {
    /// Unit offset for this direction.
    pub fn offset(&self) -> GridPos {
        match self {
            MoveDir::Left => GridPos::new(-1, 0),
            MoveDir::Right => GridPos::new(1, 0),
            MoveDir::Down => GridPos::new(0, 1),
        }
    }
}

/// Quarter-turn directions. Left is counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDir {
    Left,
    Right,
}

impl RotateDir {
    pub fn opposite(&self) -> Self {
        match self {
            RotateDir::Left => RotateDir::Right,
            RotateDir::Right => RotateDir::Left,
        }
    }
}

/// Discrete player requests understood by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° counter-clockwise
    RotateLeft,
    /// Rotate piece 90° clockwise
    RotateRight,
    /// Advance the game by one tick, same as gravity
    Tick,
}
