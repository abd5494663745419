//! Block module - a single grid cell
//!
//! A block is either empty or filled with a color, and knows where it sits on the
//! grid. Pieces hand out blocks at their absolute positions; locking copies them
//! into the grid unchanged.

use crate::types::{GridPos, Rgb, EMPTY_COLOR};

/// One cell of the playfield or of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    color: Rgb,
    filled: bool,
    position: GridPos,
}

impl Block {
    /// An empty block at the origin.
    pub const fn empty() -> Self {
        Self {
            color: EMPTY_COLOR,
            filled: false,
            position: GridPos::ZERO,
        }
    }

    /// A filled block at the origin.
    pub const fn filled(color: Rgb) -> Self {
        Self {
            color,
            filled: true,
            position: GridPos::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.filled
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn grid_position(&self) -> GridPos {
        self.position
    }

    pub fn set_grid_position(&mut self, position: GridPos) {
        self.position = position;
    }

    /// Builder form of [`Block::set_grid_position`].
    pub fn at(mut self, position: GridPos) -> Self {
        self.position = position;
        self
    }

    /// Move by a relative offset.
    pub fn shift(&mut self, offset: GridPos) {
        self.position = self.position + offset;
    }

    /// Top-left corner of this block in render space, given the size of one
    /// block in render units.
    pub fn pixel_position(&self, block_w: u16, block_h: u16) -> (i32, i32) {
        (
            self.position.x as i32 * block_w as i32,
            self.position.y as i32 * block_h as i32,
        )
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::empty()
    }
}
