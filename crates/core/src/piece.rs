//! Piece module - tetromino shapes, movement and rotation
//!
//! A piece is an occupancy matrix (`h` rows by `w` columns) anchored at the grid
//! position of its bounding box's top-left corner. Every transform is computed on
//! a candidate first and only committed when the candidate does not collide, so
//! an active piece never overlaps the stack or leaves the board.
//!
//! Rotation transposes the full bounding box, empty sub-cells included, and keeps
//! the box centered: the origin shifts by half the change in each dimension.

use arrayvec::ArrayVec;

use crate::block::Block;
use crate::grid::Occupancy;
use crate::types::{GridPos, MoveDir, PieceKind, RotateDir, MAX_PIECE_SIZE, SPAWN_COLUMN};

const MAX: usize = MAX_PIECE_SIZE as usize;

/// One row of a shape matrix
pub type ShapeRow = ArrayVec<bool, MAX>;

/// Occupancy matrix of a piece, indexed `[row][column]`
pub type ShapeMatrix = ArrayVec<ShapeRow, MAX>;

/// Bounding box of a piece, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSize {
    pub w: u8,
    pub h: u8,
}

impl PieceSize {
    pub const fn new(w: u8, h: u8) -> Self {
        Self { w, h }
    }
}

/// Base shape for a piece kind, as rows of `#` (filled) and `.` (empty).
fn base_rows(kind: PieceKind) -> &'static [&'static str] {
    match kind {
        PieceKind::I => &["#", "#", "#", "#"],
        PieceKind::J => &[".#", ".#", "##"],
        PieceKind::L => &["#.", "#.", "##"],
        PieceKind::O => &["##", "##"],
        PieceKind::S => &["#.", "##", ".#"],
        PieceKind::T => &["###", ".#."],
        PieceKind::Z => &[".#", "##", "#."],
    }
}

/// Build the spawn-orientation matrix for a piece kind
pub fn base_shape(kind: PieceKind) -> ShapeMatrix {
    base_rows(kind)
        .iter()
        .map(|row| row.bytes().map(|b| b == b'#').collect())
        .collect()
}

/// A tetromino positioned on the grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    origin: GridPos,
    size: PieceSize,
    cells: ShapeMatrix,
}

impl Piece {
    /// Create a piece of `kind` with its bounding box at `origin`
    pub fn new(kind: PieceKind, origin: GridPos) -> Self {
        let cells = base_shape(kind);
        let size = PieceSize::new(cells[0].len() as u8, cells.len() as u8);
        Self {
            kind,
            origin,
            size,
            cells,
        }
    }

    /// Create a piece in the top row, centered on the spawn column
    pub fn spawn(kind: PieceKind) -> Self {
        let mut piece = Self::new(kind, GridPos::ZERO);
        piece.origin = GridPos::new(SPAWN_COLUMN - (piece.size.w / 2) as i8, 0);
        piece
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn origin(&self) -> GridPos {
        self.origin
    }

    pub fn size(&self) -> PieceSize {
        self.size
    }

    /// The occupancy matrix, one entry per row
    pub fn rows(&self) -> &[ShapeRow] {
        &self.cells
    }

    /// Points awarded when this piece locks
    pub fn lock_score(&self) -> u32 {
        self.kind.lock_score()
    }

    /// Whether the sub-cell at `rel` (relative to the origin) is filled.
    ///
    /// Positions outside the bounding box are empty.
    pub fn is_filled(&self, rel: GridPos) -> bool {
        if rel.x < 0 || rel.y < 0 || rel.x >= self.size.w as i8 || rel.y >= self.size.h as i8 {
            return false;
        }
        self.cells[rel.y as usize][rel.x as usize]
    }

    /// Filled sub-cells relative to the origin
    pub fn filled_offsets(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(x, _)| GridPos::new(x as i8, y as i8))
        })
    }

    /// Filled sub-cells in absolute grid coordinates
    pub fn occupied_cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.filled_offsets().map(move |offset| self.origin + offset)
    }

    /// Filled blocks at their absolute grid positions, colored by kind
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        let color = self.kind.color();
        self.occupied_cells().map(move |pos| Block::filled(color).at(pos))
    }

    /// True if any filled sub-cell, shifted by `offset`, is off the board or on
    /// a filled board cell.
    pub fn is_collided(&self, field: &impl Occupancy, offset: GridPos) -> bool {
        self.occupied_cells()
            .any(|pos| field.is_filled_safe(pos + offset))
    }

    /// Move one cell in `dir` if nothing is in the way
    pub fn try_move(&mut self, dir: MoveDir, field: &impl Occupancy) -> bool {
        let offset = dir.offset();
        if self.is_collided(field, offset) {
            return false;
        }
        self.origin = self.origin + offset;
        true
    }

    /// Rotate a quarter turn in `dir` if the rotated piece fits
    pub fn try_rotate(&mut self, dir: RotateDir, field: &impl Occupancy) -> bool {
        let candidate = self.rotated(dir);
        if candidate.is_collided(field, GridPos::ZERO) {
            return false;
        }
        *self = candidate;
        true
    }

    /// The rotated candidate, not yet checked against anything.
    pub fn rotated(&self, dir: RotateDir) -> Piece {
        let w = self.size.w as usize;
        let h = self.size.h as usize;

        let mut cells = ShapeMatrix::new();
        for j in 0..w {
            let mut row = ShapeRow::new();
            for i in 0..h {
                row.push(match dir {
                    RotateDir::Left => self.cells[i][w - 1 - j],
                    RotateDir::Right => self.cells[h - 1 - i][j],
                });
            }
            cells.push(row);
        }

        // Integer division truncates toward zero, so a turn and its reverse
        // shift the origin by exactly opposite amounts.
        let dx = (w as i8 - h as i8) / 2;
        let dy = (h as i8 - w as i8) / 2;

        Piece {
            kind: self.kind,
            origin: self.origin + GridPos::new(dx, dy),
            size: PieceSize::new(self.size.h, self.size.w),
            cells,
        }
    }
}
