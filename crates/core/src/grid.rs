//! Grid module - the settled cells of the playfield
//!
//! The grid is a 10x20 array of blocks stored flat, row-major, for cache locality
//! and zero allocation. Each block carries its own grid position and its locked
//! color, so the grid is both the logical occupancy map and the visual board.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! Cells are only ever filled; nothing in the game empties them again.

use crate::block::Block;
use crate::types::{GridPos, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Anything a piece can collide with.
///
/// Positions outside the playfield must report as filled, so one predicate covers
/// both walls and the settled stack.
pub trait Occupancy {
    fn is_filled_safe(&self, pos: GridPos) -> bool;
}

/// The settled cells - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of blocks, row-major order (y * WIDTH + x)
    cells: [Block; GRID_SIZE],
}

impl Grid {
    /// Create an empty grid; every block already knows its own position.
    pub fn new() -> Self {
        let mut cells = [Block::empty(); GRID_SIZE];
        for (idx, block) in cells.iter_mut().enumerate() {
            let x = (idx % BOARD_WIDTH as usize) as i8;
            let y = (idx / BOARD_WIDTH as usize) as i8;
            block.set_grid_position(GridPos::new(x, y));
        }
        Self { cells }
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(pos: GridPos) -> Option<usize> {
        if !pos.in_bounds() {
            return None;
        }
        Some((pos.y as usize) * (BOARD_WIDTH as usize) + (pos.x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Block at `pos`, or `None` if out of bounds
    pub fn get(&self, pos: GridPos) -> Option<&Block> {
        Self::index(pos).map(|idx| &self.cells[idx])
    }

    /// True if `pos` is on the grid and filled
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.get(pos).is_some_and(Block::is_filled)
    }

    /// Copy a block into the grid at the block's own position.
    ///
    /// Returns false (and changes nothing) if that position is off the grid.
    pub fn place(&mut self, block: Block) -> bool {
        match Self::index(block.grid_position()) {
            Some(idx) => {
                self.cells[idx] = block;
                true
            }
            None => false,
        }
    }

    /// Fill a single cell with a color. Used for scripted setups.
    pub fn fill(&mut self, pos: GridPos, color: Rgb) -> bool {
        self.place(Block::filled(color).at(pos))
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|b| b.is_filled()).count()
    }

    /// All blocks, row-major
    pub fn cells(&self) -> &[Block] {
        &self.cells
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }
}

impl Occupancy for Grid {
    fn is_filled_safe(&self, pos: GridPos) -> bool {
        match Self::index(pos) {
            Some(idx) => self.cells[idx].is_filled(),
            None => true,
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(GridPos::new(0, 0)), Some(0));
        assert_eq!(Grid::index(GridPos::new(9, 0)), Some(9));
        assert_eq!(Grid::index(GridPos::new(0, 1)), Some(10));
        assert_eq!(Grid::index(GridPos::new(9, 19)), Some(199));
        assert_eq!(Grid::index(GridPos::new(-1, 0)), None);
        assert_eq!(Grid::index(GridPos::new(10, 0)), None);
        assert_eq!(Grid::index(GridPos::new(0, 20)), None);
    }

    #[test]
    fn test_new_grid_blocks_know_their_position() {
        let grid = Grid::new();
        for (y, row) in grid.rows().enumerate() {
            for (x, block) in row.iter().enumerate() {
                assert!(block.is_empty());
                assert_eq!(block.grid_position(), GridPos::new(x as i8, y as i8));
            }
        }
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_place_uses_block_position() {
        let mut grid = Grid::new();
        let color = Rgb::new(0, 255, 0);

        assert!(grid.place(Block::filled(color).at(GridPos::new(5, 10))));
        assert!(grid.is_occupied(GridPos::new(5, 10)));
        assert_eq!(grid.get(GridPos::new(5, 10)).map(Block::color), Some(color));
        assert_eq!(grid.cells[10 * 10 + 5].grid_position(), GridPos::new(5, 10));
    }

    #[test]
    fn test_place_out_of_bounds_is_rejected() {
        let mut grid = Grid::new();
        let color = Rgb::new(255, 0, 0);

        assert!(!grid.fill(GridPos::new(-1, 0), color));
        assert!(!grid.fill(GridPos::new(0, 20), color));
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_is_filled_safe_walls_and_stack() {
        let mut grid = Grid::new();
        assert!(grid.is_filled_safe(GridPos::new(-1, 5)));
        assert!(grid.is_filled_safe(GridPos::new(10, 5)));
        assert!(grid.is_filled_safe(GridPos::new(5, -1)));
        assert!(grid.is_filled_safe(GridPos::new(5, 20)));
        assert!(!grid.is_filled_safe(GridPos::new(5, 5)));

        grid.fill(GridPos::new(5, 5), Rgb::new(1, 2, 3));
        assert!(grid.is_filled_safe(GridPos::new(5, 5)));
    }

    proptest::proptest! {
        #[test]
        fn is_filled_safe_matches_bounds_and_occupancy(
            x in -20i8..30,
            y in -20i8..40,
            filled in proptest::bool::ANY,
        ) {
            let mut grid = Grid::new();
            let pos = GridPos::new(x, y);
            if filled {
                grid.fill(pos, Rgb::new(9, 9, 9));
            }
            let expected = !pos.in_bounds() || filled;
            proptest::prop_assert_eq!(grid.is_filled_safe(pos), expected);
        }
    }
}
