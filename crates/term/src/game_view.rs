//! GameView: maps a [`Board`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The frame has a fixed size derived from the grid dimensions, the block size
//! and the side panel:
//!
//! ```text
//! ┌────────────────────┬────────┐
//! │ playfield          │NEXT    │
//! │ 10 x 20 blocks     │preview │
//! │                    │SCORE   │
//! └────────────────────┴────────┘
//! ```

use crate::core::{Block, Board, Piece};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{BACKGROUND_COLOR, BOARD_HEIGHT, BOARD_WIDTH, MAX_PIECE_SIZE};

const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const EMPTY: CellStyle = CellStyle::new(Rgb::new(90, 90, 100), BACKGROUND_COLOR).dim();
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), BACKGROUND_COLOR).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), BACKGROUND_COLOR);
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();

const BLOCK_CHAR: char = '█';
const EMPTY_CHAR: char = '·';

/// Rows of the side panel, relative to the top of the panel.
const NEXT_LABEL_ROW: u16 = 0;
const PREVIEW_ROW: u16 = 2;

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Block width in terminal columns.
    block_w: u16,
    /// Block height in terminal rows.
    block_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            block_w: 2,
            block_h: 1,
        }
    }
}

impl GameView {
    pub fn new(block_w: u16, block_h: u16) -> Self {
        Self {
            block_w: block_w.max(1),
            block_h: block_h.max(1),
        }
    }

    fn playfield_w(&self) -> u16 {
        BOARD_WIDTH as u16 * self.block_w
    }

    fn playfield_h(&self) -> u16 {
        BOARD_HEIGHT as u16 * self.block_h
    }

    fn panel_w(&self) -> u16 {
        MAX_PIECE_SIZE as u16 * self.block_w
    }

    /// Left column of the side panel
    fn panel_x(&self) -> u16 {
        self.playfield_w() + 2
    }

    /// Total frame size in terminal cells: playfield, side panel, three
    /// vertical border columns and two border rows.
    pub fn frame_size(&self) -> (u16, u16) {
        (self.playfield_w() + self.panel_w() + 3, self.playfield_h() + 2)
    }

    /// Top-left corner of the next-piece preview, horizontally centered in the
    /// panel for the piece's current width.
    pub fn preview_anchor(&self, piece: &Piece) -> (u16, u16) {
        let slack = (MAX_PIECE_SIZE as u16).saturating_sub(piece.size().w as u16);
        (
            self.panel_x() + slack * self.block_w / 2,
            1 + PREVIEW_ROW,
        )
    }

    /// Render the board into an existing framebuffer of [`GameView::frame_size`].
    pub fn render_into(&self, board: &Board, fb: &mut FrameBuffer) {
        fb.clear(Cell {
            ch: ' ',
            style: CellStyle::new(VALUE.fg, BACKGROUND_COLOR),
        });

        self.draw_border(fb);

        // Settled grid, empty cells included.
        for block in board.grid().cells() {
            self.draw_block(fb, (1, 1), block);
        }

        if let Some(active) = board.active() {
            for block in active.blocks() {
                self.draw_block(fb, (1, 1), &block);
            }
        }

        self.draw_side_panel(fb, board);

        if board.is_game_over() {
            self.draw_overlay_text(fb, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, board: &Board) -> FrameBuffer {
        let (w, h) = self.frame_size();
        let mut fb = FrameBuffer::new(w, h);
        self.render_into(board, &mut fb);
        fb
    }

    /// Draw a piece with its bounding box at `anchor`, ignoring its grid origin.
    pub fn draw_preview(&self, fb: &mut FrameBuffer, piece: &Piece, anchor: (u16, u16)) {
        let color = piece.kind().color();
        for offset in piece.filled_offsets() {
            self.draw_block(fb, anchor, &Block::filled(color).at(offset));
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, origin: (u16, u16), block: &Block) {
        let (px, py) = block.pixel_position(self.block_w, self.block_h);
        let (Ok(px), Ok(py)) = (u16::try_from(px), u16::try_from(py)) else {
            return;
        };
        let (ch, style) = if block.is_filled() {
            (BLOCK_CHAR, CellStyle::new(block.color(), BACKGROUND_COLOR).bold())
        } else {
            (EMPTY_CHAR, EMPTY)
        };
        fb.fill_rect(
            origin.0 + px,
            origin.1 + py,
            self.block_w,
            self.block_h,
            ch,
            style,
        );
    }

    fn draw_border(&self, fb: &mut FrameBuffer) {
        let (w, h) = self.frame_size();
        let divider = self.panel_x() - 1;

        fb.put_char(0, 0, '┌', BORDER);
        fb.put_char(w - 1, 0, '┐', BORDER);
        fb.put_char(0, h - 1, '└', BORDER);
        fb.put_char(w - 1, h - 1, '┘', BORDER);

        for x in 1..w - 1 {
            fb.put_char(x, 0, '─', BORDER);
            fb.put_char(x, h - 1, '─', BORDER);
        }
        for y in 1..h - 1 {
            fb.put_char(0, y, '│', BORDER);
            fb.put_char(divider, y, '│', BORDER);
            fb.put_char(w - 1, y, '│', BORDER);
        }
        fb.put_char(divider, 0, '┬', BORDER);
        fb.put_char(divider, h - 1, '┴', BORDER);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, board: &Board) {
        let x = self.panel_x();

        fb.put_str(x, 1 + NEXT_LABEL_ROW, "NEXT", LABEL);
        let next = board.next();
        self.draw_preview(fb, next, self.preview_anchor(next));

        let score_row = 1 + PREVIEW_ROW + MAX_PIECE_SIZE as u16 * self.block_h + 1;
        fb.put_str(x, score_row, "SCORE", LABEL);
        fb.put_u32(x, score_row + 1, board.score(), VALUE);
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = 1 + self.playfield_w().saturating_sub(text_w) / 2;
        let y = 1 + self.playfield_h() / 2;
        fb.put_str(x, y, text, OVERLAY);
    }
}
