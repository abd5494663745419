//! TerminalRenderer: flushes a framebuffer to a terminal.
//!
//! The first frame (and any frame after [`TerminalRenderer::invalidate`]) is a full
//! redraw; later frames only emit the runs of cells that changed.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch the terminal into raw mode on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    /// Restore the terminal. Safe to call after a failed `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next frame to be a full redraw (e.g. after a terminal resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// On return `fb` holds the previous frame, which the caller must fully
    /// re-render before the next call.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut enc = FrameEncoder::new(&mut self.buf);

        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                for y in 0..fb.height() {
                    let row = fb.row(y);
                    for run in changed_runs(prev.row(y), row) {
                        enc.run(run.start as u16, y, &row[run])?;
                    }
                }
                prev
            }
            _ => {
                enc.clear_screen()?;
                for y in 0..fb.height() {
                    enc.run(0, y, fb.row(y))?;
                }
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        enc.finish()?;
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()
    }
}

/// Queues the commands for one frame. Style changes are only emitted when a
/// cell's style differs from the last one sent.
struct FrameEncoder<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> FrameEncoder<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn clear_screen(&mut self) -> Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    /// Print `cells` starting at column `x` of row `y`.
    fn run(&mut self, x: u16, y: u16, cells: &[Cell]) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        for cell in cells {
            if self.style != Some(cell.style) {
                self.set_style(cell.style)?;
            }
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn set_style(&mut self, style: CellStyle) -> Result<()> {
        // SGR reset clears colors as well, so it goes first.
        self.out.queue(SetAttribute(Attribute::Reset))?;
        let fg = Color::Rgb {
            r: style.fg.r,
            g: style.fg.g,
            b: style.fg.b,
        };
        let bg = Color::Rgb {
            r: style.bg.r,
            g: style.bg.g,
            b: style.bg.b,
        };
        self.out.queue(SetForegroundColor(fg))?;
        self.out.queue(SetBackgroundColor(bg))?;
        if style.bold {
            self.out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            self.out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.style = Some(style);
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Column ranges where two rows of equal length differ.
fn changed_runs<'r>(
    prev: &'r [Cell],
    next: &'r [Cell],
) -> impl Iterator<Item = Range<usize>> + 'r {
    let mut x = 0;
    std::iter::from_fn(move || {
        let start = x + prev[x..]
            .iter()
            .zip(&next[x..])
            .position(|(a, b)| a != b)?;
        let len = prev[start..]
            .iter()
            .zip(&next[start..])
            .take_while(|(a, b)| a != b)
            .count();
        x = start + len;
        Some(start..x)
    })
}
