//! crossterm backend for [`Canvas`].
//!
//! The 800×600 playfield is scaled onto the terminal grid.  Draw calls paint
//! into a back buffer of cells; `present` writes the whole buffer in one go so
//! the terminal never shows a half-drawn frame.

use std::io::Write;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use super::{Canvas, Rect, TextureId};
use crate::assets::Textures;
use crate::entities::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

const EMPTY: char = ' ';

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        glyph: EMPTY,
        color: Color::Reset,
    };
}

pub struct TerminalCanvas<W: Write> {
    out: W,
    textures: Textures,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, textures: Textures, cols: u16, rows: u16) -> Self {
        let mut canvas = TerminalCanvas {
            out,
            textures,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        };
        canvas.resize(cols, rows);
        canvas
    }

    /// Adopt a new terminal size.  Takes effect from the next frame.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::BLANK; cols as usize * rows as usize];
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Glyph currently buffered at a terminal cell.
    pub fn glyph_at(&self, col: u16, row: u16) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[row as usize * self.cols as usize + col as usize].glyph)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Map a playfield rectangle onto a half-open range of terminal cells,
    /// clipped to the screen.  Every non-empty rectangle covers at least one
    /// cell so small sprites never vanish.
    fn cell_span(&self, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        if self.cols == 0 || self.rows == 0 || rect.w <= 0 || rect.h <= 0 {
            return None;
        }
        let scale_x = |x: i32| (x as i64 * self.cols as i64).div_euclid(PLAYFIELD_WIDTH as i64);
        let scale_y = |y: i32| (y as i64 * self.rows as i64).div_euclid(PLAYFIELD_HEIGHT as i64);

        let c0 = scale_x(rect.x);
        let c1 = scale_x(rect.x + rect.w).max(c0 + 1);
        let r0 = scale_y(rect.y);
        let r1 = scale_y(rect.y + rect.h).max(r0 + 1);

        let c0 = c0.clamp(0, self.cols as i64);
        let c1 = c1.clamp(0, self.cols as i64);
        let r0 = r0.clamp(0, self.rows as i64);
        let r1 = r1.clamp(0, self.rows as i64);
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as u16, c1 as u16, r0 as u16, r1 as u16))
    }

    fn paint_cells(&mut self, rect: Rect, cell: Cell) {
        let Some((c0, c1, r0, r1)) = self.cell_span(rect) else {
            return;
        };
        let stride = self.cols as usize;
        for row in r0..r1 {
            let start = row as usize * stride;
            self.cells[start + c0 as usize..start + c1 as usize].fill(cell);
        }
    }
}

/// The on-screen footprint of `dst` once rotated about its centre.  Only
/// quarter turns change the footprint.
fn rotated(dst: Rect, angle: f64) -> Rect {
    let quarter_turns = (angle / 90.0).round() as i64;
    if quarter_turns.rem_euclid(2) == 0 {
        return dst;
    }
    let cx = dst.x + dst.w / 2;
    let cy = dst.y + dst.h / 2;
    Rect::new(cx - dst.h / 2, cy - dst.w / 2, dst.h, dst.w)
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self) -> Result<()> {
        self.cells.fill(Cell::BLANK);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<()> {
        self.paint_cells(rect, Cell::BLANK);
        Ok(())
    }

    fn copy(&mut self, texture: TextureId, src: Option<Rect>, dst: Rect, angle: f64) -> Result<()> {
        let glyph = self.textures.sprite(texture).glyph(src);
        let cell = Cell {
            glyph,
            color: texture.color(),
        };
        self.paint_cells(rotated(dst, angle), cell);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let stride = self.cols as usize;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            let line = &self.cells[row as usize * stride..(row as usize + 1) * stride];

            // One colour change per run of equally coloured cells.
            let mut run = String::with_capacity(stride);
            let mut color = None;
            for cell in line {
                if color != Some(cell.color) {
                    if !run.is_empty() {
                        self.out.queue(Print(&run))?;
                        run.clear();
                    }
                    self.out.queue(style::SetForegroundColor(cell.color))?;
                    color = Some(cell.color);
                }
                run.push(cell.glyph);
            }
            if !run.is_empty() {
                self.out.queue(Print(&run))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush().context("could not present frame")?;
        Ok(())
    }
}
