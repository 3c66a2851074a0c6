// ANSI frame emitter
//
// Packs pixel pairs into upper-half-block cells (fg = top pixel, bg = bottom
// pixel) and re-emits only the row spans that changed since the previous
// frame. Color runs collapse into a single SGR sequence so a quiet frame
// costs a handful of bytes.

use std::io::{self, Write};

use crate::raster::PixelBuffer;
use crate::theme::Rgb;

const HALF_BLOCK: char = '▀';
const SGR_RESET: &str = "\x1b[0m";

/// One terminal cell: the two pseudo-pixels it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub top: Rgb,
    pub bottom: Rgb,
}

/// A contiguous run of changed cells on one row; end is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtySpan {
    pub row: u16,
    pub start: u16,
    pub end: u16,
}

/// Emits frames to a terminal, repainting only what changed.
pub struct FrameEmitter {
    cols: u16,
    rows: u16,
    previous: Option<Vec<Cell>>,
    forced_rows: Vec<u16>,
}

impl FrameEmitter {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            previous: None,
            forced_rows: Vec::new(),
        }
    }

    /// Adopt a new terminal geometry. The next frame repaints everything.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.previous = None;
        self.forced_rows.clear();
    }

    /// Mark a row dirty regardless of the diff, e.g. because an overlay was
    /// written over it outside the cell grid.
    pub fn force_row(&mut self, row: u16) {
        if row < self.rows && !self.forced_rows.contains(&row) {
            self.forced_rows.push(row);
        }
    }

    /// Emit one frame. The pixel buffer must match the emitter geometry
    /// (cols wide, rows * 2 tall).
    pub fn emit<W: Write>(&mut self, out: &mut W, buffer: &PixelBuffer) -> io::Result<()> {
        let cells = self.cells_from(buffer);
        let spans = self.dirty_spans(&cells);
        self.forced_rows.clear();
        if !spans.is_empty() {
            let cols = usize::from(self.cols);
            let mut payload = String::new();
            for span in &spans {
                payload.push_str(&cursor_to(span.row, span.start));
                let mut run: Option<(Rgb, Rgb)> = None;
                for col in span.start..span.end {
                    let cell = cells[usize::from(span.row) * cols + usize::from(col)];
                    if run != Some((cell.top, cell.bottom)) {
                        payload.push_str(&sgr(&cell));
                        run = Some((cell.top, cell.bottom));
                    }
                    payload.push(HALF_BLOCK);
                }
            }
            payload.push_str(SGR_RESET);
            out.write_all(payload.as_bytes())?;
            out.flush()?;
        }
        self.previous = Some(cells);
        Ok(())
    }

    /// Write a text overlay directly to the terminal. The row is marked
    /// dirty so the next frame paints the field back over it.
    pub fn overlay_text<W: Write>(
        &mut self,
        out: &mut W,
        row: u16,
        col: u16,
        text: &str,
        fg: Rgb,
        bg: Rgb,
    ) -> io::Result<()> {
        let mut payload = cursor_to(row, col);
        payload.push_str(&format!(
            "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m",
            fg.r, fg.g, fg.b, bg.r, bg.g, bg.b
        ));
        payload.push_str(text);
        payload.push_str(SGR_RESET);
        out.write_all(payload.as_bytes())?;
        out.flush()?;
        self.force_row(row);
        Ok(())
    }

    fn cells_from(&self, buffer: &PixelBuffer) -> Vec<Cell> {
        let cols = usize::from(self.cols);
        let rows = usize::from(self.rows);
        let mut cells = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell {
                    top: buffer.get(col, row * 2),
                    bottom: buffer.get(col, row * 2 + 1),
                });
            }
        }
        cells
    }

    fn dirty_spans(&self, cells: &[Cell]) -> Vec<DirtySpan> {
        let previous = match &self.previous {
            // First frame after (re)start: everything is dirty.
            None => {
                return (0..self.rows)
                    .map(|row| DirtySpan {
                        row,
                        start: 0,
                        end: self.cols,
                    })
                    .collect();
            }
            Some(previous) => previous,
        };

        let cols = usize::from(self.cols);
        let mut spans = Vec::new();
        for row in 0..self.rows {
            if self.forced_rows.contains(&row) {
                spans.push(DirtySpan {
                    row,
                    start: 0,
                    end: self.cols,
                });
                continue;
            }
            let base = usize::from(row) * cols;
            let mut col = 0;
            while col < cols {
                if previous[base + col] != cells[base + col] {
                    let start = col;
                    while col < cols && previous[base + col] != cells[base + col] {
                        col += 1;
                    }
                    spans.push(DirtySpan {
                        row,
                        start: start as u16,
                        end: col as u16,
                    });
                } else {
                    col += 1;
                }
            }
        }
        spans
    }
}

fn cursor_to(row: u16, col: u16) -> String {
    format!("\x1b[{};{}H", row + 1, col + 1)
}

fn sgr(cell: &Cell) -> String {
    format!(
        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m",
        cell.top.r, cell.top.g, cell.top.b, cell.bottom.r, cell.bottom.g, cell.bottom.b
    )
}
