/// The drawing surface handed to scenes.
///
/// Scenes draw in logical pixels (the configured window size); the canvas
/// maps those onto a grid of terminal cells.  Anything that lands outside
/// the grid is clipped.

use serde::{Deserialize, Serialize};

use crate::entities::Rect;
use crate::vector::Vec2;

/// 24-bit colour.  Serialised as `[r, g, b]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// One occupied terminal cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Rgb,
}

const BLOCK: char = '█';
const DOT: char = '●';

#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    cols: u16,
    rows: u16,
    background: Rgb,
    cells: Vec<Option<Glyph>>,
}

impl Canvas {
    /// A `width` × `height` pixel surface shown on `cols` × `rows` cells.
    pub fn new(width: u32, height: u32, cols: u16, rows: u16) -> Self {
        Self {
            width,
            height,
            cols,
            rows,
            background: Rgb::default(),
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    /// Logical size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn grid_size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Change the cell grid (e.g. after a terminal resize).  Contents are
    /// discarded; the logical size is unchanged.
    pub fn resize_grid(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![None; cols as usize * rows as usize];
    }

    pub fn clear(&mut self, background: Rgb) {
        self.background = background;
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<Glyph> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells[row as usize * self.cols as usize + col as usize]
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        let (c0, c1) = self.span_x(rect.x as f32, rect.right() as f32);
        let (r0, r1) = self.span_y(rect.y as f32, rect.bottom() as f32);
        for row in r0..r1 {
            for col in c0..c1 {
                self.put(col, row, BLOCK, color);
            }
        }
    }

    /// Fill every cell whose centre lies within `radius` of `center`.  The
    /// cell under the centre is always filled, so small circles stay visible.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        let (c0, c1) = self.span_x(center.x - radius, center.x + radius);
        let (r0, r1) = self.span_y(center.y - radius, center.y + radius);
        let (sx, sy) = self.scale();
        for row in r0..r1 {
            for col in c0..c1 {
                let cx = (col as f32 + 0.5) * sx;
                let cy = (row as f32 + 0.5) * sy;
                let (dx, dy) = (cx - center.x, cy - center.y);
                if dx * dx + dy * dy <= radius * radius {
                    self.put(col, row, DOT, color);
                }
            }
        }
        self.put(
            (center.x / sx).floor() as i32,
            (center.y / sy).floor() as i32,
            DOT,
            color,
        );
    }

    /// Write `text` left to right starting at the cell under (`x`, `y`).
    pub fn text(&mut self, x: f32, y: f32, text: &str, color: Rgb) {
        let (sx, sy) = self.scale();
        let col = (x / sx).floor() as i32;
        let row = (y / sy).floor() as i32;
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }

    /// Pixels covered by one cell, horizontally and vertically.
    fn scale(&self) -> (f32, f32) {
        (
            self.width as f32 / self.cols.max(1) as f32,
            self.height as f32 / self.rows.max(1) as f32,
        )
    }

    /// Half-open column range covering the pixel span `[left, right)`.
    fn span_x(&self, left: f32, right: f32) -> (i32, i32) {
        let (sx, _) = self.scale();
        span(left / sx, right / sx)
    }

    fn span_y(&self, top: f32, bottom: f32) -> (i32, i32) {
        let (_, sy) = self.scale();
        span(top / sy, bottom / sy)
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Rgb) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        let index = row as usize * self.cols as usize + col as usize;
        self.cells[index] = Some(Glyph { ch, color });
    }
}

fn span(start: f32, end: f32) -> (i32, i32) {
    let first = start.floor() as i32;
    let last = (end.ceil() as i32).max(first + 1);
    (first, last)
}
