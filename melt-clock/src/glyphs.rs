//! A procedural seven-segment font family.
//!
//! Glyphs are drawn into a bitmap and run-length encoded into strokes, the
//! same way a hand-drawn bitmap font would be converted.

use crate::error::FontError;
use crate::font::{Font, FontSet, Symbol};
use crate::shape::Shape;

/// Cell heights of [`default_fonts`], in pixels.
pub const DEFAULT_HEIGHTS: [u16; 16] = [
    8, 10, 12, 16, 20, 24, 32, 40, 48, 64, 80, 96, 128, 160, 192, 256,
];

const A: u8 = 0b100_0000;
const B: u8 = 0b010_0000;
const C: u8 = 0b001_0000;
const D: u8 = 0b000_1000;
const E: u8 = 0b000_0100;
const F: u8 = 0b000_0010;
const G: u8 = 0b000_0001;

const DIGIT_SEGMENTS: [u8; 10] = [
    A | B | C | D | E | F,
    B | C,
    A | B | D | E | G,
    A | B | C | D | G,
    B | C | F | G,
    A | C | D | F | G,
    A | C | D | E | F | G,
    A | B | C,
    A | B | C | D | E | F | G,
    A | B | C | D | F | G,
];

struct Bitmap {
    width: usize,
    rows: Vec<Vec<bool>>,
}

impl Bitmap {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width: usize::from(width),
            rows: vec![vec![false; usize::from(width)]; usize::from(height)],
        }
    }

    fn fill(&mut self, x0: usize, x1: usize, y0: usize, y1: usize) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.rows.len());

        for row in &mut self.rows[y0.min(y1)..y1] {
            for px in &mut row[x0.min(x1)..x1] {
                *px = true;
            }
        }
    }

    fn into_shape(self) -> Shape {
        Shape::from_rows(&self.rows, self.width as u16)
    }
}

/// Cell geometry shared by every glyph of one size.
#[derive(Debug, Clone, Copy)]
struct Metrics {
    char_width: u16,
    colon_width: u16,
    height: u16,
    thickness: usize,
    left: usize,
    right: usize,
    top: usize,
    bottom: usize,
    mid_start: usize,
    mid_end: usize,
}

impl Metrics {
    fn for_height(height: u16) -> Self {
        let height = height.max(5);
        let char_width = ((f32::from(height) * 0.6).round() as u16).max(3);
        let colon_width = ((f32::from(height) * 0.3).round() as u16).max(2);
        let thickness = (usize::from(height) / 8).max(1);

        let margin_x = usize::from(char_width) / 8;
        let margin_y = usize::from(height) / 16;
        let mid_start = usize::from(height) / 2 - thickness / 2;

        Self {
            char_width,
            colon_width,
            height,
            thickness,
            left: margin_x,
            right: usize::from(char_width) - margin_x,
            top: margin_y,
            bottom: usize::from(height) - margin_y,
            mid_start,
            mid_end: mid_start + thickness,
        }
    }
}

fn digit(m: &Metrics, segments: u8) -> Shape {
    let mut bmp = Bitmap::new(m.char_width, m.height);
    let t = m.thickness;

    if segments & A != 0 {
        bmp.fill(m.left, m.right, m.top, m.top + t);
    }
    if segments & B != 0 {
        bmp.fill(m.right - t, m.right, m.top, m.mid_end);
    }
    if segments & C != 0 {
        bmp.fill(m.right - t, m.right, m.mid_start, m.bottom);
    }
    if segments & D != 0 {
        bmp.fill(m.left, m.right, m.bottom - t, m.bottom);
    }
    if segments & E != 0 {
        bmp.fill(m.left, m.left + t, m.mid_start, m.bottom);
    }
    if segments & F != 0 {
        bmp.fill(m.left, m.left + t, m.top, m.mid_end);
    }
    if segments & G != 0 {
        bmp.fill(m.left, m.right, m.mid_start, m.mid_end);
    }

    bmp.into_shape()
}

fn colon(m: &Metrics) -> Shape {
    let mut bmp = Bitmap::new(m.colon_width, m.height);
    let dot = m.thickness.min(usize::from(m.colon_width));
    let x0 = (usize::from(m.colon_width) - dot) / 2;
    let h = usize::from(m.height);

    for center in [h / 3, h * 2 / 3] {
        let y0 = center.saturating_sub(dot / 2);
        bmp.fill(x0, x0 + dot, y0, y0 + dot);
    }

    bmp.into_shape()
}

fn dash(m: &Metrics) -> Shape {
    let mut bmp = Bitmap::new(m.colon_width, m.height);
    let inset = usize::from(m.colon_width) / 6;

    bmp.fill(inset, usize::from(m.colon_width) - inset, m.mid_start, m.mid_end);
    bmp.into_shape()
}

/// Builds a seven-segment font whose cell is `char_height` pixels tall
/// (at least 5).
pub fn seven_segment(char_height: u16) -> Result<Font, FontError> {
    let m = Metrics::for_height(char_height);

    let glyphs: [Shape; Symbol::COUNT] = std::array::from_fn(|i| match i {
        0..=9 => digit(&m, DIGIT_SEGMENTS[i]),
        10 => colon(&m),
        _ => dash(&m),
    });

    Font::new(m.char_width, m.colon_width, m.height, glyphs)
}

pub fn default_fonts() -> Result<FontSet, FontError> {
    let fonts = DEFAULT_HEIGHTS
        .iter()
        .map(|&h| seven_segment(h))
        .collect::<Result<Vec<_>, _>>()?;

    FontSet::new(fonts)
}
