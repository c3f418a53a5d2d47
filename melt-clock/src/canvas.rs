use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

use crate::settings::Orientation;
use crate::surface::Surface;

const UPPER_HALF: &str = "\u{2580}";

/// A one-bit pixel buffer with a single foreground and background color.
///
/// Renders as a ratatui widget, two pixel rows per terminal cell, rotated
/// by its orientation and scaled to fit the render area.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
    fg: Color,
    bg: Color,
    orientation: Orientation,
}

impl Default for PixelCanvas {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; (width * height) as usize],
            fg: Color::White,
            bg: Color::Black,
            orientation: Orientation::Up,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.pixels[(y * self.width + x) as usize]
    }

    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    pub fn fg(&self) -> Color {
        self.fg
    }

    pub fn bg(&self) -> Color {
        self.bg
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of lit pixels.
    pub fn ink(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// Size after rotation.
    fn view_size(&self) -> (u32, u32) {
        if self.orientation.is_sideways() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Maps a pixel of the rotated view back to the buffer.
    fn view_to_canvas(&self, vx: u32, vy: u32) -> (u32, u32) {
        let (w, h) = (self.width, self.height);

        match self.orientation {
            Orientation::Up => (vx, vy),
            Orientation::Down => (w - 1 - vx, h - 1 - vy),
            // A clockwise quarter turn.
            Orientation::Left => (vy, h - 1 - vx),
            Orientation::Right => (w - 1 - vy, vx),
        }
    }

    fn fill(&mut self, x: i32, y: i32, width: u32, height: u32, on: bool) {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (i64::from(x) + i64::from(width)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(height)).min(i64::from(self.height));

        for py in y0..y1 {
            let row = (py * i64::from(self.width)) as usize;
            for px in x0..x1 {
                self.pixels[row + px as usize] = on;
            }
        }
    }
}

impl Surface for PixelCanvas {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize((width * height) as usize, false);
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear_region(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.fill(x, y, width, height, false);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.fill(x, y, width, height, true);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fg = color;
    }

    fn set_background(&mut self, color: Color) {
        self.bg = color;
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }
}

impl Widget for &PixelCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (vw, vh) = self.view_size();
        let (aw, ah) = (u32::from(area.width), u32::from(area.height) * 2);

        let scale = if vw == 0 || vh == 0 {
            0.0
        } else {
            (aw as f32 / vw as f32).min(ah as f32 / vh as f32)
        };

        let dw = (vw as f32 * scale) as u32;
        let dh = (vh as f32 * scale) as u32;
        let ox = (aw - dw.min(aw)) / 2;
        let oy = (ah - dh.min(ah)) / 2;

        let sample = |px: u32, py: u32| -> bool {
            if scale <= 0.0 || px < ox || py < oy || px >= ox + dw || py >= oy + dh {
                return false;
            }

            let vx = (((px - ox) as f32 / scale) as u32).min(vw - 1);
            let vy = (((py - oy) as f32 / scale) as u32).min(vh - 1);
            let (cx, cy) = self.view_to_canvas(vx, vy);

            self.pixel(cx, cy)
        };

        for y in 0..area.height {
            for x in 0..area.width {
                let top = sample(u32::from(x), u32::from(y) * 2);
                let bottom = sample(u32::from(x), u32::from(y) * 2 + 1);

                let cell = &mut buf[(area.x + x, area.y + y)];
                cell.set_symbol(UPPER_HALF);
                cell.set_fg(if top { self.fg } else { self.bg });
                cell.set_bg(if bottom { self.fg } else { self.bg });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_clips_to_buffer() {
        let mut canvas = PixelCanvas::new(4, 2);
        canvas.fill_rect(-2, 1, 10, 5);

        assert!(!canvas.pixel(0, 0));
        assert!(canvas.pixel(0, 1));
        assert!(canvas.pixel(3, 1));
        assert_eq!(canvas.ink(), 4);
    }

    #[test]
    fn zero_width_draws_nothing() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_rect(2, 2, 0, 1);

        assert_eq!(canvas.ink(), 0);
    }

    #[test]
    fn clear_region_erases() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_rect(0, 0, 4, 4);
        canvas.clear_region(0, 0, 2, 4);

        assert_eq!(canvas.ink(), 8);
        assert!(!canvas.pixel(1, 3));
        assert!(canvas.pixel(2, 3));
    }

    #[test]
    fn resize_blanks_buffer() {
        let mut canvas = PixelCanvas::new(2, 2);
        canvas.fill_rect(0, 0, 2, 2);
        canvas.resize(3, 1);

        assert_eq!(canvas.size(), (3, 1));
        assert_eq!(canvas.ink(), 0);
    }

    #[test]
    fn renders_half_blocks() {
        let mut canvas = PixelCanvas::new(2, 2);
        canvas.set_fill_color(Color::Red);
        canvas.set_background(Color::Blue);
        canvas.fill_rect(0, 0, 1, 1);

        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), UPPER_HALF);
        assert_eq!(buf[(0, 0)].fg, Color::Red);
        assert_eq!(buf[(0, 0)].bg, Color::Blue);
        assert_eq!(buf[(1, 0)].fg, Color::Blue);
    }

    #[test]
    fn rotation_moves_pixels() {
        // Lit pixel at the top-left of a 2x1 buffer.
        let mut canvas = PixelCanvas::new(2, 1);
        canvas.set_fill_color(Color::Red);
        canvas.set_background(Color::Blue);
        canvas.fill_rect(0, 0, 1, 1);

        let lit = |canvas: &PixelCanvas, w: u16, h: u16| -> Vec<(u16, u16, bool)> {
            let area = Rect::new(0, 0, w, h);
            let mut buf = Buffer::empty(area);
            canvas.render(area, &mut buf);
            let mut out = Vec::new();
            for y in 0..h {
                for x in 0..w {
                    out.push((x, y * 2, buf[(x, y)].fg == Color::Red));
                    out.push((x, y * 2 + 1, buf[(x, y)].bg == Color::Red));
                }
            }
            out.into_iter().filter(|p| p.2).collect()
        };

        assert_eq!(lit(&canvas, 2, 1), vec![(0, 0, true)]);

        canvas.set_orientation(Orientation::Down);
        assert_eq!(lit(&canvas, 2, 1), vec![(1, 0, true)]);

        // Clockwise: the left end of the row ends up on top.
        canvas.set_orientation(Orientation::Left);
        assert_eq!(lit(&canvas, 1, 1), vec![(0, 0, true)]);

        canvas.set_orientation(Orientation::Right);
        assert_eq!(lit(&canvas, 1, 1), vec![(0, 1, true)]);
    }

    #[test]
    fn empty_canvas_renders_background() {
        let canvas = PixelCanvas::default();
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);

        assert_eq!(buf[(2, 1)].bg, canvas.bg());
    }
}
