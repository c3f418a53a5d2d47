use rand::Rng;
use ratatui::style::Color;

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Moves the hue forward by `degrees`, wrapping at 360.
    pub fn rotate(&mut self, degrees: f32) {
        self.h += degrees;
        if self.h >= 360.0 {
            self.h -= 360.0;
        }
    }
}

pub fn hsv_to_rgb(hsv: Hsv) -> (u8, u8, u8) {
    let s = hsv.s.clamp(0.0, 1.0);
    let v = hsv.v.clamp(0.0, 1.0);
    let h = hsv.h.rem_euclid(360.0) / 60.0;

    let sector = h.floor();
    let f = h - sector;
    let p1 = v * (1.0 - s);
    let p2 = v * (1.0 - s * f);
    let p3 = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u32 {
        0 => (v, p3, p1),
        1 => (p2, v, p1),
        2 => (p1, v, p3),
        3 => (p1, p2, v),
        4 => (p3, p1, v),
        _ => (v, p1, p2),
    };

    let to_u8 = |c: f32| (c * 255.0).floor() as u8;

    (to_u8(r), to_u8(g), to_u8(b))
}

pub fn to_color(hsv: Hsv) -> Color {
    let (r, g, b) = hsv_to_rgb(hsv);
    Color::Rgb(r, g, b)
}

/// Foreground and background hues that drift at slightly different rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorCycle {
    pub fg: Hsv,
    pub bg: Hsv,
}

impl ColorCycle {
    pub const FG_STEP: f32 = 1.0;
    pub const BG_STEP: f32 = 0.91;

    const FG_START: Hsv = Hsv::new(200.0, 0.4, 1.0);
    const BG_START: Hsv = Hsv::new(128.0, 1.0, 0.4);

    pub fn new(fg: Hsv, bg: Hsv) -> Self {
        Self { fg, bg }
    }

    /// The stock palette with both hues pushed by a random whole number of
    /// degrees, so each clock starts somewhere different.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        let mut cycle = Self::new(Self::FG_START, Self::BG_START);

        cycle.fg.h = (cycle.fg.h + rng.random_range(0..360) as f32).rem_euclid(360.0);
        cycle.bg.h = (cycle.bg.h + rng.random_range(0..360) as f32).rem_euclid(360.0);

        cycle
    }

    pub fn fg_color(&self) -> Color {
        to_color(self.fg)
    }

    pub fn bg_color(&self) -> Color {
        to_color(self.bg)
    }

    pub fn advance(&mut self) {
        self.fg.rotate(Self::FG_STEP);
        self.bg.rotate(Self::BG_STEP);
    }
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self::new(Self::FG_START, Self::BG_START)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries() {
        assert_eq!(hsv_to_rgb(Hsv::new(0.0, 1.0, 1.0)), (255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(120.0, 1.0, 1.0)), (0, 255, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(240.0, 1.0, 1.0)), (0, 0, 255));
    }

    #[test]
    fn zero_saturation_is_gray() {
        for h in [0.0, 90.0, 300.0] {
            let (r, g, b) = hsv_to_rgb(Hsv::new(h, 0.0, 0.5));
            assert_eq!((r, g), (g, b));
        }
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        assert_eq!(hsv_to_rgb(Hsv::new(360.0, 2.0, 5.0)), (255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(0.0, -1.0, -1.0)), (0, 0, 0));
    }

    #[test]
    fn hue_wraps() {
        let mut hsv = Hsv::new(359.5, 1.0, 1.0);
        hsv.rotate(1.0);
        assert!((hsv.h - 0.5).abs() < 1e-4);
    }

    #[test]
    fn advance_steps_both_hues() {
        let mut cycle = ColorCycle::default();
        cycle.advance();

        assert!((cycle.fg.h - 201.0).abs() < 1e-4);
        assert!((cycle.bg.h - 128.91).abs() < 1e-4);
    }

    #[test]
    fn random_keeps_saturation_and_value() {
        let cycle = ColorCycle::random();

        assert!((0.0..360.0).contains(&cycle.fg.h));
        assert!((0.0..360.0).contains(&cycle.bg.h));
        assert_eq!(cycle.fg.s, 0.4);
        assert_eq!(cycle.bg.v, 0.4);
    }
}
