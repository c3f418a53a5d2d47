use crate::font::Font;
use crate::sequence::{Targets, is_colonic};
use crate::shape::Shape;
use crate::surface::Surface;

/// How the leading digit is changing across one second's melt.
///
/// In 12-hour mode the hours-tens digit comes and goes; the row shifts by
/// half a cell so the visible digits stay centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetCase {
    /// The whole row is appearing and will have no leading digit.
    FadeInToBlank,
    /// The whole row is appearing with a leading digit.
    FadeInToDigit,
    /// The whole row is vanishing from a state with a leading digit.
    FadeOutFromDigit,
    /// The whole row is vanishing from a state without a leading digit.
    FadeOutFromBlank,
    BlankToDigit,
    DigitToBlank,
    SteadyBlank,
    SteadyDigit,
}

impl OffsetCase {
    /// Slot 1 blank means the whole row is empty on that side.
    pub fn classify(origin: &Targets, target: &Targets) -> Self {
        let fading_in = origin[1].is_none();
        let fading_out = target[1].is_none();
        let from_blank = origin[0].is_none();
        let to_blank = target[0].is_none();

        match (fading_in, fading_out, from_blank, to_blank) {
            (true, _, _, true) => Self::FadeInToBlank,
            (true, _, _, false) => Self::FadeInToDigit,
            (false, true, false, _) => Self::FadeOutFromDigit,
            (false, true, true, _) => Self::FadeOutFromBlank,
            (false, false, true, false) => Self::BlankToDigit,
            (false, false, false, true) => Self::DigitToBlank,
            (false, false, true, true) => Self::SteadyBlank,
            (false, false, false, false) => Self::SteadyDigit,
        }
    }

    /// Leftward shift of the row, in pixels, `fraction` of the way through
    /// the melt.
    pub fn offset(self, fraction: f32, char_width: u16) -> f32 {
        let half = f32::from(char_width) / 2.0;

        match self {
            Self::FadeInToBlank | Self::FadeOutFromBlank | Self::SteadyBlank => half,
            Self::FadeInToDigit | Self::FadeOutFromDigit | Self::SteadyDigit => 0.0,
            Self::BlankToDigit => half * (1.0 - fraction),
            Self::DigitToBlank => half * fraction,
        }
    }
}

pub fn left_offset(origin: &Targets, target: &Targets, fraction: f32, char_width: u16) -> f32 {
    OffsetCase::classify(origin, target).offset(fraction, char_width)
}

/// Clears the surface and draws `frames` left to right, starting `offset`
/// pixels left of the origin.
pub fn paint<'a, S, I>(surface: &mut S, font: &Font, frames: I, offset: f32)
where
    S: Surface + ?Sized,
    I: IntoIterator<Item = &'a Shape>,
{
    let (width, height) = surface.size();
    surface.clear_region(0, 0, width, height);

    let mut x = -offset;

    for (slot, frame) in frames.into_iter().enumerate() {
        let left = x.round() as i32;

        for (row, line) in frame.lines().iter().enumerate() {
            for stroke in line.iter().filter(|s| s.width() > 0) {
                surface.fill_rect(left + stroke.left, row as i32, stroke.width() as u32, 1);
            }
        }

        x += f32::from(if is_colonic(slot) {
            font.colon_width()
        } else {
            font.char_width()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelCanvas;
    use crate::font::Symbol;
    use crate::glyphs;
    use crate::sequence::SLOT_COUNT;

    fn row(values: &[Option<u8>]) -> Targets {
        let mut out = [None; SLOT_COUNT];
        for (i, v) in values.iter().enumerate() {
            out[i] = v.and_then(Symbol::from_index);
        }
        out
    }

    #[test]
    fn classify_decision_table() {
        let empty = row(&[]);
        let blank_lead = row(&[None, Some(9)]);
        let digit_lead = row(&[Some(1), Some(0)]);

        let cases = [
            (empty, blank_lead, OffsetCase::FadeInToBlank),
            (empty, empty, OffsetCase::FadeInToBlank),
            (empty, digit_lead, OffsetCase::FadeInToDigit),
            (digit_lead, empty, OffsetCase::FadeOutFromDigit),
            (blank_lead, empty, OffsetCase::FadeOutFromBlank),
            (blank_lead, digit_lead, OffsetCase::BlankToDigit),
            (digit_lead, blank_lead, OffsetCase::DigitToBlank),
            (blank_lead, blank_lead, OffsetCase::SteadyBlank),
            (digit_lead, digit_lead, OffsetCase::SteadyDigit),
        ];

        for (origin, target, expected) in cases {
            assert_eq!(
                OffsetCase::classify(&origin, &target),
                expected,
                "{origin:?} -> {target:?}"
            );
        }
    }

    #[test]
    fn animated_cases_interpolate() {
        assert_eq!(OffsetCase::BlankToDigit.offset(0.0, 20), 10.0);
        assert_eq!(OffsetCase::BlankToDigit.offset(1.0, 20), 0.0);
        assert_eq!(OffsetCase::DigitToBlank.offset(0.0, 20), 0.0);
        assert_eq!(OffsetCase::DigitToBlank.offset(1.0, 20), 10.0);

        let mid = OffsetCase::DigitToBlank.offset(0.5, 20);
        assert!(mid > 0.0 && mid < 10.0);
    }

    #[test]
    fn steady_cases_ignore_fraction() {
        for f in [0.0, 0.3, 1.0] {
            assert_eq!(OffsetCase::SteadyBlank.offset(f, 20), 10.0);
            assert_eq!(OffsetCase::SteadyDigit.offset(f, 20), 0.0);
            assert_eq!(OffsetCase::FadeInToBlank.offset(f, 20), 10.0);
            assert_eq!(OffsetCase::FadeOutFromDigit.offset(f, 20), 0.0);
        }
    }

    #[test]
    fn paint_advances_by_cell_class() {
        let font = glyphs::seven_segment(16).unwrap();
        let eight = font.glyph(Symbol::Digit(8)).unwrap();
        let colon = font.glyph(Symbol::Colon).unwrap();
        let cw = u32::from(font.char_width());
        let kw = u32::from(font.colon_width());

        let mut canvas = PixelCanvas::new(cw * 4 + kw, u32::from(font.char_height()));
        let frames = [eight, eight, colon, eight, eight];
        paint(&mut canvas, &font, frames, 0.0);

        // The third digit starts right after the colon cell.
        let third = cw * 2 + kw;
        let lit_in = |x0: u32, x1: u32| {
            (x0..x1).any(|x| (0..u32::from(font.char_height())).any(|y| canvas.pixel(x, y)))
        };

        assert!(lit_in(0, cw));
        assert!(lit_in(cw * 2, cw * 2 + kw));
        assert!(lit_in(third, third + cw));
        assert!(lit_in(third + cw, third + cw * 2));
    }

    #[test]
    fn repaint_is_idempotent() {
        let font = glyphs::seven_segment(12).unwrap();
        let frames: Vec<&Shape> = (0..5)
            .map(|i| font.glyph(Symbol::from_index(i * 2 % 12).unwrap()).unwrap())
            .collect();

        let mut canvas = PixelCanvas::new(80, 12);
        paint(&mut canvas, &font, frames.iter().copied(), 3.0);
        let first = canvas.pixels().to_vec();

        paint(&mut canvas, &font, frames.iter().copied(), 3.0);
        assert_eq!(canvas.pixels(), &first[..]);
    }

    #[test]
    fn offset_shifts_left() {
        let font = glyphs::seven_segment(16).unwrap();
        let eight = font.glyph(Symbol::Digit(8)).unwrap();
        let mut plain = PixelCanvas::new(40, 16);
        let mut shifted = PixelCanvas::new(40, 16);

        paint(&mut plain, &font, [eight], 0.0);
        paint(&mut shifted, &font, [eight], 4.0);

        for y in 0..16 {
            for x in 0..30 {
                assert_eq!(shifted.pixel(x, y), plain.pixel(x + 4, y));
            }
        }
    }
}
