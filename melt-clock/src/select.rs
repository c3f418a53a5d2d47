use std::rc::Rc;

use crate::font::{Font, FontSet};
use crate::settings::{Orientation, Settings, TimeMode};

/// What the font selector needs to know about the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontRequest {
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
    pub scaling: bool,
    pub digits: u32,
    pub separators: u32,
}

impl FontRequest {
    pub fn from_settings(settings: &Settings) -> Self {
        let (digits, separators) = settings.time_mode.glyph_counts();

        Self {
            width: settings.width,
            height: settings.height,
            orientation: settings.orientation,
            scaling: settings.scaling,
            digits,
            separators,
        }
    }

    /// The pixel area available to the glyphs, after supersampling and
    /// rotation are accounted for.
    pub fn available(&self) -> (u32, u32) {
        let (mut width, mut height) = (self.width, self.height);

        if self.scaling {
            width = width.saturating_mul(2);
            height = height.saturating_mul(2);
        }

        if self.orientation.is_sideways() {
            std::mem::swap(&mut width, &mut height);
        }

        (width, height)
    }

    /// Pixel size of the digit row when drawn in `font`.
    pub fn pixel_size(&self, font: &Font) -> (u32, u32) {
        let width = u32::from(font.char_width()) * self.digits
            + u32::from(font.colon_width()) * self.separators;

        (width, u32::from(font.char_height()))
    }
}

impl TimeMode {
    /// `(digits, separators)` shown in this mode.
    pub fn glyph_counts(self) -> (u32, u32) {
        match self {
            TimeMode::Seconds => (2, 0),
            TimeMode::HoursMinutes => (4, 1),
            TimeMode::HoursMinutesSeconds => (6, 2),
        }
    }
}

/// The largest font whose digit row fits the request, or the smallest font
/// when none does.
pub fn select_font(fonts: &FontSet, request: &FontRequest) -> Rc<Font> {
    let (width, height) = request.available();

    fonts
        .fonts()
        .iter()
        .rev()
        .find(|font| {
            let (w, h) = request.pixel_size(font);
            w <= width && h <= height
        })
        .unwrap_or_else(|| fonts.smallest())
        .clone()
}
