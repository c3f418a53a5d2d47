use std::cell::OnceCell;
use std::rc::Rc;

use crate::error::FontError;
use crate::shape::Shape;

/// One of the twelve drawable symbols of a clock font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Digit(u8),
    Colon,
    Dash,
}

impl Symbol {
    pub const COUNT: usize = 12;

    /// `0..=9` are digits, `10` is the colon, `11` the dash.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0..=9 => Some(Self::Digit(index)),
            10 => Some(Self::Colon),
            11 => Some(Self::Dash),
            _ => None,
        }
    }

    /// `None` for a digit above 9.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Digit(d) if d <= 9 => Some(usize::from(d)),
            Self::Digit(_) => None,
            Self::Colon => Some(10),
            Self::Dash => Some(11),
        }
    }
}

struct EmptyShapes {
    cell: Shape,
    colon: Shape,
}

/// A fixed set of glyph shapes at one size.
pub struct Font {
    char_width: u16,
    colon_width: u16,
    char_height: u16,
    glyphs: Vec<Shape>,
    empty: OnceCell<EmptyShapes>,
}

impl Font {
    /// `glyphs` holds digits 0-9 followed by colon and dash.
    pub fn new(
        char_width: u16,
        colon_width: u16,
        char_height: u16,
        glyphs: [Shape; Symbol::COUNT],
    ) -> Result<Self, FontError> {
        if char_width == 0 || colon_width == 0 || char_height == 0 {
            return Err(FontError::ZeroCell {
                width: char_width.min(colon_width),
                height: char_height,
            });
        }

        let expected = usize::from(char_height);

        for (symbol, glyph) in glyphs.iter().enumerate() {
            if glyph.height() != expected {
                return Err(FontError::ScanlineCount {
                    symbol,
                    expected,
                    actual: glyph.height(),
                });
            }

            if let Some(line) = glyph.lines().iter().position(Vec::is_empty) {
                return Err(FontError::EmptyScanline { symbol, line });
            }

            let inverted = glyph
                .lines()
                .iter()
                .position(|strokes| strokes.iter().any(|s| s.left > s.right));
            if let Some(line) = inverted {
                return Err(FontError::InvertedStroke { symbol, line });
            }
        }

        Ok(Self {
            char_width,
            colon_width,
            char_height,
            glyphs: glyphs.into(),
            empty: OnceCell::new(),
        })
    }

    pub fn char_width(&self) -> u16 {
        self.char_width
    }

    pub fn colon_width(&self) -> u16 {
        self.colon_width
    }

    pub fn char_height(&self) -> u16 {
        self.char_height
    }

    pub fn glyph(&self, symbol: Symbol) -> Option<&Shape> {
        self.glyphs.get(symbol.index()?)
    }

    /// The shape a slot shows for `symbol`. Blank slots and unknown symbols
    /// get the empty shape of their width class.
    pub fn shape(&self, symbol: Option<Symbol>, colonic: bool) -> &Shape {
        match symbol.and_then(|s| self.glyph(s)) {
            Some(glyph) => glyph,
            None => self.empty_shape(colonic),
        }
    }

    /// Built on first use, then cached for the life of the font.
    pub fn empty_shape(&self, colonic: bool) -> &Shape {
        let empty = self.empty.get_or_init(|| EmptyShapes {
            cell: Shape::empty(self.char_width, self.char_height),
            colon: Shape::empty(self.colon_width, self.char_height),
        });

        if colonic { &empty.colon } else { &empty.cell }
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("char_width", &self.char_width)
            .field("colon_width", &self.colon_width)
            .field("char_height", &self.char_height)
            .finish_non_exhaustive()
    }
}

/// Fonts ordered from smallest to largest cell height.
#[derive(Debug, Clone)]
pub struct FontSet {
    fonts: Vec<Rc<Font>>,
}

impl FontSet {
    pub fn new(fonts: Vec<Font>) -> Result<Self, FontError> {
        if fonts.is_empty() {
            return Err(FontError::EmptySet);
        }

        let mut fonts: Vec<Rc<Font>> = fonts.into_iter().map(Rc::new).collect();
        fonts.sort_by_key(|f| (f.char_height, f.char_width));

        Ok(Self { fonts })
    }

    pub fn fonts(&self) -> &[Rc<Font>] {
        &self.fonts
    }

    pub fn smallest(&self) -> &Rc<Font> {
        &self.fonts[0]
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
