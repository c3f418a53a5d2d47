/// Rejected font tables. Raised only while building fonts, never while the
/// clock is running.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FontError {
    #[error("font set is empty")]
    EmptySet,

    #[error("glyph {symbol} has {actual} scanlines, expected {expected}")]
    ScanlineCount {
        symbol: usize,
        expected: usize,
        actual: usize,
    },

    #[error("glyph {symbol} has no strokes on scanline {line}")]
    EmptyScanline { symbol: usize, line: usize },

    #[error("glyph {symbol} has a stroke ending before it starts on scanline {line}")]
    InvertedStroke { symbol: usize, line: usize },

    #[error("font cell must be at least 1x1, got {width}x{height}")]
    ZeroCell { width: u16, height: u16 },
}

/// Unrecognised setting values coming in as strings.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown orientation {0:?} (expected up, left, right or down)")]
    Orientation(String),

    #[error("unknown time mode {0:?} (expected SS, HHMM or HHMMSS)")]
    TimeMode(String),

    #[error("unknown date mode {0:?} (expected MMDDYY, DDMMYY or YYMMDD)")]
    DateMode(String),
}
