//! A digital clock whose digits melt into one another.
//!
//! Each glyph is a list of horizontal strokes per scanline. Once a second
//! the clock picks new target digits, and every frame it moves each stroke
//! endpoint a little further from where the digit was toward where it is
//! going.

pub mod canvas;
pub mod color;
pub mod easing;
pub mod engine;
pub mod error;
pub mod font;
pub mod glyphs;
pub mod interpolate;
pub mod layout;
pub mod select;
pub mod sequence;
pub mod settings;
pub mod shape;
pub mod surface;
pub mod timer;

pub use canvas::PixelCanvas;
pub use engine::{ClockState, MeltClock};
pub use error::{FontError, SettingsError};
pub use font::{Font, FontSet, Symbol};
pub use settings::{DateMode, Orientation, Settings, SettingsPatch, TimeMode};
pub use timer::{DeadlineScheduler, LocalClock, Scheduler, TimerHandle, TimerKind, WallClock};
