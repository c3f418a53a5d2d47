use std::collections::HashMap;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Which way is up on the display. `Left` and `Right` turn the digit row by
/// a quarter turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Up,
    Left,
    Right,
    Down,
}

impl Orientation {
    pub fn is_sideways(self) -> bool {
        matches!(self, Orientation::Left | Orientation::Right)
    }

    pub fn next(self) -> Self {
        match self {
            Orientation::Up => Orientation::Left,
            Orientation::Left => Orientation::Down,
            Orientation::Down => Orientation::Right,
            Orientation::Right => Orientation::Up,
        }
    }
}

impl FromStr for Orientation {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Orientation::Up),
            "left" => Ok(Orientation::Left),
            "right" => Ok(Orientation::Right),
            "down" => Ok(Orientation::Down),
            _ => Err(SettingsError::Orientation(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeMode {
    #[serde(rename = "SS")]
    Seconds,
    #[serde(rename = "HHMM")]
    HoursMinutes,
    #[default]
    #[serde(rename = "HHMMSS")]
    HoursMinutesSeconds,
}

impl TimeMode {
    pub fn next(self) -> Self {
        match self {
            TimeMode::HoursMinutesSeconds => TimeMode::HoursMinutes,
            TimeMode::HoursMinutes => TimeMode::Seconds,
            TimeMode::Seconds => TimeMode::HoursMinutesSeconds,
        }
    }

    /// Slots drawn in this mode, separators included.
    pub fn displayed_slots(self) -> usize {
        let (digits, separators) = self.glyph_counts();
        (digits + separators) as usize
    }
}

impl FromStr for TimeMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SS" => Ok(TimeMode::Seconds),
            "HHMM" => Ok(TimeMode::HoursMinutes),
            "HHMMSS" => Ok(TimeMode::HoursMinutesSeconds),
            _ => Err(SettingsError::TimeMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateMode {
    #[default]
    #[serde(rename = "MMDDYY")]
    MonthDayYear,
    #[serde(rename = "DDMMYY")]
    DayMonthYear,
    #[serde(rename = "YYMMDD")]
    YearMonthDay,
}

impl DateMode {
    pub fn next(self) -> Self {
        match self {
            DateMode::MonthDayYear => DateMode::DayMonthYear,
            DateMode::DayMonthYear => DateMode::YearMonthDay,
            DateMode::YearMonthDay => DateMode::MonthDayYear,
        }
    }
}

impl FromStr for DateMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MMDDYY" => Ok(DateMode::MonthDayYear),
            "DDMMYY" => Ok(DateMode::DayMonthYear),
            "YYMMDD" => Ok(DateMode::YearMonthDay),
            _ => Err(SettingsError::DateMode(s.to_string())),
        }
    }
}

/// A complete snapshot of how the clock should look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display box, in pixels.
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
    pub time_mode: TimeMode,
    pub date_mode: DateMode,
    pub twelve_hour: bool,
    pub show_date: bool,
    /// Frames per second.
    pub fps: u32,
    /// Color steps per second. `0` freezes the colors.
    pub cps: u32,
    /// Render at twice the box size and let the presenter scale down.
    pub scaling: bool,
    /// Shows this symbol index in every digit slot for one second.
    #[serde(skip)]
    pub debug_digit: Option<u8>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 320,
            height: 80,
            orientation: Orientation::Up,
            time_mode: TimeMode::HoursMinutesSeconds,
            date_mode: DateMode::MonthDayYear,
            twelve_hour: false,
            show_date: false,
            fps: 30,
            cps: 10,
            scaling: false,
            debug_digit: None,
        }
    }
}

impl Settings {
    /// Whether moving from `self` to `next` changes the geometry, which
    /// forces a full re-layout.
    pub fn needs_reset(&self, next: &Settings) -> bool {
        self.width != next.width
            || self.height != next.height
            || self.time_mode != next.time_mode
            || self.orientation != next.orientation
            || self.scaling != next.scaling
    }

    /// Builds settings from string-typed key/value input, falling back to
    /// the default for any missing or unparseable field.
    pub fn from_raw(raw: &HashMap<String, String>) -> Self {
        let mut settings = Settings::default();

        for (key, value) in raw {
            match key.as_str() {
                "width" => parse_into(key, value, &mut settings.width),
                "height" => parse_into(key, value, &mut settings.height),
                "orientation" => parse_into(key, value, &mut settings.orientation),
                "time_mode" => parse_into(key, value, &mut settings.time_mode),
                "date_mode" => parse_into(key, value, &mut settings.date_mode),
                "twelve_hour" => parse_into(key, value, &mut settings.twelve_hour),
                "show_date" => parse_into(key, value, &mut settings.show_date),
                "fps" => parse_into(key, value, &mut settings.fps),
                "cps" => parse_into(key, value, &mut settings.cps),
                "scaling" => parse_into(key, value, &mut settings.scaling),
                "debug_digit" => {
                    settings.debug_digit = value.trim().parse().ok();
                }
                _ => warn!("ignoring unknown setting {key:?}"),
            }
        }

        settings
    }
}

fn parse_into<T>(key: &str, value: &str, slot: &mut T)
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    // Form inputs hand over sizes as decimals.
    let trimmed = value.trim();
    let parsed = trimmed.parse::<T>().or_else(|e| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .and_then(|v| (v.floor() as u64).to_string().parse::<T>().ok())
            .ok_or(e)
    });

    match parsed {
        Ok(v) => *slot = v,
        Err(e) => warn!("setting {key}={value:?} rejected ({e}), keeping default"),
    }
}

/// A partial update. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub orientation: Option<Orientation>,
    pub time_mode: Option<TimeMode>,
    pub date_mode: Option<DateMode>,
    pub twelve_hour: Option<bool>,
    pub show_date: Option<bool>,
    pub fps: Option<u32>,
    pub cps: Option<u32>,
    pub scaling: Option<bool>,
    #[serde(skip)]
    pub debug_digit: Option<u8>,
}

impl SettingsPatch {
    pub fn apply_to(&self, base: &Settings) -> Settings {
        Settings {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            orientation: self.orientation.unwrap_or(base.orientation),
            time_mode: self.time_mode.unwrap_or(base.time_mode),
            date_mode: self.date_mode.unwrap_or(base.date_mode),
            twelve_hour: self.twelve_hour.unwrap_or(base.twelve_hour),
            show_date: self.show_date.unwrap_or(base.show_date),
            fps: self.fps.unwrap_or(base.fps),
            cps: self.cps.unwrap_or(base.cps),
            scaling: self.scaling.unwrap_or(base.scaling),
            debug_digit: self.debug_digit.or(base.debug_digit),
        }
    }
}

/// Result of folding pending settings into the active ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    /// Nothing was pending.
    Unchanged,
    /// Applied without touching the layout.
    Cosmetic,
    /// Geometry changed; the caller must re-layout.
    Reset,
}

/// Active settings plus the snapshot waiting to replace them.
#[derive(Debug, Clone)]
pub struct SettingsBuffer {
    active: Settings,
    pending: Option<Settings>,
}

impl SettingsBuffer {
    pub fn new(active: Settings) -> Self {
        Self {
            active,
            pending: None,
        }
    }

    pub fn stage(&mut self, settings: Settings) {
        self.pending = Some(settings);
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The most recently staged snapshot, or the active one.
    pub fn latest(&self) -> &Settings {
        self.pending.as_ref().unwrap_or(&self.active)
    }

    pub fn active(&self) -> &Settings {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut Settings {
        &mut self.active
    }

    pub fn merge(&mut self) -> Merge {
        let Some(next) = self.pending.take() else {
            return Merge::Unchanged;
        };

        let reset = self.active.needs_reset(&next);
        self.active = next;

        if reset { Merge::Reset } else { Merge::Cosmetic }
    }
}
