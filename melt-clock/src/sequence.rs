use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::font::Symbol;
use crate::settings::{DateMode, Settings, TimeMode};

pub const SLOT_COUNT: usize = 8;

/// Symbol per slot. `None` is a blank slot.
pub type Targets = [Option<Symbol>; SLOT_COUNT];

/// Slots 2 and 5 hold separators and are drawn at colon width.
pub fn is_colonic(slot: usize) -> bool {
    slot == 2 || slot == 5
}

fn pair(value: u32) -> [Option<Symbol>; 2] {
    [
        Symbol::from_index((value / 10 % 10) as u8),
        Symbol::from_index((value % 10) as u8),
    ]
}

/// Lays `fields` out as `AB:CD:EF`, with `separator` between pairs, up to
/// the number of slots `mode` shows.
fn lay_out(mode: TimeMode, fields: [u32; 3], separator: Symbol) -> Targets {
    let mut targets = [None; SLOT_COUNT];
    let [a, b, c] = fields.map(pair);

    match mode {
        TimeMode::Seconds => {
            targets[..2].copy_from_slice(&a);
        }
        TimeMode::HoursMinutes => {
            targets[..2].copy_from_slice(&a);
            targets[2] = Some(separator);
            targets[3..5].copy_from_slice(&b);
        }
        TimeMode::HoursMinutesSeconds => {
            targets[..2].copy_from_slice(&a);
            targets[2] = Some(separator);
            targets[3..5].copy_from_slice(&b);
            targets[5] = Some(separator);
            targets[6..8].copy_from_slice(&c);
        }
    }

    targets
}

fn time_targets(now: &NaiveDateTime, settings: &Settings) -> Targets {
    let mut hour = now.hour();

    if settings.twelve_hour {
        if hour > 12 {
            hour -= 12;
        } else if hour == 0 {
            hour = 12;
        }
    }

    let fields = match settings.time_mode {
        TimeMode::Seconds => [now.second(), 0, 0],
        _ => [hour, now.minute(), now.second()],
    };

    let mut targets = lay_out(settings.time_mode, fields, Symbol::Colon);

    if settings.twelve_hour
        && settings.time_mode != TimeMode::Seconds
        && targets[0] == Some(Symbol::Digit(0))
    {
        targets[0] = None;
    }

    targets
}

fn date_targets(now: &NaiveDateTime, settings: &Settings) -> Targets {
    let day = now.day();
    let month = now.month();
    let year = now.year().rem_euclid(100) as u32;

    // Two slots only ever show the day; four show the first two fields of
    // the date mode, except year-first which still starts at the month.
    let fields = match (settings.time_mode, settings.date_mode) {
        (TimeMode::Seconds, _) => [day, 0, 0],
        (TimeMode::HoursMinutes, DateMode::DayMonthYear) => [day, month, 0],
        (TimeMode::HoursMinutes, _) => [month, day, 0],
        (TimeMode::HoursMinutesSeconds, DateMode::MonthDayYear) => [month, day, year],
        (TimeMode::HoursMinutesSeconds, DateMode::DayMonthYear) => [day, month, year],
        (TimeMode::HoursMinutesSeconds, DateMode::YearMonthDay) => [year, month, day],
    };

    lay_out(settings.time_mode, fields, Symbol::Dash)
}

/// Which symbol every slot should melt toward at `now`.
///
/// `debug_digit` in `0..=11` overrides every digit slot with that symbol;
/// any other value is ignored.
pub fn fill_target_digits(
    now: &NaiveDateTime,
    settings: &Settings,
    debug_digit: Option<u8>,
) -> Targets {
    if let Some(symbol) = debug_digit.and_then(Symbol::from_index) {
        let mut targets = [None; SLOT_COUNT];
        for slot in [0, 1, 3, 4, 6, 7] {
            targets[slot] = Some(symbol);
        }
        return targets;
    }

    if settings.show_date {
        date_targets(now, settings)
    } else {
        time_targets(now, settings)
    }
}
