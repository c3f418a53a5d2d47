use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveDateTime;
use log::{debug, info, trace};

use crate::color::ColorCycle;
use crate::easing;
use crate::font::{Font, FontSet};
use crate::interpolate;
use crate::layout;
use crate::select::{self, FontRequest};
use crate::sequence::{self, SLOT_COUNT, Targets, is_colonic};
use crate::settings::{Merge, Settings, SettingsBuffer, SettingsPatch};
use crate::shape::Shape;
use crate::surface::Surface;
use crate::timer::{Scheduler, TimerHandle, TimerKind, WallClock};

/// How often the color timer still fires while colors are frozen, so that a
/// later rate change gets picked up.
pub const IDLE_COLOR_PERIOD: Duration = Duration::from_millis(2000);

/// Whether the clock's timers are running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Inactive,
    Active,
}

/// One character position. `origin` is a snapshot of what was on screen
/// when the current second began; `current` is rewritten every frame.
#[derive(Debug, Clone)]
struct Slot {
    origin: Shape,
    current: Shape,
}

/// A melting digital clock.
///
/// The host owns the event loop: it hands the clock a [`Scheduler`] and
/// calls [`MeltClock::fire`] whenever a scheduled timer comes due.
pub struct MeltClock<S: Surface, T: Scheduler, W: WallClock> {
    surface: S,
    scheduler: T,
    wall_clock: W,
    fonts: FontSet,
    font: Rc<Font>,

    settings: SettingsBuffer,
    state: ClockState,
    frame_period: Duration,
    /// `None` while colors are frozen.
    color_period: Option<Duration>,
    frame_timer: Option<TimerHandle>,
    color_timer: Option<TimerHandle>,

    slots: Vec<Slot>,
    origin_symbols: Targets,
    target_symbols: Targets,
    displayed: usize,
    last_second: Option<i64>,
    fraction: f32,

    colors: ColorCycle,
}

impl<S: Surface, T: Scheduler, W: WallClock> MeltClock<S, T, W> {
    /// Lays the clock out with default settings. Nothing runs until
    /// [`MeltClock::activate`].
    pub fn new(surface: S, scheduler: T, wall_clock: W, fonts: FontSet) -> Self {
        let settings = Settings::default();
        let font = fonts.smallest().clone();

        let mut clock = Self {
            surface,
            scheduler,
            wall_clock,
            fonts,
            font,
            frame_period: frame_period(&settings),
            color_period: color_period(&settings),
            settings: SettingsBuffer::new(settings),
            state: ClockState::Inactive,
            frame_timer: None,
            color_timer: None,
            slots: Vec::new(),
            origin_symbols: [None; SLOT_COUNT],
            target_symbols: [None; SLOT_COUNT],
            displayed: 0,
            last_second: None,
            fraction: 0.0,
            colors: ColorCycle::random(),
        };

        clock.reset_layout();
        clock
    }

    pub fn with_colors(mut self, colors: ColorCycle) -> Self {
        self.colors = colors;
        self
    }

    /// Starts both timers, each ticking once right away. No-op if already
    /// active.
    pub fn activate(&mut self) {
        if self.state == ClockState::Active {
            return;
        }

        info!("clock activated");
        self.state = ClockState::Active;

        self.color_tick();
        self.frame_tick();
    }

    /// Cancels both timers. Safe to call at any time.
    pub fn deactivate(&mut self) {
        if self.state == ClockState::Inactive {
            return;
        }

        info!("clock deactivated");
        self.state = ClockState::Inactive;

        if let Some(handle) = self.frame_timer.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.color_timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    pub fn teardown(&mut self) {
        self.deactivate();
    }

    /// Stages `settings`. While active they take effect at the next second
    /// boundary, otherwise immediately. Rate changes take effect at the next
    /// tick either way.
    pub fn change_settings(&mut self, settings: Settings) {
        self.frame_period = frame_period(&settings);
        self.color_period = color_period(&settings);
        self.settings.stage(settings);

        if self.state == ClockState::Inactive {
            self.apply_pending();
        }
    }

    /// Layers `patch` over the most recently staged settings.
    pub fn apply_patch(&mut self, patch: &SettingsPatch) {
        let next = patch.apply_to(self.settings.latest());
        self.change_settings(next);
    }

    /// Runs the tick for a timer that came due. The tick cancels whatever
    /// handle of that kind is still outstanding before rescheduling, so only
    /// one timer of each kind is ever live.
    pub fn fire(&mut self, timer: TimerKind) {
        if self.state == ClockState::Inactive {
            return;
        }

        match timer {
            TimerKind::Frame => self.frame_tick(),
            TimerKind::Color => self.color_tick(),
        }
    }

    fn frame_tick(&mut self) {
        let now = self.wall_clock.now();

        self.tick_sequence(now);
        self.draw();

        if let Some(handle) = self.frame_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.frame_timer = Some(self.scheduler.schedule(TimerKind::Frame, self.frame_period));
    }

    fn color_tick(&mut self) {
        self.surface.set_fill_color(self.colors.fg_color());
        self.surface.set_background(self.colors.bg_color());

        let delay = match self.color_period {
            Some(period) => {
                self.colors.advance();
                period
            }
            None => IDLE_COLOR_PERIOD,
        };

        if let Some(handle) = self.color_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.color_timer = Some(self.scheduler.schedule(TimerKind::Color, delay));
    }

    fn apply_pending(&mut self) {
        match self.settings.merge() {
            Merge::Unchanged => {}
            Merge::Cosmetic => debug!("settings applied: {:?}", self.settings.active()),
            Merge::Reset => {
                debug!("settings applied with re-layout: {:?}", self.settings.active());
                self.reset_layout();
            }
        }
    }

    /// Picks a font for the active geometry and starts every slot over from
    /// blank.
    fn reset_layout(&mut self) {
        let settings = self.settings.active();
        let request = FontRequest::from_settings(settings);

        self.font = select::select_font(&self.fonts, &request);
        let (width, height) = request.pixel_size(&self.font);

        debug!(
            "layout reset: font {}x{} (colon {}), canvas {}x{}, {:?}",
            self.font.char_width(),
            self.font.char_height(),
            self.font.colon_width(),
            width,
            height,
            settings.orientation,
        );

        self.surface.resize(width, height);
        self.surface.set_orientation(settings.orientation);
        self.displayed = settings.time_mode.displayed_slots();

        self.slots = (0..SLOT_COUNT)
            .map(|i| {
                let empty = self.font.empty_shape(is_colonic(i));
                Slot {
                    origin: empty.clone(),
                    current: empty.clone(),
                }
            })
            .collect();

        self.origin_symbols = [None; SLOT_COUNT];
        self.target_symbols = [None; SLOT_COUNT];
    }

    /// A new second began: whatever is on screen now becomes the origin,
    /// and the digits for `now` become the target.
    fn start_sequence(&mut self, now: &NaiveDateTime) {
        if self.settings.has_pending() {
            self.apply_pending();
        }

        for slot in &mut self.slots {
            slot.origin.copy_from(&slot.current);
        }
        self.origin_symbols = self.target_symbols;

        let debug_digit = self.settings.active_mut().debug_digit.take();
        self.target_symbols =
            sequence::fill_target_digits(now, self.settings.active(), debug_digit);

        trace!("second {now}: {:?}", self.target_symbols);
    }

    fn tick_sequence(&mut self, now: NaiveDateTime) {
        let stamp = now.and_utc();
        let second = stamp.timestamp();

        match self.last_second {
            None => self.last_second = Some(second),
            Some(last) if last != second => {
                self.start_sequence(&now);
                self.last_second = Some(second);
            }
            Some(_) => {}
        }

        self.fraction = easing::linger(stamp.timestamp_subsec_millis().min(999));

        for (i, slot) in self.slots.iter_mut().enumerate() {
            let target = self.font.shape(self.target_symbols[i], is_colonic(i));
            interpolate::interpolate(&slot.origin, target, self.fraction, &mut slot.current);
        }
    }

    fn draw(&mut self) {
        let offset = self.left_offset();
        let frames = self.slots.iter().take(self.displayed).map(|s| &s.current);

        layout::paint(&mut self.surface, &self.font, frames, offset);
    }

    pub fn left_offset(&self) -> f32 {
        layout::left_offset(
            &self.origin_symbols,
            &self.target_symbols,
            self.fraction,
            self.font.char_width(),
        )
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ClockState::Active
    }

    pub fn settings(&self) -> &Settings {
        self.settings.active()
    }

    /// The newest staged settings, which may not have taken effect yet.
    pub fn latest_settings(&self) -> &Settings {
        self.settings.latest()
    }

    pub fn has_pending_settings(&self) -> bool {
        self.settings.has_pending()
    }

    pub fn font(&self) -> &Rc<Font> {
        &self.font
    }

    pub fn target_symbols(&self) -> &Targets {
        &self.target_symbols
    }

    pub fn origin_symbols(&self) -> &Targets {
        &self.origin_symbols
    }

    pub fn current_shape(&self, slot: usize) -> Option<&Shape> {
        self.slots.get(slot).map(|s| &s.current)
    }

    /// Slots drawn in the active time mode.
    pub fn displayed_slots(&self) -> usize {
        self.displayed
    }

    /// Progress through the current second's melt.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    pub fn frame_period(&self) -> Duration {
        self.frame_period
    }

    pub fn color_period(&self) -> Option<Duration> {
        self.color_period
    }

    pub fn colors(&self) -> &ColorCycle {
        &self.colors
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }

    pub fn wall_clock(&self) -> &W {
        &self.wall_clock
    }
}

fn frame_period(settings: &Settings) -> Duration {
    let millis = if settings.fps == 0 {
        0
    } else {
        (1000.0 / settings.fps as f64).round() as u64
    };

    Duration::from_millis(millis.max(1))
}

fn color_period(settings: &Settings) -> Option<Duration> {
    (settings.cps > 0).then(|| {
        let millis = (1000.0 / settings.cps as f64).round() as u64;
        Duration::from_millis(millis.max(1))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_period_rounds_and_floors_at_one() {
        let with_fps = |fps| Settings { fps, ..Settings::default() };

        assert_eq!(frame_period(&with_fps(30)), Duration::from_millis(33));
        assert_eq!(frame_period(&with_fps(12)), Duration::from_millis(83));
        assert_eq!(frame_period(&with_fps(0)), Duration::from_millis(1));
        assert_eq!(frame_period(&with_fps(5000)), Duration::from_millis(1));
    }

    #[test]
    fn color_period_none_when_frozen() {
        let with_cps = |cps| Settings { cps, ..Settings::default() };

        assert_eq!(color_period(&with_cps(0)), None);
        assert_eq!(color_period(&with_cps(10)), Some(Duration::from_millis(100)));
        assert_eq!(color_period(&with_cps(3)), Some(Duration::from_millis(333)));
    }
}
