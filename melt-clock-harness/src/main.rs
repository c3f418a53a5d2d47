mod config;

use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use env_logger::{Env, Target};
use log::{error, info};
use ratatui::prelude::*;

use melt_clock::glyphs;
use melt_clock::{DeadlineScheduler, LocalClock, MeltClock, PixelCanvas, SettingsPatch};

use crate::config::Config;

type Clock = MeltClock<PixelCanvas, DeadlineScheduler, LocalClock>;

/// How long `space` shows the date before going back to the time.
const DATE_HOLD: Duration = Duration::from_secs(2);

/// Share of the terminal the clock box takes up, on each axis.
const BOX_FILL: f32 = 0.95;

const FPS_STEP: u32 = 5;
const MAX_FPS: u32 = 120;

/// Longest the loop blocks on input, so a missed deadline never stalls it.
const MAX_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = config::load()?;
    init_logging(&config)?;

    info!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    enable_raw_mode()?;
    crossterm::execute!(io::stdout(), EnterAlternateScreen)?;

    let result = run(&config);

    disable_raw_mode()?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)?;

    if let Err(e) = &result {
        error!("{e:#}");
    }
    result
}

fn init_logging(config: &Config) -> Result<()> {
    let path = config.log_path();
    let file =
        File::create(&path).with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or(config.level().as_str()))
        .format_timestamp_secs()
        .target(Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}

fn run(config: &Config) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let fonts = glyphs::default_fonts().context("building clock fonts")?;
    let mut clock = MeltClock::new(
        PixelCanvas::default(),
        DeadlineScheduler::new(),
        LocalClock,
        fonts,
    );

    clock.change_settings(config.base_settings());

    let size = terminal.size()?;
    let (width, height) = clock_box(size.width, size.height);
    clock.apply_patch(&SettingsPatch {
        width: Some(width),
        height: Some(height),
        ..config.clock.clone()
    });
    clock.activate();

    let mut date_until: Option<Instant> = None;

    loop {
        let now = Instant::now();
        for timer in clock.scheduler_mut().take_due(now) {
            clock.fire(timer);
        }

        if date_until.is_some_and(|until| now >= until) {
            date_until = None;
            clock.apply_patch(&SettingsPatch {
                show_date: Some(false),
                ..SettingsPatch::default()
            });
        }

        terminal.draw(|f| f.render_widget(clock.surface(), f.area()))?;

        let wake = clock.scheduler().next_deadline().into_iter().chain(date_until).min();
        let timeout = wake
            .map(|at| at.saturating_duration_since(Instant::now()))
            .unwrap_or(MAX_POLL)
            .min(MAX_POLL);

        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if !handle_key(&mut clock, key.code, &mut date_until) {
                    break;
                }
            }
            Event::Resize(cols, rows) => {
                let (width, height) = clock_box(cols, rows);
                clock.apply_patch(&SettingsPatch {
                    width: Some(width),
                    height: Some(height),
                    ..SettingsPatch::default()
                });
            }
            _ => {}
        }
    }

    clock.teardown();
    info!("bye");

    Ok(())
}

/// Returns `false` when the user asked to quit.
fn handle_key(clock: &mut Clock, code: KeyCode, date_until: &mut Option<Instant>) -> bool {
    let latest = clock.latest_settings().clone();
    let mut patch = SettingsPatch::default();

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return false,

        KeyCode::Char(' ') => {
            patch.show_date = Some(true);
            *date_until = Some(Instant::now() + DATE_HOLD);
        }
        KeyCode::Char('t') => patch.time_mode = Some(latest.time_mode.next()),
        KeyCode::Char('d') => patch.date_mode = Some(latest.date_mode.next()),
        KeyCode::Char('o') => patch.orientation = Some(latest.orientation.next()),
        KeyCode::Char('h') => patch.twelve_hour = Some(!latest.twelve_hour),
        KeyCode::Char('s') => patch.scaling = Some(!latest.scaling),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            patch.fps = Some(latest.fps.saturating_add(FPS_STEP).min(MAX_FPS));
        }
        KeyCode::Char('-') => patch.fps = Some(latest.fps.saturating_sub(FPS_STEP).max(1)),

        KeyCode::Char('p') => {
            if clock.is_active() {
                clock.deactivate();
            } else {
                clock.activate();
            }
            return true;
        }

        KeyCode::Char(c) if c.is_ascii_digit() => {
            patch.debug_digit = c.to_digit(10).map(|d| d as u8);
        }

        _ => return true,
    }

    clock.apply_patch(&patch);
    true
}

/// The clock box for a terminal of `cols` x `rows` cells. Each cell shows
/// two pixel rows.
fn clock_box(cols: u16, rows: u16) -> (u32, u32) {
    let scale = |cells: u32| ((cells as f32 * BOX_FILL).floor() as u32).max(1);

    (scale(u32::from(cols)), scale(u32::from(rows) * 2))
}
