use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueHint};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use melt_clock::{DateMode, Orientation, Settings, SettingsPatch, TimeMode};

const SEARCH_PATHS: [&str; 2] = ["melt-clock.yaml", "config/melt-clock.yaml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `error` | `warn` | `info` | `debug` | `trace`
    pub log_level: Option<String>,
    /// Where log lines go. The terminal itself is taken by the clock.
    pub log_file: Option<PathBuf>,
    /// String-typed settings the clock starts from. `clock` is layered on top.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub base: HashMap<String, String>,
    /// Initial clock settings. The box size always follows the terminal.
    pub clock: SettingsPatch,
}

/// Command-line overrides, layered over the YAML file.
#[derive(Debug, Parser, Clone)]
#[command(name = "melt-clock", version, about = "A melting digital clock for the terminal")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,
    /// SS, HHMM or HHMMSS
    #[arg(long)]
    pub time_mode: Option<TimeMode>,
    /// MMDDYY, DDMMYY or YYMMDD
    #[arg(long)]
    pub date_mode: Option<DateMode>,
    /// up, left, right or down
    #[arg(long)]
    pub orientation: Option<Orientation>,
    #[arg(long, action = ArgAction::Set)]
    pub twelve_hour: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub show_date: Option<bool>,
    #[arg(long)]
    pub fps: Option<u32>,
    /// Color steps per second, 0 to freeze
    #[arg(long)]
    pub cps: Option<u32>,
    #[arg(long, action = ArgAction::Set)]
    pub scaling: Option<bool>,
    /// Base setting as KEY=VALUE, repeatable. Typed flags win over these.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub set: Vec<(String, String)>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Parses the command line, reads YAML, merges and validates.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    let mut cfg = Config::default();

    if let Some(path) = cli.config.as_ref() {
        if !path.exists() {
            return Err(ConfigError::Validation(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        merge(&mut cfg, read_yaml(path)?);
    } else if let Some(path) = find_config_file() {
        merge(&mut cfg, read_yaml(&path)?);
    }

    apply_cli_overrides(&mut cfg, &cli);
    validate(&cfg)?;

    if cli.dump_config {
        println!("{}", serde_yaml::to_string(&cfg)?);
        std::process::exit(0);
    }

    Ok(cfg)
}

impl Config {
    pub fn level(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|l| l.parse().ok())
            .unwrap_or(LevelFilter::Info)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("melt-clock.log"))
    }

    /// Settings the clock starts from, before `clock` is applied.
    pub fn base_settings(&self) -> Settings {
        Settings::from_raw(&self.base)
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {s:?}"))?;
    Ok((key.trim().to_string(), value.to_string()))
}

fn find_config_file() -> Option<PathBuf> {
    SEARCH_PATHS.iter().map(PathBuf::from).find(|p| p.exists())
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&s)?)
}

fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() {
        dst.log_level = src.log_level;
    }
    if src.log_file.is_some() {
        dst.log_file = src.log_file;
    }
    dst.base.extend(src.base);
    merge_clock(&mut dst.clock, src.clock);
}

fn merge_clock(dst: &mut SettingsPatch, src: SettingsPatch) {
    if src.width.is_some() {
        dst.width = src.width;
    }
    if src.height.is_some() {
        dst.height = src.height;
    }
    if src.orientation.is_some() {
        dst.orientation = src.orientation;
    }
    if src.time_mode.is_some() {
        dst.time_mode = src.time_mode;
    }
    if src.date_mode.is_some() {
        dst.date_mode = src.date_mode;
    }
    if src.twelve_hour.is_some() {
        dst.twelve_hour = src.twelve_hour;
    }
    if src.show_date.is_some() {
        dst.show_date = src.show_date;
    }
    if src.fps.is_some() {
        dst.fps = src.fps;
    }
    if src.cps.is_some() {
        dst.cps = src.cps;
    }
    if src.scaling.is_some() {
        dst.scaling = src.scaling;
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() {
        cfg.log_level = cli.log_level.clone();
    }
    if cli.log_file.is_some() {
        cfg.log_file = cli.log_file.clone();
    }
    cfg.base.extend(cli.set.iter().cloned());

    merge_clock(
        &mut cfg.clock,
        SettingsPatch {
            orientation: cli.orientation,
            time_mode: cli.time_mode,
            date_mode: cli.date_mode,
            twelve_hour: cli.twelve_hour,
            show_date: cli.show_date,
            fps: cli.fps,
            cps: cli.cps,
            scaling: cli.scaling,
            ..SettingsPatch::default()
        },
    );
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(level) = cfg.log_level.as_deref() {
        if level.parse::<LevelFilter>().is_err() {
            return Err(ConfigError::Validation(format!("unknown log level {level:?}")));
        }
    }
    if cfg.clock.width == Some(0) || cfg.clock.height == Some(0) {
        return Err(ConfigError::Validation("clock width/height must be > 0".into()));
    }
    Ok(())
}
