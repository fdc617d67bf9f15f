// Configuration
//
// Loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/keepsake/config.toml)
// 3. Built-in defaults (lowest priority)
//
// Timing values are validated once here, at startup; a zero interval is a
// configuration bug and is rejected before any stage is instantiated.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Palette name: "dusk" or "blush"
    pub theme: String,

    /// Directory for log files
    pub log_dir: PathBuf,

    /// Optional content pack replacing the embedded prose
    pub content_path: Option<PathBuf>,

    /// The secret date the gate accepts (in several digit spellings)
    pub met_on: NaiveDate,

    /// Month/day the celebration counts down to
    pub countdown_month: u32,
    pub countdown_day: u32,

    /// Typewriter cadence in the confession
    pub typewriter_tick: Duration,

    /// One progress point of the memory loader
    pub loader_step: Duration,

    /// Total clip time of the celebratory burst
    pub burst_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dusk".to_string(),
            log_dir: PathBuf::from("./logs"),
            content_path: None,
            met_on: NaiveDate::from_ymd_opt(2023, 11, 13).unwrap(),
            countdown_month: 2,
            countdown_day: 14,
            typewriter_tick: Duration::from_millis(70),
            loader_step: Duration::from_millis(50),
            burst_duration: Duration::from_millis(4000),
        }
    }
}

/// Config file structure (everything optional; absent keys keep defaults)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    theme: Option<String>,
    log_dir: Option<String>,
    content_path: Option<String>,
    met_on: Option<NaiveDate>,
    countdown_month: Option<u32>,
    countdown_day: Option<u32>,
    typewriter_tick_ms: Option<u64>,
    loader_step_ms: Option<u64>,
    burst_duration_ms: Option<u64>,
}

impl Config {
    /// Get the config file path: ~/.config/keepsake/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("keepsake").join("config.toml"))
    }

    /// Create the config file with defaults if it doesn't exist, so users
    /// can discover the options. Failures are ignored; the file is optional.
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("parsing config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("reading config file {}", path.display())),
        }
    }

    /// Load configuration: env > file > defaults, then validate.
    pub fn load() -> Result<Self> {
        let file = Self::load_file_config()?;
        let defaults = Self::default();

        let theme = std::env::var("KEEPSAKE_THEME")
            .ok()
            .or(file.theme)
            .unwrap_or(defaults.theme);

        let log_dir = std::env::var("KEEPSAKE_LOG_DIR")
            .ok()
            .or(file.log_dir)
            .map(PathBuf::from)
            .unwrap_or(defaults.log_dir);

        let content_path = std::env::var("KEEPSAKE_CONTENT")
            .ok()
            .or(file.content_path)
            .map(PathBuf::from);

        let met_on = match std::env::var("KEEPSAKE_MET_ON") {
            Ok(raw) => raw
                .parse()
                .context("KEEPSAKE_MET_ON must be a YYYY-MM-DD date")?,
            Err(_) => file.met_on.unwrap_or(defaults.met_on),
        };

        let config = Self {
            theme,
            log_dir,
            content_path,
            met_on,
            countdown_month: file.countdown_month.unwrap_or(defaults.countdown_month),
            countdown_day: file.countdown_day.unwrap_or(defaults.countdown_day),
            typewriter_tick: file
                .typewriter_tick_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.typewriter_tick),
            loader_step: file
                .loader_step_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.loader_step),
            burst_duration: file
                .burst_duration_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.burst_duration),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no stage may be instantiated with.
    pub fn validate(&self) -> Result<()> {
        if self.typewriter_tick.is_zero() {
            bail!("typewriter_tick_ms must be greater than zero");
        }
        if self.loader_step.is_zero() {
            bail!("loader_step_ms must be greater than zero");
        }
        if self.burst_duration.is_zero() {
            bail!("burst_duration_ms must be greater than zero");
        }
        // Validate the month/day pair against a leap year so Feb 29 passes.
        if NaiveDate::from_ymd_opt(2024, self.countdown_month, self.countdown_day).is_none() {
            bail!(
                "countdown target {:02}-{:02} is not a calendar date",
                self.countdown_month,
                self.countdown_day
            );
        }
        Ok(())
    }

    /// Render the config as a commented TOML template.
    pub fn to_toml(&self) -> String {
        format!(
            r#"# keepsake configuration
# Values here are overridden by KEEPSAKE_* environment variables.

# Palette: "dusk" (dark) or "blush" (light)
theme = "{theme}"

# Where log files go (the TUI owns the screen, logs never hit stdout)
log_dir = "{log_dir}"

# Optional content pack replacing the embedded prose
#content_path = "~/.config/keepsake/content.toml"

# The date the gate accepts, in any digit spelling
met_on = "{met_on}"

# The celebration counts down to this month/day, next occurrence
countdown_month = {month}
countdown_day = {day}

# Timing (milliseconds)
typewriter_tick_ms = {tick}
loader_step_ms = {step}
burst_duration_ms = {burst}
"#,
            theme = self.theme,
            log_dir = self.log_dir.display(),
            met_on = self.met_on,
            month = self.countdown_month,
            day = self.countdown_day,
            tick = self.typewriter_tick.as_millis(),
            step = self.loader_step.as_millis(),
            burst = self.burst_duration.as_millis(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let mut config = Config::default();
        config.typewriter_tick = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.loader_step = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.burst_duration = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_impossible_countdown_date_rejected() {
        let mut config = Config::default();
        config.countdown_month = 11;
        config.countdown_day = 31;
        assert!(config.validate().is_err());

        config.countdown_month = 13;
        config.countdown_day = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_leap_day_countdown_target_allowed() {
        let mut config = Config::default();
        config.countdown_month = 2;
        config.countdown_day = 29;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_config_parses_partial() {
        let file: FileConfig = toml::from_str(
            r#"
            theme = "blush"
            met_on = "2022-06-01"
            typewriter_tick_ms = 40
            "#,
        )
        .unwrap();
        assert_eq!(file.theme.as_deref(), Some("blush"));
        assert_eq!(file.met_on, NaiveDate::from_ymd_opt(2022, 6, 1));
        assert_eq!(file.typewriter_tick_ms, Some(40));
        assert!(file.countdown_month.is_none());
    }

    #[test]
    fn test_template_round_trips() {
        let parsed: FileConfig = toml::from_str(&Config::default().to_toml()).unwrap();
        assert_eq!(parsed.theme.as_deref(), Some("dusk"));
        assert_eq!(parsed.loader_step_ms, Some(50));
        assert_eq!(parsed.met_on, NaiveDate::from_ymd_opt(2023, 11, 13));
    }
}
