use chrono::NaiveDate;
use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DashboardError, Result};
use crate::models::{DateRange, Filter};
use crate::time_utils::{get_system_timezone, TimezoneHandler, LOCAL_TIMEZONE};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive sustainability dashboard for sensor readings
#[derive(Parser, Debug, Clone)]
#[command(
    name = "greenflow",
    about = "Interactive sustainability dashboard for sensor readings",
    version
)]
pub struct Settings {
    /// Data file (.csv / .jsonl) or directory containing data files
    #[arg(long, env = "GREENFLOW_DATA", default_value = "data")]
    pub data: PathBuf,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "report"])]
    pub view: String,

    /// Restrict to these units (repeatable or comma separated; default: all)
    #[arg(long = "unit", value_delimiter = ',')]
    pub units: Vec<String>,

    /// First day of the date range (YYYY-MM-DD; default: earliest reading)
    #[arg(long, value_parser = parse_cli_date)]
    pub from: Option<NaiveDate>,

    /// Last day of the date range (YYYY-MM-DD; default: latest reading)
    #[arg(long, value_parser = parse_cli_date)]
    pub to: Option<NaiveDate>,

    /// Timezone for offset-carrying timestamps: "auto" keeps each timestamp's
    /// own offset, "local" uses the system timezone, or an IANA name
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

fn parse_cli_date(s: &str) -> std::result::Result<NaiveDate, String> {
    crate::time_utils::parse_date(s).map_err(|e| e.to_string())
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.greenflow/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,
}

impl LastUsedParams {
    /// Default path of the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".greenflow").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Write params to `path` via a temp file and rename, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &Path) -> std::result::Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at `path` if it exists.
    pub fn clear_at(path: &Path) -> std::result::Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit
    /// value was provided, resolve `"auto"` values, and persist the result.
    ///
    /// An unknown `--timezone` is rejected with `Config` and nothing is
    /// saved.
    pub fn load_with_last_used() -> Result<Self> {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with explicit arguments and
    /// config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &Path,
    ) -> Result<Self> {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("Failed to clear {}: {}", config_path.display(), e);
            }
            return Self::resolve_auto_values(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins. Filters are never restored from a previous run.
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "timezone") {
            match last.timezone {
                Some(v) if TimezoneHandler::validate_timezone(&v) => settings.timezone = v,
                Some(v) => {
                    tracing::warn!("Ignoring saved timezone \"{}\": not a known timezone", v)
                }
                None => {}
            }
        }
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "data") {
            if let Some(v) = last.data {
                settings.data = v;
            }
        }

        settings = Self::resolve_auto_values(settings)?;

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!("Failed to persist settings to {}: {}", config_path.display(), e);
        }

        Ok(settings)
    }

    /// Resolve `"local"` to the system timezone, validate the timezone and
    /// apply the `--debug` flag.
    fn resolve_auto_values(mut settings: Settings) -> Result<Settings> {
        if settings.timezone == LOCAL_TIMEZONE {
            settings.timezone = get_system_timezone();
        }
        if !TimezoneHandler::validate_timezone(&settings.timezone) {
            return Err(DashboardError::Config(format!(
                "Unknown timezone \"{}\" (expected \"auto\", \"local\" or an IANA name)",
                settings.timezone
            )));
        }

        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        Ok(settings)
    }

    /// Build the initial filter: `--from` / `--to` override the dataset
    /// bounds in `default_range`, `--unit` restricts the units.
    ///
    /// An inverted range is rejected with `InvalidDateRange`.
    pub fn initial_filter(&self, default_range: DateRange) -> Result<Filter> {
        let start = self.from.unwrap_or(default_range.start());
        let end = self.to.unwrap_or(default_range.end());
        let range = DateRange::new(start, end)?;
        Ok(Filter::new(range).with_units(self.units.iter().cloned()))
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            timezone: Some(s.timezone.clone()),
            view: Some(s.view.clone()),
            data: Some(s.data.clone()),
        }
    }
}

/// Returns `true` when `name` was supplied on the command line or through
/// its environment variable (not by default value).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(clap::parser::ValueSource::CommandLine)
            | Some(clap::parser::ValueSource::EnvVariable)
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────
