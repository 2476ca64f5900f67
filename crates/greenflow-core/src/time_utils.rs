use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::{DashboardError, Result};

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

// ── TimezoneHandler ───────────────────────────────────────────────────────────

/// `--timezone` value that keeps every timestamp in its own offset.
pub const SOURCE_TIMEZONE: &str = "auto";

/// `--timezone` value that resolves to the system timezone.
pub const LOCAL_TIMEZONE: &str = "local";

/// Converts raw timestamp values from data files into wall-clock times.
///
/// The calendar date of a reading is the date portion of its timestamp:
/// naive text and epoch milliseconds are taken as wall-clock time, and
/// RFC 3339 values keep their own offset. Only when an explicit target
/// timezone is configured are offset-carrying timestamps moved into it.
#[derive(Debug, Clone, Copy)]
pub struct TimezoneHandler {
    target_tz: Option<Tz>,
}

impl TimezoneHandler {
    /// Create a handler for `"auto"` (no conversion) or an IANA timezone
    /// name.
    ///
    /// Unknown names are rejected with [`DashboardError::Config`].
    pub fn new(tz_name: &str) -> Result<Self> {
        if tz_name == SOURCE_TIMEZONE {
            return Ok(Self::source_offset());
        }
        let tz = tz_name.parse::<Tz>().map_err(|_| {
            DashboardError::Config(format!("Unknown timezone \"{}\"", tz_name))
        })?;
        Ok(Self { target_tz: Some(tz) })
    }

    /// Handler that never converts; every timestamp keeps its own offset.
    pub fn source_offset() -> Self {
        Self { target_tz: None }
    }

    /// `true` for `"auto"` and recognised IANA timezone identifiers.
    pub fn validate_timezone(tz_name: &str) -> bool {
        tz_name == SOURCE_TIMEZONE || tz_name.parse::<Tz>().is_ok()
    }

    pub fn target_tz(&self) -> Option<Tz> {
        self.target_tz
    }

    /// Parse a timestamp string.
    ///
    /// Accepts RFC 3339 (with `Z` or a numeric offset), naive
    /// `YYYY-MM-DD[T ]HH:MM:SS[.f]`, and bare `YYYY-MM-DD` (midnight).
    /// Returns `None` for empty strings or unrecognised formats.
    pub fn parse_timestamp(&self, s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(match self.target_tz {
                Some(tz) => dt.with_timezone(&tz).naive_local(),
                None => dt.naive_local(),
            });
        }

        const FMTS: &[&str] = &[
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M",
        ];
        for fmt in FMTS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(naive);
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0);
        }

        None
    }

    /// Interpret epoch milliseconds as naive wall-clock time.
    ///
    /// Dataframe exporters write a naive datetime as the epoch value of its
    /// wall-clock reading, so no timezone conversion is applied.
    pub fn from_epoch_millis(&self, millis: i64) -> Option<NaiveDateTime> {
        DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
    }
}

// ── Date parsing ──────────────────────────────────────────────────────────────

/// Parse a `YYYY-MM-DD` calendar date, as accepted by `--from` / `--to`.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| DashboardError::TimestampParse(s.to_string()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
