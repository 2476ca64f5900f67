use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{DashboardError, Result};

/// A single sensor observation read from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Wall-clock time of the observation in the display timezone.
    pub timestamp: NaiveDateTime,
    /// Business unit ("setor") the sensor belongs to.
    pub unit: String,
    /// Company ("empresa") operating the unit.
    pub company: String,
    /// Energy consumption in kWh.
    pub energy_consumption: f64,
    /// Water consumption in m³.
    pub water_consumption: f64,
    /// CO2 emission in kg.
    pub co2_emission: f64,
}

impl Reading {
    /// Calendar date of the observation, time-of-day discarded.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

// ── DateRange ─────────────────────────────────────────────────────────────────

/// Inclusive range of calendar dates.
///
/// The invariant `start <= end` is enforced by every constructor, so an
/// inverted range can never reach the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end` with
    /// [`DashboardError::InvalidDateRange`].
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `true` when `date` lies within `[start, end]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Return a new range with the lower bound moved by `days`.
    pub fn shift_start(&self, days: i64) -> Result<Self> {
        Self::new(self.start + Duration::days(days), self.end)
    }

    /// Return a new range with the upper bound moved by `days`.
    pub fn shift_end(&self, days: i64) -> Result<Self> {
        Self::new(self.start, self.end + Duration::days(days))
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

// ── Filter ────────────────────────────────────────────────────────────────────

/// Date range plus an optional set of selected units.
///
/// An empty unit set means "all units".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub date_range: DateRange,
    pub units: BTreeSet<String>,
}

impl Filter {
    /// A filter over `date_range` with no unit restriction.
    pub fn new(date_range: DateRange) -> Self {
        Self {
            date_range,
            units: BTreeSet::new(),
        }
    }

    /// Restrict the filter to the given units.
    pub fn with_units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.units = units.into_iter().map(Into::into).collect();
        self
    }

    /// `true` iff the reading's date is in range and its unit is selected
    /// (or no unit is selected at all).
    pub fn matches(&self, reading: &Reading) -> bool {
        self.date_range.contains(reading.date())
            && (self.units.is_empty() || self.units.contains(&reading.unit))
    }

    /// Add `unit` to the selection, or remove it when already selected.
    pub fn toggle_unit(&mut self, unit: &str) {
        if !self.units.remove(unit) {
            self.units.insert(unit.to_string());
        }
    }

    /// Human-readable one-line description used by the header and report.
    pub fn describe(&self) -> String {
        let units = if self.units.is_empty() {
            "all units".to_string()
        } else {
            self.units.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        format!("{} | {}", self.date_range, units)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
