//! The immutable, session-wide collection of sensor readings.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use greenflow_core::error::{DashboardError, Result};
use greenflow_core::models::{DateRange, Filter, Reading};
use greenflow_core::time_utils::TimezoneHandler;

use crate::reader::load_readings;

/// All readings loaded for a session plus metadata derived once at load.
///
/// Never mutated after construction; every view is a fresh selection.
#[derive(Debug, Clone)]
pub struct Dataset {
    readings: Vec<Reading>,
    units: Vec<String>,
    date_bounds: DateRange,
}

impl Dataset {
    /// Build a dataset from already-parsed readings.
    ///
    /// Fails with `NoData` when `readings` is empty, since there would be no
    /// date bounds to default the filter to.
    pub fn new(readings: Vec<Reading>) -> Result<Self> {
        let first = readings
            .first()
            .ok_or_else(|| DashboardError::NoData(PathBuf::from("<memory>")))?
            .date();

        let mut min = first;
        let mut max = first;
        let mut seen = HashSet::new();
        let mut units = Vec::new();
        for r in &readings {
            let date = r.date();
            min = min.min(date);
            max = max.max(date);
            if seen.insert(r.unit.as_str()) {
                units.push(r.unit.clone());
            }
        }

        Ok(Self {
            readings,
            units,
            date_bounds: DateRange::new(min, max)?,
        })
    }

    /// Load the dataset from a file or directory.
    pub fn load(path: &Path, tz: &TimezoneHandler) -> Result<Self> {
        Self::new(load_readings(path, tz)?)
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Distinct unit labels in order of first appearance.
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// `[earliest date, latest date]` across the whole dataset.
    pub fn date_bounds(&self) -> DateRange {
        self.date_bounds
    }

    /// The filter the dashboard starts with: full date range, all units.
    pub fn default_filter(&self) -> Filter {
        Filter::new(self.date_bounds)
    }

    /// Readings matching `filter`, in dataset order.
    ///
    /// An empty selection is reported as `EmptyFilterResult` rather than an
    /// empty vector so callers must decide how to present it.
    pub fn select(&self, filter: &Filter) -> Result<Vec<&Reading>> {
        let selected: Vec<&Reading> = self.readings.iter().filter(|r| filter.matches(r)).collect();
        if selected.is_empty() {
            return Err(DashboardError::EmptyFilterResult);
        }
        Ok(selected)
    }
}
