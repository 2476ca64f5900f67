//! Filter → aggregate → rank pipeline behind every dashboard render.
//!
//! [`Aggregator::aggregate`] is a pure function of the dataset and the
//! filter: it selects the matching readings, averages the three metrics,
//! groups energy consumption by company, by day and by unit, and ranks the
//! companies. An empty selection yields [`DashboardSummary::empty`], whose
//! metrics are `None` rather than NaN.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use greenflow_core::error::DashboardError;
use greenflow_core::models::{Filter, Reading};
use greenflow_core::statistics::{mean, BoxStats};
use serde::Serialize;
use tracing::debug;

use crate::dataset::Dataset;

/// How many companies each insight list shows.
pub const TOP_N: usize = 3;

// ── Output types ──────────────────────────────────────────────────────────────

/// Mean of each metric over the selected readings; `None` when nothing
/// was selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MeanMetrics {
    /// Mean energy consumption (kWh).
    pub energy: Option<f64>,
    /// Mean water consumption (m³).
    pub water: Option<f64>,
    /// Mean CO2 emission (kg).
    pub co2: Option<f64>,
}

/// One company and its mean energy consumption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub company: String,
    pub mean_energy: f64,
}

/// Mean energy consumption on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub mean_energy: f64,
}

/// Energy-consumption distribution of one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitDistribution {
    pub unit: String,
    pub stats: BoxStats,
}

/// Everything the rendering surfaces need for one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Number of readings that matched the filter.
    pub reading_count: usize,
    pub means: MeanMetrics,
    /// Companies ascending by mean energy; ties by company name.
    pub company_ranking: Vec<RankingEntry>,
    /// One point per day with readings, ascending by date.
    pub daily_trend: Vec<DailyPoint>,
    /// Units in order of first appearance within the selection.
    pub unit_distribution: Vec<UnitDistribution>,
}

impl DashboardSummary {
    /// The neutral "no data" summary.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.reading_count == 0
    }

    /// The [`TOP_N`] companies with the lowest mean consumption.
    pub fn top_efficient(&self) -> &[RankingEntry] {
        let n = self.company_ranking.len().min(TOP_N);
        &self.company_ranking[..n]
    }

    /// The [`TOP_N`] companies with the highest mean consumption, still in
    /// ascending order.
    pub fn top_consumers(&self) -> &[RankingEntry] {
        let len = self.company_ranking.len();
        &self.company_ranking[len.saturating_sub(TOP_N)..]
    }
}

// ── Running mean ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
struct RunningMean {
    sum: f64,
    count: usize,
}

impl RunningMean {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> f64 {
        self.sum / self.count as f64
    }
}

// ── Aggregator ────────────────────────────────────────────────────────────────

/// Stateless filter/aggregate/rank pipeline.
pub struct Aggregator;

impl Aggregator {
    /// Select the readings matching `filter` and summarise them.
    pub fn aggregate(dataset: &Dataset, filter: &Filter) -> DashboardSummary {
        match dataset.select(filter) {
            Ok(selected) => Self::summarize(&selected),
            Err(DashboardError::EmptyFilterResult) => {
                debug!("Filter [{}] matched no readings", filter.describe());
                DashboardSummary::empty()
            }
            Err(e) => {
                debug!("Selection failed: {}", e);
                DashboardSummary::empty()
            }
        }
    }

    /// Summarise an already-selected set of readings.
    pub fn summarize(readings: &[&Reading]) -> DashboardSummary {
        if readings.is_empty() {
            return DashboardSummary::empty();
        }

        let energy: Vec<f64> = readings.iter().map(|r| r.energy_consumption).collect();
        let water: Vec<f64> = readings.iter().map(|r| r.water_consumption).collect();
        let co2: Vec<f64> = readings.iter().map(|r| r.co2_emission).collect();

        DashboardSummary {
            reading_count: readings.len(),
            means: MeanMetrics {
                energy: mean(&energy),
                water: mean(&water),
                co2: mean(&co2),
            },
            company_ranking: Self::company_ranking(readings),
            daily_trend: Self::daily_trend(readings),
            unit_distribution: Self::unit_distribution(readings),
        }
    }

    /// Mean energy per company, ascending; ties broken by company name.
    pub fn company_ranking(readings: &[&Reading]) -> Vec<RankingEntry> {
        let mut groups: BTreeMap<&str, RunningMean> = BTreeMap::new();
        for r in readings {
            groups
                .entry(r.company.as_str())
                .or_default()
                .add(r.energy_consumption);
        }

        let mut ranking: Vec<RankingEntry> = groups
            .into_iter()
            .map(|(company, acc)| RankingEntry {
                company: company.to_string(),
                mean_energy: acc.value(),
            })
            .collect();

        // BTreeMap iteration is already name-ordered, so a stable sort on the
        // mean keeps ties alphabetical.
        ranking.sort_by(|a, b| a.mean_energy.total_cmp(&b.mean_energy));
        ranking
    }

    /// Mean energy per calendar day, ascending by date.
    pub fn daily_trend(readings: &[&Reading]) -> Vec<DailyPoint> {
        let mut days: BTreeMap<NaiveDate, RunningMean> = BTreeMap::new();
        for r in readings {
            days.entry(r.date()).or_default().add(r.energy_consumption);
        }

        days.into_iter()
            .map(|(date, acc)| DailyPoint {
                date,
                mean_energy: acc.value(),
            })
            .collect()
    }

    /// Box-plot statistics of energy consumption per unit.
    pub fn unit_distribution(readings: &[&Reading]) -> Vec<UnitDistribution> {
        let mut order: Vec<&str> = Vec::new();
        let mut values: HashMap<&str, Vec<f64>> = HashMap::new();
        for r in readings {
            let unit = r.unit.as_str();
            values
                .entry(unit)
                .or_insert_with(|| {
                    order.push(unit);
                    Vec::new()
                })
                .push(r.energy_consumption);
        }

        order
            .into_iter()
            .filter_map(|unit| {
                let stats = BoxStats::from_values(values.get(unit)?)?;
                Some(UnitDistribution {
                    unit: unit.to_string(),
                    stats,
                })
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
