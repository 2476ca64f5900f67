//! Sensor data file discovery and loading.
//!
//! Reads CSV and JSONL exports of the sensor dataset and converts every row
//! into a [`Reading`]. Loading is all-or-nothing: a missing column or a
//! malformed value aborts with an error naming the file, row and column.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use greenflow_core::error::{DashboardError, Result};
use greenflow_core::models::Reading;
use greenflow_core::time_utils::TimezoneHandler;
use tracing::{debug, error, info};

// ── Column names ──────────────────────────────────────────────────────────────

pub const COL_TIMESTAMP: &str = "timestamp";
pub const COL_UNIT: &str = "setor";
pub const COL_COMPANY: &str = "empresa";
pub const COL_ENERGY: &str = "consumo_energia";
pub const COL_WATER: &str = "consumo_agua";
pub const COL_CO2: &str = "emissao_co2";

/// Every column a data file must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_TIMESTAMP,
    COL_UNIT,
    COL_COMPANY,
    COL_ENERGY,
    COL_WATER,
    COL_CO2,
];

// ── Public API ────────────────────────────────────────────────────────────────

/// List the data files at `data_path`.
///
/// A file path is returned as-is. A directory is walked recursively for
/// `.csv` and `.jsonl` files, sorted by path.
pub fn find_data_files(data_path: &Path) -> Vec<PathBuf> {
    if data_path.is_file() {
        return vec![data_path.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "csv" || ext == "jsonl")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load every reading under `data_path`, sorted by timestamp.
///
/// Timestamps are resolved into wall-clock time by `tz`.
pub fn load_readings(data_path: &Path, tz: &TimezoneHandler) -> Result<Vec<Reading>> {
    if !data_path.exists() {
        return Err(DashboardError::DataPathNotFound(data_path.to_path_buf()));
    }

    let files = find_data_files(data_path);
    if files.is_empty() {
        return Err(DashboardError::NoData(data_path.to_path_buf()));
    }

    let mut readings = Vec::new();
    for file in &files {
        let before = readings.len();
        match file.extension().and_then(|e| e.to_str()) {
            Some("jsonl") | Some("json") => read_jsonl_file(file, tz, &mut readings)?,
            _ => read_csv_file(file, tz, &mut readings)?,
        }
        debug!(
            "Loaded {} readings from {}",
            readings.len() - before,
            file.display()
        );
    }

    if readings.is_empty() {
        return Err(DashboardError::NoData(data_path.to_path_buf()));
    }

    readings.sort_by_key(|r| r.timestamp);

    info!(
        "Loaded {} readings from {} file(s)",
        readings.len(),
        files.len()
    );
    Ok(readings)
}

// ── Field conversion ──────────────────────────────────────────────────────────

/// A raw cell value before conversion.
enum Field<'a> {
    Text(&'a str),
    Number(f64),
}

impl Field<'_> {
    fn display(&self) -> String {
        match self {
            Field::Text(s) => s.to_string(),
            Field::Number(n) => n.to_string(),
        }
    }
}

/// Location of the row being converted, for error reporting.
struct RowContext<'a> {
    path: &'a Path,
    row: usize,
}

impl RowContext<'_> {
    fn invalid(&self, column: &str, field: &Field<'_>) -> DashboardError {
        DashboardError::InvalidField {
            path: self.path.to_path_buf(),
            row: self.row,
            column: column.to_string(),
            value: field.display(),
        }
    }

    fn label(&self, column: &str, field: Field<'_>) -> Result<String> {
        let label = match &field {
            Field::Text(s) => s.trim().to_string(),
            Field::Number(n) => n.to_string(),
        };
        if label.is_empty() {
            return Err(self.invalid(column, &field));
        }
        Ok(label)
    }

    fn metric(&self, column: &str, field: Field<'_>) -> Result<f64> {
        let value = match &field {
            Field::Text(s) => s.trim().parse::<f64>().ok(),
            Field::Number(n) => Some(*n),
        };
        match value {
            Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
            _ => Err(self.invalid(column, &field)),
        }
    }

    fn timestamp(&self, tz: &TimezoneHandler, field: Field<'_>) -> Result<chrono::NaiveDateTime> {
        let parsed = match &field {
            Field::Text(s) => tz.parse_timestamp(s),
            Field::Number(n) if n.fract() == 0.0 => tz.from_epoch_millis(*n as i64),
            Field::Number(_) => None,
        };
        parsed.ok_or_else(|| self.invalid(COL_TIMESTAMP, &field))
    }

    /// Convert one row; `get` yields the raw field for a column name.
    fn reading<'f>(
        &self,
        tz: &TimezoneHandler,
        get: impl Fn(&str) -> Option<Field<'f>>,
    ) -> Result<Reading> {
        let field = |column: &str| {
            get(column).ok_or_else(|| DashboardError::MissingColumn {
                path: self.path.to_path_buf(),
                column: column.to_string(),
            })
        };

        Ok(Reading {
            timestamp: self.timestamp(tz, field(COL_TIMESTAMP)?)?,
            unit: self.label(COL_UNIT, field(COL_UNIT)?)?,
            company: self.label(COL_COMPANY, field(COL_COMPANY)?)?,
            energy_consumption: self.metric(COL_ENERGY, field(COL_ENERGY)?)?,
            water_consumption: self.metric(COL_WATER, field(COL_WATER)?)?,
            co2_emission: self.metric(COL_CO2, field(COL_CO2)?)?,
        })
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

fn read_csv_file(path: &Path, tz: &TimezoneHandler, out: &mut Vec<Reading>) -> Result<()> {
    let file = std::fs::File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(file);

    let headers = rdr.headers()?.clone();
    let mut indexes = Vec::with_capacity(REQUIRED_COLUMNS.len());
    for column in REQUIRED_COLUMNS {
        let idx = headers.iter().position(|h| h == column).ok_or_else(|| {
            DashboardError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            }
        })?;
        indexes.push((column, idx));
    }

    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let ctx = RowContext { path, row: i + 1 };
        let reading = ctx.reading(tz, |column| {
            indexes
                .iter()
                .find(|(name, _)| *name == column)
                .and_then(|(_, idx)| record.get(*idx))
                .map(Field::Text)
        })?;
        out.push(reading);
    }

    Ok(())
}

// ── JSONL ─────────────────────────────────────────────────────────────────────

fn read_jsonl_file(path: &Path, tz: &TimezoneHandler, out: &mut Vec<Reading>) -> Result<()> {
    let file = std::fs::File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = std::io::BufReader::new(file);

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| DashboardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let value: serde_json::Value = serde_json::from_str(trimmed).map_err(|e| {
            error!("Malformed JSON in {} at line {}: {}", path.display(), i + 1, e);
            e
        })?;

        let ctx = RowContext { path, row: i + 1 };
        let object = value
            .as_object()
            .ok_or_else(|| ctx.invalid("<row>", &Field::Text(trimmed)))?;

        let reading = ctx.reading(tz, |column| match object.get(column)? {
            serde_json::Value::String(s) => Some(Field::Text(s.as_str())),
            serde_json::Value::Number(n) => n.as_f64().map(Field::Number),
            _ => Some(Field::Text("")),
        })?;
        out.push(reading);
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
