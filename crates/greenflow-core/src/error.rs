use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the GreenFlow dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A required column is absent from a data file.
    #[error("Missing column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A field could not be converted to its expected type.
    #[error("Invalid value {value:?} for '{column}' in {path}, row {row}")]
    InvalidField {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// The data path does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// No readings could be loaded from the given path.
    #[error("No sensor readings found in {0}")]
    NoData(PathBuf),

    /// The lower bound of a date range lies after the upper bound.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// No reading matched the active filter.
    #[error("No readings match the current filter")]
    EmptyFilterResult,

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// `true` for the errors that abort startup while loading the dataset.
    pub fn is_data_load(&self) -> bool {
        matches!(
            self,
            Self::FileRead { .. }
                | Self::Csv(_)
                | Self::JsonParse(_)
                | Self::MissingColumn { .. }
                | Self::InvalidField { .. }
                | Self::TimestampParse(_)
                | Self::DataPathNotFound(_)
                | Self::NoData(_)
        )
    }
}

/// Convenience alias used throughout the GreenFlow crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashboardError::FileRead {
            path: PathBuf::from("/data/sensors.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/sensors.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = DashboardError::MissingColumn {
            path: PathBuf::from("sensors.csv"),
            column: "consumo_agua".to_string(),
        };
        assert_eq!(err.to_string(), "Missing column 'consumo_agua' in sensors.csv");
    }

    #[test]
    fn test_error_display_invalid_field() {
        let err = DashboardError::InvalidField {
            path: PathBuf::from("sensors.csv"),
            row: 7,
            column: "consumo_energia".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value \"abc\" for 'consumo_energia' in sensors.csv, row 7"
        );
    }

    #[test]
    fn test_error_display_invalid_date_range() {
        let err = DashboardError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: 2024-03-02 is after 2024-03-01"
        );
    }

    #[test]
    fn test_error_display_no_data() {
        let err = DashboardError::NoData(PathBuf::from("/empty/dir"));
        assert_eq!(err.to_string(), "No sensor readings found in /empty/dir");
    }

    #[test]
    fn test_error_display_config() {
        let err = DashboardError::Config("bad timezone".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad timezone");
    }

    #[test]
    fn test_is_data_load_classification() {
        assert!(DashboardError::NoData(PathBuf::from("x")).is_data_load());
        assert!(DashboardError::TimestampParse("nope".to_string()).is_data_load());
        assert!(!DashboardError::EmptyFilterResult.is_data_load());
        assert!(!DashboardError::Config("x".to_string()).is_data_load());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashboardError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
