//! Core types for the GreenFlow dashboard.
//!
//! Sensor readings, date ranges and filters, the error taxonomy, display
//! formatting, CLI settings, timestamp handling and numeric helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod statistics;
pub mod time_utils;

pub use error::{DashboardError, Result};
