//! Data layer for the GreenFlow dashboard.
//!
//! Loads the sensor dataset from CSV / JSONL files, holds it as an
//! immutable [`dataset::Dataset`], and runs the filter/aggregate/rank
//! pipeline in [`aggregator`].

pub mod aggregator;
pub mod dataset;
pub mod reader;

pub use greenflow_core as core;
