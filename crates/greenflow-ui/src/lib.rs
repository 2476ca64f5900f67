//! Terminal UI layer for the GreenFlow dashboard.
//!
//! Provides themes, the header / metric card / chart / insight components,
//! the filter panel, the full dashboard layout and its event loop built on
//! [`ratatui`], plus a plain-text report for non-interactive use.

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod report;
pub mod themes;

pub use greenflow_core as core;
