//! Reusable dashboard building blocks.
//!
//! Each component turns a slice of the [`DashboardSummary`] into styled
//! [`ratatui::text::Line`]s or draws a widget into a given area.
//!
//! [`DashboardSummary`]: greenflow_data::aggregator::DashboardSummary

pub mod box_plot;
pub mod charts;
pub mod filter_panel;
pub mod header;
pub mod insights;
pub mod metric_card;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pad or truncate `s` to exactly `width` display columns.
///
/// Truncated labels end in `…`. Wide characters are never split.
pub fn fit_width(s: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(s);
    if current <= width {
        return format!("{}{}", s, " ".repeat(width - current));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width - used));
    out
}
