//! Horizontal text box plot: one row per unit, all rows on a shared scale.
//!
//! ```text
//! Steel   ├──────███┃████───────┤   med 41.20
//! ```

use greenflow_core::statistics::BoxStats;
use greenflow_data::aggregator::UnitDistribution;
use ratatui::text::{Line, Span};

use super::fit_width;
use crate::themes::Theme;

const WHISKER: char = '─';
const BOX: char = '█';
const MEDIAN: char = '┃';
const LOW_CAP: char = '├';
const HIGH_CAP: char = '┤';

/// Column of `value` on a `width`-column axis spanning `[lo, hi]`.
///
/// A degenerate axis (`hi <= lo`) maps everything to the middle column.
pub fn scale(value: f64, lo: f64, hi: f64, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let last = width - 1;
    if hi <= lo {
        return last / 2;
    }
    let frac = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    (frac * last as f64).round() as usize
}

/// Draw one box as plain characters on a `width`-column axis.
pub fn box_plot_line(stats: &BoxStats, lo: f64, hi: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let mut cells = vec![' '; width];
    let min = scale(stats.min, lo, hi, width);
    let q1 = scale(stats.q1, lo, hi, width);
    let median = scale(stats.median, lo, hi, width);
    let q3 = scale(stats.q3, lo, hi, width);
    let max = scale(stats.max, lo, hi, width);

    for cell in &mut cells[min..=max] {
        *cell = WHISKER;
    }
    for cell in &mut cells[q1..=q3] {
        *cell = BOX;
    }
    cells[min] = LOW_CAP;
    cells[max] = HIGH_CAP;
    cells[median] = MEDIAN;
    cells.into_iter().collect()
}

/// Shared axis bounds `(lowest min, highest max)` over every unit.
pub fn axis_bounds(distribution: &[UnitDistribution]) -> Option<(f64, f64)> {
    let lo = distribution.iter().map(|d| d.stats.min).reduce(f64::min)?;
    let hi = distribution.iter().map(|d| d.stats.max).reduce(f64::max)?;
    Some((lo, hi))
}

/// Styled rows for the "Consumption by Unit" panel.
///
/// Each row is `label | box | median`; the box fills whatever `width`
/// remains after the label and median columns.
pub fn box_plot_lines<'a>(
    distribution: &[UnitDistribution],
    width: usize,
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    let Some((lo, hi)) = axis_bounds(distribution) else {
        return Vec::new();
    };

    const LABEL_WIDTH: usize = 12;
    const MEDIAN_WIDTH: usize = 14;
    let plot_width = width.saturating_sub(LABEL_WIDTH + MEDIAN_WIDTH + 2).max(10);

    let mut lines: Vec<Line<'a>> = distribution
        .iter()
        .map(|d| {
            let plot = box_plot_line(&d.stats, lo, hi, plot_width);
            let mut spans = vec![Span::styled(
                format!("{} ", fit_width(&d.unit, LABEL_WIDTH)),
                theme.label,
            )];
            spans.extend(plot.chars().map(|c| {
                let style = match c {
                    BOX => theme.chart_box,
                    MEDIAN => theme.chart_median,
                    _ => theme.chart_whisker,
                };
                Span::styled(c.to_string(), style)
            }));
            spans.push(Span::styled(
                format!(" med {:.2}", d.stats.median),
                theme.dim,
            ));
            Line::from(spans)
        })
        .collect();

    lines.push(Line::from(Span::styled(
        format!(
            "{}{:<half$}{:>half$}",
            " ".repeat(LABEL_WIDTH + 1),
            format!("{:.2}", lo),
            format!("{:.2} kWh", hi),
            half = plot_width / 2
        ),
        theme.chart_axis,
    )));
    lines
}
