//! Company ranking bar chart and daily energy trend line chart.

use chrono::NaiveDate;
use greenflow_data::aggregator::{DailyPoint, RankingEntry};
use ratatui::{
    layout::{Direction, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::fit_width;
use crate::themes::Theme;

/// Bars carry integer values; means are scaled by this factor to keep two
/// decimals of resolution.
const BAR_SCALE: f64 = 100.0;
const BAR_LABEL_WIDTH: usize = 14;

// ── Company ranking ──────────────────────────────────────────────────────────

/// One horizontal bar per company, in ranking order (lowest mean first).
pub fn ranking_bars<'a>(ranking: &[RankingEntry], theme: &Theme) -> Vec<Bar<'a>> {
    ranking
        .iter()
        .map(|entry| {
            Bar::default()
                .value(scaled(entry.mean_energy))
                .text_value(format!("{:.2}", entry.mean_energy))
                .label(Line::from(fit_width(&entry.company, BAR_LABEL_WIDTH)))
                .style(theme.chart_bar)
                .value_style(theme.value)
        })
        .collect()
}

fn scaled(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        (value * BAR_SCALE).round() as u64
    } else {
        0
    }
}

/// Draw the "Mean Energy by Company" chart.
pub fn render_ranking(
    frame: &mut Frame,
    area: Rect,
    ranking: &[RankingEntry],
    theme: &Theme,
    block: Block,
) {
    if ranking.is_empty() {
        render_empty(frame, area, theme, block);
        return;
    }
    let bars = ranking_bars(ranking, theme);
    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

// ── Daily trend ──────────────────────────────────────────────────────────────

/// Chart points: `x` is days since the first point, `y` the day's mean.
pub fn trend_points(trend: &[DailyPoint]) -> Vec<(f64, f64)> {
    let Some(first) = trend.first() else {
        return Vec::new();
    };
    trend
        .iter()
        .map(|p| ((p.date - first.date).num_days() as f64, p.mean_energy))
        .collect()
}

/// Axis bounds `(x, y)` for the trend chart.
///
/// A single-day or flat series still gets a non-empty span so the line
/// has somewhere to sit.
pub fn trend_bounds(points: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
    let x_max = points.iter().map(|p| p.0).fold(0.0, f64::max).max(1.0);
    let y_min = points.iter().map(|p| p.1).reduce(f64::min).unwrap_or(0.0);
    let y_max = points.iter().map(|p| p.1).reduce(f64::max).unwrap_or(1.0);
    let (y_lo, y_hi) = if y_max - y_min < f64::EPSILON {
        ((y_min - 1.0).max(0.0), y_max + 1.0)
    } else {
        (y_min, y_max)
    };
    ([0.0, x_max], [y_lo, y_hi])
}

/// First, middle and last dates of the series as axis labels.
pub fn date_labels(trend: &[DailyPoint]) -> Vec<String> {
    let fmt = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
    match trend {
        [] => Vec::new(),
        [only] => vec![fmt(only.date)],
        [first, .., last] => {
            let mid = first.date + (last.date - first.date) / 2;
            vec![fmt(first.date), fmt(mid), fmt(last.date)]
        }
    }
}

/// Draw the "Daily Energy Trend" line chart.
pub fn render_trend(
    frame: &mut Frame,
    area: Rect,
    trend: &[DailyPoint],
    theme: &Theme,
    block: Block,
) {
    if trend.is_empty() {
        render_empty(frame, area, theme, block);
        return;
    }
    let points = trend_points(trend);
    let (x_bounds, y_bounds) = trend_bounds(&points);
    let y_labels = vec![
        format!("{:.1}", y_bounds[0]),
        format!("{:.1}", (y_bounds[0] + y_bounds[1]) / 2.0),
        format!("{:.1}", y_bounds[1]),
    ];

    let dataset = Dataset::default()
        .name("kWh")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.chart_line)
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds(x_bounds)
                .labels(date_labels(trend)),
        )
        .y_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds(y_bounds)
                .labels(y_labels),
        );
    frame.render_widget(chart, area);
}

fn render_empty(frame: &mut Frame, area: Rect, theme: &Theme, block: Block) {
    let paragraph =
        Paragraph::new(Line::from(Span::styled(greenflow_core::formatting::NO_DATA, theme.dim)))
            .block(block);
    frame.render_widget(paragraph, area);
}

/// Bordered block with a panel title.
pub fn panel_block<'a>(title: &'a str, border: Style) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn point(d: u32, v: f64) -> DailyPoint {
        DailyPoint {
            date: day(d),
            mean_energy: v,
        }
    }

    fn ranking() -> Vec<RankingEntry> {
        vec![
            RankingEntry {
                company: "Beta".to_string(),
                mean_energy: 5.0,
            },
            RankingEntry {
                company: "Acme".to_string(),
                mean_energy: 15.0,
            },
        ]
    }

    #[test]
    fn test_scaled_values() {
        assert_eq!(scaled(5.0), 500);
        assert_eq!(scaled(11.666), 1167);
        assert_eq!(scaled(0.0), 0);
        assert_eq!(scaled(f64::NAN), 0);
    }

    #[test]
    fn test_ranking_bars_keep_order() {
        let theme = Theme::dark();
        let bars = ranking_bars(&ranking(), &theme);
        assert_eq!(bars.len(), 2);
    }

    #[test]
    fn test_trend_points_offsets() {
        let pts = trend_points(&[point(1, 10.0), point(2, 20.0), point(5, 5.0)]);
        assert_eq!(pts, vec![(0.0, 10.0), (1.0, 20.0), (4.0, 5.0)]);
        assert!(trend_points(&[]).is_empty());
    }

    #[test]
    fn test_trend_bounds_flat_series() {
        let (x, y) = trend_bounds(&[(0.0, 4.0)]);
        assert_eq!(x, [0.0, 1.0]);
        assert_eq!(y, [3.0, 5.0]);
    }

    #[test]
    fn test_trend_bounds_span() {
        let (x, y) = trend_bounds(&[(0.0, 10.0), (3.0, 20.0)]);
        assert_eq!(x, [0.0, 3.0]);
        assert_eq!(y, [10.0, 20.0]);
    }

    #[test]
    fn test_date_labels() {
        assert!(date_labels(&[]).is_empty());
        assert_eq!(date_labels(&[point(3, 1.0)]), vec!["2024-01-03"]);
        assert_eq!(
            date_labels(&[point(1, 1.0), point(2, 1.0), point(5, 1.0)]),
            vec!["2024-01-01", "2024-01-03", "2024-01-05"]
        );
    }

    #[test]
    fn test_render_charts_do_not_panic() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let trend = vec![point(1, 10.0), point(2, 20.0)];
        terminal
            .draw(|frame| {
                let area = frame.area();
                let (top, bottom) = (
                    Rect::new(0, 0, area.width, 15),
                    Rect::new(0, 15, area.width, 15),
                );
                render_ranking(frame, top, &ranking(), &theme, panel_block("Ranking", theme.panel_border));
                render_trend(frame, bottom, &trend, &theme, panel_block("Trend", theme.panel_border));
            })
            .unwrap();
    }

    #[test]
    fn test_render_empty_charts_do_not_panic() {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::classic();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_ranking(frame, area, &[], &theme, Block::default());
                render_trend(frame, area, &[], &theme, Block::default());
            })
            .unwrap();
    }
}
