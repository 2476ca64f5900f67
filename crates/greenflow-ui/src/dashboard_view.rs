//! Full-screen dashboard layout.
//!
//! ```text
//! ┌ Filters ─┐ 🌿 GREENFLOW - SUSTAINABILITY DASHBOARD
//! │ Units    │ ===================================
//! │ [ ] A    │ [ filter | N readings ]
//! │ [x] B    │ ┌ energy ┐┌ water ┐┌ co2 ┐
//! │          │ ┌ Consumption by Unit ┐┌ Company Ranking ┐
//! │ From ... │ ┌ Consumption Over Time ─────────────────┐
//! │ To   ... │ ┌ Key Insights ──────────────────────────┐
//! └──────────┘ help / status
//! ```

use greenflow_core::formatting::format_count;
use greenflow_core::models::Filter;
use greenflow_data::aggregator::DashboardSummary;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::components::box_plot::box_plot_lines;
use crate::components::charts::{panel_block, render_ranking, render_trend};
use crate::components::filter_panel::FilterPanel;
use crate::components::header::Header;
use crate::components::insights::Insights;
use crate::components::metric_card::MetricCard;
use crate::themes::Theme;

pub const NO_DATA_PLACEHOLDER: &str = "No data for the current filter";
pub const HELP_TEXT: &str =
    "Tab focus · ↑↓←→ move/edit · Space toggle · c clear units · r reset · q quit";

const SIDEBAR_WIDTH: u16 = 30;

/// Borrowed state needed to draw one frame.
pub struct DashboardViewData<'a> {
    pub filter: &'a Filter,
    pub summary: &'a DashboardSummary,
    pub panel: &'a FilterPanel,
}

/// Draw the sidebar and all dashboard sections into `area`.
pub fn render_dashboard(frame: &mut Frame, area: Rect, data: &DashboardViewData, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
        .split(area);

    data.panel.render(frame, columns[0], data.filter, theme);
    render_main(frame, columns[1], data, theme);
}

fn render_main(frame: &mut Frame, area: Rect, data: &DashboardViewData, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Min(8),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(area);

    let filter_text = data.filter.describe();
    let readings = format_count(data.summary.reading_count);
    let header = Header::new(&filter_text, &readings, area.width as usize, theme);
    frame.render_widget(Paragraph::new(header.to_lines()), rows[0]);

    let card_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);
    for (card, card_area) in MetricCard::all(&data.summary.means, theme)
        .iter()
        .zip(card_areas.iter())
    {
        card.render(frame, *card_area);
    }

    if data.summary.is_empty() {
        let charts = Rect {
            height: rows[2].height + rows[3].height,
            ..rows[2]
        };
        render_no_data(frame, charts, theme);
    } else {
        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);
        render_distribution(frame, middle[0], data.summary, theme);
        render_ranking(
            frame,
            middle[1],
            &data.summary.company_ranking,
            theme,
            panel_block("Company Ranking (kWh)", theme.panel_border),
        );
        render_trend(
            frame,
            rows[3],
            &data.summary.daily_trend,
            theme,
            panel_block("Consumption Over Time", theme.panel_border),
        );
    }

    render_insights(frame, rows[4], data.summary, theme);
    render_footer(frame, rows[5], data.panel, theme);
}

fn render_distribution(frame: &mut Frame, area: Rect, summary: &DashboardSummary, theme: &Theme) {
    let width = area.width.saturating_sub(2) as usize;
    let paragraph = Paragraph::new(box_plot_lines(&summary.unit_distribution, width, theme))
        .block(panel_block("Consumption by Unit (kWh)", theme.panel_border));
    frame.render_widget(paragraph, area);
}

fn render_insights(frame: &mut Frame, area: Rect, summary: &DashboardSummary, theme: &Theme) {
    let block = panel_block("Key Insights", theme.panel_border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);
    let insights = Insights::new(summary, theme);
    frame.render_widget(Paragraph::new(insights.efficient_lines()), halves[0]);
    frame.render_widget(Paragraph::new(insights.consumer_lines()), halves[1]);
}

fn render_footer(frame: &mut Frame, area: Rect, panel: &FilterPanel, theme: &Theme) {
    let line = match panel.status() {
        Some(status) => Line::from(Span::styled(status.to_string(), panel.status_style(theme))),
        None => Line::from(Span::styled(HELP_TEXT, theme.dim)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Neutral placeholder drawn in place of the charts when the filter
/// selects nothing.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(NO_DATA_PLACEHOLDER, theme.dim)),
        Line::from(""),
        Line::from(Span::styled(
            "Widen the date range or press 'r' to reset",
            theme.info,
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.panel_border),
        );
    frame.render_widget(paragraph, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use greenflow_core::models::{DateRange, Reading};
    use greenflow_data::aggregator::Aggregator;
    use greenflow_data::dataset::Dataset;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn at(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn reading(d: u32, unit: &str, company: &str, energy: f64) -> Reading {
        Reading {
            timestamp: at(d),
            unit: unit.to_string(),
            company: company.to_string(),
            energy_consumption: energy,
            water_consumption: 1.0,
            co2_emission: 0.5,
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            reading(1, "A", "Acme", 10.0),
            reading(2, "B", "Acme", 20.0),
            reading(1, "A", "Beta", 5.0),
        ])
        .unwrap()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn draw(filter: &Filter, summary: &DashboardSummary, panel: &FilterPanel) -> Terminal<TestBackend> {
        let backend = TestBackend::new(140, 45);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let data = DashboardViewData {
            filter,
            summary,
            panel,
        };
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_dashboard(frame, area, &data, &theme);
            })
            .unwrap();
        terminal
    }

    #[test]
    fn test_render_dashboard_with_data() {
        let ds = dataset();
        let filter = ds.default_filter();
        let summary = Aggregator::aggregate(&ds, &filter);
        let panel = FilterPanel::new(ds.units().to_vec(), filter.clone());

        let terminal = draw(&filter, &summary, &panel);
        let screen = screen_text(&terminal);
        assert!(screen.contains("11.67 kWh"));
        assert!(screen.contains("Key Insights"));
        assert!(screen.contains("- Beta: 5.00 kWh"));
        assert!(!screen.contains(NO_DATA_PLACEHOLDER));
    }

    #[test]
    fn test_render_dashboard_empty_filter_shows_placeholder() {
        let ds = dataset();
        let day = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let filter = Filter::new(DateRange::single_day(day));
        let summary = Aggregator::aggregate(&ds, &filter);
        let panel = FilterPanel::new(ds.units().to_vec(), ds.default_filter());

        let terminal = draw(&filter, &summary, &panel);
        let screen = screen_text(&terminal);
        assert!(screen.contains(NO_DATA_PLACEHOLDER));
        assert!(screen.contains("no data"));
    }

    #[test]
    fn test_render_dashboard_small_terminal_does_not_panic() {
        let ds = dataset();
        let filter = ds.default_filter();
        let summary = Aggregator::aggregate(&ds, &filter);
        let panel = FilterPanel::new(ds.units().to_vec(), filter.clone());

        let backend = TestBackend::new(50, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let data = DashboardViewData {
            filter: &filter,
            summary: &summary,
            panel: &panel,
        };
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_dashboard(frame, area, &data, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_no_data_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_no_data(frame, area, &theme);
            })
            .unwrap();
    }
}
