use greenflow_core::formatting::{format_ranking_line, NO_DATA};
use greenflow_data::aggregator::{DashboardSummary, RankingEntry};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::themes::Theme;

pub const EFFICIENT_TITLE: &str = "Top 3 Most Efficient Companies";
pub const CONSUMER_TITLE: &str = "Top 3 Largest Consumers";

// ── Insights ─────────────────────────────────────────────────────────────────

/// The two ranking extremes side by side: most efficient companies
/// (ascending mean energy) and largest consumers.
pub struct Insights<'a> {
    pub summary: &'a DashboardSummary,
    pub theme: &'a Theme,
}

impl<'a> Insights<'a> {
    pub fn new(summary: &'a DashboardSummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }

    pub fn efficient_lines(&self) -> Vec<Line<'a>> {
        section(
            EFFICIENT_TITLE,
            self.summary.top_efficient(),
            self.theme.efficient,
            self.theme,
        )
    }

    pub fn consumer_lines(&self) -> Vec<Line<'a>> {
        section(
            CONSUMER_TITLE,
            self.summary.top_consumers(),
            self.theme.consumer,
            self.theme,
        )
    }
}

fn section<'a>(
    title: &'static str,
    entries: &[RankingEntry],
    accent: Style,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(Span::styled(title, accent))];
    if entries.is_empty() {
        lines.push(Line::from(Span::styled(NO_DATA, theme.dim)));
    }
    lines.extend(entries.iter().map(|e| {
        Line::from(Span::styled(
            format_ranking_line(&e.company, e.mean_energy),
            theme.text,
        ))
    }));
    lines
}
