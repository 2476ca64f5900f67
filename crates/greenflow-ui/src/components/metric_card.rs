use greenflow_core::formatting::{format_metric, CO2_UNIT, ENERGY_UNIT, WATER_UNIT};
use greenflow_data::aggregator::MeanMetrics;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::{MetricKind, Theme};

// ── MetricCard ───────────────────────────────────────────────────────────────

/// One headline metric: a title line and the formatted mean.
///
/// | Kind   | Title                  | Suffix |
/// |--------|------------------------|--------|
/// | Energy | Avg Energy Consumption | kWh    |
/// | Water  | Avg Water Consumption  | m³     |
/// | Co2    | Avg CO2 Emission       | kg     |
pub struct MetricCard<'a> {
    pub kind: MetricKind,
    /// `None` renders as "no data".
    pub value: Option<f64>,
    pub theme: &'a Theme,
}

impl<'a> MetricCard<'a> {
    pub fn new(kind: MetricKind, value: Option<f64>, theme: &'a Theme) -> Self {
        Self { kind, value, theme }
    }

    /// The three cards in display order.
    pub fn all(means: &MeanMetrics, theme: &'a Theme) -> [MetricCard<'a>; 3] {
        [
            Self::new(MetricKind::Energy, means.energy, theme),
            Self::new(MetricKind::Water, means.water, theme),
            Self::new(MetricKind::Co2, means.co2, theme),
        ]
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            MetricKind::Energy => "Avg Energy Consumption",
            MetricKind::Water => "Avg Water Consumption",
            MetricKind::Co2 => "Avg CO2 Emission",
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self.kind {
            MetricKind::Energy => ENERGY_UNIT,
            MetricKind::Water => WATER_UNIT,
            MetricKind::Co2 => CO2_UNIT,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.kind {
            MetricKind::Energy => "⚡",
            MetricKind::Water => "💧",
            MetricKind::Co2 => "🏭",
        }
    }

    /// Formatted value, e.g. `"11.67 kWh"` or `"no data"`.
    pub fn display_value(&self) -> String {
        format_metric(self.value, self.suffix())
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let value_style = if self.value.is_some() {
            self.theme.metric_style(self.kind)
        } else {
            self.theme.dim
        };
        vec![
            Line::from(vec![
                Span::raw(self.icon()),
                Span::styled(format!(" {}", self.title()), self.theme.label),
            ]),
            Line::from(Span::styled(self.display_value(), value_style)),
        ]
    }

    /// Draw the card inside a bordered block.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.to_lines())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.panel_border),
            );
        frame.render_widget(paragraph, area);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
