use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Which of the three dashboard metrics a style applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Energy,
    Water,
    Co2,
}

/// Complete theme definition carrying all UI styles used by greenflow-ui
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_leaf: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,

    // ── Metric cards ─────────────────────────────────────────────────────────
    pub metric_energy: Style,
    pub metric_water: Style,
    pub metric_co2: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// Interquartile box of the distribution chart.
    pub chart_box: Style,
    /// Median marker inside the box.
    pub chart_median: Style,
    /// Whiskers of the distribution chart.
    pub chart_whisker: Style,
    pub chart_bar: Style,
    pub chart_line: Style,
    pub chart_axis: Style,

    // ── Insights ─────────────────────────────────────────────────────────────
    pub efficient: Style,
    pub consumer: Style,

    // ── Panels ───────────────────────────────────────────────────────────────
    pub panel_border: Style,
    /// Border of the filter control that currently has keyboard focus.
    pub focus: Style,
    /// Selected entries in the unit multi-select.
    pub selected: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            header_leaf: Style::default().fg(Color::LightGreen),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),

            metric_energy: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            metric_water: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            metric_co2: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            chart_box: Style::default().fg(Color::Cyan),
            chart_median: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            chart_whisker: Style::default().fg(Color::Gray),
            chart_bar: Style::default().fg(Color::Green),
            chart_line: Style::default().fg(Color::LightGreen),
            chart_axis: Style::default().fg(Color::DarkGray),

            efficient: Style::default().fg(Color::Green),
            consumer: Style::default().fg(Color::Red),

            panel_border: Style::default().fg(Color::DarkGray),
            focus: Style::default().fg(Color::Cyan),
            selected: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text so content stays legible on a light canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            header_leaf: Style::default().fg(Color::Green),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),

            metric_energy: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            metric_water: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            metric_co2: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),

            chart_box: Style::default().fg(Color::Blue),
            chart_median: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            chart_whisker: Style::default().fg(Color::DarkGray),
            chart_bar: Style::default().fg(Color::Green),
            chart_line: Style::default().fg(Color::Blue),
            chart_axis: Style::default().fg(Color::Gray),

            efficient: Style::default().fg(Color::Green),
            consumer: Style::default().fg(Color::Red),

            panel_border: Style::default().fg(Color::Gray),
            focus: Style::default().fg(Color::Blue),
            selected: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// No bold modifiers, for minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Green),
            header_leaf: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),

            metric_energy: Style::default().fg(Color::Yellow),
            metric_water: Style::default().fg(Color::Cyan),
            metric_co2: Style::default().fg(Color::Magenta),

            chart_box: Style::default().fg(Color::Cyan),
            chart_median: Style::default().fg(Color::Yellow),
            chart_whisker: Style::default().fg(Color::White),
            chart_bar: Style::default().fg(Color::Green),
            chart_line: Style::default().fg(Color::Green),
            chart_axis: Style::default().fg(Color::DarkGray),

            efficient: Style::default().fg(Color::Green),
            consumer: Style::default().fg(Color::Red),

            panel_border: Style::default().fg(Color::DarkGray),
            focus: Style::default().fg(Color::Cyan),
            selected: Style::default().fg(Color::Green),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Accent style of a metric card.
    pub fn metric_style(&self, kind: MetricKind) -> Style {
        match kind {
            MetricKind::Energy => self.metric_energy,
            MetricKind::Water => self.metric_water,
            MetricKind::Co2 => self.metric_co2,
        }
    }

    /// Border style of a panel, highlighted when it has focus.
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.focus
        } else {
            self.panel_border
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Green));
        assert_eq!(t.metric_energy.fg, Some(Color::Yellow));
        assert_eq!(t.metric_water.fg, Some(Color::Cyan));
        assert_eq!(t.efficient.fg, Some(Color::Green));
        assert_eq!(t.consumer.fg, Some(Color::Red));
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.chart_line.fg, Some(Color::Blue));
        assert_eq!(t.focus.fg, Some(Color::Blue));
    }

    #[test]
    fn test_classic_theme_has_no_bold() {
        let t = Theme::classic();
        assert!(!t.value.add_modifier.contains(Modifier::BOLD));
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
        assert!(!t.selected.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("light").text.fg, Some(Color::Black));
        assert_eq!(Theme::from_name("dark").text.fg, Some(Color::White));
        assert!(!Theme::from_name("classic")
            .value
            .add_modifier
            .contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("neon");
        assert!(t.header.fg.is_some());
    }

    #[test]
    fn test_metric_style() {
        let t = Theme::dark();
        assert_eq!(t.metric_style(MetricKind::Energy), t.metric_energy);
        assert_eq!(t.metric_style(MetricKind::Water), t.metric_water);
        assert_eq!(t.metric_style(MetricKind::Co2), t.metric_co2);
    }

    #[test]
    fn test_border_style_focus() {
        let t = Theme::dark();
        assert_eq!(t.border_style(true).fg, Some(Color::Cyan));
        assert_eq!(t.border_style(false).fg, Some(Color::DarkGray));
    }
}
