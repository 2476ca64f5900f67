use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Leaf decoration placed before the application title.
pub const LEAF: &str = "🌿";

/// Dashboard header rendering three lines:
///
/// 1. Application title with the leaf decoration.
/// 2. A `=` separator `width` columns wide.
/// 3. The active filter and the number of matching readings in
///    `[ filter | N readings ]` format.
pub struct Header<'a> {
    /// Output of `Filter::describe`.
    pub filter: &'a str,
    /// Number of readings matching the filter, already formatted.
    pub readings: &'a str,
    /// Width of the separator line.
    pub width: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(filter: &'a str, readings: &'a str, width: usize, theme: &'a Theme) -> Self {
        Self {
            filter,
            readings,
            width,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(vec![
                Span::styled(LEAF, self.theme.header_leaf),
                Span::styled(" GREENFLOW - SUSTAINABILITY DASHBOARD", self.theme.header),
            ]),
            Line::from(Span::styled("=".repeat(self.width), self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.filter, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.readings, self.theme.value),
                Span::styled(" readings ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
