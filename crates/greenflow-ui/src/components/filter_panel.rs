//! Sidebar with the unit multi-select and the date-range editor.
//!
//! The panel owns only presentation state (focus, cursor, last status
//! message). The [`Filter`] itself lives in the app and is edited through
//! [`FilterPanel::handle_key`], which reports whether a recomputation is
//! needed.
//!
//! | Key             | Units focus            | From / To focus    |
//! |-----------------|------------------------|--------------------|
//! | `Tab` / `BackTab` | next / previous control | same             |
//! | `↑` / `↓`       | move cursor            | ±7 days            |
//! | `←` / `→`       |                        | ±1 day             |
//! | `Space` / `Enter` | toggle unit under cursor |                  |
//! | `c`             | clear unit selection (all units) | same     |
//! | `r`             | reset to the full dataset | same            |

use crossterm::event::{KeyCode, KeyEvent};
use greenflow_core::models::{DateRange, Filter};
use greenflow_core::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, warn};

use super::fit_width;
use crate::themes::Theme;

const WEEK: i64 = 7;

/// Which control receives editing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFocus {
    Units,
    From,
    To,
}

impl FilterFocus {
    fn next(self) -> Self {
        match self {
            Self::Units => Self::From,
            Self::From => Self::To,
            Self::To => Self::Units,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Units => Self::To,
            Self::From => Self::Units,
            Self::To => Self::From,
        }
    }
}

/// Result of feeding one key to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The filter changed; the summary must be recomputed.
    Changed,
    /// Navigation only, or a key the panel does not handle.
    Unchanged,
    /// The edit would have produced an invalid date range and was dropped.
    Rejected,
}

/// Whether the status line reports a completed action or a dropped edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Notice,
    Warning,
}

#[derive(Debug, Clone)]
pub struct FilterPanel {
    focus: FilterFocus,
    cursor: usize,
    units: Vec<String>,
    default_filter: Filter,
    status: Option<(StatusKind, String)>,
}

impl FilterPanel {
    /// `units` are listed in the given order; `default_filter` is what `r`
    /// restores.
    pub fn new(units: Vec<String>, default_filter: Filter) -> Self {
        Self {
            focus: FilterFocus::Units,
            cursor: 0,
            units,
            default_filter,
            status: None,
        }
    }

    pub fn focus(&self) -> FilterFocus {
        self.focus
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Last warning or notice, cleared by the next handled key.
    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|(_, text)| text.as_str())
    }

    pub fn status_kind(&self) -> Option<StatusKind> {
        self.status.as_ref().map(|(kind, _)| *kind)
    }

    /// `success` for notices, `warning` for rejected edits.
    pub fn status_style(&self, theme: &Theme) -> Style {
        match self.status_kind() {
            Some(StatusKind::Notice) => theme.success,
            _ => theme.warning,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, filter: &mut Filter) -> FilterOutcome {
        self.status = None;
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                FilterOutcome::Unchanged
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                FilterOutcome::Unchanged
            }
            KeyCode::Char('r') => {
                if *filter == self.default_filter {
                    return FilterOutcome::Unchanged;
                }
                *filter = self.default_filter.clone();
                self.status = Some((StatusKind::Notice, "Filters reset".to_string()));
                FilterOutcome::Changed
            }
            KeyCode::Char('c') => {
                if filter.units.is_empty() {
                    return FilterOutcome::Unchanged;
                }
                filter.units.clear();
                FilterOutcome::Changed
            }
            code => match self.focus {
                FilterFocus::Units => self.handle_units_key(code, filter),
                FilterFocus::From | FilterFocus::To => self.handle_date_key(code, filter),
            },
        }
    }

    fn handle_units_key(&mut self, code: KeyCode, filter: &mut Filter) -> FilterOutcome {
        match code {
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                FilterOutcome::Unchanged
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.units.len() {
                    self.cursor += 1;
                }
                FilterOutcome::Unchanged
            }
            KeyCode::Char(' ') | KeyCode::Enter => match self.units.get(self.cursor) {
                Some(unit) => {
                    filter.toggle_unit(unit);
                    debug!(unit = %unit, "Toggled unit");
                    FilterOutcome::Changed
                }
                None => FilterOutcome::Unchanged,
            },
            _ => FilterOutcome::Unchanged,
        }
    }

    fn handle_date_key(&mut self, code: KeyCode, filter: &mut Filter) -> FilterOutcome {
        let days = match code {
            KeyCode::Left => -1,
            KeyCode::Right => 1,
            KeyCode::Down => -WEEK,
            KeyCode::Up => WEEK,
            _ => return FilterOutcome::Unchanged,
        };
        let range = filter.date_range;
        let edited = match self.focus {
            FilterFocus::From => range.shift_start(days),
            _ => range.shift_end(days),
        };
        self.apply_range(edited, filter)
    }

    fn apply_range(&mut self, edited: Result<DateRange>, filter: &mut Filter) -> FilterOutcome {
        match edited {
            Ok(range) => {
                filter.date_range = range;
                FilterOutcome::Changed
            }
            Err(e) => {
                warn!("Rejected date edit: {}", e);
                self.status = Some((StatusKind::Warning, e.to_string()));
                FilterOutcome::Rejected
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn heading<'a>(&self, focus: FilterFocus, text: &'static str, theme: &'a Theme) -> Span<'a> {
        let (marker, style) = if self.focus == focus {
            ("▶ ", theme.focus)
        } else {
            ("  ", theme.label)
        };
        Span::styled(format!("{}{}", marker, text), style)
    }

    fn unit_lines<'a>(&self, filter: &Filter, width: usize, theme: &'a Theme) -> Vec<Line<'a>> {
        let scope = if filter.units.is_empty() {
            " (all)"
        } else {
            ""
        };
        let mut lines = vec![Line::from(vec![
            self.heading(FilterFocus::Units, "Units", theme),
            Span::styled(scope, theme.dim),
        ])];

        let label_width = width.saturating_sub(8).max(4);
        for (i, unit) in self.units.iter().enumerate() {
            let pointer = if self.focus == FilterFocus::Units && i == self.cursor {
                "›"
            } else {
                " "
            };
            let selected = filter.units.contains(unit);
            let (check, style) = if selected {
                ("[x]", theme.selected)
            } else {
                ("[ ]", theme.text)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", pointer), theme.focus),
                Span::styled(format!("{} {}", check, fit_width(unit, label_width)), style),
            ]));
        }
        lines
    }

    fn date_lines<'a>(&self, filter: &Filter, theme: &'a Theme) -> Vec<Line<'a>> {
        let mut lines = vec![
            Line::from(vec![
                self.heading(FilterFocus::From, "From ", theme),
                Span::styled(filter.date_range.start().to_string(), theme.value),
            ]),
            Line::from(vec![
                self.heading(FilterFocus::To, "To   ", theme),
                Span::styled(filter.date_range.end().to_string(), theme.value),
            ]),
        ];
        if let Some(status) = self.status() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                status.to_string(),
                self.status_style(theme),
            )));
        }
        lines
    }

    /// Whole panel content as plain lines: unit list, dates, status.
    pub fn to_lines<'a>(&self, filter: &Filter, width: usize, theme: &'a Theme) -> Vec<Line<'a>> {
        let mut lines = self.unit_lines(filter, width, theme);
        lines.push(Line::from(""));
        lines.extend(self.date_lines(filter, theme));
        lines
    }

    /// Draw the unit list and the date editor as two bordered sections;
    /// the section holding the focus gets the highlighted border.
    pub fn render(&self, frame: &mut Frame, area: Rect, filter: &Filter, theme: &Theme) {
        let width = area.width.saturating_sub(2) as usize;
        let units_height = (self.units.len() as u16).saturating_add(3);
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(units_height), Constraint::Min(4)])
            .split(area);

        let units_block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(self.focus == FilterFocus::Units))
            .title(" Filters ");
        frame.render_widget(
            Paragraph::new(self.unit_lines(filter, width, theme)).block(units_block),
            sections[0],
        );

        let dates_block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(self.focus != FilterFocus::Units))
            .title(" Dates ");
        frame.render_widget(
            Paragraph::new(self.date_lines(filter, theme)).block(dates_block),
            sections[1],
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
