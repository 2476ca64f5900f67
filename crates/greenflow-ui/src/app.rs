//! Application state and TUI event loop for the GreenFlow dashboard.
//!
//! [`App`] borrows the immutable [`Dataset`], owns the current [`Filter`]
//! and the [`DashboardSummary`] computed from it, and recomputes the
//! summary synchronously whenever the filter panel reports a change.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tracing::{debug, info};

use greenflow_core::error::{DashboardError, Result};
use greenflow_core::models::Filter;
use greenflow_data::aggregator::{Aggregator, DashboardSummary};
use greenflow_data::dataset::Dataset;

use crate::components::filter_panel::{FilterOutcome, FilterPanel};
use crate::dashboard_view::{self, DashboardViewData};
use crate::themes::Theme;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App<'d> {
    /// Active colour theme.
    pub theme: Theme,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    dataset: &'d Dataset,
    filter: Filter,
    summary: DashboardSummary,
    panel: FilterPanel,
}

impl<'d> App<'d> {
    /// Build the app and compute the first summary for `filter`.
    ///
    /// The filter panel's reset target is the dataset's default filter,
    /// regardless of the initial filter.
    pub fn new(dataset: &'d Dataset, filter: Filter, theme_name: &str) -> Self {
        let summary = Aggregator::aggregate(dataset, &filter);
        let panel = FilterPanel::new(dataset.units().to_vec(), dataset.default_filter());
        Self {
            theme: Theme::from_name(theme_name),
            should_quit: false,
            dataset,
            filter,
            summary,
            panel,
        }
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn summary(&self) -> &DashboardSummary {
        &self.summary
    }

    pub fn panel(&self) -> &FilterPanel {
        &self.panel
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until `q`, `Q`, `Esc` or `Ctrl+C`.
    ///
    /// Input is polled with a 250 ms timeout; all work happens on the
    /// calling thread.
    pub fn run(mut self) -> Result<()> {
        enable_raw_mode().map_err(terminal_error)?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(terminal_error)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key)
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode().map_err(terminal_error)?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(terminal_error)?;
        terminal.show_cursor().map_err(terminal_error)?;

        result.map_err(terminal_error)
    }

    /// Apply one key press: quit keys end the loop, everything else goes
    /// to the filter panel.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => match self.panel.handle_key(key, &mut self.filter) {
                FilterOutcome::Changed => self.recompute(),
                FilterOutcome::Rejected | FilterOutcome::Unchanged => {}
            },
        }
    }

    fn recompute(&mut self) {
        self.summary = Aggregator::aggregate(self.dataset, &self.filter);
        info!(
            filter = %self.filter.describe(),
            readings = self.summary.reading_count,
            "Recomputed dashboard"
        );
        if self.summary.is_empty() {
            debug!("Current filter selects no readings");
        }
    }

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let data = DashboardViewData {
            filter: &self.filter,
            summary: &self.summary,
            panel: &self.panel,
        };
        dashboard_view::render_dashboard(frame, area, &data, &self.theme);
    }
}

fn terminal_error(e: io::Error) -> DashboardError {
    DashboardError::Terminal(e.to_string())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use greenflow_core::models::{DateRange, Reading};
    use ratatui::backend::TestBackend;

    fn reading(d: u32, unit: &str, company: &str, energy: f64) -> Reading {
        Reading {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, d)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
            unit: unit.to_string(),
            company: company.to_string(),
            energy_consumption: energy,
            water_consumption: 1.0,
            co2_emission: 1.0,
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

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_new_computes_initial_summary() {
        let ds = dataset();
        let app = App::new(&ds, ds.default_filter(), "dark");
        assert_eq!(app.summary().reading_count, 3);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        let ds = dataset();
        for k in [
            key(KeyCode::Char('q')),
            key(KeyCode::Char('Q')),
            key(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = App::new(&ds, ds.default_filter(), "dark");
            app.handle_key(k);
            assert!(app.should_quit);
        }
    }

    #[test]
    fn test_toggle_unit_recomputes() {
        let ds = dataset();
        let mut app = App::new(&ds, ds.default_filter(), "dark");
        // Units are listed in first-appearance order: A, B.
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char(' ')));

        assert!(app.filter().units.contains("B"));
        assert_eq!(app.summary().reading_count, 1);
        assert_eq!(app.summary().means.energy, Some(20.0));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_plain_c_clears_units_instead_of_quitting() {
        let ds = dataset();
        let filter = ds.default_filter().with_units(["A"]);
        let mut app = App::new(&ds, filter, "dark");
        assert_eq!(app.summary().reading_count, 2);

        app.handle_key(key(KeyCode::Char('c')));
        assert!(!app.should_quit);
        assert!(app.filter().units.is_empty());
        assert_eq!(app.summary().reading_count, 3);
    }

    #[test]
    fn test_rejected_date_edit_keeps_summary() {
        let ds = dataset();
        let mut app = App::new(&ds, ds.default_filter(), "dark");

        // Focus "To" and pull it back onto the start date.
        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::Left));
        assert!(app.panel().status().is_none());
        let accepted = app.summary().clone();

        // One more day would put it before the start date.
        app.handle_key(key(KeyCode::Left));

        assert_eq!(
            app.filter().date_range,
            DateRange::single_day(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert!(app.panel().status().is_some());
        assert_eq!(app.summary(), &accepted);
        assert_eq!(app.summary().reading_count, 2);
    }

    #[test]
    fn test_terminal_error_wraps_io_error() {
        let err = terminal_error(io::Error::new(io::ErrorKind::Other, "no tty"));
        assert!(matches!(err, DashboardError::Terminal(_)));
        assert_eq!(err.to_string(), "Terminal error: no tty");
    }

    #[test]
    fn test_reset_after_empty_selection() {
        let ds = dataset();
        let day = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let mut app = App::new(&ds, Filter::new(DateRange::single_day(day)), "dark");
        assert!(app.summary().is_empty());

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.summary().reading_count, 3);
        assert_eq!(app.filter(), &ds.default_filter());
    }

    #[test]
    fn test_render_does_not_panic() {
        let ds = dataset();
        let app = App::new(&ds, ds.default_filter(), "classic");
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
