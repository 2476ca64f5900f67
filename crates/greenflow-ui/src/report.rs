//! Plain-text rendition of the dashboard for the `report` view.
//!
//! Reuses the same components as the TUI and flattens their styled lines
//! into text, so both surfaces always agree on wording and formatting.

use greenflow_core::formatting::{format_count, format_metric, format_ranking_line, ENERGY_UNIT};
use greenflow_core::models::Filter;
use greenflow_data::aggregator::DashboardSummary;
use ratatui::text::Line;

use crate::components::box_plot::box_plot_lines;
use crate::components::header::Header;
use crate::components::insights::Insights;
use crate::components::metric_card::MetricCard;
use crate::dashboard_view::NO_DATA_PLACEHOLDER;
use crate::themes::Theme;

const REPORT_WIDTH: usize = 72;

/// Concatenate the span contents of a line, dropping styles.
pub fn plain(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

fn section(out: &mut Vec<String>, title: &str) {
    out.push(String::new());
    out.push(title.to_string());
    out.push("-".repeat(title.chars().count()));
}

/// Build the full report. The result ends with a newline.
pub fn render_report(filter: &Filter, summary: &DashboardSummary) -> String {
    // Styles are discarded; any theme works.
    let theme = Theme::classic();
    let mut out: Vec<String> = Vec::new();

    let filter_text = filter.describe();
    let readings = format_count(summary.reading_count);
    out.extend(
        Header::new(&filter_text, &readings, REPORT_WIDTH, &theme)
            .to_lines()
            .iter()
            .map(plain),
    );
    out.push(String::new());

    for card in MetricCard::all(&summary.means, &theme) {
        out.push(format!("{}: {}", card.title(), card.display_value()));
    }

    section(&mut out, "Consumption by Unit");
    if summary.unit_distribution.is_empty() {
        out.push(NO_DATA_PLACEHOLDER.to_string());
    } else {
        out.extend(
            box_plot_lines(&summary.unit_distribution, REPORT_WIDTH, &theme)
                .iter()
                .map(|l| plain(l).trim_end().to_string()),
        );
    }

    section(&mut out, "Company Ranking");
    if summary.company_ranking.is_empty() {
        out.push(NO_DATA_PLACEHOLDER.to_string());
    }
    out.extend(
        summary
            .company_ranking
            .iter()
            .map(|e| format_ranking_line(&e.company, e.mean_energy)),
    );

    section(&mut out, "Consumption Over Time");
    if summary.daily_trend.is_empty() {
        out.push(NO_DATA_PLACEHOLDER.to_string());
    }
    out.extend(summary.daily_trend.iter().map(|p| {
        format!(
            "{}  {}",
            p.date.format("%Y-%m-%d"),
            format_metric(Some(p.mean_energy), ENERGY_UNIT)
        )
    }));

    section(&mut out, "Key Insights");
    let insights = Insights::new(summary, &theme);
    out.extend(insights.efficient_lines().iter().map(plain));
    out.push(String::new());
    out.extend(insights.consumer_lines().iter().map(plain));

    let mut text = out.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use greenflow_core::models::{DateRange, Reading};
    use greenflow_data::aggregator::Aggregator;
    use greenflow_data::dataset::Dataset;

    fn reading(d: u32, unit: &str, company: &str, e: f64, w: f64, c: f64) -> Reading {
        Reading {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, d)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            unit: unit.to_string(),
            company: company.to_string(),
            energy_consumption: e,
            water_consumption: w,
            co2_emission: c,
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            reading(1, "A", "Acme", 10.0, 2.0, 1.0),
            reading(2, "B", "Acme", 20.0, 3.0, 2.0),
            reading(1, "A", "Beta", 5.0, 1.0, 0.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_report_full_range() {
        let ds = dataset();
        let filter = ds.default_filter();
        let report = render_report(&filter, &Aggregator::aggregate(&ds, &filter));

        assert!(report.contains("GREENFLOW - SUSTAINABILITY DASHBOARD"));
        assert!(report.contains("[ 2024-01-01 → 2024-01-02 | all units | 3 readings ]"));
        assert!(report.contains("Avg Energy Consumption: 11.67 kWh"));
        assert!(report.contains("Avg Water Consumption: 2.00 m³"));
        assert!(report.contains("Avg CO2 Emission: 1.17 kg"));
        assert!(report.contains("2024-01-01  7.50 kWh"));
        assert!(report.contains("2024-01-02  20.00 kWh"));

        let ranking_pos = report.find("Company Ranking").unwrap();
        let beta = report[ranking_pos..].find("- Beta: 5.00 kWh").unwrap();
        let acme = report[ranking_pos..].find("- Acme: 15.00 kWh").unwrap();
        assert!(beta < acme);
        assert!(report.ends_with('\n'));
    }

    #[test]
    fn test_report_unit_filter() {
        let ds = dataset();
        let filter = ds.default_filter().with_units(["B"]);
        let report = render_report(&filter, &Aggregator::aggregate(&ds, &filter));
        assert!(report.contains("| B | 1 readings ]"));
        assert!(report.contains("Avg Energy Consumption: 20.00 kWh"));
        assert!(report.contains("- Acme: 20.00 kWh"));
        assert!(!report.contains("Beta"));
    }

    #[test]
    fn test_report_empty_selection() {
        let ds = dataset();
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let filter = Filter::new(DateRange::single_day(day));
        let report = render_report(&filter, &Aggregator::aggregate(&ds, &filter));

        assert!(report.contains("Avg Energy Consumption: no data"));
        assert!(report.contains("Avg Water Consumption: no data"));
        assert!(report.contains("Avg CO2 Emission: no data"));
        assert_eq!(report.matches(NO_DATA_PLACEHOLDER).count(), 3);
        assert!(!report.contains("- Acme"));
    }
}
