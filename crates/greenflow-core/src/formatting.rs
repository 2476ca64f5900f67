/// Placeholder shown instead of a metric when the filter matched nothing.
pub const NO_DATA: &str = "no data";

/// Display suffix for energy consumption.
pub const ENERGY_UNIT: &str = "kWh";
/// Display suffix for water consumption.
pub const WATER_UNIT: &str = "m³";
/// Display suffix for CO2 emission.
pub const CO2_UNIT: &str = "kg";

/// Format a mean metric with two decimals and its unit suffix.
///
/// `None` (an empty selection) renders as [`NO_DATA`]; a NaN or infinite
/// value is treated the same way so it can never reach the display.
///
/// # Examples
///
/// ```
/// use greenflow_core::formatting::format_metric;
///
/// assert_eq!(format_metric(Some(11.666), "kWh"), "11.67 kWh");
/// assert_eq!(format_metric(Some(0.0), "kg"), "0.00 kg");
/// assert_eq!(format_metric(None, "m³"), "no data");
/// ```
pub fn format_metric(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2} {}", v, suffix),
        _ => NO_DATA.to_string(),
    }
}

/// Format one insight line, e.g. `"- Acme: 15.00 kWh"`.
pub fn format_ranking_line(company: &str, value: f64) -> String {
    format!("- {}: {}", company, format_metric(Some(value), ENERGY_UNIT))
}

/// Format an integer count with thousands separators.
///
/// # Examples
///
/// ```
/// use greenflow_core::formatting::format_count;
///
/// assert_eq!(format_count(5000), "5,000");
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(n: usize) -> String {
    group_thousands(&n.to_string())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
