// src/io/summary.rs

use crate::scenario::comparison::ComparisonRow;
use crate::simulation::metrics::Metrics;

/// Shown wherever a statistic is undefined.
pub const PLACEHOLDER: &str = "—";

fn or_placeholder<T>(value: Option<T>, fmt: impl FnOnce(T) -> String) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), fmt)
}

pub fn format_days(value: Option<usize>) -> String {
    or_placeholder(value, |d| format!("{d} days"))
}

pub fn format_mean_days(value: Option<f64>) -> String {
    or_placeholder(value, |d| format!("{d:.1} days"))
}

pub fn format_percent(value: Option<f64>) -> String {
    or_placeholder(value, |f| format!("{:.1}%", f * 100.0))
}

pub fn format_money(value: Option<f64>) -> String {
    or_placeholder(value, |m| format!("{m:.0}"))
}

/// Metrics panel for a single run.
pub fn format_summary(metrics: &Metrics) -> String {
    let lines = [
        ("Utilisation", format_percent(Some(metrics.utilisation))),
        ("Seen (post warm-up)", metrics.n_seen.to_string()),
        ("Mean wait", format_mean_days(metrics.mean_wait)),
        ("Median wait", format_days(metrics.median_wait)),
        ("90th percentile wait", format_days(metrics.p90_wait)),
        ("Seen within 2 weeks", format_percent(metrics.within_14)),
        ("Seen within 4 weeks", format_percent(metrics.within_28)),
        ("Seen within 6 weeks", format_percent(metrics.within_42)),
    ];

    lines
        .iter()
        .map(|(label, value)| format!("{label:<22} {value}\n"))
        .collect()
}

fn table_line(cells: [&str; 7]) -> String {
    let [name, util, median, p90, within, cost, per_week] = cells;
    format!("{name:<24} {util:>8} {median:>10} {p90:>10} {within:>8} {cost:>10} {per_week:>14}\n")
}

/// Fixed-width text table of a scenario comparison.
pub fn format_comparison(rows: &[ComparisonRow]) -> String {
    let header = table_line([
        "Scenario",
        "Util",
        "Median",
        "P90",
        "<=4wk",
        "Cost/yr",
        "Cost/wk saved",
    ]);
    let body = rows.iter().map(|row| {
        table_line([
            &row.scenario,
            &format_percent(Some(row.utilisation)),
            &format_days(row.median_wait),
            &format_days(row.p90_wait),
            &format_percent(row.within_28),
            &format_money(Some(row.incremental_cost)),
            &format_money(row.cost_per_week_reduction),
        ])
    });
    std::iter::once(header).chain(body).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::metrics::WaitStatistics;

    #[test]
    fn test_formatters() {
        assert_eq!(format_days(Some(12)), "12 days");
        assert_eq!(format_days(None), PLACEHOLDER);
        assert_eq!(format_mean_days(Some(3.26)), "3.3 days");
        assert_eq!(format_percent(Some(0.5)), "50.0%");
        assert_eq!(format_percent(None), PLACEHOLDER);
        assert_eq!(format_money(Some(15_000.4)), "15000");
    }

    #[test]
    fn test_empty_run_uses_placeholders() {
        let metrics = Metrics::derive(&WaitStatistics::default(), 0, 300);
        let text = format_summary(&metrics);
        assert!(text.contains("Utilisation            0.0%"));
        assert!(text.contains("Median wait            —"));
        assert!(!text.contains("NaN"));
        assert_eq!(text.matches(PLACEHOLDER).count(), 6);
    }

    #[test]
    fn test_comparison_table_has_header_and_rows() {
        let row = ComparisonRow {
            scenario: "Baseline".to_string(),
            utilisation: 1.0,
            median_wait: Some(20),
            p90_wait: Some(31),
            within_28: Some(0.5),
            cost_per_week_reduction: None,
            extra_slots: 0,
            incremental_cost: 0.0,
        };
        let text = format_comparison(&[row]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Baseline"));
        assert!(lines[1].contains("20 days"));
        assert!(lines[1].trim_end().ends_with(PLACEHOLDER));
    }
}
