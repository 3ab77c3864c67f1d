use crate::domain::Snapshot;
use crate::presenter::formatters::NOT_AVAILABLE;
use crate::presenter::metrics::{METRICS, Metric, MetricRow};

const TABLE_WIDTH: usize = 45;
const LABEL_WIDTH: usize = 25;

/// Renders the selected metrics of a snapshot as a fixed-width table.
pub fn render_table(device_name: &str, snapshot: &Snapshot) -> String {
    render_rows(device_name, snapshot, METRICS)
}

fn render_rows(device_name: &str, snapshot: &Snapshot, rows: &[MetricRow]) -> String {
    let heavy_rule = "=".repeat(TABLE_WIDTH);
    let rule = "-".repeat(TABLE_WIDTH);

    let mut lines = vec![
        String::new(),
        heavy_rule.clone(),
        format!(" DEVICE: {}", device_name),
        heavy_rule.clone(),
        row("METRIC", "VALUE"),
        rule.clone(),
    ];
    lines.extend(rows.iter().map(|metric_row| match metric_row {
        MetricRow::Separator => rule.clone(),
        MetricRow::Metric(metric) => row(metric.label, &metric_value(metric, snapshot)),
    }));
    lines.push(heavy_rule);
    lines.push(String::new());

    lines.join("\n")
}

fn row(label: &str, value: &str) -> String {
    format!("{:<width$.width$} | {}", label, value, width = LABEL_WIDTH)
}

/// The formatted value of the first candidate key that is present, or `N/A`.
pub fn metric_value(metric: &Metric, snapshot: &Snapshot) -> String {
    match (snapshot.first_present(metric.keys), metric.formatter) {
        (Some(value), Some(formatter)) => formatter(value),
        (Some(value), None) => value.to_string(),
        (None, _) => NOT_AVAILABLE.to_string(),
    }
}
