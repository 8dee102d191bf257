//! Cell formatting and metric labels for display.

use serde::{Deserialize, Serialize};

use crate::core::domain::CellValue;

/// Help text shown for columns without a dedicated entry.
pub const DEFAULT_METRIC_HELP: &str = "Metric derived from orbital analysis";

/// Render a cell for display.
///
/// Anything that coerces to a number is shown with four decimals; other text
/// is shown as-is. Missing values coerce to NaN, which renders as `nan`.
/// Never fails.
///
/// # Examples
///
/// ```
/// use netra_orb::core::domain::CellValue;
/// use netra_orb::presentation::format_value;
///
/// assert_eq!(format_value(&CellValue::Number(1.23456)), "1.2346");
/// assert_eq!(format_value(&CellValue::Text("3".into())), "3.0000");
/// assert_eq!(format_value(&CellValue::Text("UNSTABLE".into())), "UNSTABLE");
/// assert_eq!(format_value(&CellValue::Missing), "nan");
/// ```
pub fn format_value(raw: &CellValue) -> String {
    match raw.to_number() {
        Some(v) => format_number(v),
        None if raw.is_missing() => format_number(f64::NAN),
        None => raw.as_text().unwrap_or_default().to_string(),
    }
}

fn format_number(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.4}", v)
    }
}

/// Display label for a column: underscores become spaces, upper-cased.
pub fn metric_label(column: &str) -> String {
    column.replace('_', " ").to_uppercase()
}

/// Tooltip text for a metric column.
pub fn metric_help(column: &str) -> &'static str {
    match column {
        "mean_error" => "Average LSTM prediction error over time",
        "median_error" => "Typical LSTM error (robust to spikes)",
        "max_error" => "Worst LSTM prediction error",
        "p95_error" => "95% of errors are below this value",
        "anomaly_count" => "Number of detected abnormal behaviors",
        "sgp4_mean_km" => "Average physics model error in kilometers",
        "sgp4_median_km" => "Typical physics model error in kilometers",
        "sgp4_p95_km" => "95% bound of physics error in kilometers",
        _ => DEFAULT_METRIC_HELP,
    }
}

/// One metric tile of the single-satellite view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCard {
    pub column: String,
    pub label: String,
    pub value: String,
    pub help: String,
}

impl MetricCard {
    pub fn new(column: &str, raw: &CellValue) -> Self {
        Self {
            column: column.to_string(),
            label: metric_label(column),
            value: format_value(raw),
            help: metric_help(column).to_string(),
        }
    }
}
