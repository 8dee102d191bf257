//! Domain models for satellite fleet metrics and behavior classes.
//!
//! This module provides the core data structures shared by the loader, the
//! classifier and the presentation layer: the tagged cell values of the
//! metrics table, its column schema, the strict view of the ten required
//! orbital metrics, and the derived behavior label.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Primary key column of the metrics table.
pub const SATELLITE_COLUMN: &str = "satellite";

/// Derived column appended by the classifier.
pub const BEHAVIOR_CLASS_COLUMN: &str = "behavior_class";

/// Operational health label derived from a satellite's metrics.
///
/// Variants are declared in increasing severity, so the derived `Ord`
/// gives `Unstable > ModeratelyActive > Stable`.
///
/// # Examples
///
/// ```
/// use netra_orb::core::domain::BehaviorClass;
///
/// assert!(BehaviorClass::Unstable > BehaviorClass::ModeratelyActive);
/// assert_eq!("STABLE".parse::<BehaviorClass>().unwrap(), BehaviorClass::Stable);
/// assert_eq!(BehaviorClass::ModeratelyActive.as_str(), "MODERATELY_ACTIVE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BehaviorClass {
    Stable,
    ModeratelyActive,
    Unstable,
}

impl BehaviorClass {
    /// All classes, ordered from least to most severe.
    pub const ALL: [BehaviorClass; 3] = [
        BehaviorClass::Stable,
        BehaviorClass::ModeratelyActive,
        BehaviorClass::Unstable,
    ];

    /// Label written to the `behavior_class` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorClass::Stable => "STABLE",
            BehaviorClass::ModeratelyActive => "MODERATELY_ACTIVE",
            BehaviorClass::Unstable => "UNSTABLE",
        }
    }
}

impl fmt::Display for BehaviorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BehaviorClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STABLE" => Ok(BehaviorClass::Stable),
            "MODERATELY_ACTIVE" => Ok(BehaviorClass::ModeratelyActive),
            "UNSTABLE" => Ok(BehaviorClass::Unstable),
            other => Err(format!(
                "Invalid behavior class: '{}'. Must be 'STABLE', 'MODERATELY_ACTIVE', or 'UNSTABLE'",
                other
            )),
        }
    }
}

/// A single cell of the metrics table.
///
/// Numeric columns load as `Number`, everything else as `Text`. Empty CSV
/// fields load as `Missing`. No coercion happens at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Numeric view of the cell; `None` for text and missing values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric coercion: numbers as-is, text that parses as a float after
    /// trimming, `None` otherwise.
    ///
    /// ```
    /// use netra_orb::core::domain::CellValue;
    ///
    /// assert_eq!(CellValue::Text(" 2.5 ".into()).to_number(), Some(2.5));
    /// assert_eq!(CellValue::Text("n/a".into()).to_number(), None);
    /// assert_eq!(CellValue::Missing.to_number(), None);
    /// ```
    pub fn to_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Missing => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

/// Float equality where NaN equals NaN, so tables holding missing metrics
/// compare equal to their own copies.
fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => same_value(*a, *b),
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Missing, CellValue::Missing) => true,
            _ => false,
        }
    }
}

/// Storage type of a column as inferred from the input artifact.
///
/// Kept so the derived artifact is written back with the same column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

/// Name and kind of one table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered column list of a metrics table.
///
/// Column order is the order of the input header and is preserved through
/// every transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    columns: Vec<ColumnSpec>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Builds a schema; later duplicates of a column name are shadowed by the first.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            index.entry(column.name.clone()).or_insert(i);
        }
        Self { columns, index }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// The ten required numeric metric columns.
///
/// Used as the addressable metric set for classification thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    MeanError,
    MedianError,
    MaxError,
    P95Error,
    AnomalyCount,
    Sgp4MeanKm,
    Sgp4MedianKm,
    Sgp4P95Km,
    Sgp4MaxKm,
    Sgp4StdKm,
}

impl MetricField {
    pub const ALL: [MetricField; 10] = [
        MetricField::MeanError,
        MetricField::MedianError,
        MetricField::MaxError,
        MetricField::P95Error,
        MetricField::AnomalyCount,
        MetricField::Sgp4MeanKm,
        MetricField::Sgp4MedianKm,
        MetricField::Sgp4P95Km,
        MetricField::Sgp4MaxKm,
        MetricField::Sgp4StdKm,
    ];

    /// Column name of this metric in the metrics artifact.
    pub fn column(&self) -> &'static str {
        match self {
            MetricField::MeanError => "mean_error",
            MetricField::MedianError => "median_error",
            MetricField::MaxError => "max_error",
            MetricField::P95Error => "p95_error",
            MetricField::AnomalyCount => "anomaly_count",
            MetricField::Sgp4MeanKm => "sgp4_mean_km",
            MetricField::Sgp4MedianKm => "sgp4_median_km",
            MetricField::Sgp4P95Km => "sgp4_p95_km",
            MetricField::Sgp4MaxKm => "sgp4_max_km",
            MetricField::Sgp4StdKm => "sgp4_std_km",
        }
    }

    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.column() == name)
    }
}

/// Strict view of the required metrics of one satellite.
///
/// Every field is NaN when the column is absent, the cell is empty, or the
/// cell holds text that does not parse as a number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrbitalMetrics {
    pub mean_error: f64,
    pub median_error: f64,
    pub max_error: f64,
    pub p95_error: f64,
    pub anomaly_count: f64,
    pub sgp4_mean_km: f64,
    pub sgp4_median_km: f64,
    pub sgp4_p95_km: f64,
    pub sgp4_max_km: f64,
    pub sgp4_std_km: f64,
}

impl OrbitalMetrics {
    /// All metrics missing.
    pub fn missing() -> Self {
        Self {
            mean_error: f64::NAN,
            median_error: f64::NAN,
            max_error: f64::NAN,
            p95_error: f64::NAN,
            anomaly_count: f64::NAN,
            sgp4_mean_km: f64::NAN,
            sgp4_median_km: f64::NAN,
            sgp4_p95_km: f64::NAN,
            sgp4_max_km: f64::NAN,
            sgp4_std_km: f64::NAN,
        }
    }

    pub fn get(&self, field: MetricField) -> f64 {
        match field {
            MetricField::MeanError => self.mean_error,
            MetricField::MedianError => self.median_error,
            MetricField::MaxError => self.max_error,
            MetricField::P95Error => self.p95_error,
            MetricField::AnomalyCount => self.anomaly_count,
            MetricField::Sgp4MeanKm => self.sgp4_mean_km,
            MetricField::Sgp4MedianKm => self.sgp4_median_km,
            MetricField::Sgp4P95Km => self.sgp4_p95_km,
            MetricField::Sgp4MaxKm => self.sgp4_max_km,
            MetricField::Sgp4StdKm => self.sgp4_std_km,
        }
    }

    pub fn set(&mut self, field: MetricField, value: f64) {
        let slot = match field {
            MetricField::MeanError => &mut self.mean_error,
            MetricField::MedianError => &mut self.median_error,
            MetricField::MaxError => &mut self.max_error,
            MetricField::P95Error => &mut self.p95_error,
            MetricField::AnomalyCount => &mut self.anomaly_count,
            MetricField::Sgp4MeanKm => &mut self.sgp4_mean_km,
            MetricField::Sgp4MedianKm => &mut self.sgp4_median_km,
            MetricField::Sgp4P95Km => &mut self.sgp4_p95_km,
            MetricField::Sgp4MaxKm => &mut self.sgp4_max_km,
            MetricField::Sgp4StdKm => &mut self.sgp4_std_km,
        };
        *slot = value;
    }

    /// Extracts the strict metric view from raw cells aligned with `schema`.
    pub fn from_cells(schema: &Schema, cells: &[CellValue]) -> Self {
        let mut metrics = Self::missing();
        for field in MetricField::ALL {
            let value = schema
                .index_of(field.column())
                .and_then(|i| cells.get(i))
                .and_then(CellValue::to_number)
                .unwrap_or(f64::NAN);
            metrics.set(field, value);
        }
        metrics
    }
}

impl PartialEq for OrbitalMetrics {
    fn eq(&self, other: &Self) -> bool {
        MetricField::ALL
            .iter()
            .all(|f| same_value(self.get(*f), other.get(*f)))
    }
}

impl Default for OrbitalMetrics {
    fn default() -> Self {
        Self::missing()
    }
}

/// One satellite's row of the metrics table.
///
/// `cells` holds every raw value in schema order, including extra
/// descriptive columns; `metrics` is the strict numeric view used for
/// classification.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub satellite: String,
    pub metrics: OrbitalMetrics,
    pub cells: Vec<CellValue>,
}

impl MetricsRow {
    /// Raw cell of `column`, if the schema has it.
    pub fn cell<'a>(&'a self, schema: &Schema, column: &str) -> Option<&'a CellValue> {
        schema.index_of(column).and_then(|i| self.cells.get(i))
    }
}

/// A loaded metrics artifact: schema plus rows in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    pub schema: Schema,
    pub rows: Vec<MetricsRow>,
}

impl MetricsTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A metrics row with its derived behavior class.
///
/// The class is also present as the trailing `behavior_class` text cell.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedRow {
    pub row: MetricsRow,
    pub behavior_class: BehaviorClass,
}

impl AugmentedRow {
    pub fn satellite(&self) -> &str {
        &self.row.satellite
    }
}

/// Output of the classification stage.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedTable {
    pub schema: Schema,
    pub rows: Vec<AugmentedRow>,
}

impl AugmentedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn satellites(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(AugmentedRow::satellite)
    }
}
