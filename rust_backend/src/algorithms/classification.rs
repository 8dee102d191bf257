//! Rule-based behavior classification.
//!
//! A [`BehaviorClassifier`] holds an ordered list of [`ClassificationRule`]s.
//! Rules are evaluated top to bottom and the first one that matches decides
//! the class; when none matches the fallback class applies. A rule matches
//! when any of its thresholds is strictly exceeded.
//!
//! Comparisons against NaN are false, so a missing or non-numeric metric
//! never triggers a threshold on its own.
//!
//! The default rule set:
//!
//! | Priority | Condition                                  | Class               |
//! |----------|--------------------------------------------|---------------------|
//! | 1        | `anomaly_count > 30` or `p95_error > 6`    | `UNSTABLE`          |
//! | 2        | `anomaly_count > 5` or `p95_error > 3`     | `MODERATELY_ACTIVE` |
//! | -        | otherwise                                  | `STABLE`            |

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::domain::{
    AugmentedRow, AugmentedTable, BehaviorClass, CellValue, ColumnKind, ColumnSpec, MetricField,
    MetricsRow, MetricsTable, OrbitalMetrics, Schema, BEHAVIOR_CLASS_COLUMN,
};

/// Upper bound on one metric; exceeded when `value > above`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub metric: MetricField,
    pub above: f64,
}

impl Threshold {
    pub fn new(metric: MetricField, above: f64) -> Self {
        Self { metric, above }
    }

    pub fn is_exceeded(&self, metrics: &OrbitalMetrics) -> bool {
        metrics.get(self.metric) > self.above
    }
}

/// One entry of the priority list: a class and the thresholds that select it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub class: BehaviorClass,
    pub thresholds: Vec<Threshold>,
}

impl ClassificationRule {
    pub fn new(class: BehaviorClass, thresholds: Vec<Threshold>) -> Self {
        Self { class, thresholds }
    }

    /// True if any threshold is exceeded.
    pub fn matches(&self, metrics: &OrbitalMetrics) -> bool {
        self.thresholds.iter().any(|t| t.is_exceeded(metrics))
    }
}

/// The default rule list, most severe first.
pub fn default_rules() -> Vec<ClassificationRule> {
    vec![
        ClassificationRule::new(
            BehaviorClass::Unstable,
            vec![
                Threshold::new(MetricField::AnomalyCount, 30.0),
                Threshold::new(MetricField::P95Error, 6.0),
            ],
        ),
        ClassificationRule::new(
            BehaviorClass::ModeratelyActive,
            vec![
                Threshold::new(MetricField::AnomalyCount, 5.0),
                Threshold::new(MetricField::P95Error, 3.0),
            ],
        ),
    ]
}

/// Ordered first-match-wins classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorClassifier {
    rules: Vec<ClassificationRule>,
    fallback: BehaviorClass,
}

impl BehaviorClassifier {
    pub fn new(rules: Vec<ClassificationRule>, fallback: BehaviorClass) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    pub fn fallback(&self) -> BehaviorClass {
        self.fallback
    }

    /// Classify one set of metrics.
    pub fn classify_metrics(&self, metrics: &OrbitalMetrics) -> BehaviorClass {
        self.rules
            .iter()
            .find(|rule| rule.matches(metrics))
            .map_or(self.fallback, |rule| rule.class)
    }

    /// Classify one metrics row.
    pub fn classify(&self, row: &MetricsRow) -> BehaviorClass {
        let class = self.classify_metrics(&row.metrics);
        debug!(
            "{}: anomaly_count={} p95_error={} -> {}",
            row.satellite, row.metrics.anomaly_count, row.metrics.p95_error, class
        );
        class
    }

    /// Derive the `behavior_class` column for every row.
    ///
    /// Rows keep their order and the input is left untouched. A
    /// `behavior_class` column already present in the input is discarded and
    /// re-derived, so augmenting an augmented table gives the same labels.
    pub fn augment(&self, table: &MetricsTable) -> AugmentedTable {
        let stale_idx = table.schema.index_of(BEHAVIOR_CLASS_COLUMN);

        let mut columns: Vec<ColumnSpec> = table
            .schema
            .columns()
            .iter()
            .filter(|c| c.name != BEHAVIOR_CLASS_COLUMN)
            .cloned()
            .collect();
        columns.push(ColumnSpec::new(BEHAVIOR_CLASS_COLUMN, ColumnKind::Text));
        let schema = Schema::new(columns);

        let rows = table
            .rows
            .iter()
            .map(|row| {
                let behavior_class = self.classify(row);
                let mut cells: Vec<CellValue> = row
                    .cells
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| Some(*i) != stale_idx)
                    .map(|(_, cell)| cell.clone())
                    .collect();
                cells.push(CellValue::Text(behavior_class.as_str().to_string()));

                AugmentedRow {
                    row: MetricsRow {
                        satellite: row.satellite.clone(),
                        metrics: row.metrics,
                        cells,
                    },
                    behavior_class,
                }
            })
            .collect();

        AugmentedTable { schema, rows }
    }
}

impl Default for BehaviorClassifier {
    fn default() -> Self {
        Self::new(default_rules(), BehaviorClass::Stable)
    }
}

/// Classify a row with the default rules.
pub fn classify(row: &MetricsRow) -> BehaviorClass {
    BehaviorClassifier::default().classify(row)
}

/// Augment a table with the default rules.
pub fn augment(table: &MetricsTable) -> AugmentedTable {
    BehaviorClassifier::default().augment(table)
}

/// Number of satellites per class, in severity order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDistribution {
    pub counts: BTreeMap<BehaviorClass, usize>,
    pub total: usize,
}

impl ClassDistribution {
    pub fn from_table(table: &AugmentedTable) -> Self {
        let mut counts: BTreeMap<BehaviorClass, usize> =
            BehaviorClass::ALL.iter().map(|c| (*c, 0)).collect();
        for row in &table.rows {
            *counts.entry(row.behavior_class).or_insert(0) += 1;
        }
        Self {
            counts,
            total: table.len(),
        }
    }

    pub fn count(&self, class: BehaviorClass) -> usize {
        self.counts.get(&class).copied().unwrap_or(0)
    }
}
