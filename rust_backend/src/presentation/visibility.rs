//! Column visibility rules for metric display.
//!
//! Two column sets never appear in the generic metric grid: the key columns
//! (`satellite`, `behavior_class`), which the dashboard shows elsewhere, and
//! the hidden columns. `sgp4_max_km` and `sgp4_std_km` are hidden by default
//! because they are unreliable at the current data quality.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::domain::{Schema, BEHAVIOR_CLASS_COLUMN, SATELLITE_COLUMN};

/// Columns hidden unless the configuration says otherwise.
pub const DEFAULT_HIDDEN_COLUMNS: [&str; 2] = ["sgp4_max_km", "sgp4_std_km"];

/// Columns excluded from the generic metric iteration.
pub const KEY_COLUMNS: [&str; 2] = [SATELLITE_COLUMN, BEHAVIOR_CLASS_COLUMN];

/// Process-wide default visibility rules.
pub static DEFAULT_VISIBILITY: Lazy<VisibilitySpec> = Lazy::new(VisibilitySpec::default);

/// Read-only display configuration. Never varies per satellite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilitySpec {
    hidden: BTreeSet<String>,
}

impl VisibilitySpec {
    pub fn new<I, S>(hidden: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hidden: hidden.into_iter().map(Into::into).collect(),
        }
    }

    pub fn hidden(&self) -> &BTreeSet<String> {
        &self.hidden
    }

    pub fn key_columns(&self) -> &'static [&'static str] {
        &KEY_COLUMNS
    }

    pub fn is_visible(&self, column: &str) -> bool {
        !self.hidden.contains(column) && !KEY_COLUMNS.contains(&column)
    }

    /// Visible metric columns of `schema`, in schema order.
    pub fn visible_columns(&self, schema: &Schema) -> Vec<String> {
        visible_columns(schema, &self.hidden, &KEY_COLUMNS)
    }
}

impl Default for VisibilitySpec {
    fn default() -> Self {
        Self::new(DEFAULT_HIDDEN_COLUMNS)
    }
}

/// All columns of `schema` except `hidden` and `key_columns`, in schema order.
pub fn visible_columns(
    schema: &Schema,
    hidden: &BTreeSet<String>,
    key_columns: &[&str],
) -> Vec<String> {
    schema
        .names()
        .filter(|name| !hidden.contains(*name) && !key_columns.contains(name))
        .map(str::to_string)
        .collect()
}
