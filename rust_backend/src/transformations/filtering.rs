use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::domain::{AugmentedTable, BehaviorClass};

/// Row selector for the class filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassFilter {
    All,
    Only(BehaviorClass),
}

impl ClassFilter {
    pub fn accepts(&self, class: BehaviorClass) -> bool {
        match self {
            ClassFilter::All => true,
            ClassFilter::Only(selected) => *selected == class,
        }
    }
}

impl From<BehaviorClass> for ClassFilter {
    fn from(class: BehaviorClass) -> Self {
        ClassFilter::Only(class)
    }
}

impl fmt::Display for ClassFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassFilter::All => f.write_str("ALL"),
            ClassFilter::Only(class) => write!(f, "{}", class),
        }
    }
}

impl FromStr for ClassFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(ClassFilter::All),
            other => other.parse::<BehaviorClass>().map(ClassFilter::Only).map_err(|_| {
                format!(
                    "Invalid class filter: {}. Must be 'ALL', 'STABLE', 'MODERATELY_ACTIVE', or 'UNSTABLE'",
                    other
                )
            }),
        }
    }
}

/// Filter rows by behavior class
///
/// Returns a new table; the source is never modified and row order is kept.
pub fn filter_by_class(table: &AugmentedTable, selector: ClassFilter) -> AugmentedTable {
    AugmentedTable {
        schema: table.schema.clone(),
        rows: table
            .rows
            .iter()
            .filter(|r| selector.accepts(r.behavior_class))
            .cloned()
            .collect(),
    }
}

/// Filter rows to the given satellite ids, keeping table order
pub fn filter_by_satellites(table: &AugmentedTable, satellites: &[String]) -> AugmentedTable {
    AugmentedTable {
        schema: table.schema.clone(),
        rows: table
            .rows
            .iter()
            .filter(|r| satellites.iter().any(|s| s == r.satellite()))
            .cloned()
            .collect(),
    }
}
