use log::info;
use std::collections::BTreeMap;
use std::path::Path;

use crate::algorithms::classification::ClassDistribution;
use crate::core::domain::{AugmentedRow, AugmentedTable, BehaviorClass, CellValue};
use crate::core::error::{PipelineError, PipelineResult};
use crate::io::loaders::MetricsLoader;
use crate::presentation::format::MetricCard;
use crate::presentation::visibility::VisibilitySpec;
use crate::transformations::filtering::{filter_by_class, ClassFilter};

/// Read-only view over an augmented table for the dashboard.
///
/// Satellite ids are indexed once on construction; lookups after that are
/// map lookups. The view never writes back to the artifact.
#[derive(Debug, Clone)]
pub struct FleetView {
    table: AugmentedTable,
    visibility: VisibilitySpec,
    index: BTreeMap<String, usize>,
}

impl FleetView {
    pub fn from_table(table: AugmentedTable, visibility: VisibilitySpec) -> Self {
        let index = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.satellite().to_string(), i))
            .collect();
        Self {
            table,
            visibility,
            index,
        }
    }

    /// Load an augmented artifact written by the classification stage.
    pub fn open(path: &Path, visibility: VisibilitySpec) -> PipelineResult<Self> {
        let table = MetricsLoader::load_augmented(path)?;
        info!("Opened {} with {} satellites", path.display(), table.len());
        Ok(Self::from_table(table, visibility))
    }

    pub fn table(&self) -> &AugmentedTable {
        &self.table
    }

    pub fn visibility(&self) -> &VisibilitySpec {
        &self.visibility
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// All satellite ids in case-sensitive lexical order.
    pub fn satellites(&self) -> Vec<&str> {
        self.index.keys().map(String::as_str).collect()
    }

    pub fn row_for(&self, satellite: &str) -> PipelineResult<&AugmentedRow> {
        self.index
            .get(satellite)
            .map(|&i| &self.table.rows[i])
            .ok_or_else(|| PipelineError::LookupMiss(satellite.to_string()))
    }

    pub fn behavior_class(&self, satellite: &str) -> PipelineResult<BehaviorClass> {
        self.row_for(satellite).map(|row| row.behavior_class)
    }

    pub fn visible_metric_columns(&self) -> Vec<String> {
        self.visibility.visible_columns(&self.table.schema)
    }

    /// One card per visible metric column of `satellite`, in column order.
    pub fn metric_cards(&self, satellite: &str) -> PipelineResult<Vec<MetricCard>> {
        let row = self.row_for(satellite)?;
        Ok(self
            .visible_metric_columns()
            .iter()
            .map(|column| match row.row.cell(&self.table.schema, column) {
                Some(raw) => MetricCard::new(column, raw),
                None => MetricCard::new(column, &CellValue::Missing),
            })
            .collect())
    }

    /// Satellite ids accepted by `selector`, sorted.
    pub fn filter(&self, selector: ClassFilter) -> Vec<&str> {
        self.index
            .iter()
            .filter(|(_, &i)| selector.accepts(self.table.rows[i].behavior_class))
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Rows accepted by `selector`, in artifact order.
    pub fn filtered_table(&self, selector: ClassFilter) -> AugmentedTable {
        filter_by_class(&self.table, selector)
    }

    pub fn distribution(&self) -> ClassDistribution {
        ClassDistribution::from_table(&self.table)
    }
}
