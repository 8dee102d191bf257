use log::{info, warn};
use std::path::Path;

use crate::core::domain::{
    AugmentedRow, AugmentedTable, BehaviorClass, CellValue, MetricsRow, MetricsTable,
    OrbitalMetrics, BEHAVIOR_CLASS_COLUMN, SATELLITE_COLUMN,
};
use crate::core::error::{PipelineError, PipelineResult};
use crate::parsing::csv_parser::{self, RawRecords};
use crate::preprocessing::validator::{MetricsValidator, ValidationResult};

/// Result of loading a metrics artifact
#[derive(Debug)]
pub struct MetricsLoadResult {
    pub table: MetricsTable,
    pub validation: ValidationResult,
}

/// Loader for fleet metrics artifacts
///
/// A missing file is reported as `NotFound` before any parsing happens, so
/// callers can tell "re-run the producer" apart from "fix the data".
pub struct MetricsLoader;

impl MetricsLoader {
    /// Load the metrics table at `path`
    pub fn load(path: &Path) -> PipelineResult<MetricsTable> {
        Self::load_with_report(path).map(|result| result.table)
    }

    /// Load the metrics table together with its validation report
    pub fn load_with_report(path: &Path) -> PipelineResult<MetricsLoadResult> {
        if !path.is_file() {
            return Err(PipelineError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let df = csv_parser::parse_metrics_csv(path)?;
        let records = csv_parser::dataframe_to_records(&df)?;
        let result = Self::from_records(records)?;

        info!(
            "Loaded {} satellites ({} columns) from {}",
            result.table.len(),
            result.table.schema.len(),
            path.display()
        );
        Ok(result)
    }

    /// Validate raw records and build the keyed metrics table
    pub fn from_records(records: RawRecords) -> PipelineResult<MetricsLoadResult> {
        let validation = MetricsValidator::validate_records(&records);

        for warning in &validation.warnings {
            warn!("{}", warning);
        }
        if !validation.is_valid {
            return Err(PipelineError::Schema(validation.errors.join("; ")));
        }

        let RawRecords { schema, rows } = records;
        let key_idx = schema.index_of(SATELLITE_COLUMN).ok_or_else(|| {
            PipelineError::Schema(format!("Missing required column: {}", SATELLITE_COLUMN))
        })?;

        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, cells)| {
                let satellite = cells
                    .get(key_idx)
                    .and_then(CellValue::as_text)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        PipelineError::Schema(format!(
                            "Empty {} value at row {}",
                            SATELLITE_COLUMN,
                            i + 1
                        ))
                    })?;
                let metrics = OrbitalMetrics::from_cells(&schema, &cells);
                Ok(MetricsRow {
                    satellite,
                    metrics,
                    cells,
                })
            })
            .collect::<PipelineResult<Vec<_>>>()?;

        Ok(MetricsLoadResult {
            table: MetricsTable { schema, rows },
            validation,
        })
    }

    /// Load a previously written augmented artifact
    ///
    /// The `behavior_class` column must be present and every value must be a
    /// valid class label.
    pub fn load_augmented(path: &Path) -> PipelineResult<AugmentedTable> {
        let table = Self::load(path)?;
        Self::into_augmented(table)
    }

    /// Interpret the `behavior_class` column of a loaded table
    pub fn into_augmented(table: MetricsTable) -> PipelineResult<AugmentedTable> {
        let MetricsTable { schema, rows } = table;
        let class_idx = schema.index_of(BEHAVIOR_CLASS_COLUMN).ok_or_else(|| {
            PipelineError::Schema(format!(
                "Missing required column: {}",
                BEHAVIOR_CLASS_COLUMN
            ))
        })?;

        let rows = rows
            .into_iter()
            .map(|row| {
                let label = row
                    .cells
                    .get(class_idx)
                    .and_then(CellValue::as_text)
                    .unwrap_or_default();
                let behavior_class = label.parse::<BehaviorClass>().map_err(|e| {
                    PipelineError::Schema(format!("{} for satellite '{}'", e, row.satellite))
                })?;
                Ok(AugmentedRow {
                    row,
                    behavior_class,
                })
            })
            .collect::<PipelineResult<Vec<_>>>()?;

        Ok(AugmentedTable { schema, rows })
    }
}
