//! Fleet metrics validation with detailed error and warning reporting.
//!
//! This module checks a freshly parsed metrics table for the minimal schema
//! the pipeline relies on: a `satellite` key column with non-empty, unique
//! identifiers. Problems with the numeric metric columns are reported as
//! warnings only, since the classifier tolerates missing values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::domain::{CellValue, MetricField, SATELLITE_COLUMN};
use crate::parsing::csv_parser::RawRecords;

/// Validation result with categorized issues and statistics.
///
/// Errors make `is_valid` false and abort loading; warnings are
/// informational.
///
/// # Examples
///
/// ```
/// use netra_orb::preprocessing::validator::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid);
///
/// result.add_error("Missing required column: satellite".to_string());
/// assert!(!result.is_valid);
/// assert_eq!(result.errors.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary statistics computed during validation.
///
/// * `total_rows` - Number of data rows in the artifact
/// * `missing_columns` - Required metric columns absent from the header
/// * `empty_ids` - Rows whose `satellite` value is empty
/// * `duplicate_ids` - Rows repeating an earlier `satellite` value
/// * `non_numeric_cells` - Unparseable text values in required metric columns
/// * `missing_cells` - Empty values in required metric columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_rows: usize,
    pub missing_columns: usize,
    pub empty_ids: usize,
    pub duplicate_ids: usize,
    pub non_numeric_cells: usize,
    pub missing_cells: usize,
}

impl ValidationResult {
    /// Creates a new validation result with valid status and empty error/warning lists.
    pub fn new() -> Self {
        Self {
            is_valid: true,
            ..Default::default()
        }
    }

    /// Adds a critical error and marks the result as invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Adds a non-critical warning without invalidating the result.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

/// Validator for parsed fleet metrics.
pub struct MetricsValidator;

impl MetricsValidator {
    /// Validates raw records produced by the CSV parser.
    ///
    /// # Error Conditions
    ///
    /// - Missing `satellite` column
    /// - Empty `satellite` value (reported with its 1-based data row)
    /// - Duplicate `satellite` value (reported with both rows)
    ///
    /// # Warning Conditions
    ///
    /// - Missing required metric column
    /// - Non-numeric value in a required metric column
    /// - Empty values in a required metric column
    pub fn validate_records(records: &RawRecords) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.stats.total_rows = records.rows.len();

        match records.schema.index_of(SATELLITE_COLUMN) {
            Some(idx) => Self::check_identifiers(records, idx, &mut result),
            None => {
                result.add_error(format!("Missing required column: {}", SATELLITE_COLUMN));
            }
        }

        Self::check_metric_columns(records, &mut result);

        result
    }

    fn check_identifiers(records: &RawRecords, idx: usize, result: &mut ValidationResult) {
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(records.rows.len());

        for (i, row) in records.rows.iter().enumerate() {
            let row_number = i + 1;
            let id = match row.get(idx) {
                Some(CellValue::Text(s)) if !s.trim().is_empty() => s.as_str(),
                _ => {
                    result.stats.empty_ids += 1;
                    result.add_error(format!(
                        "Empty {} value at row {}",
                        SATELLITE_COLUMN, row_number
                    ));
                    continue;
                }
            };

            if let Some(first) = seen.get(id) {
                result.stats.duplicate_ids += 1;
                result.add_error(format!(
                    "Duplicate {} '{}' at rows {} and {}",
                    SATELLITE_COLUMN, id, first, row_number
                ));
            } else {
                seen.insert(id, row_number);
            }
        }
    }

    fn check_metric_columns(records: &RawRecords, result: &mut ValidationResult) {
        for field in MetricField::ALL {
            let column = field.column();
            let Some(idx) = records.schema.index_of(column) else {
                result.stats.missing_columns += 1;
                result.add_warning(format!("Missing metric column: {}", column));
                continue;
            };

            let mut missing = 0;
            for (i, row) in records.rows.iter().enumerate() {
                match row.get(idx) {
                    Some(cell @ CellValue::Text(raw)) if cell.to_number().is_none() => {
                        result.stats.non_numeric_cells += 1;
                        result.add_warning(format!(
                            "Non-numeric value '{}' in {} at row {}",
                            raw,
                            column,
                            i + 1
                        ));
                    }
                    Some(CellValue::Missing) | None => missing += 1,
                    Some(_) => {}
                }
            }

            if missing > 0 {
                result.stats.missing_cells += missing;
                result.add_warning(format!("{} rows have missing {}", missing, column));
            }
        }
    }
}
