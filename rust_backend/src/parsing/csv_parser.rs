use polars::prelude::Schema as PlSchema;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use crate::core::domain::{CellValue, ColumnKind, ColumnSpec, Schema, SATELLITE_COLUMN};
use crate::core::error::{PipelineError, PipelineResult};

/// Raw contents of a metrics CSV: the schema and one cell vector per row.
///
/// No validation has happened yet; rows may have empty or duplicate ids.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecords {
    pub schema: Schema,
    pub rows: Vec<Vec<CellValue>>,
}

/// Parse a metrics CSV file into a Polars DataFrame
///
/// The `satellite` column is always read as text, so ids such as `00123` or
/// `1.50` keep their exact spelling. An empty file is reported as a missing
/// `satellite` column.
pub fn parse_metrics_csv(csv_path: &Path) -> PipelineResult<DataFrame> {
    let df = match read_csv(csv_path, None) {
        Ok(df) => df,
        Err(PolarsError::NoData(_)) => {
            return Err(PipelineError::Schema(format!(
                "Missing required column: {}",
                SATELLITE_COLUMN
            )))
        }
        Err(e) => return Err(e.into()),
    };

    let needs_text = df
        .column(SATELLITE_COLUMN)
        .map(|c| c.dtype() != &DataType::String)
        .unwrap_or(false);

    if !needs_text {
        return Ok(df);
    }

    // Inferred as numeric: read again with the id column pinned to text
    let mut overwrite = PlSchema::with_capacity(1);
    overwrite.with_column(SATELLITE_COLUMN.into(), DataType::String);
    Ok(read_csv(csv_path, Some(Arc::new(overwrite)))?)
}

fn read_csv(csv_path: &Path, overwrite: Option<SchemaRef>) -> PolarsResult<DataFrame> {
    // Infer over the whole file so a late text value does not fail the read
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_schema_overwrite(overwrite)
        .try_into_reader_with_file_path(Some(csv_path.to_path_buf()))?
        .finish()
}

/// Convert a Polars DataFrame to raw records
pub fn dataframe_to_records(df: &DataFrame) -> PolarsResult<RawRecords> {
    let height = df.height();
    let mut specs = Vec::with_capacity(df.width());
    let mut columns: Vec<Vec<CellValue>> = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let name = column.name().to_string();
        let (kind, cells) = column_cells(column, name == SATELLITE_COLUMN)?;
        specs.push(ColumnSpec::new(name, kind));
        columns.push(cells);
    }

    let mut rows = Vec::with_capacity(height);
    for i in 0..height {
        rows.push(columns.iter().map(|c| c[i].clone()).collect());
    }

    Ok(RawRecords {
        schema: Schema::new(specs),
        rows,
    })
}

fn column_cells(column: &Column, force_text: bool) -> PolarsResult<(ColumnKind, Vec<CellValue>)> {
    let dtype = column.dtype();
    let height = column.len();

    if !force_text && (dtype.is_integer() || dtype.is_float()) {
        let kind = if dtype.is_integer() {
            ColumnKind::Integer
        } else {
            ColumnKind::Float
        };
        let values = column.cast(&DataType::Float64)?;
        let values = values.f64()?;
        let cells = (0..height)
            .map(|i| values.get(i).map_or(CellValue::Missing, CellValue::Number))
            .collect();
        return Ok((kind, cells));
    }

    let values = column.cast(&DataType::String)?;
    let values = values.str()?;
    let cells = (0..height)
        .map(|i| match values.get(i) {
            Some(s) => CellValue::Text(s.to_string()),
            None => CellValue::Missing,
        })
        .collect();
    Ok((ColumnKind::Text, cells))
}

/// Convert rows of raw cells back into a Polars DataFrame
///
/// Integer columns stay integer as long as every value is integral; a column
/// whose values no longer fit its declared kind is written as text.
pub fn records_to_dataframe<'a, I>(schema: &Schema, rows: I) -> PolarsResult<DataFrame>
where
    I: IntoIterator<Item = &'a [CellValue]>,
{
    let rows: Vec<&[CellValue]> = rows.into_iter().collect();
    let mut columns = Vec::with_capacity(schema.len());

    for (idx, spec) in schema.columns().iter().enumerate() {
        let cells: Vec<&CellValue> = rows
            .iter()
            .map(|row| row.get(idx).unwrap_or(&CellValue::Missing))
            .collect();
        let name = spec.name.as_str();

        let column = match effective_kind(spec.kind, &cells) {
            ColumnKind::Integer => {
                let values: Vec<Option<i64>> = cells
                    .iter()
                    .map(|c| c.as_f64().map(|v| v as i64))
                    .collect();
                Column::new(name.into(), values)
            }
            ColumnKind::Float => {
                let values: Vec<Option<f64>> = cells.iter().map(|c| c.as_f64()).collect();
                Column::new(name.into(), values)
            }
            ColumnKind::Text => {
                let values: Vec<Option<String>> = cells
                    .iter()
                    .map(|c| match c {
                        CellValue::Number(v) => Some(v.to_string()),
                        CellValue::Text(s) => Some(s.clone()),
                        CellValue::Missing => None,
                    })
                    .collect();
                Column::new(name.into(), values)
            }
        };
        columns.push(column);
    }

    DataFrame::new(columns)
}

fn effective_kind(declared: ColumnKind, cells: &[&CellValue]) -> ColumnKind {
    let all_numeric = cells
        .iter()
        .all(|c| matches!(c, CellValue::Number(_) | CellValue::Missing));

    match declared {
        ColumnKind::Text => ColumnKind::Text,
        _ if !all_numeric => ColumnKind::Text,
        ColumnKind::Integer => {
            let integral = cells.iter().all(|c| match c {
                CellValue::Number(v) => v.is_finite() && v.fract() == 0.0,
                _ => true,
            });
            if integral {
                ColumnKind::Integer
            } else {
                ColumnKind::Float
            }
        }
        ColumnKind::Float => ColumnKind::Float,
    }
}

/// Write a DataFrame to `csv_path`, replacing any existing file
///
/// The table is written to a temporary file in the same directory and
/// renamed over the target, so a failed write leaves the old file intact.
pub fn write_metrics_csv(csv_path: &Path, df: &mut DataFrame) -> PipelineResult<()> {
    replace_file(csv_path, |file| {
        CsvWriter::new(file).include_header(true).finish(df)?;
        Ok(())
    })
}

fn replace_file<F>(path: &Path, write: F) -> PipelineResult<()>
where
    F: FnOnce(&mut File) -> PipelineResult<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    write(tmp.as_file_mut())?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
