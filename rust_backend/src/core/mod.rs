//! Core domain models for the fleet metrics pipeline.
//!
//! This module defines the fundamental data structures used throughout the
//! crate, representing the metrics table, its rows, the derived behavior
//! class, and the error taxonomy shared by every stage.

pub mod domain;
pub mod error;

pub use domain::{
    AugmentedRow, AugmentedTable, BehaviorClass, CellValue, ColumnKind, ColumnSpec, MetricField,
    MetricsRow, MetricsTable, OrbitalMetrics, Schema, BEHAVIOR_CLASS_COLUMN, SATELLITE_COLUMN,
};
pub use error::{PipelineError, PipelineResult};
