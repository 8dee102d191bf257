//! Parsers for fleet metrics artifacts.
//!
//! The metrics summary is a CSV file with a header row. This module reads it
//! into a Polars DataFrame, converts it into tagged cells, and writes the
//! augmented table back out.
//!
//! # Example
//!
//! ```no_run
//! use netra_orb::parsing::csv_parser::{dataframe_to_records, parse_metrics_csv};
//! use std::path::Path;
//!
//! let df = parse_metrics_csv(Path::new("fleet_summary.csv"))
//!     .expect("Failed to parse fleet summary");
//! let records = dataframe_to_records(&df).expect("Failed to convert records");
//! println!("{} satellites", records.rows.len());
//! ```

pub mod csv_parser;


pub use csv_parser::{
    dataframe_to_records, parse_metrics_csv, records_to_dataframe, write_metrics_csv, RawRecords,
};
