//! Artifact loading.
//!
//! [`MetricsLoader`] reads the fleet metrics summary (or a previously
//! written augmented artifact) from disk, validates the key column, and
//! returns an in-memory table keyed by satellite.
//!
//! # Example
//!
//! ```no_run
//! use netra_orb::io::MetricsLoader;
//! use std::path::Path;
//!
//! let table = MetricsLoader::load(Path::new("fleet_summary.csv"))
//!     .expect("Failed to load fleet summary");
//! println!("Loaded {} satellites", table.len());
//! ```

pub mod loaders;

#[cfg(test)]
mod loaders_tests;

pub use loaders::{MetricsLoadResult, MetricsLoader};
