//! Netra fleet behavior classification backend.
//!
//! Reads the per-satellite orbital metrics produced by the analysis stage,
//! labels every satellite `STABLE`, `MODERATELY_ACTIVE` or `UNSTABLE`, writes
//! the augmented artifact and serves it to the Streamlit dashboard.

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod algorithms;
pub mod config;
pub mod core;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod presentation;
pub mod services;
pub mod transformations;

#[cfg(feature = "python")]
pub mod python;

/// Netra Rust backend - fleet behavior classification
#[cfg(feature = "python")]
#[pymodule]
fn netra_orb(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register(m)
}
