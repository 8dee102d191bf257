//! Table transformations for the presentation layer.
//!
//! - [`filtering`]: select rows of an augmented table by behavior class or
//!   satellite id
//!
//! # Example
//!
//! ```no_run
//! use netra_orb::io::MetricsLoader;
//! use netra_orb::transformations::{filter_by_class, ClassFilter};
//! use std::path::Path;
//!
//! let table = MetricsLoader::load_augmented(Path::new("fleet_summary_with_behavior.csv")).unwrap();
//! let unstable = filter_by_class(&table, "UNSTABLE".parse::<ClassFilter>().unwrap());
//! println!("{} unstable satellites", unstable.len());
//! ```

pub mod filtering;

pub use filtering::{filter_by_class, filter_by_satellites, ClassFilter};
