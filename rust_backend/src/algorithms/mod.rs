//! Fleet classification algorithms.
//!
//! - [`classification`]: ordered threshold rules mapping each satellite's
//!   metrics to a [`BehaviorClass`](crate::core::domain::BehaviorClass)
//!
//! # Example
//!
//! ```no_run
//! use netra_orb::algorithms::{BehaviorClassifier, ClassDistribution};
//! use netra_orb::io::MetricsLoader;
//! use std::path::Path;
//!
//! let table = MetricsLoader::load(Path::new("fleet_summary.csv")).unwrap();
//! let augmented = BehaviorClassifier::default().augment(&table);
//! let dist = ClassDistribution::from_table(&augmented);
//! for (class, count) in &dist.counts {
//!     println!("{}: {}", class, count);
//! }
//! ```

pub mod classification;

pub use classification::{
    augment, classify, default_rules, BehaviorClassifier, ClassDistribution, ClassificationRule,
    Threshold,
};
