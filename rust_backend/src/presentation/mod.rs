//! Presentation contract consumed by the dashboard.
//!
//! - [`visibility`]: which columns appear in the generic metric grid
//! - [`format`]: cell formatting, labels, help text and metric cards
//! - [`images`]: naming-convention lookup of plot images

pub mod format;
pub mod images;
pub mod visibility;

pub use format::{format_value, metric_help, metric_label, MetricCard};
pub use images::{ImageCatalog, ImageRef};
pub use visibility::{visible_columns, VisibilitySpec, DEFAULT_VISIBILITY};
