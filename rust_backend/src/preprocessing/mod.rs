pub mod pipeline;
pub mod validator;

pub use pipeline::{classify_fleet, ClassificationPipeline, ClassificationReport};
pub use validator::{MetricsValidator, ValidationResult, ValidationStats};
