//! Pipeline configuration file support.
//!
//! This module reads the pipeline configuration from a TOML file. Every
//! section is optional; an absent file yields the defaults below.
//!
//! ```toml
//! [paths]
//! root = "."
//! input = "fleet_summary.csv"
//! output = "fleet_summary_with_behavior.csv"
//!
//! [display]
//! hidden_columns = ["sgp4_max_km", "sgp4_std_km"]
//!
//! [classification]
//! fallback = "STABLE"
//!
//! [[classification.rules]]
//! class = "UNSTABLE"
//! thresholds = [
//!     { metric = "anomaly_count", above = 30.0 },
//!     { metric = "p95_error", above = 6.0 },
//! ]
//!
//! [[classification.rules]]
//! class = "MODERATELY_ACTIVE"
//! thresholds = [
//!     { metric = "anomaly_count", above = 5.0 },
//!     { metric = "p95_error", above = 3.0 },
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::algorithms::classification::{default_rules, BehaviorClassifier, ClassificationRule};
use crate::core::domain::BehaviorClass;
use crate::core::error::{PipelineError, PipelineResult};
use crate::presentation::visibility::{VisibilitySpec, DEFAULT_HIDDEN_COLUMNS};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "netra.toml";

/// Pipeline configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub classification: ClassificationSettings,
}

/// Artifact locations. `input` and `output` are relative to `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_input")]
    pub input: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

/// Display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_hidden_columns")]
    pub hidden_columns: Vec<String>,
}

/// Classification rules, most severe first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSettings {
    #[serde(default = "default_fallback")]
    pub fallback: BehaviorClass,
    #[serde(default = "default_rules")]
    pub rules: Vec<ClassificationRule>,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_input() -> PathBuf {
    PathBuf::from("fleet_summary.csv")
}

fn default_output() -> PathBuf {
    PathBuf::from("fleet_summary_with_behavior.csv")
}

fn default_hidden_columns() -> Vec<String> {
    DEFAULT_HIDDEN_COLUMNS.iter().map(|c| c.to_string()).collect()
}

fn default_fallback() -> BehaviorClass {
    BehaviorClass::Stable
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            root: default_root(),
            input: default_input(),
            output: default_output(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            hidden_columns: default_hidden_columns(),
        }
    }
}

impl Default for ClassificationSettings {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
            rules: default_rules(),
        }
    }
}

impl PipelineConfig {
    /// Parse configuration from TOML text.
    ///
    /// Parse errors name the offending key path (e.g. `classification.rules[0].class`).
    pub fn from_toml_str(content: &str) -> PipelineResult<Self> {
        let deserializer = toml::Deserializer::new(content);
        let config: PipelineConfig = serde_path_to_error::deserialize(deserializer).map_err(|e| {
            PipelineError::Config(format!("Failed to parse config at '{}': {}", e.path(), e.inner()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `netra.toml` from the first standard location that has one.
    ///
    /// Searches:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// Returns `Ok(None)` when no file exists.
    pub fn from_default_location() -> PipelineResult<Option<Self>> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("rust_backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.is_file() {
                log::info!("Using configuration {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Configuration from the default location, or defaults when there is none.
    pub fn load_or_default() -> PipelineResult<Self> {
        Ok(Self::from_default_location()?.unwrap_or_default())
    }

    /// Reject rule sets that cannot classify meaningfully.
    pub fn validate(&self) -> PipelineResult<()> {
        for (i, rule) in self.classification.rules.iter().enumerate() {
            if rule.thresholds.is_empty() {
                return Err(PipelineError::Config(format!(
                    "classification.rules[{}] ({}) has no thresholds",
                    i, rule.class
                )));
            }
            if let Some(t) = rule.thresholds.iter().find(|t| !t.above.is_finite()) {
                return Err(PipelineError::Config(format!(
                    "classification.rules[{}] threshold on {} must be finite",
                    i,
                    t.metric.column()
                )));
            }
        }
        Ok(())
    }

    pub fn input_path(&self) -> PathBuf {
        self.paths.root.join(&self.paths.input)
    }

    pub fn output_path(&self) -> PathBuf {
        self.paths.root.join(&self.paths.output)
    }

    pub fn image_root(&self) -> &Path {
        &self.paths.root
    }

    pub fn classifier(&self) -> BehaviorClassifier {
        BehaviorClassifier::new(
            self.classification.rules.clone(),
            self.classification.fallback,
        )
    }

    pub fn visibility(&self) -> VisibilitySpec {
        VisibilitySpec::new(self.display.hidden_columns.iter().cloned())
    }

    /// Same configuration with artifacts resolved against `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.paths.root = root.into();
        self
    }
}
