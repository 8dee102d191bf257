use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::algorithms::classification::{BehaviorClassifier, ClassDistribution};
use crate::config::PipelineConfig;
use crate::core::domain::AugmentedTable;
use crate::core::error::PipelineResult;
use crate::io::loaders::MetricsLoader;
use crate::parsing::csv_parser;
use crate::preprocessing::validator::ValidationResult;

/// Result of one classification run
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub distribution: ClassDistribution,
    pub validation: ValidationResult,
}

impl ClassificationReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// The classification stage: metrics artifact in, augmented artifact out.
pub struct ClassificationPipeline {
    classifier: BehaviorClassifier,
}

impl ClassificationPipeline {
    /// Create a pipeline with the default rules
    pub fn new() -> Self {
        Self::with_classifier(BehaviorClassifier::default())
    }

    pub fn with_classifier(classifier: BehaviorClassifier) -> Self {
        Self { classifier }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::with_classifier(config.classifier())
    }

    pub fn classifier(&self) -> &BehaviorClassifier {
        &self.classifier
    }

    /// Classify every satellite of `input` and write the result to `output`
    ///
    /// # Arguments
    /// * `input` - Metrics artifact, must exist
    /// * `output` - Destination; an existing file is replaced
    ///
    /// # Returns
    /// The run report. Nothing is written when loading fails.
    pub fn run(&self, input: &Path, output: &Path) -> PipelineResult<ClassificationReport> {
        // Step 1: Load and validate
        let loaded = MetricsLoader::load_with_report(input)?;

        // Step 2: Classify
        let augmented = self.classifier.augment(&loaded.table);

        // Step 3: Write
        Self::write(&augmented, output)?;

        let distribution = ClassDistribution::from_table(&augmented);
        info!(
            "Wrote {} classified satellites to {}",
            augmented.len(),
            output.display()
        );

        Ok(ClassificationReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            rows: augmented.len(),
            distribution,
            validation: loaded.validation,
        })
    }

    /// Run against the artifact locations of `config`
    pub fn run_configured(config: &PipelineConfig) -> PipelineResult<ClassificationReport> {
        Self::from_config(config).run(&config.input_path(), &config.output_path())
    }

    fn write(table: &AugmentedTable, output: &Path) -> PipelineResult<()> {
        let mut df = csv_parser::records_to_dataframe(
            &table.schema,
            table.rows.iter().map(|r| r.row.cells.as_slice()),
        )?;
        csv_parser::write_metrics_csv(output, &mut df)
    }
}

impl Default for ClassificationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify `input` into `output` with the default rules
pub fn classify_fleet(input: &Path, output: &Path) -> PipelineResult<ClassificationReport> {
    ClassificationPipeline::new().run(input, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{BehaviorClass, BEHAVIOR_CLASS_COLUMN};
    use crate::core::error::PipelineError;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "satellite,mean_error,median_error,max_error,p95_error,anomaly_count,sgp4_mean_km,sgp4_median_km,sgp4_p95_km,sgp4_max_km,sgp4_std_km";

    fn write_input(dir: &TempDir, rows: &[&str]) -> PathBuf {
        let path = dir.path().join("fleet_summary.csv");
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            &[
                "RISAT-2B,1.1,1.0,9.2,6.8,41,2.0,1.8,4.4,6.1,0.9",
                "CARTOSAT-3,0.5,0.4,2.9,2.1,3,1.1,1.0,2.2,3.0,0.4",
                "GSAT-30,0.7,0.6,4.0,1.0,9,1.5,1.3,3.1,4.2,0.6",
            ],
        );
        let output = dir.path().join("fleet_summary_with_behavior.csv");

        let report = classify_fleet(&input, &output).unwrap();
        assert_eq!(report.rows, 3);
        assert_eq!(report.distribution.count(BehaviorClass::Unstable), 1);
        assert_eq!(report.distribution.count(BehaviorClass::ModeratelyActive), 1);
        assert_eq!(report.distribution.count(BehaviorClass::Stable), 1);
        assert!(report.validation.is_valid);

        let written = fs::read_to_string(&output).unwrap();
        let header = written.lines().next().unwrap();
        assert_eq!(header, format!("{},{}", HEADER, BEHAVIOR_CLASS_COLUMN));

        let table = MetricsLoader::load_augmented(&output).unwrap();
        assert_eq!(
            table.satellites().collect::<Vec<_>>(),
            vec!["RISAT-2B", "CARTOSAT-3", "GSAT-30"]
        );
        assert_eq!(table.rows[0].behavior_class, BehaviorClass::Unstable);
    }

    #[test]
    fn test_rerun_on_own_output_is_stable() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            &[
                "A,1,1,1,7.5,0,1,1,1,1,1",
                "B,1,1,1,0.5,6,1,1,1,1,1",
                "C,1,1,1,0.5,0,1,1,1,1,1",
            ],
        );
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");

        let pipeline = ClassificationPipeline::new();
        let a = pipeline.run(&input, &first).unwrap();
        let b = pipeline.run(&first, &second).unwrap();

        assert_eq!(a.distribution, b.distribution);
        assert_eq!(
            fs::read_to_string(&first).unwrap(),
            fs::read_to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.csv");
        let result = classify_fleet(&dir.path().join("absent.csv"), &output);
        assert!(matches!(result, Err(PipelineError::NotFound { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_report_serializes() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, &["A,1,1,1,1,1,1,1,1,1,1"]);
        let report = classify_fleet(&input, &dir.path().join("out.csv")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["rows"], 1);
        assert_eq!(json["distribution"]["counts"]["STABLE"], 1);
        assert_eq!(json["validation"]["is_valid"], true);
    }
}
