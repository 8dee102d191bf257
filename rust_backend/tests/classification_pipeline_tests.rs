//! Integration tests for the classification stage and its consumers.
//!
//! These tests ensure that:
//! 1. A configured run reads the summary and writes the augmented artifact
//! 2. The dashboard view reads that artifact back without re-deriving labels
//! 3. Load failures abort the run before anything is written
//! 4. Extra columns survive the round trip in their original position

use std::fs;
use std::path::Path;

use netra_orb::config::PipelineConfig;
use netra_orb::core::domain::BehaviorClass;
use netra_orb::core::error::PipelineError;
use netra_orb::presentation::images::ImageCatalog;
use netra_orb::preprocessing::ClassificationPipeline;
use netra_orb::services::FleetView;
use netra_orb::transformations::ClassFilter;
use tempfile::TempDir;

// ==================== Helper Functions ====================

const HEADER: &str = "satellite,mean_error,median_error,max_error,p95_error,anomaly_count,sgp4_mean_km,sgp4_median_km,sgp4_p95_km,sgp4_max_km,sgp4_std_km";

fn write_summary(root: &Path, header: &str, rows: &[&str]) {
    let mut content = header.to_string();
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(root.join("fleet_summary.csv"), content).unwrap();
}

fn config_for(root: &Path) -> PipelineConfig {
    PipelineConfig::default().with_root(root)
}

fn fleet_rows() -> Vec<&'static str> {
    vec![
        "RISAT-2B,1.1,1.0,9.2,6.8,41,2.0,1.8,4.4,6.1,0.9",
        "CARTOSAT-3,0.5,0.4,2.9,2.1,3,1.1,1.0,2.2,3.0,0.4",
        "GSAT-30,0.7,0.6,4.0,1.0,9,1.5,1.3,3.1,4.2,0.6",
        "EOS-04,0.6,0.5,3.3,,2,1.2,1.1,2.5,3.4,0.5",
    ]
}

// ==================== Pipeline ====================

#[test]
fn test_configured_run_and_dashboard_view() {
    let dir = TempDir::new().unwrap();
    write_summary(dir.path(), HEADER, &fleet_rows());
    let config = config_for(dir.path());

    let report = ClassificationPipeline::run_configured(&config).unwrap();
    assert_eq!(report.rows, 4);
    assert_eq!(report.output, dir.path().join("fleet_summary_with_behavior.csv"));
    assert_eq!(report.validation.stats.missing_cells, 1);

    let view = FleetView::open(&config.output_path(), config.visibility()).unwrap();
    assert_eq!(
        view.satellites(),
        vec!["CARTOSAT-3", "EOS-04", "GSAT-30", "RISAT-2B"]
    );
    assert_eq!(view.behavior_class("RISAT-2B").unwrap(), BehaviorClass::Unstable);
    assert_eq!(view.behavior_class("GSAT-30").unwrap(), BehaviorClass::ModeratelyActive);
    // Missing p95 does not trigger a threshold
    assert_eq!(view.behavior_class("EOS-04").unwrap(), BehaviorClass::Stable);

    let stable = view.filter(ClassFilter::Only(BehaviorClass::Stable));
    assert_eq!(stable, vec!["CARTOSAT-3", "EOS-04"]);

    let cards = view.metric_cards("EOS-04").unwrap();
    let p95 = cards.iter().find(|c| c.column == "p95_error").unwrap();
    assert_eq!(p95.value, "nan");
    let anomalies = cards.iter().find(|c| c.column == "anomaly_count").unwrap();
    assert_eq!(anomalies.value, "2.0000");

    assert!(matches!(
        view.row_for("UNKNOWN-1"),
        Err(PipelineError::LookupMiss(_))
    ));
}

#[test]
fn test_missing_summary_is_not_found() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());

    match ClassificationPipeline::run_configured(&config) {
        Err(PipelineError::NotFound { path }) => assert_eq!(path, config.input_path()),
        other => panic!("Expected NotFound, got {:?}", other),
    }
    assert!(!config.output_path().exists());
}

#[test]
fn test_duplicate_ids_abort_without_replacing_output() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());
    fs::write(config.output_path(), "previous run\n").unwrap();

    write_summary(
        dir.path(),
        HEADER,
        &[
            "RISAT-2B,1,1,1,1,1,1,1,1,1,1",
            "RISAT-2B,2,2,2,2,2,2,2,2,2,2",
        ],
    );

    let result = ClassificationPipeline::run_configured(&config);
    assert!(matches!(result, Err(PipelineError::Schema(_))));
    assert_eq!(fs::read_to_string(config.output_path()).unwrap(), "previous run\n");
}

#[test]
fn test_extra_columns_keep_position() {
    let dir = TempDir::new().unwrap();
    let header = format!("orbit_regime,{}", HEADER);
    write_summary(
        dir.path(),
        &header,
        &["LEO,RISAT-2B,1.1,1.0,9.2,6.8,41,2.0,1.8,4.4,6.1,0.9"],
    );
    let config = config_for(dir.path());
    ClassificationPipeline::run_configured(&config).unwrap();

    let written = fs::read_to_string(config.output_path()).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next().unwrap(), format!("{},behavior_class", header));
    let row = lines.next().unwrap();
    assert!(row.starts_with("LEO,RISAT-2B,"));
    assert!(row.ends_with(",UNSTABLE"));

    let view = FleetView::open(&config.output_path(), config.visibility()).unwrap();
    assert_eq!(view.visible_metric_columns().first().map(String::as_str), Some("orbit_regime"));
}

#[test]
fn test_unclassified_artifact_rejected_by_view() {
    let dir = TempDir::new().unwrap();
    write_summary(dir.path(), HEADER, &fleet_rows());
    let config = config_for(dir.path());

    assert!(matches!(
        FleetView::open(&config.input_path(), config.visibility()),
        Err(PipelineError::Schema(_))
    ));
}

#[test]
fn test_custom_rules_from_config() {
    let dir = TempDir::new().unwrap();
    write_summary(dir.path(), HEADER, &fleet_rows());

    let toml = format!(
        r#"
[paths]
root = "{}"

[[classification.rules]]
class = "UNSTABLE"
thresholds = [{{ metric = "sgp4_p95_km", above = 3.0 }}]
"#,
        dir.path().display()
    );
    let config_path = dir.path().join("netra.toml");
    fs::write(&config_path, toml).unwrap();

    let config = PipelineConfig::from_file(&config_path).unwrap();
    let report = ClassificationPipeline::run_configured(&config).unwrap();
    assert_eq!(report.distribution.count(BehaviorClass::Unstable), 2);
    assert_eq!(report.distribution.count(BehaviorClass::ModeratelyActive), 0);
    assert_eq!(report.distribution.count(BehaviorClass::Stable), 2);
}

// ==================== Images ====================

#[test]
fn test_image_catalog_against_artifact_root() {
    let dir = TempDir::new().unwrap();
    let images = dir.path().join("RISAT-2B").join("images");
    fs::create_dir_all(&images).unwrap();
    fs::write(images.join("anomaly_plot.png"), b"png").unwrap();

    let catalog = ImageCatalog::new(dir.path());
    let key = catalog.key_results("RISAT-2B");
    assert_eq!(key.len(), 5);
    assert_eq!(key.iter().filter(|i| i.available).count(), 1);
    assert!(catalog.fleet_plots().is_empty());
}
