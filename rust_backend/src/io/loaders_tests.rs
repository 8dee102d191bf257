#[cfg(test)]
mod tests {
    use crate::core::domain::{BehaviorClass, CellValue};
    use crate::core::error::PipelineError;
    use crate::io::loaders::MetricsLoader;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Helper to create a temp CSV file
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    const HEADER: &str = "satellite,mean_error,median_error,max_error,p95_error,anomaly_count,sgp4_mean_km,sgp4_median_km,sgp4_p95_km,sgp4_max_km,sgp4_std_km";

    fn fleet_csv(rows: &[&str]) -> String {
        let mut content = String::from(HEADER);
        content.push('\n');
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        content
    }

    #[test]
    fn test_load_valid_fleet() {
        let temp_file = create_temp_csv(&fleet_csv(&[
            "CARTOSAT-3,0.81,0.62,4.9,2.1,3,1.2,0.9,3.4,88.0,6.1",
            "RISAT-2B,1.9,1.4,11.2,6.8,41,2.5,2.0,7.7,140.2,12.3",
        ]));

        let table = MetricsLoader::load(temp_file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].satellite, "CARTOSAT-3");
        assert_eq!(table.rows[1].metrics.anomaly_count, 41.0);
        assert_eq!(table.rows[1].metrics.p95_error, 6.8);
        assert_eq!(table.rows[0].metrics.sgp4_std_km, 6.1);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let result = MetricsLoader::load(Path::new("/nonexistent/dir/fleet_summary.csv"));
        match result {
            Err(PipelineError::NotFound { path }) => {
                assert!(path.ends_with("fleet_summary.csv"));
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_satellite_column_is_schema_error() {
        let temp_file = create_temp_csv("name,p95_error,anomaly_count\nGSAT-30,2.0,1\n");
        let result = MetricsLoader::load(temp_file.path());
        match result {
            Err(PipelineError::Schema(msg)) => assert!(msg.contains("satellite"), "{}", msg),
            other => panic!("Expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_empty_file_is_schema_error() {
        let temp_file = create_temp_csv("");
        match MetricsLoader::load(temp_file.path()) {
            Err(PipelineError::Schema(msg)) => {
                assert_eq!(msg, "Missing required column: satellite")
            }
            other => panic!("Expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_zero_padded_ids_are_distinct() {
        let temp_file = create_temp_csv(&fleet_csv(&[
            "007,0.5,0.4,1.0,0.9,0,1.0,1.0,2.0,3.0,0.5",
            "7,0.6,0.4,1.0,0.9,0,1.0,1.0,2.0,3.0,0.5",
            "00123,0.6,0.4,1.0,0.9,0,1.0,1.0,2.0,3.0,0.5",
        ]));

        let table = MetricsLoader::load(temp_file.path()).unwrap();
        let ids: Vec<&str> = table.rows.iter().map(|r| r.satellite.as_str()).collect();
        assert_eq!(ids, vec!["007", "7", "00123"]);
    }

    #[test]
    fn test_load_duplicate_satellite_is_schema_error() {
        let temp_file = create_temp_csv(&fleet_csv(&[
            "GSAT-30,0.5,0.4,1.0,0.9,0,1.0,1.0,2.0,3.0,0.5",
            "GSAT-30,0.6,0.4,1.0,0.9,0,1.0,1.0,2.0,3.0,0.5",
        ]));
        let result = MetricsLoader::load(temp_file.path());
        match result {
            Err(PipelineError::Schema(msg)) => assert!(msg.contains("GSAT-30"), "{}", msg),
            other => panic!("Expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_empty_satellite_is_schema_error() {
        let temp_file = create_temp_csv(&fleet_csv(&[
            "GSAT-30,0.5,0.4,1.0,0.9,0,1.0,1.0,2.0,3.0,0.5",
            ",0.6,0.4,1.0,0.9,0,1.0,1.0,2.0,3.0,0.5",
        ]));
        let result = MetricsLoader::load(temp_file.path());
        match result {
            Err(PipelineError::Schema(msg)) => assert!(msg.contains("row 2"), "{}", msg),
            other => panic!("Expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_tolerates_non_numeric_and_missing_metrics() {
        let temp_file = create_temp_csv(&fleet_csv(&[
            "EOS-04,0.5,0.4,1.0,n/a,,1.0,1.0,2.0,3.0,0.5",
            "EOS-06,0.5,0.4,1.0,2.5,4,1.0,1.0,2.0,3.0,0.5",
        ]));
        let result = MetricsLoader::load_with_report(temp_file.path()).unwrap();
        let table = result.table;

        assert!(table.rows[0].metrics.p95_error.is_nan());
        assert!(table.rows[0].metrics.anomaly_count.is_nan());
        let idx = table.schema.index_of("p95_error").unwrap();
        assert_eq!(table.rows[0].cells[idx], CellValue::Text("n/a".into()));

        // The text column still yields numbers where the value parses
        assert_eq!(table.rows[1].metrics.p95_error, 2.5);
        assert_eq!(result.validation.stats.non_numeric_cells, 1);
        assert_eq!(result.validation.stats.missing_cells, 1);
    }

    #[test]
    fn test_load_does_not_modify_source() {
        let content = fleet_csv(&["EOS-04,0.5,0.4,1.0,2.0,1,1.0,1.0,2.0,3.0,0.5"]);
        let temp_file = create_temp_csv(&content);
        MetricsLoader::load(temp_file.path()).unwrap();
        assert_eq!(std::fs::read_to_string(temp_file.path()).unwrap(), content);
    }

    #[test]
    fn test_load_augmented_artifact() {
        let temp_file = create_temp_csv(
            "satellite,p95_error,anomaly_count,behavior_class\nGSAT-30,2.0,1,STABLE\nRISAT-2B,6.8,41,UNSTABLE\n",
        );
        let table = MetricsLoader::load_augmented(temp_file.path()).unwrap();
        assert_eq!(table.rows[0].behavior_class, BehaviorClass::Stable);
        assert_eq!(table.rows[1].behavior_class, BehaviorClass::Unstable);
    }

    #[test]
    fn test_load_augmented_rejects_unknown_label() {
        let temp_file = create_temp_csv(
            "satellite,p95_error,anomaly_count,behavior_class\nGSAT-30,2.0,1,CALM\n",
        );
        match MetricsLoader::load_augmented(temp_file.path()) {
            Err(PipelineError::Schema(msg)) => assert!(msg.contains("GSAT-30"), "{}", msg),
            other => panic!("Expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_augmented_requires_class_column() {
        let temp_file = create_temp_csv("satellite,p95_error\nGSAT-30,2.0\n");
        assert!(matches!(
            MetricsLoader::load_augmented(temp_file.path()),
            Err(PipelineError::Schema(_))
        ));
    }
}
