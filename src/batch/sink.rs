//! Dual-format metric log writer
//!
//! Persists the full record sequence once, after the evaluation loop
//! completes: a CSV table and a 4-space pretty-printed JSON array of the
//! same records.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::record::MetricRecord;
use crate::error::Result;

/// Tabular log file name
pub const CSV_FILE: &str = "metrics_log.csv";
/// Structured log file name
pub const JSON_FILE: &str = "metrics_log.json";

/// Writes the metric logs into a results directory
#[derive(Clone, Debug)]
pub struct LogSink {
    dir: PathBuf,
}

impl LogSink {
    /// Create a sink for the given directory; nothing is touched until
    /// [`write`](Self::write)
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the CSV log
    pub fn csv_path(&self) -> PathBuf {
        self.dir.join(CSV_FILE)
    }

    /// Path of the JSON log
    pub fn json_path(&self) -> PathBuf {
        self.dir.join(JSON_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }

    /// Write both log files, overwriting existing ones
    pub fn write(&self, records: &[MetricRecord]) -> Result<()> {
        self.ensure_dir()?;
        self.write_csv(records)?;
        self.write_json(records)?;
        Ok(())
    }

    fn write_csv(&self, records: &[MetricRecord]) -> Result<()> {
        let mut writer = csv::Writer::from_path(self.csv_path())?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_json(&self, records: &[MetricRecord]) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut serializer)?;
        fs::write(self.json_path(), buf)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<MetricRecord> {
        vec![
            MetricRecord {
                timestamp: "2024-01-01T00:00:00Z".to_string(),
                dataset: "iris".to_string(),
                model: "random_forest".to_string(),
                accuracy: 0.9667,
                f1_score: 0.9665,
            },
            MetricRecord {
                timestamp: "2024-01-01T00:00:01Z".to_string(),
                dataset: "iris".to_string(),
                model: "logistic_regression".to_string(),
                accuracy: 0.9333,
                f1_score: 0.9331,
            },
        ]
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LogSink::new(dir.path());
        sink.write(&sample_records()).unwrap();

        let csv = fs::read_to_string(sink.csv_path()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "timestamp,dataset,model,accuracy,f1_score"
        );
        assert_eq!(lines.count(), 2);
        assert!(csv.contains("iris,random_forest,0.9667,0.9665"));
    }

    #[test]
    fn test_json_is_four_space_indented_array() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LogSink::new(dir.path());
        sink.write(&sample_records()).unwrap();

        let json = fs::read_to_string(sink.json_path()).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\n    {"));
        assert!(json.contains("\n        \"timestamp\""));

        let parsed: Vec<MetricRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_records());
    }

    #[test]
    fn test_write_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("pipeline").join("results_logs");
        let sink = LogSink::new(&nested);
        sink.write(&sample_records()).unwrap();
        assert!(sink.csv_path().exists());
        assert!(sink.json_path().exists());
    }

    #[test]
    fn test_write_overwrites_existing_logs() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LogSink::new(dir.path());
        sink.write(&sample_records()).unwrap();
        sink.write(&sample_records()[..1]).unwrap();

        let parsed: Vec<MetricRecord> =
            serde_json::from_str(&fs::read_to_string(sink.json_path()).unwrap()).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_empty_record_list_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LogSink::new(dir.path());
        sink.write(&[]).unwrap();
        let json = fs::read_to_string(sink.json_path()).unwrap();
        assert_eq!(json, "[]");
    }
}
