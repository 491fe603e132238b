use std::fs;

use exam_score_predictor::config::Config;
use exam_score_predictor::dataset::{LoadOptions, ensure_dirs, load_dataset, load_records};
use exam_score_predictor::error::DatasetError;
use serde::Deserialize;
use tempfile::tempdir;

#[derive(Debug, Deserialize, PartialEq)]
struct StudentRecord {
    student_id: String,
    study_hours_per_day: f64,
    exam_score: f64,
}

const CSV_SEMICOLON: &str = "student_id;study_hours_per_day;exam_score\n\
                             S1000;0.0;56.2\n\
                             S1001;6.9;100.0\n\
                             S1002;1.4;34.3\n";

#[test]
fn bom_and_semicolons_are_handled() {
    let dir = tempdir().unwrap();
    let cfg = Config::from_yaml_str(
        dir.path(),
        "paths:\n  dataset_filename: students.csv\n",
    )
    .unwrap();
    let dataset = &cfg.abs_paths().dataset;
    fs::create_dir_all(dataset.parent().unwrap()).unwrap();
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    bytes.extend_from_slice(CSV_SEMICOLON.as_bytes());
    fs::write(dataset, bytes).unwrap();

    let table = load_dataset(&cfg, &LoadOptions::default()).unwrap();
    assert_eq!(table.delimiter(), b';');
    assert_eq!(table.headers()[0], "student_id");
    assert_eq!(table.shape(), (3, 3));
    assert_eq!(
        table.column("exam_score"),
        Some(vec!["56.2", "100.0", "34.3"])
    );
    assert!(table.column("nope").is_none());

    assert!(cfg.abs_paths().data_processed_dir.is_dir());
    assert!(cfg.abs_paths().models_dir.is_dir());
}

#[test]
fn typed_records_and_row_limit() {
    let dir = tempdir().unwrap();
    let cfg = Config::from_yaml_str(dir.path(), "").unwrap();
    let dataset = &cfg.abs_paths().dataset;
    fs::create_dir_all(dataset.parent().unwrap()).unwrap();
    fs::write(dataset, CSV_SEMICOLON.replace(';', ",")).unwrap();

    let opts = LoadOptions {
        max_rows: Some(2),
        ..LoadOptions::default()
    };
    let records: Vec<StudentRecord> = load_records(&cfg, &opts).unwrap();
    assert_eq!(
        records,
        vec![
            StudentRecord {
                student_id: "S1000".into(),
                study_hours_per_day: 0.0,
                exam_score: 56.2
            },
            StudentRecord {
                student_id: "S1001".into(),
                study_hours_per_day: 6.9,
                exam_score: 100.0
            },
        ]
    );
}

#[test]
fn explicit_delimiter_overrides_sniffing() {
    let dir = tempdir().unwrap();
    let cfg = Config::from_yaml_str(dir.path(), "").unwrap();
    let dataset = &cfg.abs_paths().dataset;
    fs::create_dir_all(dataset.parent().unwrap()).unwrap();
    fs::write(dataset, "a;b\n1;2\n").unwrap();

    let opts = LoadOptions {
        delimiter: Some(b','),
        ..LoadOptions::default()
    };
    let table = load_dataset(&cfg, &opts).unwrap();
    assert_eq!(table.shape(), (1, 1));
    assert_eq!(table.headers(), ["a;b"]);
}

#[test]
fn missing_dataset_is_not_found() {
    let dir = tempdir().unwrap();
    let cfg = Config::from_yaml_str(dir.path(), "").unwrap();

    let err = load_dataset(&cfg, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, DatasetError::NotFound { .. }));
}

#[test]
fn ensure_dirs_is_idempotent() {
    let dir = tempdir().unwrap();
    let cfg = Config::from_yaml_str(dir.path(), "").unwrap();
    ensure_dirs(&cfg).unwrap();
    ensure_dirs(&cfg).unwrap();
    assert!(dir.path().join("data/processed").is_dir());
    assert!(dir.path().join("models").is_dir());
}
