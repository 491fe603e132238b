use std::fs;
use std::path::Path;

use exam_score_predictor::cache::ModelCache;
use exam_score_predictor::config::Config;
use exam_score_predictor::error::PredictError;
use exam_score_predictor::locator::find_model_path;
use exam_score_predictor::model::{ExamScoreModel, MODEL_FILENAME};
use exam_score_predictor::session::{Command, Feedback, ModelStatus, Session};
use exam_score_predictor::{FeatureRow, predict_one};
use linfa::prelude::*;
use linfa_linear::{FittedLinearRegression, LinearRegression};
use ndarray::{Axis, array};
use serde::Serialize;
use serde_json::json;
use tempfile::tempdir;

fn write_config(root: &Path, yaml: &str) {
    fs::create_dir_all(root.join("configs")).unwrap();
    fs::write(root.join("configs/app.yaml"), yaml).unwrap();
}

fn fitted_model() -> ExamScoreModel {
    let x = array![
        [1.0, 60.0, 6.0, 3.0, 0.0],
        [2.0, 70.0, 7.0, 5.0, 1.0],
        [3.0, 80.0, 5.0, 6.0, 0.0],
        [4.0, 90.0, 8.0, 7.0, 1.0],
        [5.0, 75.0, 6.5, 8.0, 0.0],
        [6.0, 95.0, 7.5, 4.0, 1.0],
        [0.5, 50.0, 9.0, 9.0, 0.0],
        [2.5, 88.0, 4.0, 2.0, 1.0],
    ];
    let y = x.map_axis(Axis(1), |r| {
        10.0 + 6.0 * r[0] + 0.4 * r[1] + 0.5 * r[2] + 1.5 * r[3] - 2.0 * r[4]
    });
    let regression = LinearRegression::new().fit(&Dataset::new(x, y)).unwrap();
    ExamScoreModel::new(regression).unwrap()
}

#[test]
fn model_in_configured_dir_predicts_default_row() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), "paths:\n  models_dir: artifacts\n");
    fs::create_dir_all(dir.path().join("artifacts")).unwrap();
    fitted_model()
        .save_to_file(&dir.path().join("artifacts").join(MODEL_FILENAME))
        .unwrap();

    let cfg = Config::load_from(dir.path(), "configs/app.yaml").unwrap();
    let path = find_model_path(&cfg).unwrap();
    assert_eq!(path, dir.path().join("artifacts").join(MODEL_FILENAME));

    let cache = ModelCache::new();
    let model = cache.get_or_load(&path).unwrap();
    let raw = json!({
        "study_hours_per_day": 4.0,
        "attendance_percentage": 85.0,
        "sleep_hours": 7.0,
        "mental_health_rating": 6,
        "part_time_job": 0,
    });
    let row = FeatureRow::from_raw(raw.as_object().unwrap());
    let score = predict_one(&*model, &row).unwrap();

    assert!(score.is_finite());
    // 10 + 24 + 34 + 3.5 + 9
    assert!((score - 80.5).abs() < 1e-6, "got {score}");
}

#[test]
fn cache_does_not_reread_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(MODEL_FILENAME);
    fitted_model().save_to_file(&path).unwrap();

    let cache = ModelCache::new();
    let first = cache.get_or_load(&path).unwrap();
    // A second read would fail now.
    fs::write(&path, b"overwritten").unwrap();
    let second = cache.get_or_load(&path).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn session_end_to_end() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), "");
    fs::create_dir_all(dir.path().join("notebooks")).unwrap();
    fitted_model()
        .save_to_file(&dir.path().join("notebooks").join(MODEL_FILENAME))
        .unwrap();

    let cfg = Config::load_from(dir.path(), "configs/app.yaml").unwrap();
    let cache = ModelCache::new();
    let mut session = Session::start(&cfg, &cache);

    session.handle(Command::Increase);
    session.handle(Command::Submit);
    let Some(Feedback::Prediction(view)) = session.feedback() else {
        panic!("expected a prediction");
    };
    // study hours 4.25 instead of 4.0
    assert!((view.score - 82.0).abs() < 1e-6, "got {}", view.score);
    assert!((view.ratio - 0.82).abs() < 1e-9);
    assert_eq!(view.params["study_hours_per_day"], json!(4.25));

    session.handle(Command::Reset);
    assert!(session.feedback().is_none());
    assert_eq!(cache.len(), 1);
}

#[test]
fn no_model_anywhere_is_reported_not_raised() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), "model_path: missing/best.msgpack\n");
    let cfg = Config::load_from(dir.path(), "configs/app.yaml").unwrap();

    assert!(find_model_path(&cfg).is_none());

    let cache = ModelCache::new();
    let mut session = Session::start(&cfg, &cache);
    assert!(matches!(
        session.model_status(),
        ModelStatus::NotFound { searched } if searched.len() == 5
    ));
    let msg = session.model_status().error_message().unwrap();
    assert!(msg.contains(&dir.path().join("missing/best.msgpack").display().to_string()));
    session.handle(Command::Submit);
    assert!(session.feedback().is_none());
}

/// Same layout as the saved artifact, without the coefficient check.
#[derive(Serialize)]
struct RawArtifact {
    features: Vec<String>,
    regression: FittedLinearRegression<f64>,
}

#[test]
fn artifact_fitted_on_fewer_features_is_load_failure() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), "");
    let x = array![
        [1.0, 60.0, 6.0],
        [2.0, 70.0, 7.0],
        [3.0, 80.0, 5.0],
        [4.0, 90.0, 8.0],
        [5.0, 75.0, 6.5],
    ];
    let y = x.map_axis(Axis(1), |r| 10.0 + 4.0 * r[0] + 0.5 * r[1] + r[2]);
    let artifact = RawArtifact {
        features: exam_score_predictor::FEATURES.iter().map(|f| f.to_string()).collect(),
        regression: LinearRegression::new().fit(&Dataset::new(x, y)).unwrap(),
    };
    let path = dir.path().join(MODEL_FILENAME);
    let mut file = fs::File::create(&path).unwrap();
    rmp_serde::encode::write_named(&mut file, &artifact).unwrap();
    drop(file);

    let cfg = Config::load_from(dir.path(), "configs/app.yaml").unwrap();
    let cache = ModelCache::new();
    let mut session = Session::start(&cfg, &cache);
    assert!(matches!(
        session.model_status(),
        ModelStatus::LoadFailed { .. }
    ));
    let msg = session.model_status().error_message().unwrap();
    assert!(msg.contains("incompatible"), "{msg}");
    assert!(msg.contains(&path.display().to_string()), "{msg}");
    assert!(cache.is_empty());

    session.handle(Command::Submit);
    assert!(session.feedback().is_none());
}

#[test]
fn maybe_answer_fails_gracefully() {
    let model = fitted_model();
    let raw = json!({
        "study_hours_per_day": 4.0,
        "attendance_percentage": 85.0,
        "sleep_hours": 7.0,
        "mental_health_rating": 6,
        "part_time_job": "maybe",
    });
    let row = FeatureRow::from_raw(raw.as_object().unwrap());
    let err = predict_one(&model, &row).unwrap_err();
    assert!(matches!(err, PredictError::NonNumeric { feature: "part_time_job", .. }));

    // The same model keeps working afterwards.
    let raw = json!({
        "study_hours_per_day": 4.0,
        "attendance_percentage": 85.0,
        "sleep_hours": 7.0,
        "mental_health_rating": 6,
        "part_time_job": "No",
    });
    let row = FeatureRow::from_raw(raw.as_object().unwrap());
    assert!(predict_one(&model, &row).is_ok());
}
