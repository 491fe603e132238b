//! Model artifact, the [`Regressor`] seam and single-row prediction.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use linfa::traits::Predict;
use linfa_linear::FittedLinearRegression;
use log::{debug, warn};
use ndarray::{Array1, Array2};
use rmp_serde::{decode::from_read, encode::write_named};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, PredictError};
use crate::features::{FEATURES, FeatureRow};

/// File name searched for by the locator.
pub const MODEL_FILENAME: &str = "best_model.msgpack";

/// Anything that maps a feature matrix to one score per row.
pub trait Regressor: Send + Sync {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, PredictError>;
}

/// Trained exam-score regressor and the feature names it was fitted on.
#[derive(Serialize, Deserialize)]
pub struct ExamScoreModel {
    features: Vec<String>,
    regression: FittedLinearRegression<f64>,
}

impl ExamScoreModel {
    /// Wraps a fitted regression using the canonical feature order.
    ///
    /// The regression must have one coefficient per entry of [`FEATURES`].
    pub fn new(regression: FittedLinearRegression<f64>) -> Result<Self, PredictError> {
        let n_params = regression.params().len();
        if n_params != FEATURES.len() {
            return Err(PredictError::ShapeMismatch {
                expected: FEATURES.len(),
                actual: n_params,
            });
        }
        Ok(Self {
            features: FEATURES.iter().map(|f| f.to_string()).collect(),
            regression,
        })
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn coefficients(&self) -> &Array1<f64> {
        self.regression.params()
    }

    pub fn intercept(&self) -> f64 {
        self.regression.intercept()
    }

    /// Saves the model to a binary `.msgpack` file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ModelError> {
        let file = File::create(path).map_err(|source| ModelError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        write_named(&mut writer, self).map_err(|source| ModelError::Encode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the model from a binary `.msgpack` file.
    pub fn load_from_file(path: &Path) -> Result<Self, ModelError> {
        let file = File::open(path).map_err(|source| ModelError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let model: Self = from_read(reader).map_err(|source| ModelError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        model.check_features().map_err(|reason| ModelError::Incompatible {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!(
            "Decoded model with {} features from {}",
            model.features.len(),
            path.display()
        );
        Ok(model)
    }

    fn check_features(&self) -> Result<(), String> {
        if self.features.iter().map(String::as_str).ne(FEATURES) {
            return Err(format!(
                "fitted on {:?}, expected {:?}",
                self.features, FEATURES
            ));
        }
        let n_params = self.regression.params().len();
        if n_params != self.features.len() {
            return Err(format!(
                "{n_params} coefficients for {} features",
                self.features.len()
            ));
        }
        Ok(())
    }
}

impl Regressor for ExamScoreModel {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, PredictError> {
        let n_params = self.regression.params().len();
        if x.ncols() != self.features.len() || x.ncols() != n_params {
            return Err(PredictError::ShapeMismatch {
                expected: n_params,
                actual: x.ncols(),
            });
        }
        for row in x.rows() {
            if let Some(i) = row.iter().position(|v| v.is_nan()) {
                return Err(PredictError::MissingValue {
                    feature: self.features[i].clone(),
                });
            }
        }
        Ok(self.regression.predict(x))
    }
}

/// Runs one coerced row through `model` and returns the first output.
pub fn predict_one(model: &dyn Regressor, row: &FeatureRow) -> Result<f64, PredictError> {
    let x = row.to_matrix()?;
    let scores = model.predict(&x).inspect_err(|e| warn!("Prediction failed: {e}"))?;
    scores.get(0).copied().ok_or(PredictError::EmptyOutput)
}

/// Fraction shown by the progress gauge, clamped to `[0, 1]`.
pub fn progress_ratio(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    (score / 100.0).clamp(0.0, 1.0)
}

/// `"72.50 / 100"`.
pub fn format_score(score: f64) -> String {
    format!("{score:.2} / 100")
}
