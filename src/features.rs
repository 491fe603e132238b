//! The five model features and the coercion of raw form values into them.

use ndarray::Array2;
use serde_json::{Map, Value};

use crate::error::PredictError;

pub const STUDY_HOURS: &str = "study_hours_per_day";
pub const ATTENDANCE: &str = "attendance_percentage";
pub const SLEEP_HOURS: &str = "sleep_hours";
pub const MENTAL_HEALTH: &str = "mental_health_rating";
pub const PART_TIME_JOB: &str = "part_time_job";

/// Canonical feature order expected by the model.
pub const FEATURES: [&str; 5] = [
    STUDY_HOURS,
    ATTENDANCE,
    SLEEP_HOURS,
    MENTAL_HEALTH,
    PART_TIME_JOB,
];

/// A single cell of a [`FeatureRow`].
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    /// Text that survived coercion; only the model can reject it.
    Text(String),
    Missing,
}

impl FeatureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(x) => Some(*x),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FeatureValue::Missing)
    }

    fn from_passthrough(value: Value) -> Self {
        match value {
            Value::Null => FeatureValue::Missing,
            Value::Number(n) => n.as_f64().map_or(FeatureValue::Missing, FeatureValue::Number),
            Value::Bool(b) => FeatureValue::Number(if b { 1.0 } else { 0.0 }),
            Value::String(s) => FeatureValue::Text(s),
            other => FeatureValue::Text(other.to_string()),
        }
    }
}

/// Maps yes/no answers and booleans to 1/0. Anything else is returned as is.
pub fn coerce_part_time_job(value: &Value) -> Value {
    match value {
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "yes" | "y" => Value::from(1),
            "no" | "n" => Value::from(0),
            _ => value.clone(),
        },
        Value::Bool(b) => Value::from(i64::from(*b)),
        _ => value.clone(),
    }
}

/// Lenient numeric conversion: unparsable input becomes [`FeatureValue::Missing`].
pub fn to_numeric(value: &Value) -> FeatureValue {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    match parsed {
        Some(x) if !x.is_nan() => FeatureValue::Number(x),
        _ => FeatureValue::Missing,
    }
}

/// One coerced observation, always in [`FEATURES`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    values: [FeatureValue; 5],
}

impl FeatureRow {
    /// Rebuilds the row from the fixed feature list. Keys absent from `raw`
    /// become missing values and unknown keys are ignored.
    pub fn from_raw(raw: &Map<String, Value>) -> Self {
        let values = FEATURES.map(|name| {
            let value = raw.get(name).unwrap_or(&Value::Null);
            if name == PART_TIME_JOB {
                FeatureValue::from_passthrough(coerce_part_time_job(value))
            } else {
                to_numeric(value)
            }
        });
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        FEATURES
            .iter()
            .position(|f| *f == name)
            .map(|i| &self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FeatureValue)> {
        FEATURES.into_iter().zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A `1 x 5` matrix. Missing cells become NaN; text is rejected.
    pub fn to_matrix(&self) -> Result<Array2<f64>, PredictError> {
        let mut row = Vec::with_capacity(self.values.len());
        for (feature, value) in self.iter() {
            match value {
                FeatureValue::Number(x) => row.push(*x),
                FeatureValue::Missing => row.push(f64::NAN),
                FeatureValue::Text(s) => {
                    return Err(PredictError::NonNumeric {
                        feature,
                        value: s.clone(),
                    });
                }
            }
        }
        Array2::from_shape_vec((1, row.len()), row)
            .map_err(|e| PredictError::Model(e.to_string()))
    }
}
