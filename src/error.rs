//! Error types for configuration, model, prediction and dataset operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the YAML configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist under the project root.
    #[error("configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The top level of the file is a scalar or a sequence.
    #[error("configuration {} must be a mapping at the top level", path.display())]
    NotAMapping { path: PathBuf },

    /// A known section is present but has the wrong shape.
    #[error("invalid `{section}` section: {source}")]
    Section {
        section: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors raised while reading or writing a model artifact.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to open model file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid artifact.
    #[error("failed to deserialize model from {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rmp_serde::decode::Error,
    },

    /// The file decodes but was not fitted on the expected features.
    #[error("model in {} is incompatible: {reason}", path.display())]
    Incompatible { path: PathBuf, reason: String },

    #[error("failed to serialize model to {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: rmp_serde::encode::Error,
    },

    #[error("failed to create model file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single submission could not be turned into a score.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// A field still holds text after coercion.
    #[error("could not convert value {value:?} of `{feature}` to a number")]
    NonNumeric { feature: &'static str, value: String },

    #[error("model expects {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("input contains a missing value for `{feature}`")]
    MissingValue { feature: String },

    #[error("model returned no output")]
    EmptyOutput,

    /// Any other failure reported by the model itself.
    #[error("{0}")]
    Model(String),
}

/// Errors raised by the offline dataset loader.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("dataset not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
