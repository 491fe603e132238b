//! # exam-score-predictor
//!
//! Predict a student's exam score from five habits with a pre-trained
//! linear model, through a small terminal form.
//!
//! ## Features
//! - YAML configuration with resolved data and model directories
//! - Candidate path search for the model artifact
//! - Model persistence with `rmp-serde` (MessagePack), loaded once per path
//! - Lenient coercion of form input (yes/no answers, numeric strings)
//! - Offline CSV loader with delimiter sniffing and BOM handling
//!
//! ## Example
//! ```no_run
//! use exam_score_predictor::cache::ModelCache;
//! use exam_score_predictor::config::Config;
//! use exam_score_predictor::session::{Command, Feedback, Session};
//!
//! let config = Config::load()?;
//! let cache = ModelCache::new();
//! let mut session = Session::start(&config, &cache);
//! session.handle(Command::Submit);
//! if let Some(Feedback::Prediction(view)) = session.feedback() {
//!     println!("Predicted Exam Score: {}", view.metric);
//! }
//! # Ok::<(), exam_score_predictor::error::ConfigError>(())
//! ```

pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod form;
pub mod locator;
pub mod model;
pub mod session;

pub use cache::ModelCache;
pub use config::Config;
pub use features::{FEATURES, FeatureRow, FeatureValue};
pub use model::{ExamScoreModel, Regressor, predict_one};
