//! Form controller: resolves the model, handles submissions and resets.
//!
//! A [`Session`] is what the terminal front-end drives. It knows nothing
//! about key codes or drawing; it turns [`Command`]s into state the UI can
//! render.

use std::path::PathBuf;

use log::{error, info};
use serde_json::Value;

use crate::cache::{ModelCache, SharedModel};
use crate::config::Config;
use crate::features::FeatureRow;
use crate::form::FormState;
use crate::locator::{candidate_paths, find_model_path};
use crate::model::{MODEL_FILENAME, format_score, predict_one, progress_ratio};

/// Outcome of model resolution at session start.
pub enum ModelStatus {
    Ready(SharedModel),
    NotFound { searched: Vec<PathBuf> },
    LoadFailed { message: String },
}

impl ModelStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelStatus::Ready(_))
    }

    /// User-facing explanation when the form cannot be used.
    pub fn error_message(&self) -> Option<String> {
        match self {
            ModelStatus::Ready(_) => None,
            ModelStatus::NotFound { searched } => {
                let mut msg = format!(
                    "Model not found (`{MODEL_FILENAME}`).\n\n\
                     Export the trained model and place it at one of:\n"
                );
                for path in searched {
                    msg.push_str(&format!("\n  {}", path.display()));
                }
                Some(msg)
            }
            ModelStatus::LoadFailed { message } => {
                Some(format!("Error while loading the model: {message}"))
            }
        }
    }
}

/// A successful submission, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    pub score: f64,
    /// `score / 100` clamped to `[0, 1]`.
    pub ratio: f64,
    /// `"72.50 / 100"`.
    pub metric: String,
    /// The submitted values.
    pub params: Value,
}

impl PredictionView {
    pub fn new(score: f64, params: Value) -> Self {
        Self {
            score,
            ratio: progress_ratio(score),
            metric: format_score(score),
            params,
        }
    }

    pub fn params_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.params).unwrap_or_else(|_| self.params.to_string())
    }
}

/// Result of the last submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Prediction(PredictionView),
    Failed(String),
}

/// User intents, independent of the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    FocusNext,
    FocusPrev,
    Increase,
    Decrease,
    Submit,
    Reset,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
}

pub struct Session<'a> {
    config: &'a Config,
    cache: &'a ModelCache,
    model: ModelStatus,
    form: FormState,
    feedback: Option<Feedback>,
}

impl<'a> Session<'a> {
    /// Locates and loads the model (through the cache) and shows a fresh form.
    pub fn start(config: &'a Config, cache: &'a ModelCache) -> Self {
        Self {
            config,
            cache,
            model: resolve_model(config, cache),
            form: FormState::new(),
            feedback: None,
        }
    }

    pub fn model_status(&self) -> &ModelStatus {
        &self.model
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn handle(&mut self, command: Command) -> Action {
        match command {
            Command::Quit => return Action::Quit,
            Command::Reset => self.reset(),
            Command::Submit => self.submit(),
            _ if !self.model.is_ready() => {}
            Command::FocusNext => self.form.focus_next(),
            Command::FocusPrev => self.form.focus_prev(),
            Command::Increase => self.form.increase(),
            Command::Decrease => self.form.decrease(),
        }
        Action::None
    }

    /// Predicts from the current form values. Does nothing while the model is
    /// unavailable.
    pub fn submit(&mut self) {
        let ModelStatus::Ready(model) = &self.model else {
            return;
        };

        let raw = self.form.submission();
        let row = FeatureRow::from_raw(&raw);
        self.feedback = Some(match predict_one(&**model, &row) {
            Ok(score) => {
                info!("Predicted exam score {score:.2}");
                Feedback::Prediction(PredictionView::new(score, Value::Object(raw)))
            }
            Err(e) => Feedback::Failed(format!("Prediction failed: {e}")),
        });
    }

    /// Starts over: defaults, no feedback, model re-resolved.
    pub fn reset(&mut self) {
        info!("Session reset");
        *self = Session::start(self.config, self.cache);
    }
}

fn resolve_model(config: &Config, cache: &ModelCache) -> ModelStatus {
    let Some(path) = find_model_path(config) else {
        return ModelStatus::NotFound {
            searched: candidate_paths(config),
        };
    };
    match cache.get_or_load(&path) {
        Ok(model) => ModelStatus::Ready(model),
        Err(e) => {
            error!("{e}");
            ModelStatus::LoadFailed {
                message: e.to_string(),
            }
        }
    }
}
