//! Process-lifetime model cache keyed by resolved path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use parking_lot::Mutex;

use crate::error::ModelError;
use crate::model::{ExamScoreModel, Regressor};

/// Shared handle to a loaded model.
pub type SharedModel = Arc<dyn Regressor>;

/// Loads each distinct model path at most once.
///
/// The lock is held across the load, so two callers racing on the same path
/// still trigger a single read. Failed loads are not cached.
#[derive(Default)]
pub struct ModelCache {
    entries: Mutex<HashMap<PathBuf, SharedModel>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached model for `path`, decoding the artifact on first use.
    pub fn get_or_load(&self, path: &Path) -> Result<SharedModel, ModelError> {
        self.get_or_load_with(path, |p| {
            let model = ExamScoreModel::load_from_file(p)?;
            Ok(Arc::new(model) as SharedModel)
        })
    }

    /// Like [`get_or_load`](Self::get_or_load) with a custom loader.
    pub fn get_or_load_with<F>(&self, path: &Path, load: F) -> Result<SharedModel, ModelError>
    where
        F: FnOnce(&Path) -> Result<SharedModel, ModelError>,
    {
        let mut entries = self.entries.lock();
        if let Some(model) = entries.get(path) {
            debug!("Model cache hit for {}", path.display());
            return Ok(Arc::clone(model));
        }

        info!("Loading model from {}", path.display());
        let model = load(path)?;
        entries.insert(path.to_path_buf(), Arc::clone(&model));
        Ok(model)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.lock().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
