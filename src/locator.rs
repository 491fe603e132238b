//! Candidate path search for the model artifact.

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::config::Config;
use crate::model::MODEL_FILENAME;

/// Every location checked for the model, in priority order.
///
/// 1. `model_path` from the configuration
/// 2. `<models_dir>/best_model.msgpack`
/// 3. `<root>/models/best_model.msgpack`
/// 4. `<root>/notebooks/best_model.msgpack`
/// 5. `<root>/best_model.msgpack`
pub fn candidate_paths(cfg: &Config) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(5);
    if let Some(direct) = cfg.model_path() {
        candidates.push(direct.to_path_buf());
    }
    candidates.push(cfg.abs_paths().models_dir.join(MODEL_FILENAME));
    candidates.push(cfg.abs(["models", MODEL_FILENAME]));
    candidates.push(cfg.abs(["notebooks", MODEL_FILENAME]));
    candidates.push(cfg.abs([MODEL_FILENAME]));
    candidates
}

/// First existing candidate, or `None` when the model is nowhere to be found.
pub fn find_model_path(cfg: &Config) -> Option<PathBuf> {
    let candidates = candidate_paths(cfg);
    for path in &candidates {
        debug!("Looking for model at {}", path.display());
        if path.exists() {
            info!("Using model {}", path.display());
            return Some(path.clone());
        }
    }
    warn!("No model found among {} candidate paths", candidates.len());
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &std::path::Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn candidate_order() {
        let cfg = Config::from_yaml_str(
            "/srv/app",
            "model_path: custom/m.msgpack\npaths:\n  models_dir: artifacts\n",
        )
        .unwrap();
        let got = candidate_paths(&cfg);
        let expected: Vec<PathBuf> = [
            "/srv/app/custom/m.msgpack",
            "/srv/app/artifacts/best_model.msgpack",
            "/srv/app/models/best_model.msgpack",
            "/srv/app/notebooks/best_model.msgpack",
            "/srv/app/best_model.msgpack",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn nothing_found_is_none() {
        let dir = tempdir().unwrap();
        let cfg = Config::from_yaml_str(dir.path(), "model_path: nowhere.msgpack\n").unwrap();
        assert!(find_model_path(&cfg).is_none());
    }

    #[test]
    fn first_existing_wins() {
        let dir = tempdir().unwrap();
        let cfg = Config::from_yaml_str(dir.path(), "").unwrap();

        touch(&dir.path().join(MODEL_FILENAME));
        assert_eq!(find_model_path(&cfg), Some(dir.path().join(MODEL_FILENAME)));

        let notebooks = dir.path().join("notebooks").join(MODEL_FILENAME);
        touch(&notebooks);
        assert_eq!(find_model_path(&cfg), Some(notebooks));

        let models = dir.path().join("models").join(MODEL_FILENAME);
        touch(&models);
        assert_eq!(find_model_path(&cfg), Some(models));
    }

    #[test]
    fn explicit_override_takes_priority() {
        let dir = tempdir().unwrap();
        let direct = dir.path().join("elsewhere/model.msgpack");
        touch(&direct);
        touch(&dir.path().join("models").join(MODEL_FILENAME));

        let yaml = format!("model_path: {}\n", direct.display());
        let cfg = Config::from_yaml_str(dir.path(), &yaml).unwrap();
        assert_eq!(find_model_path(&cfg), Some(direct));
    }
}
