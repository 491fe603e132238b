//! YAML configuration and resolved project paths.
//!
//! The configuration is read once at startup into a [`Config`] that is then
//! passed by reference to whatever needs it. Besides plain key lookup it
//! carries an `abs_paths` section: the data and model directories joined
//! under the project root, with defaults for every missing entry.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;

/// Location of the configuration file relative to the project root.
pub const DEFAULT_CONFIG_PATH: &str = "configs/app.yaml";

/// Key under which the resolved paths are exposed through [`Config::get`].
pub const ABS_PATHS_KEY: &str = "abs_paths";

/// The directory the crate was built from.
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// The `paths` section, relative to the project root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub data_raw_dir: String,
    pub data_processed_dir: String,
    pub models_dir: String,
    pub dataset_filename: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            data_raw_dir: "data/raw".into(),
            data_processed_dir: "data/processed".into(),
            models_dir: "models".into(),
            dataset_filename: "dataset.csv".into(),
        }
    }
}

/// The `logging` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `env_logger` filter string, e.g. `info` or `exam_score_predictor=debug`.
    pub level: String,
    /// Log file, relative to the project root unless absolute.
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".into(),
            file: "logs/predictor.log".into(),
        }
    }
}

/// Absolute locations derived from [`PathSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsPaths {
    pub data_raw_dir: PathBuf,
    pub data_processed_dir: PathBuf,
    pub models_dir: PathBuf,
    pub dataset: PathBuf,
}

impl AbsPaths {
    fn resolve(root: &Path, paths: &PathSettings) -> Self {
        let raw = root.join(&paths.data_raw_dir);
        Self {
            data_raw_dir: normalize(&raw),
            data_processed_dir: normalize(&root.join(&paths.data_processed_dir)),
            models_dir: normalize(&root.join(&paths.models_dir)),
            dataset: normalize(&raw.join(&paths.dataset_filename)),
        }
    }

    fn to_mapping(&self) -> Mapping {
        let mut m = Mapping::new();
        for (key, path) in [
            ("data_raw_dir", &self.data_raw_dir),
            ("data_processed_dir", &self.data_processed_dir),
            ("models_dir", &self.models_dir),
            ("dataset", &self.dataset),
        ] {
            m.insert(
                Value::from(key),
                Value::from(path.to_string_lossy().into_owned()),
            );
        }
        m
    }
}

/// Immutable application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    source: PathBuf,
    values: Mapping,
    abs_paths: AbsPaths,
    model_path: Option<PathBuf>,
    logging: LoggingSettings,
}

impl Config {
    /// Loads [`DEFAULT_CONFIG_PATH`] under [`project_root`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(project_root(), DEFAULT_CONFIG_PATH)
    }

    /// Loads `rel_path` under `root`.
    ///
    /// An empty file is an empty mapping. A missing file is
    /// [`ConfigError::NotFound`].
    pub fn load_from(
        root: impl Into<PathBuf>,
        rel_path: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        let root = root.into();
        let cfg_path = root.join(rel_path);
        if !cfg_path.exists() {
            return Err(ConfigError::NotFound { path: cfg_path });
        }

        let text = fs::read_to_string(&cfg_path).map_err(|source| ConfigError::Read {
            path: cfg_path.clone(),
            source,
        })?;
        Self::parse(root, &text, &cfg_path)
    }

    /// Builds a configuration from YAML text, as if read from `root`.
    pub fn from_yaml_str(root: impl Into<PathBuf>, text: &str) -> Result<Self, ConfigError> {
        Self::parse(root.into(), text, Path::new("<inline>"))
    }

    fn parse(root: PathBuf, text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let raw: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
                path: origin.to_path_buf(),
                source,
            })?
        };
        let mut values = match raw {
            Value::Null => Mapping::new(),
            Value::Mapping(m) => m,
            _ => {
                return Err(ConfigError::NotAMapping {
                    path: origin.to_path_buf(),
                });
            }
        };

        let paths: PathSettings = section(&values, "paths")?;
        let logging: LoggingSettings = section(&values, "logging")?;
        let model_path: Option<String> = section(&values, "model_path")?;

        let abs_paths = AbsPaths::resolve(&root, &paths);
        let model_path = model_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| normalize(&root.join(p)));
        values.insert(
            Value::from(ABS_PATHS_KEY),
            Value::Mapping(abs_paths.to_mapping()),
        );

        Ok(Self {
            root,
            source: origin.to_path_buf(),
            values,
            abs_paths,
            model_path,
            logging,
        })
    }

    /// Project root every relative entry is resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File the configuration was read from, `<inline>` for YAML text.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Joins `parts` under the root and normalises `.`/`..` lexically.
    pub fn abs<I, P>(&self, parts: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut path = self.root.clone();
        for part in parts {
            path.push(part);
        }
        normalize(&path)
    }

    /// Raw lookup of a top-level key, `abs_paths` included.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn abs_paths(&self) -> &AbsPaths {
        &self.abs_paths
    }

    pub fn logging(&self) -> &LoggingSettings {
        &self.logging
    }

    /// The optional `model_path` override, resolved against the root when relative.
    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }
}

fn section<T>(values: &Mapping, name: &'static str) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Default,
{
    match values.get(name) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(v) => serde_yaml::from_value(v.clone())
            .map_err(|source| ConfigError::Section { section: name, source }),
    }
}

/// Resolves `.` and `..` without touching the filesystem.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
