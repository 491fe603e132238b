use std::fs::{self, OpenOptions};

use anyhow::{Context, Result};
use env_logger::{Builder, Target, WriteStyle};

use exam_score_predictor::config::Config;

/// Sends log records to the file named in the `logging` section.
///
/// The terminal belongs to the UI, so nothing is written to stderr.
pub fn init(config: &Config) -> Result<()> {
    let settings = config.logging();
    let path = config.abs([&settings.file]);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    Builder::new()
        .parse_filters(&settings.level)
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}
