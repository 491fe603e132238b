use anyhow::{Context, Result};
use log::{debug, info};

use exam_score_predictor::cache::ModelCache;
use exam_score_predictor::config::Config;

mod app;
mod ui;

fn main() -> Result<()> {
    let config = Config::load().context("loading configuration")?;
    app::logging::init(&config)?;
    info!("Loaded configuration from {}", config.source().display());
    info!("Project root: {}", config.root().display());
    debug!("Resolved paths: {:?}", config.abs_paths());

    let cache = ModelCache::new();
    app::run::run(&config, &cache)
}
