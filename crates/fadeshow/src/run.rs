use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::bootstrap::{build_renderer_config, load_file_config};
use crate::cli::Args;
use crate::paths::AppPaths;

pub fn run(args: Args) -> Result<()> {
    initialise_tracing();

    let paths = AppPaths::discover()?;
    tracing::debug!(config = %paths.config_dir().display(), "resolved fadeshow paths");

    let file = load_file_config(&args, &paths)?;
    let config = build_renderer_config(&args, file)?;
    tracing::info!(
        images = config.controller.image_urls.len(),
        transition = %config.controller.transition.style,
        fit = %config.controller.fit_mode,
        duration_ms = config.controller.transition.duration.as_millis() as u64,
        toggle = config.controller.transition.direction_toggle,
        autoplay = ?config.autoplay,
        "starting slideshow"
    );
    if let Some(base) = config.image_base.as_deref() {
        tracing::debug!(base = %base.display(), "resolving relative images against config dir");
    }

    renderer::run_slideshow(config)
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
