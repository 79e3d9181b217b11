use std::time::Duration;

use anyhow::{Context, Result};
use renderer::RendererConfig;
use slideconfig::SlideConfig;
use transition::{ControllerConfig, FitMode, TransitionStyle};

use crate::cli::Args;
use crate::paths::AppPaths;

/// Reads the slideshow config named on the command line, or the default file
/// from the user config dir when it exists.
pub fn load_file_config(args: &Args, paths: &AppPaths) -> Result<Option<SlideConfig>> {
    if let Some(path) = args.config.as_deref() {
        let config = SlideConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        return Ok(Some(config));
    }

    let default = paths.default_config_file();
    if !default.is_file() {
        tracing::debug!(
            path = %default.display(),
            "no default config file; using built-in defaults"
        );
        return Ok(None);
    }
    let config = SlideConfig::from_path(&default)
        .with_context(|| format!("failed to load config {}", default.display()))?;
    Ok(Some(config))
}

/// Merges command-line overrides over the file config.
pub fn build_renderer_config(args: &Args, file: Option<SlideConfig>) -> Result<RendererConfig> {
    let mut merged = file.unwrap_or_else(|| SlideConfig {
        version: 1,
        ..SlideConfig::default()
    });
    if !args.images.is_empty() {
        // Command-line paths are relative to the working directory.
        merged.images = args.images.clone();
        merged.base_dir = None;
    }
    merged.validate().context("invalid slideshow configuration")?;

    let mut controller = ControllerConfig::new(merged.images.clone());
    controller.fit_mode = args
        .fit
        .unwrap_or_else(|| resolve_fit(merged.image_size.as_deref()));

    let transition = &mut controller.transition;
    transition.style = args
        .transition
        .unwrap_or_else(|| resolve_style(merged.transition.as_deref()));
    if let Some(duration) = args.duration_ms.map(Duration::from_millis).or(merged.duration) {
        transition.duration = duration;
    }
    if args.no_toggle {
        transition.direction_toggle = false;
    } else if let Some(toggle) = merged.toggle_direction {
        transition.direction_toggle = toggle;
    }
    if let Some(value) = merged.intensity {
        transition.intensity = value;
    }
    if let Some(value) = merged.scale_x {
        transition.scale_x = value;
    }
    if let Some(value) = merged.scale_y {
        transition.scale_y = value;
    }
    if let Some(value) = merged.width {
        transition.width = value;
    }
    controller
        .validate()
        .context("invalid transition configuration")?;

    let mut config = RendererConfig::new(controller);
    if let Some(size) = args.size.as_deref().or(merged.window.size.as_deref()) {
        config.surface_size = parse_surface_size(size)
            .with_context(|| format!("invalid window size '{size}'"))?;
    }
    if let Some(title) = merged.window.title.clone() {
        config.title = title;
    }
    config.autoplay = args.autoplay.or(merged.autoplay);
    config.image_base = merged.base_dir.clone();
    Ok(config)
}

fn resolve_fit(name: Option<&str>) -> FitMode {
    let Some(name) = name else {
        return FitMode::default();
    };
    FitMode::from_name(name).unwrap_or_else(|| {
        tracing::warn!(image_size = name, "unknown image size; using cover");
        FitMode::default()
    })
}

fn resolve_style(name: Option<&str>) -> TransitionStyle {
    let Some(name) = name else {
        return TransitionStyle::default();
    };
    TransitionStyle::from_name(name).unwrap_or_else(|| {
        tracing::warn!(transition = name, "unknown transition; using split");
        TransitionStyle::default()
    })
}

pub fn parse_surface_size(spec: &str) -> Result<(u32, u32)> {
    let trimmed = spec.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| anyhow::anyhow!("expected WxH format, e.g. 1280x720"))?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid width in size specification"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid height in size specification"))?;

    if width == 0 || height == 0 {
        anyhow::bail!("surface dimensions must be greater than zero");
    }

    Ok((width, height))
}
