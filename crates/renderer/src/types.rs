use std::path::PathBuf;
use std::time::Duration;

use transition::ControllerConfig;

/// Everything the window thread needs to start a slideshow.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub controller: ControllerConfig,
    /// Initial inner size of the window in physical pixels.
    pub surface_size: (u32, u32),
    pub title: String,
    /// Advance automatically after this long without a transition.
    pub autoplay: Option<Duration>,
    /// Directory relative image paths are resolved against.
    pub image_base: Option<PathBuf>,
}

impl RendererConfig {
    pub fn new(controller: ControllerConfig) -> Self {
        Self {
            controller,
            surface_size: (1280, 720),
            title: "fadeshow".to_string(),
            autoplay: None,
            image_base: None,
        }
    }
}
