use std::time::Duration;

use crate::error::TransitionError;
use crate::fit::FitMode;
use crate::style::{ParamName, TransitionStyle};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

/// Tunables for the transition itself.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionConfig {
    pub style: TransitionStyle,
    pub duration: Duration,
    /// Alternate `0 -> 1` and `1 -> 0` runs instead of resetting after each one.
    pub direction_toggle: bool,
    pub intensity: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub width: f32,
}

impl TransitionConfig {
    /// Configured value for a style parameter. `Progress` is runtime state and
    /// has no configured value.
    pub fn value(&self, name: ParamName) -> Option<f32> {
        match name {
            ParamName::Progress => None,
            ParamName::Intensity => Some(self.intensity),
            ParamName::ScaleX => Some(self.scale_x),
            ParamName::ScaleY => Some(self.scale_y),
            ParamName::Width => Some(self.width),
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            style: TransitionStyle::Split,
            duration: DEFAULT_DURATION,
            direction_toggle: true,
            intensity: 40.0,
            scale_x: 50.0,
            scale_y: 50.0,
            width: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    pub image_urls: Vec<String>,
    pub fit_mode: FitMode,
    pub transition: TransitionConfig,
}

impl ControllerConfig {
    pub fn new(image_urls: Vec<String>) -> Self {
        Self {
            image_urls,
            fit_mode: FitMode::default(),
            transition: TransitionConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), TransitionError> {
        if self.image_urls.len() < 2 {
            return Err(TransitionError::Configuration(format!(
                "at least two images are required, got {}",
                self.image_urls.len()
            )));
        }
        if let Some(index) = self.image_urls.iter().position(|url| url.trim().is_empty()) {
            return Err(TransitionError::Configuration(format!(
                "image {index} has an empty source"
            )));
        }
        Ok(())
    }
}

/// Partial reconfiguration applied through
/// [`crate::TransitionController::update_config`].
///
/// Names are kept as strings so unknown values can be reported and ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdate {
    pub image_urls: Option<Vec<String>>,
    pub image_size: Option<String>,
    pub transition_type: Option<String>,
    pub toggle_direction: Option<bool>,
    pub duration: Option<Duration>,
    pub intensity: Option<f32>,
    pub scale_x: Option<f32>,
    pub scale_y: Option<f32>,
    pub width: Option<f32>,
}
