//! Aspect-fit math for the two image slots.
//!
//! All aspects in this module are height / width ratios, matching the way the
//! transition shaders consume `resolution.zw`.

use std::fmt;

/// Distance between the camera and the image quad.
pub const CAMERA_DISTANCE: f32 = 2.0;

/// How an image is framed inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Fill the viewport, cropping the overflowing axis.
    #[default]
    Cover,
    /// Show the whole image, letterboxing the short axis.
    Contain,
}

impl FitMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cover" => Some(FitMode::Cover),
            "contain" => Some(FitMode::Contain),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FitMode::Cover => "cover",
            FitMode::Contain => "contain",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            FitMode::Cover => FitMode::Contain,
            FitMode::Contain => FitMode::Cover,
        }
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel size of the drawing surface. Zero extents are clamped to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.height as f32 / self.width as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Returns `(scale_a, scale_b)` for an image inside a container.
pub fn compute_fit(image_aspect: f32, container_aspect: f32, mode: FitMode) -> (f32, f32) {
    let width_driven = match mode {
        FitMode::Cover => container_aspect > image_aspect,
        FitMode::Contain => container_aspect < image_aspect,
    };
    if width_driven {
        (image_aspect / container_aspect, 1.0)
    } else {
        (1.0, container_aspect / image_aspect)
    }
}

/// Per-slot framing record uploaded as a `vec4` resolution uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameFit {
    pub viewport_w: f32,
    pub viewport_h: f32,
    pub scale_a: f32,
    pub scale_b: f32,
}

impl FrameFit {
    pub fn for_image(
        image_width: u32,
        image_height: u32,
        viewport: Viewport,
        mode: FitMode,
    ) -> Self {
        let image_aspect = image_height.max(1) as f32 / image_width.max(1) as f32;
        let (scale_a, scale_b) = compute_fit(image_aspect, viewport.aspect(), mode);
        Self {
            viewport_w: viewport.width as f32,
            viewport_h: viewport.height as f32,
            scale_a,
            scale_b,
        }
    }

    pub fn as_vec4(&self) -> [f32; 4] {
        [self.viewport_w, self.viewport_h, self.scale_a, self.scale_b]
    }
}

impl Default for FrameFit {
    fn default() -> Self {
        Self {
            viewport_w: 1.0,
            viewport_h: 1.0,
            scale_a: 1.0,
            scale_b: 1.0,
        }
    }
}

/// Perspective camera framing a unit quad at [`CAMERA_DISTANCE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    /// Width / height of the viewport.
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub quad_scale_x: f32,
    pub quad_scale_y: f32,
}

impl CameraParams {
    pub fn for_viewport(viewport: Viewport) -> Self {
        let aspect = viewport.width as f32 / viewport.height as f32;
        let fov_degrees = 2.0 * (1.0 / (2.0 * CAMERA_DISTANCE)).atan().to_degrees();
        Self {
            aspect,
            fov_degrees,
            quad_scale_x: aspect,
            quad_scale_y: 1.0,
        }
    }
}

impl Default for CameraParams {
    fn default() -> Self {
        Self::for_viewport(Viewport::default())
    }
}
