use bytemuck::{Pod, Zeroable};
use transition::fit::CAMERA_DISTANCE;
use transition::{CameraParams, FrameFit, ParamName, SlotId};

/// CPU mirror of the `TransitionParams` std140 block in `compile.rs`.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TransitionUniforms {
    pub progress: f32,
    pub intensity: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub width: f32,
    pub padding0: [f32; 3],
    pub resolution1: [f32; 4],
    pub resolution2: [f32; 4],
    /// Quad extent in clip space (`xy`); `zw` unused.
    pub frame: [f32; 4],
}

unsafe impl Zeroable for TransitionUniforms {}
unsafe impl Pod for TransitionUniforms {}

impl TransitionUniforms {
    pub fn new() -> Self {
        Self {
            progress: 0.0,
            intensity: 0.0,
            scale_x: 0.0,
            scale_y: 0.0,
            width: 0.0,
            padding0: [0.0; 3],
            resolution1: FrameFit::default().as_vec4(),
            resolution2: FrameFit::default().as_vec4(),
            frame: [1.0, 1.0, 0.0, 0.0],
        }
    }

    pub fn set_param(&mut self, name: ParamName, value: f32) {
        let field = match name {
            ParamName::Progress => &mut self.progress,
            ParamName::Intensity => &mut self.intensity,
            ParamName::ScaleX => &mut self.scale_x,
            ParamName::ScaleY => &mut self.scale_y,
            ParamName::Width => &mut self.width,
        };
        *field = value;
    }

    pub fn set_resolution(&mut self, slot: SlotId, fit: FrameFit) {
        match slot {
            SlotId::First => self.resolution1 = fit.as_vec4(),
            SlotId::Second => self.resolution2 = fit.as_vec4(),
        }
    }

    pub fn set_camera(&mut self, camera: &CameraParams) {
        let [x, y] = clip_extent(camera);
        self.frame[0] = x;
        self.frame[1] = y;
    }
}

/// Clip-space half extent of a unit quad scaled by the camera's quad scale and
/// viewed through its perspective projection.
pub(crate) fn clip_extent(camera: &CameraParams) -> [f32; 2] {
    let half_fov = (camera.fov_degrees * 0.5).to_radians();
    let visible_half_height = (CAMERA_DISTANCE * half_fov.tan()).max(f32::EPSILON);
    let visible_half_width = (visible_half_height * camera.aspect).max(f32::EPSILON);
    [
        0.5 * camera.quad_scale_x / visible_half_width,
        0.5 * camera.quad_scale_y / visible_half_height,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};
    use transition::Viewport;

    #[test]
    fn layout_matches_std140_block() {
        assert_eq!(offset_of!(TransitionUniforms, progress), 0);
        assert_eq!(offset_of!(TransitionUniforms, width), 16);
        assert_eq!(offset_of!(TransitionUniforms, resolution1), 32);
        assert_eq!(offset_of!(TransitionUniforms, resolution2), 48);
        assert_eq!(offset_of!(TransitionUniforms, frame), 64);
        assert_eq!(size_of::<TransitionUniforms>(), 80);
    }

    #[test]
    fn params_land_in_matching_fields() {
        let mut uniforms = TransitionUniforms::new();
        uniforms.set_param(ParamName::Progress, 0.25);
        uniforms.set_param(ParamName::ScaleY, 12.0);
        uniforms.set_resolution(
            SlotId::Second,
            FrameFit {
                viewport_w: 640.0,
                viewport_h: 480.0,
                scale_a: 0.5,
                scale_b: 1.0,
            },
        );
        assert_eq!(uniforms.progress, 0.25);
        assert_eq!(uniforms.scale_y, 12.0);
        assert_eq!(uniforms.resolution2, [640.0, 480.0, 0.5, 1.0]);
        assert_eq!(uniforms.resolution1, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn camera_framing_fills_clip_space() {
        for (w, h) in [(1920, 1080), (600, 900), (1, 1)] {
            let camera = CameraParams::for_viewport(Viewport::new(w, h));
            let [x, y] = clip_extent(&camera);
            assert!((x - 1.0).abs() < 1e-4, "x extent {x} for {w}x{h}");
            assert!((y - 1.0).abs() < 1e-4, "y extent {y} for {w}x{h}");
        }
    }
}
