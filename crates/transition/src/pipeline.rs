use crate::fit::{CameraParams, FrameFit};
use crate::params::SlotId;
use crate::style::{ParamName, ProgramSelection};

/// Draw-side contract the controller flushes shader state into.
///
/// Implementations may buffer calls and only touch the GPU in [`draw`].
///
/// [`draw`]: RenderPipeline::draw
pub trait RenderPipeline {
    type Texture;
    type Error;

    fn set_program(&mut self, selection: &ProgramSelection);

    fn set_parameter(&mut self, name: ParamName, value: f32);

    /// Binds `texture` to `slot` together with its `resolution` vector.
    fn set_slot(&mut self, slot: SlotId, texture: Option<&Self::Texture>, fit: FrameFit);

    fn set_camera(&mut self, _camera: &CameraParams) {}

    fn draw(&mut self) -> Result<(), Self::Error>;
}
