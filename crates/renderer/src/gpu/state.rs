use std::sync::Arc;

use anyhow::Result;
use transition::{
    CameraParams, FrameFit, ParamName, ProgramSelection, ProgramVariant, RenderPipeline, SlotId,
};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::context::GpuContext;
use super::pipeline::{PipelineCache, PipelineLayouts};
use super::textures::{create_slot_sampler, SlotTexture};
use super::uniforms::TransitionUniforms;

/// wgpu-backed [`RenderPipeline`].
///
/// Controller flushes only update CPU-side state; the uniform upload, slot
/// bind group rebuild and draw all happen in [`RenderPipeline::draw`].
pub struct GpuRenderer {
    context: GpuContext,
    layouts: PipelineLayouts,
    pipelines: PipelineCache,
    current: Option<ProgramVariant>,
    uniforms: TransitionUniforms,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    placeholder: SlotTexture,
    slots: [SlotTexture; 2],
    slot_bind_group: wgpu::BindGroup,
    slots_dirty: bool,
}

impl GpuRenderer {
    pub fn new(window: Arc<Window>) -> Result<Self> {
        let context = GpuContext::new(window)?;
        let layouts = PipelineLayouts::new(&context.device)?;

        let uniforms = TransitionUniforms::new();
        let uniform_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("transition uniforms"),
                contents: bytemuck::bytes_of(&uniforms),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let uniform_bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("transition uniform bind group"),
            layout: &layouts.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let sampler = create_slot_sampler(&context.device);
        let placeholder = SlotTexture::placeholder(&context.device, &context.queue);
        let slots = [placeholder.clone(), placeholder.clone()];
        let slot_bind_group =
            layouts.slot_bind_group(&context.device, [&slots[0], &slots[1]], &sampler);

        tracing::info!(
            width = context.size.width,
            height = context.size.height,
            format = ?context.surface_format,
            "GPU renderer ready"
        );

        Ok(Self {
            context,
            layouts,
            pipelines: PipelineCache::default(),
            current: None,
            uniforms,
            uniform_buffer,
            uniform_bind_group,
            sampler,
            placeholder,
            slots,
            slot_bind_group,
            slots_dirty: false,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.context.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.context.queue
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.context.resize(new_size);
    }

    /// Reconfigures the swapchain after `Lost`/`Outdated` surface errors.
    pub fn recover_surface(&mut self) {
        self.context.reconfigure();
    }

    /// Clears the surface without drawing a transition; used while the first
    /// images are still loading.
    pub fn clear(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("clear encoder"),
            });
        {
            let _pass = begin_pass(&mut encoder, &view, "clear pass");
        }
        self.context.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn rebuild_slot_bind_group(&mut self) {
        self.slot_bind_group = self.layouts.slot_bind_group(
            &self.context.device,
            [&self.slots[0], &self.slots[1]],
            &self.sampler,
        );
        self.slots_dirty = false;
    }
}

impl RenderPipeline for GpuRenderer {
    type Texture = SlotTexture;
    type Error = wgpu::SurfaceError;

    fn set_program(&mut self, selection: &ProgramSelection) {
        let variant = selection.variant;
        match self.pipelines.get_or_build(
            &self.context.device,
            &self.layouts,
            self.context.surface_format,
            variant,
        ) {
            Ok(_) => {
                self.current = Some(variant);
                tracing::debug!(
                    program = variant.label(),
                    cached = self.pipelines.len(),
                    "transition program bound"
                );
            }
            Err(err) => {
                tracing::error!(
                    program = variant.label(),
                    error = %err,
                    "failed to build transition program"
                );
            }
        }
    }

    fn set_parameter(&mut self, name: ParamName, value: f32) {
        self.uniforms.set_param(name, value);
    }

    fn set_slot(&mut self, slot: SlotId, texture: Option<&SlotTexture>, fit: FrameFit) {
        let texture = texture.unwrap_or(&self.placeholder).clone();
        let entry = &mut self.slots[slot.index()];
        if !entry.same_as(&texture) {
            *entry = texture;
            self.slots_dirty = true;
        }
        self.uniforms.set_resolution(slot, fit);
    }

    fn set_camera(&mut self, camera: &CameraParams) {
        self.uniforms.set_camera(camera);
    }

    fn draw(&mut self) -> Result<(), Self::Error> {
        if self.slots_dirty {
            self.rebuild_slot_bind_group();
        }
        self.context
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));

        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("transition encoder"),
            });
        {
            let mut pass = begin_pass(&mut encoder, &view, "transition pass");
            if let Some(pipeline) = self.current.and_then(|variant| self.pipelines.get(variant)) {
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_bind_group(1, &self.slot_bind_group, &[]);
                pass.draw(0..3, 0..1);
            }
        }
        self.context.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn begin_pass<'encoder>(
    encoder: &'encoder mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    label: &str,
) -> wgpu::RenderPass<'encoder> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            depth_slice: None,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        occlusion_query_set: None,
        timestamp_writes: None,
    })
}
