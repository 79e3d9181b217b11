use std::sync::Arc;

use anyhow::{Context as AnyhowContext, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// wgpu instance, device and swapchain for the slideshow window.
pub(crate) struct GpuContext {
    pub _instance: wgpu::Instance,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub surface_format: wgpu::TextureFormat,
    max_dimension: u32,
}

impl GpuContext {
    pub(crate) fn new(window: Arc<Window>) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let initial_size = window.inner_size();
        let surface = instance
            .create_surface(window)
            .context("failed to create rendering surface")?;

        // Slideshows are mostly idle, so prefer the integrated GPU.
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no GPU adapter can present to the slideshow window")?;
        let info = adapter.get_info();
        tracing::debug!(
            adapter = %info.name,
            backend = ?info.backend,
            "selected GPU adapter"
        );

        let limits = adapter.limits();
        let max_dimension = limits.max_texture_dimension_2d;
        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("fadeshow device"),
            required_limits: limits,
            ..Default::default()
        }))
        .context("failed to create GPU device")?;

        let caps = surface.get_capabilities(&adapter);
        let surface_format = pick_surface_format(&caps.formats)
            .context("surface reports no supported formats")?;
        if surface_format.is_srgb() {
            tracing::warn!(
                ?surface_format,
                "only sRGB surface formats available; images will look brighter"
            );
        }

        let size = clamp_size(initial_size, max_dimension);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: pick_present_mode(&caps.present_modes),
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        tracing::debug!(
            format = ?config.format,
            present_mode = ?config.present_mode,
            width = size.width,
            height = size.height,
            "configuring surface"
        );
        surface.configure(&device, &config);

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            size,
            surface_format,
            max_dimension,
        })
    }

    /// Minimised windows report a zero size; the swapchain keeps its last
    /// configuration until a real size arrives.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = clamp_size(new_size, self.max_dimension);
        self.config.width = self.size.width;
        self.config.height = self.size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub(crate) fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

/// Slot textures hold raw RGBA8 bytes, so a linear surface shows them as-is.
fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|format| !format.is_srgb())
        .or_else(|| formats.first().copied())
}

fn pick_present_mode(modes: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    if modes.contains(&wgpu::PresentMode::Fifo) {
        wgpu::PresentMode::Fifo
    } else {
        wgpu::PresentMode::AutoVsync
    }
}

fn clamp_size(size: PhysicalSize<u32>, max_dimension: u32) -> PhysicalSize<u32> {
    PhysicalSize::new(
        size.width.clamp(1, max_dimension),
        size.height.clamp(1, max_dimension),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn prefers_linear_surface_format() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(pick_surface_format(&formats), Some(TextureFormat::Bgra8Unorm));
        assert_eq!(
            pick_surface_format(&[TextureFormat::Rgba8UnormSrgb]),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
        assert_eq!(pick_surface_format(&[]), None);
    }

    #[test]
    fn falls_back_to_auto_vsync() {
        assert_eq!(
            pick_present_mode(&[wgpu::PresentMode::Mailbox, wgpu::PresentMode::Fifo]),
            wgpu::PresentMode::Fifo
        );
        assert_eq!(
            pick_present_mode(&[wgpu::PresentMode::Immediate]),
            wgpu::PresentMode::AutoVsync
        );
    }

    #[test]
    fn surface_size_stays_within_limits() {
        assert_eq!(
            clamp_size(PhysicalSize::new(0, 9000), 8192),
            PhysicalSize::new(1, 8192)
        );
    }
}
