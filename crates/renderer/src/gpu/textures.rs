use std::sync::Arc;

use imagesource::DecodedImage;
use transition::TextureDimensions;
use wgpu::util::{DeviceExt, TextureDataOrder};

pub(crate) const SLOT_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

struct SlotTextureInner {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

/// GPU texture holding one slideshow image. Cheap to clone; slots that show
/// the same image share the allocation.
#[derive(Clone)]
pub struct SlotTexture {
    inner: Arc<SlotTextureInner>,
}

impl SlotTexture {
    pub(crate) fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &DecodedImage,
        label: &str,
    ) -> Self {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: image.width,
                    height: image.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: SLOT_TEXTURE_FORMAT,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            TextureDataOrder::LayerMajor,
            &image.pixels,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            inner: Arc::new(SlotTextureInner {
                _texture: texture,
                view,
                width: image.width,
                height: image.height,
            }),
        }
    }

    /// 1x1 black texture bound to slots that have nothing loaded yet.
    pub(crate) fn placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let image = DecodedImage {
            width: 1,
            height: 1,
            pixels: vec![0, 0, 0, 255],
        };
        Self::upload(device, queue, &image, "slot placeholder")
    }

    pub(crate) fn view(&self) -> &wgpu::TextureView {
        &self.inner.view
    }

    pub(crate) fn same_as(&self, other: &SlotTexture) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl TextureDimensions for SlotTexture {
    fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }
}

impl std::fmt::Debug for SlotTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotTexture")
            .field("width", &self.inner.width)
            .field("height", &self.inner.height)
            .finish()
    }
}

pub(crate) fn create_slot_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("slot sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}
