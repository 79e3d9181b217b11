use std::path::PathBuf;

use imagesource::{decode_rgba, ImageSource, SourceFetcher};
use transition::{LoadError, PendingTexture, TextureLoader};

use crate::gpu::SlotTexture;

/// Loads slideshow images on worker threads: fetch, decode, then upload
/// through a cloned device/queue handle.
pub struct GpuImageLoader {
    device: wgpu::Device,
    queue: wgpu::Queue,
    fetcher: SourceFetcher,
    base_dir: Option<PathBuf>,
}

impl GpuImageLoader {
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        fetcher: SourceFetcher,
        base_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            device,
            queue,
            fetcher,
            base_dir,
        }
    }

    fn resolve(&self, source: &str) -> Result<ImageSource, LoadError> {
        let parsed = ImageSource::parse(source).map_err(|err| LoadError::failed(source, err))?;
        Ok(match &self.base_dir {
            Some(base) => parsed.with_base(base),
            None => parsed,
        })
    }
}

impl TextureLoader for GpuImageLoader {
    type Texture = SlotTexture;

    fn load(&mut self, source: &str) -> PendingTexture<SlotTexture> {
        let resolved = match self.resolve(source) {
            Ok(resolved) => resolved,
            Err(err) => return PendingTexture::ready(Err(err)),
        };
        let device = self.device.clone();
        let queue = self.queue.clone();
        let fetcher = self.fetcher.clone();
        let label = source.to_string();
        PendingTexture::spawn(source, move || {
            let bytes = fetcher
                .fetch(&resolved)
                .map_err(|err| LoadError::failed(&label, err))?;
            let image = decode_rgba(&bytes, &label).map_err(|err| LoadError::failed(&label, err))?;
            tracing::debug!(
                source = %resolved,
                width = image.width,
                height = image.height,
                "decoded slideshow image"
            );
            let max = device.limits().max_texture_dimension_2d;
            if image.width > max || image.height > max {
                return Err(LoadError::failed(
                    &label,
                    format!(
                        "{}x{} exceeds the GPU texture limit of {max}",
                        image.width, image.height
                    ),
                ));
            }
            Ok(SlotTexture::upload(&device, &queue, &image, &label))
        })
    }
}
