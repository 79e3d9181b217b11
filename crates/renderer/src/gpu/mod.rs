//! GPU side of the slideshow.
//!
//! - `context` owns wgpu instance/device/surface wiring and reconfigures the
//!   swapchain when the window resizes.
//! - `pipeline` compiles the transition programs into render pipelines over a
//!   shared uniform + slot bind group layout, caching one per variant.
//! - `uniforms` mirrors the std140 parameter block the programs read.
//! - `textures` uploads decoded images into shareable slot textures.
//! - `state` glues everything together behind the `RenderPipeline` trait the
//!   transition controller flushes into.

mod context;
mod pipeline;
mod state;
mod textures;
mod uniforms;

pub use state::GpuRenderer;
pub use textures::SlotTexture;
