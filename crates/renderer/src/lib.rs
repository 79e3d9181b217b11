//! Renderer crate for fadeshow.
//!
//! Glues the winit window, the `wgpu` transition programs and the image
//! loader to the `transition` controller. The overall flow is:
//!
//! ```text
//!   CLI / fadeshow
//!          │ RendererConfig
//!          ▼
//!   run_slideshow ──▶ SlideshowState ──▶ winit event loop ──▶ render_frame()
//!                          │                                      │
//!                          │ GpuImageLoader (worker threads)       ├─▶ controller.tick()
//!                          ▼                                      └─▶ controller.present(GpuRenderer)
//!                     SlotTexture uploads
//! ```
//!
//! `GpuRenderer` implements the controller's `RenderPipeline` trait: program
//! selection, parameter writes and slot binding are buffered on the CPU and
//! flushed to the GPU in a single pass per frame.

mod autoplay;
mod compile;
pub mod gpu;
mod loader;
mod types;
mod window;

pub use gpu::{GpuRenderer, SlotTexture};
pub use loader::GpuImageLoader;
pub use types::RendererConfig;
pub use window::run_slideshow;
