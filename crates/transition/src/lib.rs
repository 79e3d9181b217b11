//! Orchestration core for two-slot image transitions.
//!
//! The crate owns everything that decides *what* the GPU should draw while one
//! image dissolves into the next; it never talks to a graphics API directly.
//! Hosts plug in a [`TextureLoader`] and a [`RenderPipeline`] and drive the
//! controller from their frame loop:
//!
//! ```text
//!   host loop ──tick(now)──▶ TransitionController ──present()──▶ RenderPipeline
//!                               │      ▲
//!                    load(url)  ▼      │ PendingTexture::poll
//!                           TextureLoader (worker threads)
//! ```
//!
//! Each frame the host calls [`TransitionController::tick`] to collect finished
//! texture loads and advance the running progress value, then
//! [`TransitionController::present`] to flush any dirty shader state and draw.

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod fit;
pub mod loader;
pub mod params;
pub mod pipeline;
pub mod progress;
pub mod style;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigUpdate, ControllerConfig, TransitionConfig};
pub use controller::{ImageSlot, Phase, TransitionController, TransitionEvent, TransitionState};
pub use error::{LoadError, TransitionError};
pub use fit::{compute_fit, CameraParams, FitMode, FrameFit, Viewport};
pub use loader::{PendingTexture, TextureDimensions, TextureLoader};
pub use params::{ParamChanges, ShaderParams, SlotId};
pub use pipeline::RenderPipeline;
pub use progress::{Curve, ProgressEvent, ProgressRun};
pub use style::{
    select_program, select_program_by_name, ParamName, ProgramSelection, ProgramVariant,
    TransitionStyle,
};
