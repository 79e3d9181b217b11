use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use imagesource::SourceFetcher;
use transition::{
    Clock, Phase, SlotId, SystemClock, TransitionController, TransitionError, TransitionEvent,
    TransitionStyle, Viewport,
};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use crate::autoplay::Autoplay;
use crate::gpu::GpuRenderer;
use crate::loader::GpuImageLoader;
use crate::types::RendererConfig;

/// Sleep between checks on background texture loads.
const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Action requested by a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyCommand {
    Next,
    Style(TransitionStyle),
    ToggleFit,
    Quit,
}

fn command_for_key(event: &KeyEvent) -> Option<KeyCommand> {
    if event.state != ElementState::Pressed || event.repeat {
        return None;
    }
    match &event.logical_key {
        Key::Named(NamedKey::Space) | Key::Named(NamedKey::ArrowRight) => Some(KeyCommand::Next),
        Key::Named(NamedKey::Escape) => Some(KeyCommand::Quit),
        Key::Character(value) => command_for_char(value.as_str()),
        _ => None,
    }
}

fn command_for_char(value: &str) -> Option<KeyCommand> {
    match value {
        " " => Some(KeyCommand::Next),
        "1" => Some(KeyCommand::Style(TransitionStyle::Split)),
        "2" => Some(KeyCommand::Style(TransitionStyle::Fade)),
        "3" => Some(KeyCommand::Style(TransitionStyle::Noise)),
        "c" | "C" => Some(KeyCommand::ToggleFit),
        "q" | "Q" => Some(KeyCommand::Quit),
        _ => None,
    }
}

struct SlideshowState {
    window: Arc<Window>,
    renderer: GpuRenderer,
    controller: TransitionController<GpuImageLoader>,
    clock: SystemClock,
    autoplay: Option<Autoplay>,
}

impl SlideshowState {
    fn new(window: Arc<Window>, config: &RendererConfig) -> Result<Self> {
        let renderer = GpuRenderer::new(window.clone())?;
        let fetcher = SourceFetcher::new().context("failed to create image fetcher")?;
        let loader = GpuImageLoader::new(
            renderer.device().clone(),
            renderer.queue().clone(),
            fetcher,
            config.image_base.clone(),
        );
        let size = renderer.size();
        let controller = TransitionController::initialize(
            config.controller.clone(),
            loader,
            Viewport::new(size.width, size.height),
        )
        .context("failed to initialise transition controller")?;
        let clock = SystemClock;
        let autoplay = config
            .autoplay
            .map(|interval| Autoplay::new(interval, clock.now()));

        Ok(Self {
            window,
            renderer,
            controller,
            clock,
            autoplay,
        })
    }

    fn loads_pending(&self) -> bool {
        SlotId::BOTH
            .iter()
            .any(|slot| self.controller.is_loading(*slot))
    }

    fn request_next(&mut self, now: Instant) {
        if self.controller.next(now) {
            if let Some(autoplay) = self.autoplay.as_mut() {
                autoplay.reset(now);
            }
            self.window.request_redraw();
        }
    }

    /// Returns false when the window should close.
    fn apply(&mut self, command: KeyCommand) -> bool {
        let now = self.clock.now();
        match command {
            KeyCommand::Next => self.request_next(now),
            KeyCommand::Style(style) => {
                self.controller.set_transition_style(style.as_str());
            }
            KeyCommand::ToggleFit => {
                let mode = self.controller.config().fit_mode.toggled();
                self.controller.set_fit_mode(mode);
                tracing::info!(fit = %mode, "fit mode toggled");
            }
            KeyCommand::Quit => return false,
        }
        self.window.request_redraw();
        true
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.renderer.resize(new_size);
        self.controller.on_resize(new_size.width, new_size.height);
        self.window.request_redraw();
    }

    /// Collects finished loads and advances the running transition. Returns
    /// whether anything changed on screen.
    fn advance(&mut self, now: Instant) -> Result<bool> {
        let events = self.controller.tick(now);
        let changed = !events.is_empty();
        for event in events {
            if let Some(err) = startup_error(self.controller.phase(), &event) {
                return Err(anyhow::Error::new(err).context("slideshow could not start"));
            }
            match event {
                TransitionEvent::Ready => {
                    tracing::info!("slideshow ready");
                    if let Some(autoplay) = self.autoplay.as_mut() {
                        autoplay.reset(now);
                    }
                }
                TransitionEvent::Completed {
                    current_image_index,
                } => {
                    tracing::debug!(current_image_index, "transition finished");
                    if let Some(autoplay) = self.autoplay.as_mut() {
                        autoplay.reset(now);
                    }
                }
                TransitionEvent::LoadFailed { error, .. } => {
                    tracing::error!(error = %error, "image could not be loaded");
                }
                TransitionEvent::Progress(_) | TransitionEvent::SlotLoaded { .. } => {}
            }
        }
        Ok(changed)
    }

    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let drawn = self.controller.present(&mut self.renderer)?;
        if !drawn {
            self.renderer.clear()?;
        }
        Ok(())
    }

    fn schedule(&mut self, now: Instant) -> ControlFlow {
        if self.controller.phase() == Phase::Running {
            return ControlFlow::Poll;
        }
        let loads_pending = self.loads_pending();
        if !loads_pending && self.controller.phase() == Phase::Idle {
            if let Some(autoplay) = self.autoplay.as_mut() {
                if autoplay.advance_if_elapsed(now) {
                    self.request_next(now);
                    return ControlFlow::Poll;
                }
            }
        }
        wait_flow(now, loads_pending, self.autoplay.as_ref().map(Autoplay::deadline))
    }
}

/// A texture that fails before the first frame leaves nothing to show.
fn startup_error(phase: Phase, event: &TransitionEvent) -> Option<TransitionError> {
    match event {
        TransitionEvent::LoadFailed { error, .. } if phase == Phase::Loading => {
            Some(TransitionError::Load(error.clone()))
        }
        _ => None,
    }
}

/// Control flow while no transition is running. Pending loads are checked
/// on a short timer; autoplay cannot fire until they settle.
fn wait_flow(now: Instant, loads_pending: bool, autoplay_deadline: Option<Instant>) -> ControlFlow {
    if loads_pending {
        return ControlFlow::WaitUntil(now + LOAD_POLL_INTERVAL);
    }
    match autoplay_deadline {
        Some(deadline) => ControlFlow::WaitUntil(deadline),
        None => ControlFlow::Wait,
    }
}

/// Opens the slideshow window and blocks until it is closed.
pub fn run_slideshow(config: RendererConfig) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;

    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(window_size)
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create slideshow window: {err}"))?;
    let window = Arc::new(window);

    let mut state = SlideshowState::new(window.clone(), &config)?;
    tracing::info!(
        images = config.controller.image_urls.len(),
        width = window_size.width,
        height = window_size.height,
        "slideshow window opened"
    );
    window.request_redraw();

    let mut fatal: Option<anyhow::Error> = None;
    let run_result = event_loop.run(|event, elwt| match event {
        Event::WindowEvent { window_id, event } if window_id == state.window.id() => match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                elwt.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(command) = command_for_key(&event) {
                    if !state.apply(command) {
                        elwt.exit();
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                state.resize(new_size);
            }
            WindowEvent::RedrawRequested => match state.render_frame() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    state.renderer.recover_surface();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    tracing::error!("surface out of memory; closing slideshow");
                    elwt.exit();
                }
                Err(wgpu::SurfaceError::Timeout) => {
                    tracing::warn!("surface timeout; retrying next frame");
                }
                Err(other) => {
                    tracing::warn!(error = ?other, "surface error; retrying next frame");
                }
            },
            _ => {}
        },
        Event::AboutToWait => {
            let now = state.clock.now();
            match state.advance(now) {
                Ok(true) => state.window.request_redraw(),
                Ok(false) => {}
                Err(err) => {
                    fatal = Some(err);
                    elwt.exit();
                    return;
                }
            }
            let flow = state.schedule(now);
            elwt.set_control_flow(flow);
        }
        _ => {}
    });

    run_result.map_err(|err| anyhow!("window event loop error: {err}"))?;
    match fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
