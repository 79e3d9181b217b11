//! The two-slot transition state machine.
//!
//! ```text
//!   Loading ──both slots loaded──▶ Idle ──next()──▶ Running
//!                                   ▲                  │
//!                                   └──run completes───┘
//!                                   └──cancel()────────┘
//! ```
//!
//! `Loading` only exists at start-up. Once `Idle` is reached, texture loads for
//! upcoming images happen in the background while the controller stays `Idle`;
//! a slot keeps showing its previous texture until the replacement arrives.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::{ConfigUpdate, ControllerConfig};
use crate::error::{LoadError, TransitionError};
use crate::fit::{CameraParams, FitMode, FrameFit, Viewport};
use crate::loader::{PendingTexture, TextureDimensions, TextureLoader};
use crate::params::{ShaderParams, SlotId};
use crate::pipeline::RenderPipeline;
use crate::progress::{Curve, ProgressEvent, ProgressRun};
use crate::style::{select_program, select_program_by_name, ParamName, ProgramSelection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the two initial textures.
    Loading,
    Idle,
    Running,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionState {
    pub phase: Phase,
    pub progress_start: f32,
    pub progress_end: f32,
    pub current_image_index: usize,
    pub next_image_index: usize,
    /// Parity of the bound progress currently rests at; selects the direction
    /// of the next run while direction toggling is enabled.
    pub alternation_index: usize,
}

impl TransitionState {
    fn initial() -> Self {
        Self {
            phase: Phase::Loading,
            progress_start: 0.0,
            progress_end: 0.0,
            current_image_index: 0,
            next_image_index: 1,
            alternation_index: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageSlot<T> {
    pub texture: Option<T>,
    /// Sequence index of the image the texture was loaded from.
    pub image_index: Option<usize>,
    pub fit: FrameFit,
}

impl<T> ImageSlot<T> {
    fn empty() -> Self {
        Self {
            texture: None,
            image_index: None,
            fit: FrameFit::default(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.texture.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransitionEvent {
    /// Both initial textures are loaded; emitted once.
    Ready,
    Progress(f32),
    Completed { current_image_index: usize },
    SlotLoaded { slot: SlotId, image_index: usize },
    LoadFailed { slot: SlotId, image_index: usize, error: LoadError },
}

struct PendingLoad<T> {
    image_index: usize,
    request: PendingTexture<T>,
}

struct ActiveRun {
    progress: ProgressRun,
    toggle: bool,
    origin_index: usize,
    origin_next: usize,
}

pub struct TransitionController<L: TextureLoader> {
    loader: L,
    config: ControllerConfig,
    viewport: Viewport,
    state: TransitionState,
    slots: [ImageSlot<L::Texture>; 2],
    pending: [Option<PendingLoad<L::Texture>>; 2],
    params: ShaderParams,
    run: Option<ActiveRun>,
}

impl<L: TextureLoader> TransitionController<L> {
    /// Validates `config` and requests the first two images. The controller
    /// stays in [`Phase::Loading`] until both arrive through [`Self::tick`].
    pub fn initialize(
        config: ControllerConfig,
        loader: L,
        viewport: Viewport,
    ) -> Result<Self, TransitionError> {
        config.validate()?;
        let selection = select_program(config.transition.style);
        let mut params = ShaderParams::new(selection);
        params.set_camera(CameraParams::for_viewport(viewport));

        let mut controller = Self {
            loader,
            config,
            viewport,
            state: TransitionState::initial(),
            slots: [ImageSlot::empty(), ImageSlot::empty()],
            pending: [None, None],
            params,
            run: None,
        };
        controller.apply_selection(selection);
        controller.request_load(SlotId::First, 0);
        controller.request_load(SlotId::Second, 1);
        info!(
            images = controller.config.image_urls.len(),
            style = %controller.config.transition.style,
            fit = %controller.config.fit_mode,
            "transition controller initialised"
        );
        Ok(controller)
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn params(&self) -> &ShaderParams {
        &self.params
    }

    pub fn slot(&self, slot: SlotId) -> &ImageSlot<L::Texture> {
        &self.slots[slot.index()]
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    pub fn is_loading(&self, slot: SlotId) -> bool {
        self.pending[slot.index()].is_some()
    }

    /// Starts the next transition. Returns `false` without touching any state
    /// unless the controller is idle.
    pub fn next(&mut self, now: Instant) -> bool {
        if self.state.phase != Phase::Idle {
            debug!(phase = ?self.state.phase, "ignoring next request while not idle");
            return false;
        }

        let toggle = self.config.transition.direction_toggle;
        let (from, to) = if toggle && self.state.alternation_index % 2 == 1 {
            (1.0, 0.0)
        } else {
            (0.0, 1.0)
        };

        let len = self.config.image_urls.len();
        let origin_index = self.state.current_image_index;
        let origin_next = self.state.next_image_index;
        self.state.current_image_index = (origin_index + 1) % len;
        self.state.next_image_index = (self.state.current_image_index + 1) % len;
        self.state.progress_start = from;
        self.state.progress_end = to;
        self.state.phase = Phase::Running;

        let duration = self.config.transition.duration;
        self.params.set(ParamName::Progress, from);
        self.run = Some(ActiveRun {
            progress: ProgressRun::start(Curve::Linear, from, to, duration, now),
            toggle,
            origin_index,
            origin_next,
        });
        debug!(
            from,
            to,
            current = self.state.current_image_index,
            next = self.state.next_image_index,
            duration_ms = duration.as_millis() as u64,
            "transition started"
        );
        true
    }

    /// Collects finished loads and advances the running transition.
    pub fn tick(&mut self, now: Instant) -> Vec<TransitionEvent> {
        let mut events = Vec::new();
        self.poll_loads(&mut events);

        if self.state.phase == Phase::Loading && self.slots.iter().all(ImageSlot::is_loaded) {
            self.state.phase = Phase::Idle;
            info!("initial textures loaded");
            events.push(TransitionEvent::Ready);
        }

        let sampled = self
            .run
            .as_mut()
            .and_then(|run| run.progress.sample(now));
        match sampled {
            Some(ProgressEvent::Value(value)) => {
                self.params.set(ParamName::Progress, value);
                events.push(TransitionEvent::Progress(value));
            }
            Some(ProgressEvent::Complete(end)) => {
                self.params.set(ParamName::Progress, end);
                events.push(TransitionEvent::Progress(end));
                self.finish_run(end);
                events.push(TransitionEvent::Completed {
                    current_image_index: self.state.current_image_index,
                });
            }
            None => {}
        }
        events
    }

    /// Drops the running transition. Progress stays where it was and the
    /// image indices roll back. Returns whether a run was cancelled.
    pub fn cancel(&mut self) -> bool {
        let Some(mut run) = self.run.take() else {
            return false;
        };
        run.progress.cancel();
        self.state.current_image_index = run.origin_index;
        self.state.next_image_index = run.origin_next;
        self.state.phase = Phase::Idle;
        debug!(progress = self.params.progress(), "transition cancelled");
        true
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        for slot in SlotId::BOTH {
            self.refit(slot);
        }
        self.params.set_camera(CameraParams::for_viewport(self.viewport));
        debug!(width = self.viewport.width, height = self.viewport.height, "viewport resized");
    }

    /// Switches the transition program. Unknown names are logged and ignored.
    pub fn set_transition_style(&mut self, name: &str) -> bool {
        match select_program_by_name(name) {
            Some(selection) => {
                self.config.transition.style = selection.style;
                self.apply_selection(selection);
                debug!(style = %selection.style, "transition style selected");
                true
            }
            None => {
                warn!(
                    style = name,
                    "unknown transition type; keeping {}",
                    self.config.transition.style
                );
                false
            }
        }
    }

    pub fn set_fit_mode(&mut self, mode: FitMode) {
        if self.config.fit_mode == mode {
            return;
        }
        self.config.fit_mode = mode;
        for slot in SlotId::BOTH {
            self.refit(slot);
        }
        debug!(fit = %mode, "fit mode changed");
    }

    /// Applies a partial reconfiguration. Numeric parameters take effect
    /// immediately; duration and direction toggling apply from the next run.
    pub fn update_config(&mut self, update: ConfigUpdate) -> Result<(), TransitionError> {
        if let Some(urls) = update.image_urls {
            let candidate = ControllerConfig {
                image_urls: urls,
                ..self.config.clone()
            };
            candidate.validate()?;
            let len = candidate.image_urls.len();
            self.config.image_urls = candidate.image_urls;
            (self.state.current_image_index, self.state.next_image_index) = clamp_indices(
                self.state.current_image_index,
                self.state.next_image_index,
                len,
            );
            if let Some(run) = self.run.as_mut() {
                // cancel() restores these, so they must stay inside the new list.
                (run.origin_index, run.origin_next) =
                    clamp_indices(run.origin_index, run.origin_next, len);
            }
            debug!(images = len, "image sequence replaced");
        }

        if let Some(name) = update.image_size {
            match FitMode::from_name(&name) {
                Some(mode) => self.set_fit_mode(mode),
                None => warn!(
                    image_size = %name,
                    "unknown image size; keeping {}",
                    self.config.fit_mode
                ),
            }
        }
        if let Some(name) = update.transition_type {
            self.set_transition_style(&name);
        }
        if let Some(toggle) = update.toggle_direction {
            self.config.transition.direction_toggle = toggle;
        }
        if let Some(duration) = update.duration {
            self.config.transition.duration = duration;
        }

        let numeric = [
            (ParamName::Intensity, update.intensity),
            (ParamName::ScaleX, update.scale_x),
            (ParamName::ScaleY, update.scale_y),
            (ParamName::Width, update.width),
        ];
        for (name, value) in numeric {
            if let Some(value) = value {
                self.set_numeric(name, value);
            }
        }
        Ok(())
    }

    /// Flushes dirty shader state into `pipeline` and draws a frame. Nothing
    /// is drawn before the initial textures are loaded; returns whether a
    /// frame was drawn.
    pub fn present<P>(&mut self, pipeline: &mut P) -> Result<bool, P::Error>
    where
        P: RenderPipeline<Texture = L::Texture>,
    {
        if self.state.phase == Phase::Loading {
            return Ok(false);
        }
        let changes = self.params.take_changes();
        if let Some(selection) = changes.relink.as_ref() {
            pipeline.set_program(selection);
        }
        for (name, value) in changes.values {
            pipeline.set_parameter(name, value);
        }
        for slot in changes.slots {
            let image = &self.slots[slot.index()];
            pipeline.set_slot(slot, image.texture.as_ref(), image.fit);
        }
        if let Some(camera) = changes.camera.as_ref() {
            pipeline.set_camera(camera);
        }
        pipeline.draw()?;
        Ok(true)
    }

    fn set_numeric(&mut self, name: ParamName, value: f32) {
        let transition = &mut self.config.transition;
        match name {
            ParamName::Intensity => transition.intensity = value,
            ParamName::ScaleX => transition.scale_x = value,
            ParamName::ScaleY => transition.scale_y = value,
            ParamName::Width => transition.width = value,
            ParamName::Progress => return,
        }
        self.params.set(name, value);
    }

    fn apply_selection(&mut self, selection: ProgramSelection) {
        self.params.apply_selection(selection);
        for &name in selection.required {
            if let Some(value) = self.config.transition.value(name) {
                self.params.set(name, value);
            }
        }
    }

    fn finish_run(&mut self, end: f32) {
        let Some(run) = self.run.take() else {
            return;
        };
        self.state.phase = Phase::Idle;
        let next = self.state.next_image_index;

        if run.toggle {
            let (slot, parity) = if end >= 0.5 {
                (SlotId::First, 1)
            } else {
                (SlotId::Second, 0)
            };
            self.state.alternation_index = parity;
            self.request_load(slot, next);
        } else {
            self.pending[SlotId::First.index()] = None;
            self.slots[SlotId::First.index()] = self.slots[SlotId::Second.index()].clone();
            self.refit(SlotId::First);
            self.params.touch_slot(SlotId::First);
            self.params.set(ParamName::Progress, 0.0);
            self.state.alternation_index = 0;
            self.request_load(SlotId::Second, next);
        }
        debug!(
            current = self.state.current_image_index,
            next,
            "transition completed"
        );
    }

    fn request_load(&mut self, slot: SlotId, image_index: usize) {
        let source = self.config.image_urls[image_index].clone();
        let request = self.loader.load(&source);
        debug!(slot = slot.index(), image_index, source = %source, "texture requested");
        let previous = self.pending[slot.index()].replace(PendingLoad {
            image_index,
            request,
        });
        if let Some(previous) = previous {
            debug!(
                slot = slot.index(),
                image_index = previous.image_index,
                "dropping superseded texture request"
            );
        }
    }

    fn poll_loads(&mut self, events: &mut Vec<TransitionEvent>) {
        for slot in SlotId::BOTH {
            let Some(pending) = self.pending[slot.index()].as_mut() else {
                continue;
            };
            let image_index = pending.image_index;
            match pending.request.poll() {
                Ok(None) => {}
                Ok(Some(texture)) => {
                    self.pending[slot.index()] = None;
                    self.install(slot, image_index, texture);
                    events.push(TransitionEvent::SlotLoaded { slot, image_index });
                }
                Err(error) => {
                    self.pending[slot.index()] = None;
                    warn!(
                        slot = slot.index(),
                        image_index,
                        error = %error,
                        "texture load failed; keeping previous slot content"
                    );
                    events.push(TransitionEvent::LoadFailed {
                        slot,
                        image_index,
                        error,
                    });
                }
            }
        }
    }

    fn install(&mut self, slot: SlotId, image_index: usize, texture: L::Texture) {
        let (width, height) = texture.dimensions();
        let fit = FrameFit::for_image(width, height, self.viewport, self.config.fit_mode);
        let entry = &mut self.slots[slot.index()];
        entry.texture = Some(texture);
        entry.image_index = Some(image_index);
        entry.fit = fit;
        self.params.set_resolution(slot, fit);
        debug!(slot = slot.index(), image_index, width, height, "texture installed");
    }

    fn refit(&mut self, slot: SlotId) {
        let entry = &mut self.slots[slot.index()];
        let Some(texture) = entry.texture.as_ref() else {
            return;
        };
        let (width, height) = texture.dimensions();
        entry.fit = FrameFit::for_image(width, height, self.viewport, self.config.fit_mode);
        self.params.set_resolution(slot, entry.fit);
    }
}

/// Pulls a `(current, next)` pair into a sequence of `len` images.
fn clamp_indices(current: usize, next: usize, len: usize) -> (usize, usize) {
    let current = current.min(len - 1);
    let next = if next >= len { (current + 1) % len } else { next };
    (current, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Tex {
        name: String,
        size: (u32, u32),
    }

    impl TextureDimensions for Tex {
        fn dimensions(&self) -> (u32, u32) {
            self.size
        }
    }

    #[derive(Default)]
    struct MapLoader {
        sizes: HashMap<String, (u32, u32)>,
        requests: Vec<String>,
    }

    impl TextureLoader for MapLoader {
        type Texture = Tex;

        fn load(&mut self, source: &str) -> PendingTexture<Tex> {
            self.requests.push(source.to_string());
            match self.sizes.get(source) {
                Some(size) => PendingTexture::ready(Ok(Tex {
                    name: source.to_string(),
                    size: *size,
                })),
                None => PendingTexture::ready(Err(LoadError::failed(source, "missing"))),
            }
        }
    }

    fn loader(names: &[&str]) -> MapLoader {
        MapLoader {
            sizes: names.iter().map(|n| (n.to_string(), (100, 100))).collect(),
            requests: Vec::new(),
        }
    }

    /// Records the slot bindings flushed by `present`.
    #[derive(Default)]
    struct SlotLog {
        slots: Vec<(SlotId, FrameFit)>,
    }

    impl RenderPipeline for SlotLog {
        type Texture = Tex;
        type Error = std::convert::Infallible;

        fn set_program(&mut self, _selection: &ProgramSelection) {}

        fn set_parameter(&mut self, _name: ParamName, _value: f32) {}

        fn set_slot(&mut self, slot: SlotId, _texture: Option<&Tex>, fit: FrameFit) {
            self.slots.push((slot, fit));
        }

        fn draw(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn flushed_slots(ctl: &mut TransitionController<MapLoader>) -> Vec<(SlotId, FrameFit)> {
        let mut log = SlotLog::default();
        assert_eq!(ctl.present(&mut log), Ok(true));
        log.slots
    }

    /// Runs `next()` to completion `count` times, returning the final timestamp.
    fn complete_runs(
        ctl: &mut TransitionController<MapLoader>,
        mut now: Instant,
        count: usize,
    ) -> Instant {
        for _ in 0..count {
            assert!(ctl.next(now));
            now += ctl.config().transition.duration + Duration::from_millis(1);
            ctl.tick(now);
            assert_eq!(ctl.phase(), Phase::Idle);
        }
        now
    }

    fn controller(names: &[&str]) -> TransitionController<MapLoader> {
        let config = ControllerConfig::new(names.iter().map(|n| n.to_string()).collect());
        TransitionController::initialize(config, loader(names), Viewport::new(200, 100))
            .expect("controller")
    }

    #[test]
    fn rejects_single_image() {
        let config = ControllerConfig::new(vec!["a".into()]);
        let result = TransitionController::initialize(config, loader(&["a"]), Viewport::new(1, 1));
        assert!(matches!(result, Err(TransitionError::Configuration(_))));
    }

    #[test]
    fn next_is_ignored_while_loading() {
        let mut ctl = controller(&["a", "b"]);
        assert_eq!(ctl.phase(), Phase::Loading);
        assert!(!ctl.next(Instant::now()));
        assert_eq!(ctl.state().current_image_index, 0);
    }

    #[test]
    fn ready_after_both_slots_load() {
        let mut ctl = controller(&["a", "b"]);
        let events = ctl.tick(Instant::now());
        assert!(events.contains(&TransitionEvent::Ready));
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(ctl.slot(SlotId::Second).image_index, Some(1));
    }

    #[test]
    fn failed_initial_load_stays_loading() {
        let config = ControllerConfig::new(vec!["a".into(), "missing".into()]);
        let mut ctl =
            TransitionController::initialize(config, loader(&["a"]), Viewport::new(10, 10))
                .expect("controller");
        let events = ctl.tick(Instant::now());
        assert!(events
            .iter()
            .any(|e| matches!(e, TransitionEvent::LoadFailed { slot: SlotId::Second, .. })));
        assert_eq!(ctl.phase(), Phase::Loading);
    }

    #[test]
    fn cancel_keeps_progress_and_rolls_back_indices() {
        let start = Instant::now();
        let mut ctl = controller(&["a", "b", "c"]);
        ctl.tick(start);
        assert!(ctl.next(start));
        ctl.tick(start + Duration::from_millis(500));
        assert!(ctl.cancel());
        assert!(!ctl.cancel());
        assert_eq!(ctl.phase(), Phase::Idle);
        assert_eq!(ctl.state().current_image_index, 0);
        assert!((ctl.params().progress() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn resize_refits_without_touching_state() {
        let start = Instant::now();
        let mut ctl = controller(&["a", "b"]);
        ctl.tick(start);
        ctl.next(start);
        let before = ctl.state().clone();
        ctl.on_resize(100, 200);
        assert_eq!(ctl.state(), &before);
        let fit = ctl.slot(SlotId::First).fit;
        assert_eq!((fit.viewport_w, fit.viewport_h), (100.0, 200.0));
        assert!((fit.scale_a - 0.5).abs() < 1e-5);
        assert!((ctl.params().camera().aspect - 0.5).abs() < 1e-5);
    }

    #[test]
    fn unknown_names_are_ignored() {
        let mut ctl = controller(&["a", "b"]);
        let program = ctl.params().program();
        assert!(!ctl.set_transition_style("swirl"));
        assert_eq!(ctl.params().program(), program);

        ctl.update_config(ConfigUpdate {
            image_size: Some("stretch".into()),
            ..ConfigUpdate::default()
        })
        .expect("update");
        assert_eq!(ctl.config().fit_mode, FitMode::Cover);
    }

    #[test]
    fn image_size_update_refits_both_slots() {
        let mut ctl = controller(&["a", "b"]);
        ctl.tick(Instant::now());
        flushed_slots(&mut ctl);
        let cover = ctl.slot(SlotId::First).fit;
        assert!((cover.scale_a - 1.0).abs() < 1e-5);
        assert!((cover.scale_b - 0.5).abs() < 1e-5);

        ctl.update_config(ConfigUpdate {
            image_size: Some("contain".into()),
            ..ConfigUpdate::default()
        })
        .expect("update");

        assert_eq!(ctl.config().fit_mode, FitMode::Contain);
        for slot in SlotId::BOTH {
            let fit = ctl.slot(slot).fit;
            assert!((fit.scale_a - 2.0).abs() < 1e-5, "{slot:?}: {fit:?}");
            assert!((fit.scale_b - 1.0).abs() < 1e-5, "{slot:?}: {fit:?}");
        }
        let flushed = flushed_slots(&mut ctl);
        assert_eq!(flushed.len(), 2);
        assert!(flushed
            .iter()
            .all(|(slot, fit)| *fit == ctl.slot(*slot).fit));
    }

    #[test]
    fn set_fit_mode_refits_only_on_change() {
        let mut ctl = controller(&["a", "b"]);
        ctl.tick(Instant::now());
        flushed_slots(&mut ctl);

        ctl.set_fit_mode(FitMode::Cover);
        assert!(flushed_slots(&mut ctl).is_empty());

        ctl.set_fit_mode(FitMode::Contain);
        let flushed = flushed_slots(&mut ctl);
        assert_eq!(flushed.len(), 2);
        let fit = ctl.slot(SlotId::Second).fit;
        assert!((fit.scale_a - 2.0).abs() < 1e-5);
        assert!((fit.scale_b - 1.0).abs() < 1e-5);
    }

    #[test]
    fn replacing_images_clamps_indices() {
        let start = Instant::now();
        let mut ctl = controller(&["a", "b", "c"]);
        ctl.tick(start);
        complete_runs(&mut ctl, start, 1);
        assert_eq!(ctl.state().current_image_index, 1);
        assert_eq!(ctl.state().next_image_index, 2);

        ctl.update_config(ConfigUpdate {
            image_urls: Some(vec!["a".into(), "b".into()]),
            ..ConfigUpdate::default()
        })
        .expect("update");
        assert_eq!(ctl.state().current_image_index, 1);
        assert_eq!(ctl.state().next_image_index, 0);
    }

    #[test]
    fn cancel_after_shrinking_images_stays_in_range() {
        let start = Instant::now();
        let mut ctl = controller(&["a", "b", "c", "d"]);
        ctl.tick(start);
        let now = complete_runs(&mut ctl, start, 2);
        assert!(ctl.next(now));
        assert_eq!(ctl.state().current_image_index, 3);

        ctl.update_config(ConfigUpdate {
            image_urls: Some(vec!["a".into(), "b".into()]),
            ..ConfigUpdate::default()
        })
        .expect("update");
        assert!(ctl.cancel());

        let len = ctl.config().image_urls.len();
        assert!(ctl.state().current_image_index < len);
        assert!(ctl.state().next_image_index < len);
        assert_eq!(ctl.state().current_image_index, 1);
        assert_eq!(ctl.state().next_image_index, 0);
    }

    #[test]
    fn update_rejects_short_image_list() {
        let mut ctl = controller(&["a", "b"]);
        let err = ctl
            .update_config(ConfigUpdate {
                image_urls: Some(vec!["only".into()]),
                ..ConfigUpdate::default()
            })
            .unwrap_err();
        assert!(matches!(err, TransitionError::Configuration(_)));
        assert_eq!(ctl.config().image_urls.len(), 2);
    }

    #[test]
    fn numeric_update_applies_immediately() {
        let mut ctl = controller(&["a", "b"]);
        ctl.update_config(ConfigUpdate {
            intensity: Some(12.0),
            ..ConfigUpdate::default()
        })
        .expect("update");
        assert_eq!(ctl.params().get(ParamName::Intensity), 12.0);
        assert_eq!(ctl.config().transition.intensity, 12.0);
    }

    #[test]
    fn selecting_noise_pushes_configured_values() {
        let mut ctl = controller(&["a", "b"]);
        assert_eq!(ctl.params().get(ParamName::Intensity), 40.0);
        assert_eq!(ctl.params().get(ParamName::ScaleX), 40.0);
        assert!(ctl.set_transition_style("noise"));
        assert_eq!(ctl.params().get(ParamName::ScaleX), 50.0);
        assert_eq!(ctl.params().get(ParamName::ScaleY), 50.0);
        assert!(ctl.params().needs_relink());
    }
}
