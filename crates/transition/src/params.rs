//! Shader parameter block with dirty tracking.
//!
//! The controller is the only writer; the render flush in
//! [`crate::TransitionController::present`] drains the accumulated changes via
//! [`ShaderParams::take_changes`].

use crate::fit::{CameraParams, FrameFit};
use crate::style::{ParamName, ProgramSelection};

/// One of the two texture slots the programs blend between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    First,
    Second,
}

impl SlotId {
    pub const BOTH: [SlotId; 2] = [SlotId::First, SlotId::Second];

    pub fn index(self) -> usize {
        match self {
            SlotId::First => 0,
            SlotId::Second => 1,
        }
    }
}

/// Everything that changed since the previous flush.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamChanges {
    /// Set when the program variant must be (re)bound before drawing.
    pub relink: Option<ProgramSelection>,
    pub values: Vec<(ParamName, f32)>,
    pub slots: Vec<SlotId>,
    pub camera: Option<CameraParams>,
}

impl ParamChanges {
    pub fn is_empty(&self) -> bool {
        self.relink.is_none()
            && self.values.is_empty()
            && self.slots.is_empty()
            && self.camera.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct ShaderParams {
    program: ProgramSelection,
    values: [f32; ParamName::COUNT],
    resolution: [FrameFit; 2],
    camera: CameraParams,
    needs_relink: bool,
    dirty_values: [bool; ParamName::COUNT],
    dirty_slots: [bool; 2],
    dirty_camera: bool,
}

impl ShaderParams {
    /// Initial block: `progress = 0`, `intensity = 50`, `scale = 40`, `width = 0.5`.
    pub fn new(program: ProgramSelection) -> Self {
        let mut values = [0.0; ParamName::COUNT];
        values[ParamName::Progress.index()] = 0.0;
        values[ParamName::Intensity.index()] = 50.0;
        values[ParamName::ScaleX.index()] = 40.0;
        values[ParamName::ScaleY.index()] = 40.0;
        values[ParamName::Width.index()] = 0.5;
        Self {
            program,
            values,
            resolution: [FrameFit::default(); 2],
            camera: CameraParams::default(),
            needs_relink: true,
            dirty_values: [true; ParamName::COUNT],
            dirty_slots: [true; 2],
            dirty_camera: true,
        }
    }

    pub fn program(&self) -> ProgramSelection {
        self.program
    }

    pub fn needs_relink(&self) -> bool {
        self.needs_relink
    }

    pub fn get(&self, name: ParamName) -> f32 {
        self.values[name.index()]
    }

    pub fn progress(&self) -> f32 {
        self.get(ParamName::Progress)
    }

    pub fn set(&mut self, name: ParamName, value: f32) {
        let slot = &mut self.values[name.index()];
        if *slot != value {
            *slot = value;
            self.dirty_values[name.index()] = true;
        }
    }

    /// Switches program and re-sends every parameter it reads.
    pub fn apply_selection(&mut self, selection: ProgramSelection) {
        self.program = selection;
        self.needs_relink = true;
        for name in ParamName::ALL {
            if selection.uses(name) {
                self.dirty_values[name.index()] = true;
            }
        }
        self.dirty_slots = [true; 2];
    }

    pub fn resolution(&self, slot: SlotId) -> FrameFit {
        self.resolution[slot.index()]
    }

    pub fn set_resolution(&mut self, slot: SlotId, fit: FrameFit) {
        self.resolution[slot.index()] = fit;
        self.dirty_slots[slot.index()] = true;
    }

    /// Marks a slot for rebinding after its texture was replaced.
    pub fn touch_slot(&mut self, slot: SlotId) {
        self.dirty_slots[slot.index()] = true;
    }

    pub fn camera(&self) -> CameraParams {
        self.camera
    }

    pub fn set_camera(&mut self, camera: CameraParams) {
        if self.camera != camera {
            self.camera = camera;
            self.dirty_camera = true;
        }
    }

    /// Drains pending changes. Parameters the active program ignores stay
    /// dirty so they are sent once a program that reads them is selected.
    pub fn take_changes(&mut self) -> ParamChanges {
        let mut changes = ParamChanges::default();
        if self.needs_relink {
            changes.relink = Some(self.program);
            self.needs_relink = false;
        }
        for name in ParamName::ALL {
            let index = name.index();
            if self.dirty_values[index] && self.program.uses(name) {
                changes.values.push((name, self.values[index]));
                self.dirty_values[index] = false;
            }
        }
        for slot in SlotId::BOTH {
            if self.dirty_slots[slot.index()] {
                changes.slots.push(slot);
                self.dirty_slots[slot.index()] = false;
            }
        }
        if self.dirty_camera {
            changes.camera = Some(self.camera);
            self.dirty_camera = false;
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{select_program, TransitionStyle};

    #[test]
    fn initial_block_matches_shader_defaults() {
        let params = ShaderParams::new(select_program(TransitionStyle::Split));
        assert_eq!(params.get(ParamName::Progress), 0.0);
        assert_eq!(params.get(ParamName::Intensity), 50.0);
        assert_eq!(params.get(ParamName::ScaleX), 40.0);
        assert_eq!(params.get(ParamName::ScaleY), 40.0);
        assert_eq!(params.get(ParamName::Width), 0.5);
        assert!(params.needs_relink());
    }

    #[test]
    fn first_flush_relinks_and_sends_only_used_values() {
        let mut params = ShaderParams::new(select_program(TransitionStyle::Split));
        let changes = params.take_changes();
        assert!(changes.relink.is_some());
        let names: Vec<_> = changes.values.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec![ParamName::Progress, ParamName::Intensity]);
        assert_eq!(changes.slots, vec![SlotId::First, SlotId::Second]);
        assert!(changes.camera.is_some());

        assert!(params.take_changes().is_empty());
    }

    #[test]
    fn unused_values_are_held_until_program_reads_them() {
        let mut params = ShaderParams::new(select_program(TransitionStyle::Fade));
        let _ = params.take_changes();
        params.set(ParamName::Width, 0.8);
        assert!(params.take_changes().is_empty());

        params.apply_selection(select_program(TransitionStyle::Noise));
        let changes = params.take_changes();
        assert!(changes.values.contains(&(ParamName::Width, 0.8)));
        assert!(changes.values.contains(&(ParamName::ScaleX, 40.0)));
    }

    #[test]
    fn unchanged_values_do_not_mark_dirty() {
        let mut params = ShaderParams::new(select_program(TransitionStyle::Fade));
        let _ = params.take_changes();
        params.set(ParamName::Progress, 0.0);
        assert!(params.take_changes().is_empty());
        params.set(ParamName::Progress, 0.25);
        assert_eq!(params.take_changes().values, vec![(ParamName::Progress, 0.25)]);
    }
}
