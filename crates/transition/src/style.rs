//! Transition styles and the shader parameters each one consumes.

use std::fmt;

/// User-facing transition style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionStyle {
    #[default]
    Split,
    Fade,
    Noise,
}

impl TransitionStyle {
    pub const ALL: [TransitionStyle; 3] = [
        TransitionStyle::Split,
        TransitionStyle::Fade,
        TransitionStyle::Noise,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "split" => Some(TransitionStyle::Split),
            "fade" => Some(TransitionStyle::Fade),
            "noise" => Some(TransitionStyle::Noise),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransitionStyle::Split => "split",
            TransitionStyle::Fade => "fade",
            TransitionStyle::Noise => "noise",
        }
    }
}

impl fmt::Display for TransitionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque selector for a compiled fragment program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramVariant {
    Split,
    Fade,
    Noise,
}

impl ProgramVariant {
    pub fn label(self) -> &'static str {
        match self {
            ProgramVariant::Split => "transition-split",
            ProgramVariant::Fade => "transition-fade",
            ProgramVariant::Noise => "transition-noise",
        }
    }
}

/// Scalar shader parameters understood by the transition programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamName {
    Progress,
    Intensity,
    ScaleX,
    ScaleY,
    Width,
}

impl ParamName {
    pub const COUNT: usize = 5;
    pub const ALL: [ParamName; Self::COUNT] = [
        ParamName::Progress,
        ParamName::Intensity,
        ParamName::ScaleX,
        ParamName::ScaleY,
        ParamName::Width,
    ];

    pub fn index(self) -> usize {
        match self {
            ParamName::Progress => 0,
            ParamName::Intensity => 1,
            ParamName::ScaleX => 2,
            ParamName::ScaleY => 3,
            ParamName::Width => 4,
        }
    }

    /// Name of the matching member in the shader uniform block.
    pub fn uniform_name(self) -> &'static str {
        match self {
            ParamName::Progress => "progress",
            ParamName::Intensity => "intensity",
            ParamName::ScaleX => "scaleX",
            ParamName::ScaleY => "scaleY",
            ParamName::Width => "width",
        }
    }
}

/// Program plus the style-specific parameters it reads besides `progress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramSelection {
    pub style: TransitionStyle,
    pub variant: ProgramVariant,
    pub required: &'static [ParamName],
}

impl ProgramSelection {
    pub fn uses(&self, name: ParamName) -> bool {
        name == ParamName::Progress || self.required.contains(&name)
    }
}

pub fn select_program(style: TransitionStyle) -> ProgramSelection {
    let (variant, required): (ProgramVariant, &'static [ParamName]) = match style {
        TransitionStyle::Split => (ProgramVariant::Split, &[ParamName::Intensity]),
        TransitionStyle::Fade => (ProgramVariant::Fade, &[]),
        TransitionStyle::Noise => (
            ProgramVariant::Noise,
            &[ParamName::ScaleX, ParamName::ScaleY, ParamName::Width],
        ),
    };
    ProgramSelection {
        style,
        variant,
        required,
    }
}

pub fn select_program_by_name(name: &str) -> Option<ProgramSelection> {
    TransitionStyle::from_name(name).map(select_program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_requires_scale_and_width() {
        let selection = select_program(TransitionStyle::Noise);
        assert_eq!(selection.variant, ProgramVariant::Noise);
        assert_eq!(
            selection.required,
            &[ParamName::ScaleX, ParamName::ScaleY, ParamName::Width]
        );
        assert!(!selection.uses(ParamName::Intensity));
    }

    #[test]
    fn split_requires_intensity_only() {
        let selection = select_program(TransitionStyle::Split);
        assert_eq!(selection.required, &[ParamName::Intensity]);
        assert!(selection.uses(ParamName::Progress));
    }

    #[test]
    fn fade_requires_nothing_beyond_progress() {
        let selection = select_program(TransitionStyle::Fade);
        assert!(selection.required.is_empty());
        assert!(selection.uses(ParamName::Progress));
        assert!(!selection.uses(ParamName::Width));
    }

    #[test]
    fn unknown_style_name_is_rejected() {
        assert!(select_program_by_name("wipe").is_none());
        assert_eq!(
            select_program_by_name("NOISE").map(|s| s.style),
            Some(TransitionStyle::Noise)
        );
    }

    #[test]
    fn param_indices_are_dense() {
        for (expected, name) in ParamName::ALL.iter().enumerate() {
            assert_eq!(name.index(), expected);
        }
    }
}
