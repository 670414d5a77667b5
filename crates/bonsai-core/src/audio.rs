/// What the pointer disturbed when a rustle fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RustleKind {
    Branch,
    Leaf,
}

/// Discrete trigger for the audio consumer. Intensities are in [0, 1].
///
/// The scene appends these to a caller-owned list during `frame`; it never
/// knows whether sound is enabled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioCue {
    Rustle { kind: RustleKind, intensity: f32 },
    WaterRipple { intensity: f32 },
    StonePick,
    StoneDrop { intensity: f32 },
}

impl AudioCue {
    pub fn intensity(&self) -> f32 {
        match *self {
            AudioCue::Rustle { intensity, .. }
            | AudioCue::WaterRipple { intensity }
            | AudioCue::StoneDrop { intensity } => intensity,
            AudioCue::StonePick => 1.0,
        }
    }

    /// Stable short name, used by hosts that dispatch on strings.
    pub fn name(&self) -> &'static str {
        match self {
            AudioCue::Rustle {
                kind: RustleKind::Branch,
                ..
            } => "rustle-branch",
            AudioCue::Rustle {
                kind: RustleKind::Leaf,
                ..
            } => "rustle-leaf",
            AudioCue::WaterRipple { .. } => "water-ripple",
            AudioCue::StonePick => "stone-pick",
            AudioCue::StoneDrop { .. } => "stone-drop",
        }
    }
}
