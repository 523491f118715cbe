//! Shared state types for UI communication
//!
//! Static data is handed over once at startup; the audio thread only ever
//! sends `Copy` snapshots.

use emoji_synth::Synthesizer;

/// Static state known before the stream starts (can allocate)
#[derive(Clone)]
pub struct UiStateInit {
    pub sample_rate: u32,
    pub channels: usize,
    /// Preset names with their number of sound effects
    pub presets: Vec<(&'static str, usize)>,
}

impl UiStateInit {
    pub fn new(sample_rate: u32, channels: usize, presets: Vec<(&'static str, usize)>) -> Self {
        Self {
            sample_rate,
            channels,
            presets,
        }
    }
}

/// Render state snapshot sent from the audio callback (allocation-free)
#[derive(Clone, Copy, Debug, Default)]
pub struct UiStateUpdate {
    pub is_active: bool,
    /// Index of the sound effect being played
    pub effect_index: usize,
    pub frequency: f32,
    pub volume: f32,
    pub step: usize,
    pub samples_written: usize,
    pub samples_required: usize,
    pub or_mask: u16,
}

impl UiStateUpdate {
    pub fn capture(synth: &Synthesizer) -> Self {
        let Some(effect_index) = synth.current_index() else {
            return Self {
                or_mask: synth.or_mask(),
                ..Self::default()
            };
        };

        let render = synth.render_state();
        Self {
            is_active: true,
            effect_index,
            frequency: render.frequency(),
            volume: render.volume(),
            step: render.step(),
            samples_written: render.samples_written(),
            samples_required: render.samples_required(),
            or_mask: synth.or_mask(),
        }
    }

    /// Progress through the current sound effect, 0.0 - 1.0
    pub fn progress(&self) -> f64 {
        if self.samples_required == 0 {
            return 0.0;
        }
        self.samples_written as f64 / self.samples_required as f64
    }
}
