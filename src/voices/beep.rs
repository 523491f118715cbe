//! A plain notification beep: two short square blips.

use super::effect;
use crate::{dsp::oscillator::Waveform, sequencing::effect::SoundEffect};

pub fn beep() -> Vec<SoundEffect> {
    vec![
        effect(Waveform::Square, 1000.0, 0.6, 80.0, 1, &[]),
        effect(Waveform::Silence, 0.0, 0.0, 40.0, 1, &[]),
        effect(Waveform::Square, 1000.0, 0.6, 80.0, 1, &[]),
    ]
}
