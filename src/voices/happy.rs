//! Happy: a major arpeggio with a little vibrato on the top note.

use super::effect;
use crate::{
    dsp::{modulate::ToneEffectKind, oscillator::Waveform},
    sequencing::effect::SoundEffect,
};

pub fn happy() -> Vec<SoundEffect> {
    vec![
        effect(Waveform::Sine, 523.25, 0.8, 110.0, 1, &[]),
        effect(Waveform::Sine, 659.25, 0.8, 110.0, 1, &[]),
        effect(Waveform::Sine, 783.99, 0.8, 110.0, 1, &[]),
        effect(
            Waveform::Sine,
            1046.5,
            0.8,
            320.0,
            32,
            &[
                (ToneEffectKind::Vibrato, [12.0, 8.0]),
                (ToneEffectKind::VolumeSlide, [0.0, 0.0]),
            ],
        ),
    ]
}
