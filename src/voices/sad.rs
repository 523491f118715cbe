//! Sad: a slow sliding "waah" down a minor third, then a sigh.

use super::effect;
use crate::{
    dsp::{modulate::ToneEffectKind, oscillator::Waveform},
    sequencing::effect::SoundEffect,
};

pub fn sad() -> Vec<SoundEffect> {
    vec![
        effect(
            Waveform::Sawtooth,
            392.0,
            0.6,
            450.0,
            24,
            &[
                (ToneEffectKind::FrequencySlide, [329.63, 0.0]),
                (ToneEffectKind::Vibrato, [4.0, 6.0]),
            ],
        ),
        effect(
            Waveform::Sawtooth,
            329.63,
            0.6,
            700.0,
            32,
            &[
                (ToneEffectKind::ExponentialSlide, [220.0, 0.0]),
                (ToneEffectKind::VolumeSlide, [0.0, 0.0]),
            ],
        ),
    ]
}
