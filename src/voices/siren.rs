//! Siren: a square wave sweeping up and down twice.

use super::effect;
use crate::{
    dsp::{modulate::ToneEffectKind, oscillator::Waveform},
    sequencing::effect::SoundEffect,
};

pub fn siren() -> Vec<SoundEffect> {
    let up = effect(
        Waveform::Square,
        600.0,
        0.5,
        400.0,
        40,
        &[(ToneEffectKind::FrequencySlide, [1200.0, 0.0])],
    );
    let down = effect(
        Waveform::Square,
        1200.0,
        0.5,
        400.0,
        40,
        &[(ToneEffectKind::FrequencySlide, [600.0, 0.0])],
    );
    vec![up.clone(), down.clone(), up, down]
}
