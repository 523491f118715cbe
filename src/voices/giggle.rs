//! Giggle: a burst of quick rising chirps, each falling off at the end.
//!
//! Each chirp slides up exponentially while fading out, so the ear hears a
//! "hee" rather than a tone. The chirps get slightly higher and shorter.

use super::effect;
use crate::{
    dsp::{modulate::ToneEffectKind, oscillator::Waveform},
    sequencing::effect::SoundEffect,
};

pub fn giggle() -> Vec<SoundEffect> {
    [(520.0, 90.0), (580.0, 80.0), (640.0, 70.0), (700.0, 60.0)]
        .into_iter()
        .map(|(start, duration)| {
            effect(
                Waveform::Triangle,
                start,
                0.9,
                duration,
                12,
                &[
                    (ToneEffectKind::ExponentialSlide, [start * 1.6, 0.0]),
                    (ToneEffectKind::VolumeSlide, [0.2, 0.0]),
                ],
            )
        })
        .collect()
}
