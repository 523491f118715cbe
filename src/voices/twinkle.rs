//! Twinkle: high shimmering pings with tremolo, over a short noise sparkle.

use super::effect;
use crate::{
    dsp::{modulate::ToneEffectKind, oscillator::Waveform},
    sequencing::effect::SoundEffect,
};

pub fn twinkle() -> Vec<SoundEffect> {
    let ping = |frequency: f32| {
        effect(
            Waveform::Sine,
            frequency,
            0.7,
            180.0,
            18,
            &[
                (ToneEffectKind::Tremolo, [0.6, 3.0]),
                (ToneEffectKind::VolumeSlide, [0.1, 0.0]),
            ],
        )
    };

    vec![
        effect(Waveform::Noise, 8000.0, 0.15, 30.0, 1, &[]),
        ping(1568.0),
        ping(2093.0),
        ping(1760.0),
        ping(2637.0),
    ]
}
