//! Ready-made sound emojis.
//!
//! Each preset is a short sequence of sound effects. Play one as-is, or
//! use it as a starting point for your own.
//!
//! # Example
//!
//! ```
//! use emoji_synth::{voices, Synthesizer};
//!
//! let mut synth = Synthesizer::default();
//! synth.play(voices::giggle()).unwrap();
//! assert!(!synth.pull().is_empty());
//! ```

mod beep;
mod giggle;
mod happy;
mod sad;
mod siren;
mod twinkle;

pub use beep::beep;
pub use giggle::giggle;
pub use happy::happy;
pub use sad::sad;
pub use siren::siren;
pub use twinkle::twinkle;

use crate::{
    dsp::{
        modulate::{ToneEffectBinding, ToneEffectKind},
        oscillator::Waveform,
    },
    sequencing::effect::{SoundEffect, ToneBinding},
    MAX_TONE_EFFECTS,
};

/// Every preset, with its display name.
pub fn all() -> Vec<(&'static str, Vec<SoundEffect>)> {
    vec![
        ("giggle", giggle()),
        ("happy", happy()),
        ("sad", sad()),
        ("siren", siren()),
        ("twinkle", twinkle()),
        ("beep", beep()),
    ]
}

/// Assemble one preset effect. Presets are constants, so they are built
/// directly rather than through the validating builder.
fn effect(
    waveform: Waveform,
    frequency: f32,
    volume: f32,
    duration: f32,
    steps: u32,
    effects: &[(ToneEffectKind, [f32; 2])],
) -> SoundEffect {
    let mut slots: [Option<ToneEffectBinding>; MAX_TONE_EFFECTS] = Default::default();
    for (slot, (kind, parameters)) in slots.iter_mut().zip(effects) {
        *slot = Some(ToneEffectBinding::new(kind.clone(), *parameters));
    }

    SoundEffect {
        frequency,
        volume,
        duration,
        tone: ToneBinding::from(waveform),
        effects: slots,
        steps,
    }
}
