use std::{f32::consts::TAU, fmt, sync::Arc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TONE_WIDTH;

/*
Tone Prints
===========

A tone print is the raw waveform of a sound effect. It is a pure function
of a phase position inside a fixed cyclic domain:

    position   0 ............................. TONE_WIDTH - 1
    amplitude  0 ............................. max_amplitude

The synthesizer walks the position forward at a rate proportional to the
instantaneous frequency (see `dsp/phase.rs`) and asks the tone print for
one raw amplitude per output sample. Volume scaling, clipping and the
OR-mask are applied afterwards by the scheduler, so a tone print never
needs to know about the output format.

Vocabulary
----------

  position      Integer index into the cyclic domain [0, TONE_WIDTH).

  raw amplitude Unsigned value in [0, max_amplitude]. Unsigned because the
                embedded DACs this targets take offset-binary samples:
                silence is not "0" but "whatever the waveform says".

  parameter     One opaque float bound next to the tone print inside a
                sound effect. Square uses it as the duty cycle, Noise as a
                seed, the others ignore it.


Built-in Shapes (TONE_WIDTH = 1024, max = 1023)
-----------------------------------------------

    Sine      (sin(2π p / W) + 1) / 2 · max        smooth, pure
    Sawtooth  p                                    bright, buzzy
    Triangle  rises to max at W/2, falls back      soft, hollow
    Square    max while p < duty · W, else 0        chiptune
    Noise     hash(p, seed)                        hiss, deterministic
    Silence   0                                    rests inside a sequence

Noise is a hash rather than a running PRNG: the same (parameter, position)
pair always returns the same amplitude, which keeps every tone print
side-effect free and safe to share between threads.
*/

/// Largest raw amplitude produced by the built-in tone prints.
pub const MAX_AMPLITUDE: u16 = (TONE_WIDTH - 1) as u16;

const HALF_WIDTH: usize = TONE_WIDTH / 2;
const DEFAULT_DUTY: f32 = 0.5;

/// Deterministic waveform over the cyclic domain `[0, TONE_WIDTH)`.
pub trait TonePrint: Send + Sync {
    fn sample(&self, parameter: f32, position: usize) -> u16;

    /// Upper bound of [`TonePrint::sample`], used to normalise volume scaling.
    fn max_amplitude(&self) -> u16 {
        MAX_AMPLITUDE
    }
}

impl fmt::Debug for dyn TonePrint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TonePrint(max_amplitude = {})", self.max_amplitude())
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    Silence,
    Sine,
    Sawtooth,
    Triangle,
    Square,
    Noise,
}

impl Waveform {
    /// Identifier used in the packed record layout.
    pub fn id(self) -> u32 {
        match self {
            Waveform::Silence => 0,
            Waveform::Sine => 1,
            Waveform::Sawtooth => 2,
            Waveform::Triangle => 3,
            Waveform::Square => 4,
            Waveform::Noise => 5,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Waveform::Silence),
            1 => Some(Waveform::Sine),
            2 => Some(Waveform::Sawtooth),
            3 => Some(Waveform::Triangle),
            4 => Some(Waveform::Square),
            5 => Some(Waveform::Noise),
            _ => None,
        }
    }
}

impl TonePrint for Waveform {
    #[inline]
    fn sample(&self, parameter: f32, position: usize) -> u16 {
        let position = position % TONE_WIDTH;
        let max = MAX_AMPLITUDE as f32;

        match self {
            Waveform::Silence => 0,
            Waveform::Sine => {
                let angle = TAU * position as f32 / TONE_WIDTH as f32;
                ((angle.sin() + 1.0) * 0.5 * max).round() as u16
            }
            Waveform::Sawtooth => position as u16,
            Waveform::Triangle => {
                let level = if position < HALF_WIDTH {
                    position * 2
                } else {
                    (TONE_WIDTH - 1 - position) * 2 + 1
                };
                level.min(MAX_AMPLITUDE as usize) as u16
            }
            Waveform::Square => {
                let duty = if parameter > 0.0 && parameter < 1.0 {
                    parameter
                } else {
                    DEFAULT_DUTY
                };
                if (position as f32) < duty * TONE_WIDTH as f32 {
                    MAX_AMPLITUDE
                } else {
                    0
                }
            }
            Waveform::Noise => noise(parameter.to_bits(), position),
        }
    }
}

/// Stateless xorshift-style hash of (seed, position) folded into the amplitude range.
#[inline]
fn noise(seed: u32, position: usize) -> u16 {
    let mut x = (position as u32)
        .wrapping_mul(0x9E37_79B9)
        .wrapping_add(seed)
        .wrapping_add(0x6D2B_79F5);
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    (x % (MAX_AMPLITUDE as u32 + 1)) as u16
}

/// Tone print bound to a sound effect: a built-in shape or a custom implementation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub enum TonePrintKind {
    Waveform(Waveform),
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(Arc<dyn TonePrint>),
}

impl TonePrintKind {
    pub fn custom(print: impl TonePrint + 'static) -> Self {
        TonePrintKind::Custom(Arc::new(print))
    }
}

impl From<Waveform> for TonePrintKind {
    fn from(waveform: Waveform) -> Self {
        TonePrintKind::Waveform(waveform)
    }
}

impl PartialEq for TonePrintKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TonePrintKind::Waveform(a), TonePrintKind::Waveform(b)) => a == b,
            (TonePrintKind::Custom(a), TonePrintKind::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl TonePrint for TonePrintKind {
    #[inline]
    fn sample(&self, parameter: f32, position: usize) -> u16 {
        match self {
            TonePrintKind::Waveform(waveform) => waveform.sample(parameter, position),
            TonePrintKind::Custom(print) => print.sample(parameter, position),
        }
    }

    fn max_amplitude(&self) -> u16 {
        match self {
            TonePrintKind::Waveform(waveform) => waveform.max_amplitude(),
            TonePrintKind::Custom(print) => print.max_amplitude(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Waveform; 6] = [
        Waveform::Silence,
        Waveform::Sine,
        Waveform::Sawtooth,
        Waveform::Triangle,
        Waveform::Square,
        Waveform::Noise,
    ];

    #[test]
    fn ids_round_trip() {
        for waveform in ALL {
            assert_eq!(Waveform::from_id(waveform.id()), Some(waveform));
        }
        assert_eq!(Waveform::from_id(6), None);
    }

    #[test]
    fn every_shape_stays_within_max_amplitude() {
        for waveform in ALL {
            for position in 0..TONE_WIDTH {
                let sample = waveform.sample(0.25, position);
                assert!(
                    sample <= MAX_AMPLITUDE,
                    "{waveform:?} at {position} produced {sample}"
                );
            }
        }
    }

    #[test]
    fn sine_quarter_points() {
        assert_eq!(Waveform::Sine.sample(0.0, 0), 512);
        assert_eq!(Waveform::Sine.sample(0.0, TONE_WIDTH / 4), MAX_AMPLITUDE);
        assert_eq!(Waveform::Sine.sample(0.0, 3 * TONE_WIDTH / 4), 0);
    }

    #[test]
    fn triangle_peaks_at_half_width() {
        assert_eq!(Waveform::Triangle.sample(0.0, 0), 0);
        assert_eq!(Waveform::Triangle.sample(0.0, HALF_WIDTH), MAX_AMPLITUDE);
        assert_eq!(Waveform::Triangle.sample(0.0, TONE_WIDTH - 1), 1);
    }

    #[test]
    fn square_duty_cycle_parameter() {
        let quarter = Waveform::Square;
        assert_eq!(quarter.sample(0.25, 255), MAX_AMPLITUDE);
        assert_eq!(quarter.sample(0.25, 256), 0);

        // Out-of-range duty falls back to 50%.
        assert_eq!(quarter.sample(3.0, 511), MAX_AMPLITUDE);
        assert_eq!(quarter.sample(3.0, 512), 0);
    }

    #[test]
    fn noise_is_deterministic_and_seeded() {
        let a: Vec<u16> = (0..64).map(|p| Waveform::Noise.sample(1.0, p)).collect();
        let b: Vec<u16> = (0..64).map(|p| Waveform::Noise.sample(1.0, p)).collect();
        let c: Vec<u16> = (0..64).map(|p| Waveform::Noise.sample(2.0, p)).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn positions_wrap_into_the_domain() {
        assert_eq!(
            Waveform::Sawtooth.sample(0.0, TONE_WIDTH + 7),
            Waveform::Sawtooth.sample(0.0, 7)
        );
    }

    #[test]
    fn custom_kind_delegates() {
        struct Flat;
        impl TonePrint for Flat {
            fn sample(&self, _parameter: f32, _position: usize) -> u16 {
                7
            }
            fn max_amplitude(&self) -> u16 {
                7
            }
        }

        let kind = TonePrintKind::custom(Flat);
        assert_eq!(kind.sample(0.0, 100), 7);
        assert_eq!(kind.max_amplitude(), 7);
        assert_eq!(kind, kind.clone());
        assert_ne!(kind, TonePrintKind::from(Waveform::Sine));
    }
}
