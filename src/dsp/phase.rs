//! Fixed-point phase accumulator over the tone print domain.

use crate::TONE_WIDTH;

/*
Phase Accumulation
==================

Each output sample the phase moves forward by

    increment = frequency · TONE_WIDTH / sample_rate      (positions/sample)

and wraps modulo TONE_WIDTH. A 440 Hz tone at 44.1 kHz advances ~10.2
positions per sample, so the fractional part matters: dropping it would
detune the tone by ~2%.

The position is kept as 16.16 fixed point in a u32:

    31            26 25                16 15                 0
    ┌──────────────┬────────────────────┬────────────────────┐
    │   (unused)   │ integer position   │ fraction           │
    └──────────────┴────────────────────┴────────────────────┘

With TONE_WIDTH = 1024 the whole domain spans 2^26, so adding two in-range
values never overflows and wrapping is a single remainder. Integer
accumulation also means the phase never drifts out of range, however long
an effect plays.

A non-positive (or non-finite) frequency yields a zero increment: the tone
print is held at its current position instead of raising an error.
*/

const FRACTION_BITS: u32 = 16;
const ONE: f64 = (1u32 << FRACTION_BITS) as f64;
const DOMAIN: u32 = (TONE_WIDTH as u32) << FRACTION_BITS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseAccumulator {
    phase: u32,
    increment: u32,
}

impl PhaseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to position 0, keeping the current increment.
    pub fn reset(&mut self) {
        self.phase = 0;
    }

    /// Derive the per-sample increment for `frequency` at `sample_rate`.
    pub fn set_frequency(&mut self, frequency: f32, sample_rate: u32) {
        self.increment = increment_for(frequency, sample_rate);
    }

    /// Integer position in `[0, TONE_WIDTH)`.
    #[inline]
    pub fn position(&self) -> usize {
        (self.phase >> FRACTION_BITS) as usize
    }

    #[inline]
    pub fn increment(&self) -> u32 {
        self.increment
    }

    #[inline]
    pub fn advance(&mut self) {
        self.phase = (self.phase + self.increment) % DOMAIN;
    }
}

fn increment_for(frequency: f32, sample_rate: u32) -> u32 {
    if !(frequency > 0.0) || sample_rate == 0 {
        return 0;
    }

    let per_sample = frequency as f64 * TONE_WIDTH as f64 / sample_rate as f64;
    let wrapped = per_sample % TONE_WIDTH as f64;
    if !wrapped.is_finite() {
        return 0;
    }
    ((wrapped * ONE) as u32) % DOMAIN
}
