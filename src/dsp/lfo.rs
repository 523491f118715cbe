//! Step-rate low frequency oscillation used by periodic tone effects.

use std::f32::consts::TAU;

/*
Step-Rate LFOs
==============

Vibrato and tremolo are periodic modulations, but tone effects are only
evaluated at step boundaries, not once per sample. The oscillator that
drives them therefore runs in units of steps rather than seconds:

    period        Number of steps in one full LFO cycle.
                  A 1 s effect split into 40 steps with period 8 wobbles
                  5 times: 40 / 8 = 5 cycles.

    bipolar       sin(2π · step / period), swings -1.0 to +1.0.
                  Vibrato uses this: pitch goes sharp AND flat.

    unipolar      (bipolar + 1) / 2, swings 0.0 to 1.0.
                  Tremolo uses this: volume only ever dips below the base.

Because the LFO value is a pure function of the step index, an effect can
evaluate both the current and the previous step and apply only the
difference, which keeps several effects composable on the same tone.
*/

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}

/// Bipolar sine LFO evaluated at `step`, with `period` steps per cycle.
///
/// A period below one step is treated as one step, which pins the output to 0.
///
/// # Example
/// ```
/// use emoji_synth::dsp::lfo::sine_at_step;
/// assert!((sine_at_step(2, 8.0) - 1.0).abs() < 1e-6); // quarter cycle
/// ```
#[inline]
pub fn sine_at_step(step: usize, period: f32) -> f32 {
    let period = if period >= 1.0 { period } else { 1.0 };
    (TAU * (step as f32 / period)).sin()
}

/// Unipolar dip LFO: 0.0 at step 0, 1.0 half a period later.
#[inline]
pub fn dip_at_step(step: usize, period: f32) -> f32 {
    let period = if period >= 1.0 { period } else { 1.0 };
    bipolar_to_unipolar(-(TAU * (step as f32 / period)).cos())
}
