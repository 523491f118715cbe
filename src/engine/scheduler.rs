//! Per-sample generation for the active sound effect.
//!
//! The scheduler owns the render state of exactly one effect: the
//! instantaneous tone, the phase position, the step index and the sample
//! counters. It knows nothing about queues; the synthesizer hands it the
//! active effect on every call and moves on once [`StepScheduler::is_complete`].
//!
//! Per emitted sample:
//!
//! 1. If a step boundary has been reached, run the effect's tone effects
//!    against the instantaneous tone and re-derive the phase increment.
//!    Boundary `k` of `s` steps sits at sample `k · required / s`, so step 0
//!    is entered on the first sample and `s - 1` further passes follow.
//!    An effect never has more steps than samples: `s` is clamped to the
//!    sample count, so at most one pass runs per emitted sample.
//! 2. Evaluate the tone print at the phase position, scale by volume into
//!    the output range and OR in the mask.
//! 3. Advance the phase.
//! 4. Count the sample.

use crate::{
    dsp::{
        modulate::{StepContext, Tone},
        oscillator::TonePrint,
        phase::PhaseAccumulator,
    },
    engine::config::EngineConfig,
    sequencing::{duration::samples_for_duration, effect::SoundEffect},
};

#[derive(Debug, Clone)]
pub struct StepScheduler {
    tone: Tone,
    phase: PhaseAccumulator,
    /// Modulation passes run so far for the active effect (0..=steps)
    passes: usize,
    /// Steps actually rendered, at most one per sample
    steps: usize,
    samples_per_step: f32,
    samples_written: usize,
    samples_required: usize,
}

impl Default for StepScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl StepScheduler {
    /// An idle scheduler: no effect, nothing left to write.
    pub fn new() -> Self {
        Self {
            tone: Tone {
                frequency: 0.0,
                volume: 0.0,
            },
            phase: PhaseAccumulator::new(),
            passes: 0,
            steps: 0,
            samples_per_step: 0.0,
            samples_written: 0,
            samples_required: 0,
        }
    }

    /// Reset all render state to the beginning of `effect`.
    pub fn start(&mut self, effect: &SoundEffect, config: &EngineConfig) {
        self.tone = Tone {
            frequency: effect.frequency,
            volume: effect.volume,
        };
        self.phase.reset();
        self.phase.set_frequency(effect.frequency, config.sample_rate);
        self.passes = 0;
        self.samples_written = 0;
        self.samples_required = samples_for_duration(effect.duration, config.sample_rate);
        self.steps = (effect.steps as usize).clamp(1, self.samples_required.max(1));
        self.samples_per_step = self.samples_required as f32 / self.steps as f32;
    }

    /// Return to idle.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// All samples of the active effect have been written.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.samples_written >= self.samples_required
    }

    /// Re-derive the phase increment for a new sample rate. Sample counts of
    /// the effect in flight are left alone.
    pub fn retune(&mut self, sample_rate: u32) {
        self.phase.set_frequency(self.tone.frequency, sample_rate);
    }

    /// Produce the next sample of `effect`, which must be the effect this
    /// scheduler was last started with.
    #[inline]
    pub fn render_sample(&mut self, effect: &SoundEffect, config: &EngineConfig) -> u16 {
        debug_assert!(!self.is_complete(), "render_sample past the end of an effect");

        self.enter_steps(effect, config.sample_rate);

        let tone = &effect.tone;
        let raw = tone.print.sample(tone.parameter, self.phase.position());
        let sample = scale_sample(
            raw,
            tone.print.max_amplitude(),
            self.tone.volume,
            config.sample_range,
        ) | config.or_mask;

        self.phase.advance();
        self.samples_written += 1;
        sample
    }

    /// Run the modulation pass for the step starting at this sample, if any.
    ///
    /// With `steps <= samples_required` consecutive boundaries are at least
    /// one sample apart, so a single check per sample never falls behind.
    fn enter_steps(&mut self, effect: &SoundEffect, sample_rate: u32) {
        if self.passes >= self.steps || self.samples_written < self.boundary(self.passes) {
            return;
        }

        let ctx = StepContext {
            base_frequency: effect.frequency,
            base_volume: effect.volume,
            step: self.passes,
            steps: self.steps,
        };
        for binding in effect.tone_effects() {
            binding.apply(&mut self.tone, &ctx);
        }
        self.passes += 1;
        self.phase.set_frequency(self.tone.frequency, sample_rate);
    }

    #[inline]
    fn boundary(&self, step: usize) -> usize {
        step * self.samples_required / self.steps
    }

    pub fn frequency(&self) -> f32 {
        self.tone.frequency
    }

    pub fn volume(&self) -> f32 {
        self.tone.volume
    }

    /// Index of the step being rendered, in `[0, steps)`.
    pub fn step(&self) -> usize {
        self.passes.saturating_sub(1)
    }

    /// Steps the active effect is rendered with: its declared count,
    /// clamped to its sample count.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn phase_position(&self) -> usize {
        self.phase.position()
    }

    pub fn samples_per_step(&self) -> f32 {
        self.samples_per_step
    }

    pub fn samples_written(&self) -> usize {
        self.samples_written
    }

    pub fn samples_required(&self) -> usize {
        self.samples_required
    }
}

/// Map a raw tone print amplitude into `[0, sample_range]`.
///
/// `raw · volume / max_amplitude · sample_range`, clipped and rounded to the
/// nearest integer. A volume of 1.0 spans the full output range; anything
/// louder clips.
#[inline]
pub fn scale_sample(raw: u16, max_amplitude: u16, volume: f32, sample_range: u16) -> u16 {
    let range = sample_range as f32;
    let scaled = raw as f32 * volume * range / max_amplitude.max(1) as f32;
    scaled.clamp(0.0, range).round() as u16
}
