//! Tone effects: per-step frequency and volume modulation.

use std::{fmt, sync::Arc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::lfo::{dip_at_step, sine_at_step},
    TONE_EFFECT_PARAMETERS,
};

/*
Tone Effects
============

A sound effect declares a base frequency and volume, a number of steps,
and up to three tone effects. At the start of the effect and at every step
boundary the scheduler runs the tone effects in declaration order against
the *instantaneous* tone:

    step 0      effect[0] → effect[1] → effect[2]      (initial pass)
    step 1      effect[0] → effect[1] → effect[2]
    ...
    step s-1    effect[0] → effect[1] → effect[2]

Between boundaries the tone is held, so a 16-step slide is a staircase of
16 plateaus. Each effect sees whatever the previous effects in the same
pass left behind, and the tone is never reset between steps.

Vocabulary
----------

  base          The frequency/volume declared by the sound effect.
  instantaneous The frequency/volume currently being rendered.
  progress      step / (steps - 1): 0.0 on the first step, 1.0 on the last.


Incremental Modulation
----------------------

Every built-in effect applies only the *change* between the previous step
and the current one:

    frequency += f(step) - f(step - 1)

Summed over the steps this telescopes to base + f(step), so a lone effect
traces its curve exactly. Chaining effects adds their curves together, e.g.
a slide followed by vibrato wobbles around the sliding pitch rather than
snapping back to the base every step.

    Vibrato           [depth Hz, period steps]   base + depth · sin
    FrequencySlide    [target Hz, -]             linear toward target
    ExponentialSlide  [target Hz, -]             equal ratio per step
    VolumeSlide       [target volume, -]         linear toward target
    Tremolo           [depth 0..1, period steps] volume dips by depth

Custom effects receive the same inputs and may do anything, including
overwriting the tone outright.
*/

/// Instantaneous frequency/volume a tone effect operates on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub volume: f32,
}

/// Where in its sound effect a modulation pass happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepContext {
    pub base_frequency: f32,
    pub base_volume: f32,
    /// Step being entered, in `[0, steps)`.
    pub step: usize,
    pub steps: usize,
}

impl StepContext {
    /// Position of `step` along the effect: 0.0 on the first step, 1.0 on the last.
    #[inline]
    pub fn progress(&self, step: usize) -> f32 {
        if self.steps > 1 {
            step as f32 / (self.steps - 1) as f32
        } else {
            0.0
        }
    }

    /// Progress made by entering the current step.
    #[inline]
    fn progress_delta(&self) -> f32 {
        match self.step {
            0 => 0.0,
            step => self.progress(step) - self.progress(step - 1),
        }
    }
}

/// Per-step modulation of the instantaneous tone.
pub trait ToneEffect: Send + Sync {
    fn apply(&self, tone: &mut Tone, ctx: &StepContext, parameters: &[f32; TONE_EFFECT_PARAMETERS]);
}

impl fmt::Debug for dyn ToneEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ToneEffect")
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub enum ToneEffectKind {
    Vibrato,
    FrequencySlide,
    ExponentialSlide,
    VolumeSlide,
    Tremolo,
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(Arc<dyn ToneEffect>),
}

impl ToneEffectKind {
    pub fn custom(effect: impl ToneEffect + 'static) -> Self {
        ToneEffectKind::Custom(Arc::new(effect))
    }

    /// Identifier used in the packed record layout. Zero marks an empty slot;
    /// custom effects have no identifier.
    pub fn id(&self) -> Option<u32> {
        match self {
            ToneEffectKind::Vibrato => Some(1),
            ToneEffectKind::FrequencySlide => Some(2),
            ToneEffectKind::ExponentialSlide => Some(3),
            ToneEffectKind::VolumeSlide => Some(4),
            ToneEffectKind::Tremolo => Some(5),
            ToneEffectKind::Custom(_) => None,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(ToneEffectKind::Vibrato),
            2 => Some(ToneEffectKind::FrequencySlide),
            3 => Some(ToneEffectKind::ExponentialSlide),
            4 => Some(ToneEffectKind::VolumeSlide),
            5 => Some(ToneEffectKind::Tremolo),
            _ => None,
        }
    }
}

impl PartialEq for ToneEffectKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ToneEffectKind::Custom(a), ToneEffectKind::Custom(b)) => Arc::ptr_eq(a, b),
            (a, b) => a.id().is_some() && a.id() == b.id(),
        }
    }
}

impl ToneEffect for ToneEffectKind {
    fn apply(&self, tone: &mut Tone, ctx: &StepContext, parameters: &[f32; TONE_EFFECT_PARAMETERS]) {
        let [first, second] = *parameters;

        match self {
            ToneEffectKind::Vibrato => {
                let previous = match ctx.step {
                    0 => 0.0,
                    step => sine_at_step(step - 1, second),
                };
                tone.frequency += first * (sine_at_step(ctx.step, second) - previous);
            }
            ToneEffectKind::FrequencySlide => {
                tone.frequency += (first - ctx.base_frequency) * ctx.progress_delta();
            }
            ToneEffectKind::ExponentialSlide => {
                // Undefined for non-positive endpoints; hold the tone instead.
                if ctx.base_frequency > 0.0 && first > 0.0 {
                    let ratio = first / ctx.base_frequency;
                    tone.frequency *= ratio.powf(ctx.progress_delta());
                }
            }
            ToneEffectKind::VolumeSlide => {
                tone.volume += (first - ctx.base_volume) * ctx.progress_delta();
            }
            ToneEffectKind::Tremolo => {
                let previous = match ctx.step {
                    0 => 0.0,
                    step => dip_at_step(step - 1, second),
                };
                tone.volume -= ctx.base_volume * first * (dip_at_step(ctx.step, second) - previous);
            }
            ToneEffectKind::Custom(effect) => effect.apply(tone, ctx, parameters),
        }
    }
}

/// A tone effect together with its two parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ToneEffectBinding {
    pub kind: ToneEffectKind,
    pub parameters: [f32; TONE_EFFECT_PARAMETERS],
}

impl ToneEffectBinding {
    pub fn new(kind: ToneEffectKind, parameters: [f32; TONE_EFFECT_PARAMETERS]) -> Self {
        Self { kind, parameters }
    }

    #[inline]
    pub fn apply(&self, tone: &mut Tone, ctx: &StepContext) {
        self.kind.apply(tone, ctx, &self.parameters);
    }
}
