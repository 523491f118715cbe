#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{
        modulate::{ToneEffectBinding, ToneEffectKind},
        oscillator::{TonePrintKind, Waveform},
    },
    error::{Result, SynthError},
    MAX_TONE_EFFECTS, TONE_EFFECT_PARAMETERS,
};

/// A tone print together with the opaque parameter it is evaluated with.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ToneBinding {
    pub print: TonePrintKind,
    pub parameter: f32,
}

impl ToneBinding {
    pub fn new(print: impl Into<TonePrintKind>, parameter: f32) -> Self {
        Self {
            print: print.into(),
            parameter,
        }
    }
}

impl From<Waveform> for ToneBinding {
    fn from(waveform: Waveform) -> Self {
        ToneBinding::new(waveform, 0.0)
    }
}

/// One synthesizable sound: a tone print held for `duration` milliseconds,
/// reshaped `steps` times by up to three tone effects.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SoundEffect {
    /// Central frequency in Hz
    pub frequency: f32,
    /// Central volume, nominally 0.0 - 1.0
    pub volume: f32,
    /// Duration in milliseconds
    pub duration: f32,
    pub tone: ToneBinding,
    /// Applied in order at every step; `None` slots are skipped.
    pub effects: [Option<ToneEffectBinding>; MAX_TONE_EFFECTS],
    /// Number of modulation updates spread across the duration (at least 1)
    pub steps: u32,
}

impl SoundEffect {
    /// Start building a sound effect (sine, 440 Hz, full volume, 100 ms, one step).
    pub fn builder() -> SoundEffectBuilder {
        SoundEffectBuilder::new()
    }

    /// Check the invariants the scheduler relies on. `index` names the
    /// effect's position in its sequence for error reporting.
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.steps == 0 {
            return Err(SynthError::ZeroSteps { index });
        }
        Ok(())
    }

    /// Bound tone effects in application order.
    pub fn tone_effects(&self) -> impl Iterator<Item = &ToneEffectBinding> {
        self.effects.iter().flatten()
    }
}

/// Fluent builder for [`SoundEffect`].
#[derive(Debug, Clone)]
pub struct SoundEffectBuilder {
    frequency: f32,
    volume: f32,
    duration: f32,
    tone: ToneBinding,
    effects: Vec<ToneEffectBinding>,
    steps: u32,
}

impl SoundEffectBuilder {
    fn new() -> Self {
        Self {
            frequency: 440.0,
            volume: 1.0,
            duration: 100.0,
            tone: ToneBinding::from(Waveform::Sine),
            effects: Vec::new(),
            steps: 1,
        }
    }

    pub fn frequency(mut self, hz: f32) -> Self {
        self.frequency = hz;
        self
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn duration_ms(mut self, ms: f32) -> Self {
        self.duration = ms;
        self
    }

    /// Set the tone print, with a zero parameter
    pub fn tone(mut self, print: impl Into<TonePrintKind>) -> Self {
        self.tone = ToneBinding::new(print, 0.0);
        self
    }

    /// Set the tone print together with its parameter (duty cycle, seed, ...)
    pub fn tone_with(mut self, print: impl Into<TonePrintKind>, parameter: f32) -> Self {
        self.tone = ToneBinding::new(print, parameter);
        self
    }

    /// Append a tone effect. Effects run in the order they are added.
    pub fn effect(mut self, kind: ToneEffectKind, parameters: [f32; TONE_EFFECT_PARAMETERS]) -> Self {
        self.effects.push(ToneEffectBinding::new(kind, parameters));
        self
    }

    pub fn steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    pub fn build(self) -> Result<SoundEffect> {
        if self.effects.len() > MAX_TONE_EFFECTS {
            return Err(SynthError::TooManyToneEffects {
                max: MAX_TONE_EFFECTS,
            });
        }

        let mut effects: [Option<ToneEffectBinding>; MAX_TONE_EFFECTS] = Default::default();
        for (slot, binding) in effects.iter_mut().zip(self.effects) {
            *slot = Some(binding);
        }

        let effect = SoundEffect {
            frequency: self.frequency,
            volume: self.volume,
            duration: self.duration,
            tone: self.tone,
            effects,
            steps: self.steps,
        };
        effect.validate(0)?;
        Ok(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let effect = SoundEffect::builder().build().unwrap();
        assert_eq!(effect.frequency, 440.0);
        assert_eq!(effect.volume, 1.0);
        assert_eq!(effect.duration, 100.0);
        assert_eq!(effect.tone.print, TonePrintKind::Waveform(Waveform::Sine));
        assert_eq!(effect.steps, 1);
        assert_eq!(effect.tone_effects().count(), 0);
    }

    #[test]
    fn effects_fill_slots_in_order() {
        let effect = SoundEffect::builder()
            .effect(ToneEffectKind::FrequencySlide, [880.0, 0.0])
            .effect(ToneEffectKind::Vibrato, [5.0, 4.0])
            .steps(8)
            .build()
            .unwrap();

        let kinds: Vec<_> = effect.tone_effects().map(|b| b.kind.clone()).collect();
        assert_eq!(kinds, vec![ToneEffectKind::FrequencySlide, ToneEffectKind::Vibrato]);
        assert!(effect.effects[2].is_none());
    }

    #[test]
    fn rejects_zero_steps() {
        let result = SoundEffect::builder().steps(0).build();
        assert_eq!(result, Err(SynthError::ZeroSteps { index: 0 }));
    }

    #[test]
    fn rejects_a_fourth_effect() {
        let result = SoundEffect::builder()
            .effect(ToneEffectKind::Vibrato, [1.0, 1.0])
            .effect(ToneEffectKind::Vibrato, [1.0, 1.0])
            .effect(ToneEffectKind::Vibrato, [1.0, 1.0])
            .effect(ToneEffectKind::Tremolo, [1.0, 1.0])
            .build();
        assert!(matches!(result, Err(SynthError::TooManyToneEffects { max: 3 })));
    }

    #[test]
    fn tone_with_parameter() {
        let effect = SoundEffect::builder()
            .tone_with(Waveform::Square, 0.25)
            .build()
            .unwrap();
        assert_eq!(effect.tone, ToneBinding::new(Waveform::Square, 0.25));
    }
}
