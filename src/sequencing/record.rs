//! Packed sound effect records.
//!
//! Producers that cannot link against this crate (firmware blobs, scripts,
//! other languages) hand the synthesizer a tightly packed array of
//! fixed-size records. The layout is the contract:
//!
//! | offset | field            | type          |
//! |-------:|------------------|---------------|
//! |      0 | frequency (Hz)   | `f32`         |
//! |      4 | volume           | `f32`         |
//! |      8 | duration (ms)    | `f32`         |
//! |     12 | tone print id    | `u32`         |
//! |     16 | tone parameter   | `f32`         |
//! |     20 | 3 × tone effect  | `u32 id` (0 = none) + `[f32; 2]` |
//! |     56 | steps            | `i32`         |
//!
//! Fields are in native byte order, matching a `#[repr(C)]` struct written
//! straight from memory. Records are decoded into owned [`SoundEffect`]s
//! before anything touches render state.

use bytemuck::{Pod, Zeroable};

use crate::{
    dsp::{
        modulate::{ToneEffectBinding, ToneEffectKind},
        oscillator::{TonePrintKind, Waveform},
    },
    error::{Result, SynthError},
    sequencing::effect::{SoundEffect, ToneBinding},
    MAX_TONE_EFFECTS, TONE_EFFECT_PARAMETERS,
};

/// Slot identifier for "no tone effect".
pub const NO_TONE_EFFECT: u32 = 0;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RawToneEffect {
    pub kind: u32,
    pub parameters: [f32; TONE_EFFECT_PARAMETERS],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RawSoundEffect {
    pub frequency: f32,
    pub volume: f32,
    pub duration: f32,
    pub tone_print: u32,
    pub tone_parameter: f32,
    pub effects: [RawToneEffect; MAX_TONE_EFFECTS],
    pub steps: i32,
}

/// Size in bytes of one packed record.
pub const RECORD_SIZE: usize = std::mem::size_of::<RawSoundEffect>();

impl RawSoundEffect {
    /// Interpret this record as the `index`-th effect of a sequence.
    pub fn to_sound_effect(&self, index: usize) -> Result<SoundEffect> {
        let print = Waveform::from_id(self.tone_print).ok_or(SynthError::UnknownTonePrint {
            index,
            id: self.tone_print,
        })?;

        let mut effects: [Option<ToneEffectBinding>; MAX_TONE_EFFECTS] = Default::default();
        for (slot, (target, raw)) in effects.iter_mut().zip(&self.effects).enumerate() {
            if raw.kind == NO_TONE_EFFECT {
                continue;
            }
            let kind = ToneEffectKind::from_id(raw.kind).ok_or(SynthError::UnknownToneEffect {
                index,
                slot,
                id: raw.kind,
            })?;
            *target = Some(ToneEffectBinding::new(kind, raw.parameters));
        }

        let steps = u32::try_from(self.steps).map_err(|_| SynthError::ZeroSteps { index })?;

        let effect = SoundEffect {
            frequency: self.frequency,
            volume: self.volume,
            duration: self.duration,
            tone: ToneBinding::new(print, self.tone_parameter),
            effects,
            steps,
        };
        effect.validate(index)?;
        Ok(effect)
    }

    /// Pack the `index`-th effect of a sequence. Custom tone prints and
    /// effects have no identifier and cannot be packed.
    pub fn from_sound_effect(effect: &SoundEffect, index: usize) -> Result<Self> {
        let tone_print = match &effect.tone.print {
            TonePrintKind::Waveform(waveform) => waveform.id(),
            TonePrintKind::Custom(_) => return Err(SynthError::Unencodable { index }),
        };

        let mut effects = [RawToneEffect::default(); MAX_TONE_EFFECTS];
        for (target, binding) in effects.iter_mut().zip(&effect.effects) {
            if let Some(binding) = binding {
                let kind = binding.kind.id().ok_or(SynthError::Unencodable { index })?;
                *target = RawToneEffect {
                    kind,
                    parameters: binding.parameters,
                };
            }
        }

        Ok(Self {
            frequency: effect.frequency,
            volume: effect.volume,
            duration: effect.duration,
            tone_print,
            tone_parameter: effect.tone.parameter,
            effects,
            steps: i32::try_from(effect.steps).map_err(|_| SynthError::Unencodable { index })?,
        })
    }
}

/// Decode a packed block into an owned sequence of sound effects.
///
/// Fails when the block is empty or not a whole number of records, or when
/// any record is invalid. Alignment of `bytes` does not matter.
pub fn decode_effects(bytes: &[u8]) -> Result<Vec<SoundEffect>> {
    if bytes.is_empty() || bytes.len() % RECORD_SIZE != 0 {
        return Err(SynthError::MalformedEffectBlock {
            len: bytes.len(),
            record: RECORD_SIZE,
        });
    }

    bytes
        .chunks_exact(RECORD_SIZE)
        .enumerate()
        .map(|(index, chunk)| {
            let raw: RawSoundEffect = bytemuck::pod_read_unaligned(chunk);
            raw.to_sound_effect(index)
        })
        .collect()
}

/// Pack a sequence of sound effects into the record layout.
pub fn encode_effects(effects: &[SoundEffect]) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(effects.len() * RECORD_SIZE);
    for (index, effect) in effects.iter().enumerate() {
        let raw = RawSoundEffect::from_sound_effect(effect, index)?;
        bytes.extend_from_slice(bytemuck::bytes_of(&raw));
    }
    Ok(bytes)
}
