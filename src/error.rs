//! Error type shared by every fallible synthesizer operation.
//!
//! All variants describe an invalid parameter handed in by the issuing
//! context. Nothing inside the render path can fail: running out of input
//! degrades to silence instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthError {
    #[error("effect block of {len} bytes is not a positive multiple of the {record}-byte record size")]
    MalformedEffectBlock { len: usize, record: usize },

    #[error("sound effect {index} declares zero (or negative) steps")]
    ZeroSteps { index: usize },

    #[error("sound effect {index} uses unknown tone print id {id}")]
    UnknownTonePrint { index: usize, id: u32 },

    #[error("sound effect {index} uses unknown tone effect id {id} in slot {slot}")]
    UnknownToneEffect { index: usize, slot: usize, id: u32 },

    #[error("a sound effect holds at most {max} tone effects")]
    TooManyToneEffects { max: usize },

    #[error("sound effect {index} binds a custom tone print or effect, which has no record encoding")]
    Unencodable { index: usize },

    #[error("sample rate must be positive")]
    InvalidSampleRate,

    #[error("buffer size must be positive")]
    InvalidBufferSize,
}

impl SynthError {
    /// Every synthesizer error maps to the invalid-parameter status.
    pub fn is_invalid_parameter(&self) -> bool {
        true
    }
}

pub type Result<T> = std::result::Result<T, SynthError>;
