#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SynthError},
    DEFAULT_BUFFER_SIZE, DEFAULT_OR_MASK, DEFAULT_SAMPLE_RANGE, DEFAULT_SAMPLE_RATE,
};

/// Output configuration of a synthesizer instance.
///
/// Changes apply to samples rendered afterwards; an effect already in
/// flight keeps the sample count it was started with.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Output samples per second
    pub sample_rate: u32,
    /// Largest sample value emitted
    pub sample_range: u16,
    /// Bits OR'd into every emitted sample (for sinks that carry control
    /// data in the sample word)
    pub or_mask: u16,
    /// Samples per pulled buffer
    pub buffer_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            sample_range: DEFAULT_SAMPLE_RANGE,
            or_mask: DEFAULT_OR_MASK,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_sample_range(mut self, sample_range: u16) -> Self {
        self.sample_range = sample_range;
        self
    }

    pub fn with_or_mask(mut self, or_mask: u16) -> Self {
        self.or_mask = or_mask;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate);
        }
        if self.buffer_size == 0 {
            return Err(SynthError::InvalidBufferSize);
        }
        Ok(())
    }
}
