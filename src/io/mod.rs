// Purpose - downstream interfaces, sample buffers, format conversions

pub mod converter;

use std::{ops::Deref, sync::Arc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Encoding of the samples inside a [`SampleBuffer`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// Unsigned 16-bit samples, offset binary
    Unsigned16,
}

impl SampleFormat {
    pub fn bits_per_sample(self) -> u32 {
        match self {
            SampleFormat::Unsigned16 => 16,
        }
    }

    pub fn bytes_per_sample(self) -> usize {
        (self.bits_per_sample() / 8) as usize
    }
}

/// Immutable, cheaply clonable block of output samples.
///
/// A zero-length buffer means "nothing to play right now". The synthesizer
/// hands out clones of a single empty instance, so sinks can recognise
/// silence with [`SampleBuffer::ptr_eq`] as well as with `is_empty()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer(Arc<[u16]>);

impl SampleBuffer {
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.0
    }

    /// Both handles refer to the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Little-endian byte image of the samples, for byte-oriented transports.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(|sample| sample.to_le_bytes()).collect()
    }
}

impl Deref for SampleBuffer {
    type Target = [u16];

    fn deref(&self) -> &[u16] {
        &self.0
    }
}

impl From<Vec<u16>> for SampleBuffer {
    fn from(samples: Vec<u16>) -> Self {
        Self(Arc::from(samples))
    }
}

/// Downstream consumer of a [`DataSource`].
///
/// The source calls `pull_request` when new data becomes available; the
/// sink answers, now or later, by calling `pull()` on the source.
pub trait DataSink: Send + Sync {
    fn pull_request(&self);
}

/// Pull-driven producer of sample buffers.
pub trait DataSource {
    /// Produce the next buffer. An empty buffer means the source is idle.
    fn pull(&mut self) -> SampleBuffer;

    /// Register the single downstream consumer, replacing any previous one.
    fn connect(&mut self, sink: Arc<dyn DataSink>);

    fn format(&self) -> SampleFormat;
}
