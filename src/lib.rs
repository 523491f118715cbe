pub mod dsp; // Tone prints, tone effects, phase accumulation
pub mod engine; // Configuration and the per-sample step scheduler
pub mod error;
pub mod io; // Downstream interfaces and sample buffers
pub mod sequencing; // Sound effect descriptors, packed records, effect queue
pub mod synth; // Synthesizer, concurrency gate, command handoff
pub mod voices;

/// Width of the cyclic phase domain every tone print is evaluated over.
pub const TONE_WIDTH: usize = 1024;
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_BUFFER_SIZE: usize = 512;
/// Largest sample value emitted by default.
pub const DEFAULT_SAMPLE_RANGE: u16 = 1023;
pub const DEFAULT_OR_MASK: u16 = 0;
/// Tone effects a single sound effect can carry.
pub const MAX_TONE_EFFECTS: usize = 3;
pub const TONE_EFFECT_PARAMETERS: usize = 2;

pub use dsp::modulate::{StepContext, Tone, ToneEffect, ToneEffectBinding, ToneEffectKind};
pub use dsp::oscillator::{TonePrint, TonePrintKind, Waveform, MAX_AMPLITUDE};
pub use engine::config::EngineConfig;
pub use error::{Result, SynthError};
pub use io::{DataSink, DataSource, SampleBuffer, SampleFormat};
pub use sequencing::effect::{SoundEffect, SoundEffectBuilder, ToneBinding};
pub use synth::{gate::SoundEmojiSynth, synthesizer::Synthesizer};
