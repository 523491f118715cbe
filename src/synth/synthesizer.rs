use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    engine::{config::EngineConfig, scheduler::StepScheduler},
    error::{Result, SynthError},
    io::{DataSink, DataSource, SampleBuffer, SampleFormat},
    sequencing::{effect::SoundEffect, queue::EffectQueue, record::decode_effects},
};

/// Sound effect synthesizer: plays a queue of [`SoundEffect`]s into
/// pull-driven sample buffers.
///
/// This type is single-owner (`&mut self`). Share it between an issuing
/// and a rendering context through [`SoundEmojiSynth`](crate::synth::gate::SoundEmojiSynth)
/// or feed it commands over a ring buffer with
/// [`apply_messages`](Synthesizer::apply_messages).
pub struct Synthesizer {
    config: EngineConfig,
    queue: Option<EffectQueue>,
    scheduler: StepScheduler,
    /// Handed out whenever there is nothing to play
    empty: SampleBuffer,
    downstream: Option<Arc<dyn DataSink>>,
}

impl Synthesizer {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            queue: None,
            scheduler: StepScheduler::new(),
            empty: SampleBuffer::empty(),
            downstream: None,
        })
    }

    /// Start playing `effects` from the first entry, discarding whatever was
    /// playing before. An empty sequence stops playback.
    ///
    /// The downstream sink, if any, is told that data is available.
    pub fn play(&mut self, effects: impl Into<Arc<[SoundEffect]>>) -> Result<()> {
        let effects = effects.into();
        validate_sequence(&effects)?;
        self.install(effects);
        self.notify_downstream();
        Ok(())
    }

    /// Decode a packed record block and play it.
    ///
    /// Malformed blocks are rejected before any state changes.
    pub fn play_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let effects = decode_effects(bytes)?;
        self.play(effects)
    }

    /// Replace the current sequence without notifying downstream.
    ///
    /// `effects` must already have passed [`validate_sequence`].
    pub(crate) fn install(&mut self, effects: Arc<[SoundEffect]>) {
        if let Some(previous) = &self.queue {
            debug!(
                index = previous.index(),
                len = previous.len(),
                "superseding active sound effect sequence"
            );
        }

        match EffectQueue::new(effects) {
            Some(queue) => {
                debug!(effects = queue.len(), "sound effect sequence installed");
                self.scheduler.start(queue.current(), &self.config);
                self.queue = Some(queue);
            }
            None => self.stop(),
        }
    }

    /// Drop the current sequence and go idle.
    pub fn stop(&mut self) {
        self.queue = None;
        self.scheduler.clear();
    }

    /// Move to the next effect of the sequence, or go idle and release the
    /// sequence once it is exhausted.
    pub fn next_sound_effect(&mut self) {
        let Some(queue) = self.queue.as_mut() else {
            return;
        };

        if queue.advance() {
            trace!(index = queue.index(), "advancing to next sound effect");
            self.scheduler.start(queue.current(), &self.config);
        } else {
            debug!(len = queue.len(), "sound effect sequence exhausted");
            self.stop();
        }
    }

    /// Render into `out`, crossing effect boundaries as needed, and return
    /// the number of samples written. Fewer than `out.len()` means the
    /// sequence ran out; the rest of `out` is untouched.
    ///
    /// Allocation-free, for use directly inside an audio callback.
    pub fn render_into(&mut self, out: &mut [u16]) -> usize {
        let mut written = 0;

        while written < out.len() {
            let Some(queue) = self.queue.as_ref() else {
                break;
            };
            if self.scheduler.is_complete() {
                // Zero-length effect: nothing to emit, move straight on.
                self.next_sound_effect();
                continue;
            }

            out[written] = self.scheduler.render_sample(queue.current(), &self.config);
            written += 1;

            if self.scheduler.is_complete() {
                self.next_sound_effect();
            }
        }

        written
    }

    /// Produce one buffer of up to `buffer_size` samples.
    ///
    /// When idle this returns the shared empty buffer without rendering.
    /// A buffer shorter than `buffer_size` means the sequence ended inside it.
    pub fn pull(&mut self) -> SampleBuffer {
        if !self.is_active() {
            return self.empty.clone();
        }

        let mut samples = vec![0u16; self.config.buffer_size];
        let produced = self.render_into(&mut samples);
        if produced == 0 {
            return self.empty.clone();
        }
        samples.truncate(produced);
        SampleBuffer::from(samples)
    }

    /// The zero-length buffer returned while idle.
    pub fn empty_buffer(&self) -> &SampleBuffer {
        &self.empty
    }

    pub fn connect(&mut self, sink: Arc<dyn DataSink>) {
        self.downstream = Some(sink);
    }

    pub(crate) fn downstream(&self) -> Option<Arc<dyn DataSink>> {
        self.downstream.clone()
    }

    fn notify_downstream(&self) {
        if let Some(sink) = &self.downstream {
            sink.pull_request();
        }
    }

    pub fn format(&self) -> SampleFormat {
        SampleFormat::Unsigned16
    }

    /// An effect is active (or about to be started).
    pub fn is_active(&self) -> bool {
        self.queue.is_some()
    }

    /// Index of the active effect within its sequence.
    pub fn current_index(&self) -> Option<usize> {
        self.queue.as_ref().map(EffectQueue::index)
    }

    /// The active effect.
    pub fn current_effect(&self) -> Option<&SoundEffect> {
        self.queue.as_ref().map(EffectQueue::current)
    }

    /// Render state of the active effect (tone, step, phase, counters).
    pub fn render_state(&self) -> &StepScheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    /// Change the output rate. The effect in flight keeps its sample count
    /// but its phase increment follows the new rate from the next sample.
    pub fn set_sample_rate(&mut self, sample_rate: u32) -> Result<()> {
        if sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate);
        }
        self.config.sample_rate = sample_rate;
        if self.is_active() {
            self.scheduler.retune(sample_rate);
        }
        Ok(())
    }

    pub fn sample_range(&self) -> u16 {
        self.config.sample_range
    }

    pub fn set_sample_range(&mut self, sample_range: u16) {
        self.config.sample_range = sample_range;
    }

    pub fn buffer_size(&self) -> usize {
        self.config.buffer_size
    }

    pub fn set_buffer_size(&mut self, buffer_size: usize) -> Result<()> {
        if buffer_size == 0 {
            return Err(SynthError::InvalidBufferSize);
        }
        self.config.buffer_size = buffer_size;
        Ok(())
    }

    pub fn or_mask(&self) -> u16 {
        self.config.or_mask
    }

    pub fn set_or_mask(&mut self, or_mask: u16) {
        self.config.or_mask = or_mask;
    }
}

/// Check every effect of a sequence, reporting the first invalid index.
pub(crate) fn validate_sequence(effects: &[SoundEffect]) -> Result<()> {
    effects
        .iter()
        .enumerate()
        .try_for_each(|(index, effect)| effect.validate(index))
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            queue: None,
            scheduler: StepScheduler::new(),
            empty: SampleBuffer::empty(),
            downstream: None,
        }
    }
}

impl DataSource for Synthesizer {
    fn pull(&mut self) -> SampleBuffer {
        Synthesizer::pull(self)
    }

    fn connect(&mut self, sink: Arc<dyn DataSink>) {
        Synthesizer::connect(self, sink)
    }

    fn format(&self) -> SampleFormat {
        Synthesizer::format(self)
    }
}
