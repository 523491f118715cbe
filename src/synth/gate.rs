//! Shared handle that lets one context issue playback requests while
//! another pulls buffers.
//!
//! A single mutex guards the whole render state. `play` takes it only to
//! swap in the new sequence and `pull` holds it while rendering exactly one
//! buffer, so every buffer comes entirely from one sequence and a replaced
//! sequence never leaks a sample after `play` returns. Decoding, validation,
//! buffer allocation and sink notification all happen outside the lock.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

use crate::{
    engine::config::EngineConfig,
    error::Result,
    io::{DataSink, DataSource, SampleBuffer, SampleFormat},
    sequencing::{effect::SoundEffect, record::decode_effects},
    synth::synthesizer::{validate_sequence, Synthesizer},
};

#[derive(Clone)]
pub struct SoundEmojiSynth {
    inner: Arc<Mutex<Synthesizer>>,
    /// Mirror of the synthesizer's buffer size, written under the lock
    buffer_size: Arc<AtomicUsize>,
}

impl SoundEmojiSynth {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(Self::from_synthesizer(Synthesizer::new(config)?))
    }

    pub fn from_synthesizer(synth: Synthesizer) -> Self {
        Self {
            buffer_size: Arc::new(AtomicUsize::new(synth.buffer_size())),
            inner: Arc::new(Mutex::new(synth)),
        }
    }

    /// The render state stays consistent across a panicking holder (every
    /// mutation is a plain field write), so a poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, Synthesizer> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the active sequence with `effects` and wake the sink.
    pub fn play(&self, effects: impl Into<Arc<[SoundEffect]>>) -> Result<()> {
        let effects = effects.into();
        validate_sequence(&effects)?;

        let sink = {
            let mut synth = self.lock();
            synth.install(effects);
            synth.downstream()
        };

        if let Some(sink) = sink {
            sink.pull_request();
        }
        Ok(())
    }

    pub fn play_bytes(&self, bytes: &[u8]) -> Result<()> {
        let effects = decode_effects(bytes)?;
        self.play(effects)
    }

    pub fn stop(&self) {
        self.lock().stop();
    }

    /// Render one buffer of up to `buffer_size` samples.
    pub fn pull(&self) -> SampleBuffer {
        let mut samples = vec![0u16; self.buffer_size.load(Ordering::Acquire)];

        let produced = {
            let mut synth = self.lock();
            let produced = synth.render_into(&mut samples);
            if produced == 0 {
                return synth.empty_buffer().clone();
            }
            produced
        };

        samples.truncate(produced);
        SampleBuffer::from(samples)
    }

    pub fn connect(&self, sink: Arc<dyn DataSink>) {
        self.lock().connect(sink);
    }

    pub fn format(&self) -> SampleFormat {
        SampleFormat::Unsigned16
    }

    pub fn is_active(&self) -> bool {
        self.lock().is_active()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.lock().current_index()
    }

    pub fn config(&self) -> EngineConfig {
        *self.lock().config()
    }

    pub fn sample_rate(&self) -> u32 {
        self.lock().sample_rate()
    }

    pub fn set_sample_rate(&self, sample_rate: u32) -> Result<()> {
        self.lock().set_sample_rate(sample_rate)
    }

    pub fn sample_range(&self) -> u16 {
        self.lock().sample_range()
    }

    pub fn set_sample_range(&self, sample_range: u16) {
        self.lock().set_sample_range(sample_range);
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size.load(Ordering::Acquire)
    }

    pub fn set_buffer_size(&self, buffer_size: usize) -> Result<()> {
        let mut synth = self.lock();
        synth.set_buffer_size(buffer_size)?;
        self.buffer_size.store(buffer_size, Ordering::Release);
        Ok(())
    }

    pub fn or_mask(&self) -> u16 {
        self.lock().or_mask()
    }

    pub fn set_or_mask(&self, or_mask: u16) {
        self.lock().set_or_mask(or_mask);
    }
}

impl Default for SoundEmojiSynth {
    fn default() -> Self {
        Self::from_synthesizer(Synthesizer::default())
    }
}

impl DataSource for SoundEmojiSynth {
    fn pull(&mut self) -> SampleBuffer {
        SoundEmojiSynth::pull(self)
    }

    fn connect(&mut self, sink: Arc<dyn DataSink>) {
        SoundEmojiSynth::connect(self, sink)
    }

    fn format(&self) -> SampleFormat {
        SoundEmojiSynth::format(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::{TonePrint, TonePrintKind};
    use std::{sync::atomic::AtomicBool, thread};

    /// Emits the same raw value at every position.
    struct Constant(u16);

    impl TonePrint for Constant {
        fn sample(&self, _parameter: f32, _position: usize) -> u16 {
            self.0
        }
    }

    fn constant(value: u16, duration_ms: f32) -> Vec<SoundEffect> {
        vec![SoundEffect::builder()
            .tone(TonePrintKind::custom(Constant(value)))
            .duration_ms(duration_ms)
            .build()
            .unwrap()]
    }

    #[test]
    fn clones_share_one_synthesizer() {
        let synth = SoundEmojiSynth::default();
        let other = synth.clone();

        synth.play(constant(100, 10.0)).unwrap();
        assert!(other.is_active());
        assert_eq!(other.pull().len(), 441);
        assert!(!synth.is_active());
    }

    #[test]
    fn setters_go_through_the_lock() {
        let synth = SoundEmojiSynth::default();
        synth.set_or_mask(0x8000);
        synth.set_sample_range(255);
        assert!(synth.set_sample_rate(0).is_err());
        synth.set_buffer_size(128).unwrap();

        let config = synth.config();
        assert_eq!(config.or_mask, 0x8000);
        assert_eq!(config.sample_range, 255);
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(synth.buffer_size(), 128);
    }

    #[test]
    fn pull_follows_buffer_size_from_any_clone() {
        let synth = SoundEmojiSynth::new(EngineConfig::default().with_buffer_size(64)).unwrap();
        let other = synth.clone();
        assert_eq!(other.buffer_size(), 64);

        synth.play(constant(1, 100.0)).unwrap();
        assert_eq!(synth.pull().len(), 64);

        other.set_buffer_size(100).unwrap();
        assert_eq!(synth.pull().len(), 100);

        assert!(other.set_buffer_size(0).is_err());
        assert_eq!(synth.buffer_size(), 100);
        assert_eq!(synth.pull().len(), 100);
    }

    #[test]
    fn idle_pull_shares_the_empty_buffer() {
        let synth = SoundEmojiSynth::default();
        let buffer = synth.pull();
        assert!(buffer.is_empty());
        assert!(buffer.ptr_eq(synth.lock().empty_buffer()));
    }

    #[test]
    fn invalid_sequence_is_rejected_without_the_lock() {
        let synth = SoundEmojiSynth::default();
        let mut bad = constant(1, 10.0);
        bad[0].steps = 0;

        // Holding the lock here would deadlock a `play` that took it.
        let guard = synth.inner.lock().unwrap();
        assert_eq!(synth.play(bad), Err(crate::error::SynthError::ZeroSteps { index: 0 }));
        drop(guard);

        assert!(!synth.is_active());
    }

    struct Flag(AtomicUsize);

    impl DataSink for Flag {
        fn pull_request(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn sink_is_notified_once_per_accepted_play() {
        let sink = Arc::new(Flag(AtomicUsize::new(0)));
        let synth = SoundEmojiSynth::default();
        synth.connect(sink.clone());

        synth.play(constant(1, 1.0)).unwrap();
        assert!(synth.play_bytes(&[0; 3]).is_err());
        synth.play(constant(1, 1.0)).unwrap();
        assert_eq!(sink.0.load(Ordering::SeqCst), 2);
    }

    /// A sink that pulls from inside `pull_request` must not deadlock.
    struct Eager {
        synth: Mutex<Option<SoundEmojiSynth>>,
        pulled: AtomicUsize,
    }

    impl DataSink for Eager {
        fn pull_request(&self) {
            if let Some(synth) = self.synth.lock().unwrap().as_ref() {
                self.pulled.fetch_add(synth.pull().len(), Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn sink_may_pull_from_its_notification() {
        let synth = SoundEmojiSynth::default();
        let sink = Arc::new(Eager {
            synth: Mutex::new(Some(synth.clone())),
            pulled: AtomicUsize::new(0),
        });
        synth.connect(sink.clone());

        synth.play(constant(7, 1.0)).unwrap();
        assert_eq!(sink.pulled.load(Ordering::SeqCst), 44);

        // Break the reference cycle.
        sink.synth.lock().unwrap().take();
    }

    #[test]
    fn buffers_never_mix_sequences() {
        let synth = SoundEmojiSynth::default();
        synth.play(constant(100, 60_000.0)).unwrap();

        let done = Arc::new(AtomicBool::new(false));
        let player = {
            let synth = synth.clone();
            let done = done.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    let value = if i % 2 == 0 { 200 } else { 100 };
                    synth.play(constant(value, 60_000.0)).unwrap();
                }
                done.store(true, Ordering::SeqCst);
            })
        };

        let low = scale(100);
        let high = scale(200);
        while !done.load(Ordering::SeqCst) {
            let buffer = synth.pull();
            assert_eq!(buffer.len(), 512);
            let first = buffer[0];
            assert!(first == low || first == high);
            assert!(buffer.iter().all(|&s| s == first));
        }
        player.join().unwrap();

        // The last request was for the 100 tone.
        let buffer = synth.pull();
        assert!(buffer.iter().all(|&s| s == low));
    }

    fn scale(raw: u16) -> u16 {
        crate::engine::scheduler::scale_sample(raw, crate::MAX_AMPLITUDE, 1.0, 1023)
    }
}
