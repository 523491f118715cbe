use std::sync::Arc;

#[cfg(feature = "rtrb")]
use rtrb::Consumer;
use tracing::warn;

use crate::{sequencing::effect::SoundEffect, synth::synthesizer::Synthesizer};

/// Command handed from a control thread to the thread that owns the
/// [`Synthesizer`] (typically an audio callback).
#[derive(Debug, Clone)]
pub enum SynthMessage {
    Play(Arc<[SoundEffect]>),
    Stop,
    SetOrMask(u16),
    SetSampleRange(u16),
    SetSampleRate(u32),
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

impl Synthesizer {
    /// Drain every pending command. Rejected commands are logged and skipped.
    ///
    /// Returns the number of commands applied.
    pub fn apply_messages(&mut self, rx: &mut impl MessageReceiver) -> usize {
        let mut applied = 0;

        while let Some(msg) = rx.pop() {
            let result = match msg {
                SynthMessage::Play(effects) => self.play(effects),
                SynthMessage::Stop => {
                    self.stop();
                    Ok(())
                }
                SynthMessage::SetOrMask(mask) => {
                    self.set_or_mask(mask);
                    Ok(())
                }
                SynthMessage::SetSampleRange(range) => {
                    self.set_sample_range(range);
                    Ok(())
                }
                SynthMessage::SetSampleRate(rate) => self.set_sample_rate(rate),
            };

            match result {
                Ok(()) => applied += 1,
                Err(err) => warn!(%err, "synth command rejected"),
            }
        }

        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::Waveform;
    use std::collections::VecDeque;

    impl MessageReceiver for VecDeque<SynthMessage> {
        fn pop(&mut self) -> Option<SynthMessage> {
            self.pop_front()
        }
    }

    fn blip() -> Arc<[SoundEffect]> {
        Arc::from(vec![SoundEffect::builder()
            .tone(Waveform::Triangle)
            .duration_ms(10.0)
            .build()
            .unwrap()])
    }

    #[test]
    fn applies_commands_in_order() {
        let mut synth = Synthesizer::default();
        let mut rx = VecDeque::from(vec![
            SynthMessage::SetOrMask(0x4000),
            SynthMessage::Play(blip()),
            SynthMessage::SetSampleRange(511),
        ]);

        assert_eq!(synth.apply_messages(&mut rx), 3);
        assert!(rx.is_empty());
        assert!(synth.is_active());
        assert_eq!(synth.or_mask(), 0x4000);
        assert_eq!(synth.sample_range(), 511);
    }

    #[test]
    fn rejected_commands_are_skipped() {
        let mut synth = Synthesizer::default();
        let mut rx = VecDeque::from(vec![
            SynthMessage::SetSampleRate(0),
            SynthMessage::Play(blip()),
            SynthMessage::Stop,
        ]);

        assert_eq!(synth.apply_messages(&mut rx), 2);
        assert_eq!(synth.sample_rate(), 44_100);
        assert!(!synth.is_active());
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn drains_a_ring_buffer() {
        let (mut tx, mut rx) = rtrb::RingBuffer::<SynthMessage>::new(8);
        tx.push(SynthMessage::Play(blip())).unwrap();

        let mut synth = Synthesizer::default();
        assert_eq!(synth.apply_messages(&mut rx), 1);
        assert_eq!(synth.pull().len(), 441);
    }
}
