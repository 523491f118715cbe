use std::sync::Arc;

use crate::sequencing::effect::SoundEffect;

/// Sequence of sound effects being played, with a cursor on the active one.
///
/// The effects are shared (`Arc`) with whoever issued the playback request;
/// the queue's reference is released as soon as the queue is dropped, which
/// happens when it is exhausted or superseded.
#[derive(Debug, Clone)]
pub struct EffectQueue {
    effects: Arc<[SoundEffect]>,
    cursor: usize,
}

impl EffectQueue {
    /// Returns `None` for an empty sequence: there is nothing to make active.
    pub fn new(effects: Arc<[SoundEffect]>) -> Option<Self> {
        if effects.is_empty() {
            return None;
        }
        Some(Self { effects, cursor: 0 })
    }

    /// The active effect.
    #[inline]
    pub fn current(&self) -> &SoundEffect {
        &self.effects[self.cursor]
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Move to the next effect. Returns `false`, leaving the cursor on the
    /// last entry, once the sequence is exhausted.
    pub fn advance(&mut self) -> bool {
        if self.cursor + 1 < self.effects.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn effects(&self) -> &Arc<[SoundEffect]> {
        &self.effects
    }
}
