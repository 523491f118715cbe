pub mod duration;
pub mod effect;
pub mod queue;
pub mod record;

pub use effect::{SoundEffect, SoundEffectBuilder, ToneBinding};
pub use queue::EffectQueue;
pub use record::{decode_effects, encode_effects, RawSoundEffect, RawToneEffect, RECORD_SIZE};
