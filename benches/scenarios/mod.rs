//! Real-world scenario benchmarks.
//!
//! Preset sound emojis rendered the way an audio callback or a pull-driven
//! sink would render them.

mod sounds;

pub use sounds::bench_sounds;
