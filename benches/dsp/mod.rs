//! Benchmarks for tone prints and tone effects.

mod modulate;
mod oscillator;

pub use modulate::bench_tone_effects;
pub use oscillator::bench_tone_prints;
