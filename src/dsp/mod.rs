//! Low-level signal primitives used by the step scheduler.
//!
//! These components are allocation-free and realtime-safe. They stay focused
//! on the math (waveform shapes, modulation curves, phase arithmetic) so the
//! scheduler can layer sequencing and state transitions on top.

/// Step-rate LFO helpers for periodic tone effects.
pub mod lfo;
/// Tone effects: per-step frequency/volume modulation.
pub mod modulate;
/// Tone prints: deterministic waveforms over the cyclic phase domain.
pub mod oscillator;
/// 16.16 fixed-point phase accumulator.
pub mod phase;
