//! Benchmarks for tone print evaluation over a phase walk.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use emoji_synth::{
    dsp::{oscillator::TonePrint, phase::PhaseAccumulator},
    Waveform, DEFAULT_SAMPLE_RATE,
};

use crate::BLOCK_SIZES;

pub fn bench_tone_prints(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/tone_print");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0u16; size];

        for (name, waveform, parameter) in [
            // sin() per sample
            ("sine", Waveform::Sine, 0.0),
            // identity ramp
            ("sawtooth", Waveform::Sawtooth, 0.0),
            ("triangle", Waveform::Triangle, 0.0),
            // compare against duty cycle
            ("square", Waveform::Square, 0.25),
            // integer hash
            ("noise", Waveform::Noise, 7.0),
        ] {
            let mut phase = PhaseAccumulator::new();
            phase.set_frequency(440.0, DEFAULT_SAMPLE_RATE);

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for out in buffer.iter_mut() {
                        *out = waveform.sample(black_box(parameter), phase.position());
                        phase.advance();
                    }
                    black_box(&buffer);
                })
            });
        }
    }

    group.finish();
}
