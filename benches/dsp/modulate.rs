//! Benchmarks for modulation passes.
//!
//! A pass runs once per step rather than once per sample, so these are
//! measured per pass over a full slot of three effects.

use std::hint::black_box;

use criterion::Criterion;
use emoji_synth::{StepContext, Tone, ToneEffectBinding, ToneEffectKind};

pub fn bench_tone_effects(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/tone_effect");

    let chains: [(&str, [ToneEffectBinding; 3]); 2] = [
        (
            "slides",
            [
                ToneEffectBinding::new(ToneEffectKind::FrequencySlide, [880.0, 0.0]),
                ToneEffectBinding::new(ToneEffectKind::ExponentialSlide, [1760.0, 0.0]),
                ToneEffectBinding::new(ToneEffectKind::VolumeSlide, [0.0, 0.0]),
            ],
        ),
        (
            "oscillating",
            [
                ToneEffectBinding::new(ToneEffectKind::Vibrato, [10.0, 8.0]),
                ToneEffectBinding::new(ToneEffectKind::Tremolo, [0.5, 4.0]),
                ToneEffectBinding::new(ToneEffectKind::Vibrato, [3.0, 3.0]),
            ],
        ),
    ];

    for (name, chain) in &chains {
        group.bench_function(*name, |b| {
            let mut step = 0;
            b.iter(|| {
                let mut tone = Tone {
                    frequency: 440.0,
                    volume: 1.0,
                };
                let ctx = StepContext {
                    base_frequency: 440.0,
                    base_volume: 1.0,
                    step,
                    steps: 64,
                };
                for binding in chain {
                    binding.apply(&mut tone, black_box(&ctx));
                }
                step = (step + 1) % 64;
                black_box(tone)
            })
        });
    }

    group.finish();
}
