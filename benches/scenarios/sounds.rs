//! Benchmarks for complete sound emojis.

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};

use emoji_synth::{voices, EngineConfig, SoundEffect, SoundEmojiSynth, Synthesizer};

use crate::BLOCK_SIZES;

pub fn bench_sounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/sounds");

    for &size in BLOCK_SIZES {
        let mut block = vec![0u16; size];

        // Realtime path: render_into a preallocated block, restarting the
        // preset whenever it runs out.
        for (name, effects) in voices::all() {
            let mut synth = Synthesizer::default();
            let effects: Arc<[SoundEffect]> = effects.into();

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    if synth.render_into(black_box(&mut block)) < size {
                        let _ = synth.play(effects.clone());
                    }
                })
            });
        }

        // Pull path through the mutex gate, one allocated buffer per call.
        let config = EngineConfig::default().with_buffer_size(size);
        if let Ok(gate) = SoundEmojiSynth::new(config) {
            let siren: Arc<[SoundEffect]> = voices::siren().into();
            group.bench_with_input(BenchmarkId::new("gate/siren", size), &size, |b, _| {
                b.iter(|| {
                    let buffer = gate.pull();
                    if buffer.len() < size {
                        let _ = gate.play(siren.clone());
                    }
                    black_box(buffer)
                })
            });
        }
    }

    group.finish();
}
