//! Benchmarks for the AR envelope generator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use noisemachine_dsp::dsp::ArEnvelope;
use noisemachine_dsp::FrameCtx;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let ctx = FrameCtx::from_rate(48_000.0);

    for &size in BLOCK_SIZES {
        // Free-running repeat mode, rates recomputed every sample the way
        // the orchestrator drives it.
        let mut env = ArEnvelope::new();
        group.bench_with_input(BenchmarkId::new("repeat", size), &size, |b, &size| {
            b.iter(|| {
                let mut acc = 0.0f32;
                for _ in 0..size {
                    env.set_rates(black_box(2.5), black_box(2.5), &ctx);
                    env.trigger(true, false);
                    acc += env.next_sample();
                }
                black_box(acc)
            })
        });
    }

    group.finish();
}
