//! Benchmarks for the three-voice LFO bank.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use noisemachine_dsp::dsp::{LfoBank, LfoShape};
use noisemachine_dsp::FrameCtx;

use crate::BLOCK_SIZES;

pub fn bench_lfo(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/lfo");
    let ctx = FrameCtx::from_rate(48_000.0);

    for &size in BLOCK_SIZES {
        for (name, shape) in [
            ("triangle", LfoShape::Triangle),
            ("square", LfoShape::Square),
            ("pulse", LfoShape::Pulse),
        ] {
            let mut bank = LfoBank::new();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, &size| {
                b.iter(|| {
                    let mut acc = 0.0f32;
                    for _ in 0..size {
                        acc += bank.process(black_box(-2.0), shape, &ctx).sum;
                    }
                    black_box(acc)
                })
            });
        }
    }

    group.finish();
}
