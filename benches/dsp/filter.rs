//! Benchmarks for the state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use noisemachine_dsp::dsp::filter::cutoff_hz_from_control;
use noisemachine_dsp::dsp::SvFilter;
use noisemachine_dsp::FrameCtx;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let ctx = FrameCtx::from_rate(48_000.0);
    let cutoff = cutoff_hz_from_control(0.7);

    for &size in BLOCK_SIZES {
        // Sawtooth-like test signal.
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        let mut filter = SvFilter::new();
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = 0.0f32;
                for &x in &input {
                    acc += filter.next_sample(black_box(x), cutoff, 10.0, &ctx);
                }
                black_box(acc)
            })
        });
    }

    group.finish();
}
