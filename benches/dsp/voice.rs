//! Benchmarks for the complete voice chain.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use noisemachine_dsp::voice::{FilterInput, NoiseMachineVoice, VoiceParams};
use noisemachine_dsp::FrameCtx;

use crate::BLOCK_SIZES;

pub fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voice");
    let ctx = FrameCtx::from_rate(48_000.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Default routing: VCO through the filter, VCA on.
        let params = VoiceParams {
            ar_repeat: true,
            ..VoiceParams::default()
        };
        let mut voice = NoiseMachineVoice::with_noise_seed(1);
        group.bench_with_input(BenchmarkId::new("vco_chain", size), &size, |b, _| {
            b.iter(|| {
                voice.render(black_box(&mut buffer), &params, 0.0, &ctx);
            })
        });

        // Noise routing with cutoff modulation.
        let params = VoiceParams {
            vcf_input: FilterInput::Noise,
            vcf_mod_depth: 0.3,
            ar_repeat: true,
            ..VoiceParams::default()
        };
        let mut voice = NoiseMachineVoice::with_noise_seed(1);
        group.bench_with_input(BenchmarkId::new("noise_chain", size), &size, |b, _| {
            b.iter(|| {
                voice.render(black_box(&mut buffer), &params, 0.0, &ctx);
            })
        });
    }

    group.finish();
}
