//! Frame orchestration: the complete NoiseMachine voice.

pub mod message;
pub mod params;

pub use message::{MessageReceiver, VoiceMessage};
pub use params::{FilterInput, ModSource, VoiceParams};

use crate::dsp::filter::cutoff_hz_from_control;
use crate::dsp::{ArEnvelope, LfoBank, NoiseSource, PitchedOscillator, SvFilter};
use crate::{FrameCtx, MAX_VOLTS};

/*
One voice, one fixed per-frame sequence:

    LFO bank → AR envelope → VCO → noise → VCF → VCA/volume/clamp

Only the modulation routing branches (which source drives the cutoff, what
feeds the filter); the ordering never does. The AR generator is advanced
before the VCO so pitch modulation consumes the current frame's envelope
value. Every step is plain arithmetic over the owned component state: no
allocation, no I/O, no locks - safe to run inside a realtime audio callback.
*/

/// Everything the voice emits for one frame, in volts (LED excepted).
#[derive(Debug, Clone, Copy)]
pub struct VoiceFrame {
    /// Final mixed output, hard-clamped to ±5 V.
    pub mix: f32,
    /// Summed LFO bank output.
    pub lfo: f32,
    /// VCO waveform at 5 V scale.
    pub vco: f32,
    /// AR envelope level, 0..5 V.
    pub envelope: f32,
    /// Rate LED drive, nominally within ±1.
    pub led: f32,
}

/// The complete voice. All persistent DSP state lives here, owned, one
/// instance per voice; nothing is shared or static.
pub struct NoiseMachineVoice {
    lfo: LfoBank,
    vco: PitchedOscillator,
    envelope: ArEnvelope,
    filter: SvFilter,
    noise: NoiseSource,
}

impl NoiseMachineVoice {
    pub fn new() -> Self {
        Self {
            lfo: LfoBank::new(),
            vco: PitchedOscillator::new(),
            envelope: ArEnvelope::new(),
            filter: SvFilter::new(),
            noise: NoiseSource::default(),
        }
    }

    /// Build a voice with a fixed noise seed for reproducible output.
    pub fn with_noise_seed(seed: u64) -> Self {
        Self {
            noise: NoiseSource::from_seed(seed),
            ..Self::new()
        }
    }

    /// Run one audio frame.
    ///
    /// `pitch_cv` is the external control voltage in volts (1 V/octave,
    /// scaled by 1/5 internally). Non-finite CV is treated as 0 so it can
    /// never reach the filter's recursive state.
    pub fn process(&mut self, params: &VoiceParams, pitch_cv: f32, ctx: &FrameCtx) -> VoiceFrame {
        // 1. LFO bank.
        let lfo = self.lfo.process(params.lfo_rate, params.lfo_shape, ctx);

        // 2. AR envelope: rates follow the current parameters and sample
        // rate every frame, then the trigger policy, then one step.
        self.envelope
            .set_rates(params.ar_attack_ms, params.ar_release_ms, ctx);
        self.envelope.trigger(params.ar_repeat, params.ar_manual);
        let envelope = self.envelope.next_sample();

        // 3. VCO: sum the pitch CV chain and advance.
        let pitch_cv = if pitch_cv.is_finite() { pitch_cv } else { 0.0 };
        let mut pitch = params.vco_pitch + pitch_cv / 5.0 + lfo.sum * params.vco_lfo_mod_depth;
        if params.vco_ar_mod_on {
            pitch += envelope * params.vco_ar_mod_depth;
        }
        self.vco.set_pitch(pitch);
        self.vco.process(ctx.sample_time);
        let vco = self.vco.sample(params.vco_shape);

        // 4. One Gaussian noise sample, whether the filter uses it or not,
        // so the stream position does not depend on the routing.
        let noise = self.noise.next_sample();

        // 5. VCF: pick the modulation source and input, then filter.
        let cutoff_mod = match params.vcf_mod_source {
            ModSource::Ar => envelope,
            ModSource::Lfo => lfo.sum,
        } * params.vcf_mod_depth;
        let cutoff_hz = cutoff_hz_from_control(params.vcf_cutoff + cutoff_mod);
        let filter_in = match params.vcf_input {
            FilterInput::Vco => vco,
            FilterInput::Noise => noise,
        };
        let mut out = self
            .filter
            .next_sample(filter_in, cutoff_hz, params.vcf_resonance, ctx);

        // 6. VCA, volume, and the final rail clamp.
        if params.vca_on {
            out = (out * envelope).clamp(-MAX_VOLTS, MAX_VOLTS);
        }
        let mix = (out * params.output_volume).clamp(-MAX_VOLTS, MAX_VOLTS);

        VoiceFrame {
            mix,
            lfo: lfo.sum,
            vco: vco * MAX_VOLTS,
            envelope,
            led: lfo.led,
        }
    }

    /// Render a block of final-mix samples with fixed parameters.
    ///
    /// Convenience for buffer-oriented hosts; each sample still runs the full
    /// per-frame sequence.
    pub fn render(&mut self, out: &mut [f32], params: &VoiceParams, pitch_cv: f32, ctx: &FrameCtx) {
        for sample in out.iter_mut() {
            *sample = self.process(params, pitch_cv, ctx).mix;
        }
    }

    /// Reset all stateful components to their initial state.
    pub fn reset(&mut self) {
        self.lfo = LfoBank::new();
        self.vco = PitchedOscillator::new();
        self.envelope.reset();
        self.filter.reset();
    }
}

impl Default for NoiseMachineVoice {
    fn default() -> Self {
        Self::new()
    }
}
