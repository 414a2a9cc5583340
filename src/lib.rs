pub mod dsp;
pub mod voice; // Frame orchestration for the full NoiseMachine voice

/// Envelope ceiling and the magnitude of the output rails, in volts.
///
/// The AR generator ramps between 0 and this value, and the final mix is
/// hard-clamped to ±MAX_VOLTS before it leaves the voice.
pub const MAX_VOLTS: f32 = 5.0;

/// Middle C in Hz. Both oscillators map their pitch controls relative to C4.
pub const FREQ_C4: f32 = 261.6256;

/// Per-frame timing snapshot handed to every component.
///
/// The host owns the sample rate and may change it between frames; components
/// derive all rate-dependent coefficients from this context every frame rather
/// than caching them.
#[derive(Debug, Clone, Copy)]
pub struct FrameCtx {
    pub sample_rate: f32,
    pub sample_time: f32,
}

impl FrameCtx {
    pub fn from_rate(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            sample_time: 1.0 / sample_rate,
        }
    }
}
