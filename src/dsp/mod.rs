//! Low-level DSP primitives that make up the NoiseMachine voice.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They intentionally stay focused on the
//! signal-processing math so the voice layer can layer on orchestration and
//! modulation routing.

/// Attack/release envelope generator.
pub mod envelope;
/// State-variable and one-pole RC filters.
pub mod filter;
/// Three-voice low-frequency oscillator bank.
pub mod lfo;
/// Seedable Gaussian noise source.
pub mod noise;
/// Audio-rate pitched oscillator (the VCO).
pub mod oscillator;

pub use envelope::{ArEnvelope, ArStage};
pub use filter::{RcFilter, SvFilter};
pub use lfo::{LfoBank, LfoShape, LowFrequencyOscillator};
pub use noise::NoiseSource;
pub use oscillator::{PitchedOscillator, VcoShape};
