use std::f32::consts::{PI, TAU};

use crate::FrameCtx;

/*
Filters
=======

Two filters live here:

  SvFilter   The voice's resonant two-pole lowpass (the VCF). A state-variable
             filter integrated with the trapezoidal rule, also known as a
             zero-delay-feedback (ZDF) topology.

  RcFilter   A one-pole RC filter. The LFO bank runs its pulse waveform
             through the highpass tap to strip DC and soften the edges.

Why zero-delay feedback?
------------------------

A naive digital state-variable filter feeds last sample's bandpass/lowpass
values back into this sample's highpass computation. That one-sample delay in
the feedback loop detunes the resonance and blows up at high cutoffs.
Trapezoidal integration solves the feedback algebraically instead:

    g  = tan(π · cutoff / sample_rate)
    R  = 1 / (2 · resonance)
    hp = (input - (2R + g)·mem1 - mem2) / (1 + 2Rg + g²)
    bp = g·hp + mem1
    lp = g·bp + mem2

so hp, bp and lp all describe the *same* sample instant. `mem1` and `mem2` are
the integrator states and the only memory the filter carries.

The integrator states are genuinely recursive: one non-finite input would
contaminate them permanently. Inputs are therefore sanitized to 0 before they
can reach the state.
*/

/// Resonant two-pole state-variable lowpass with owned integrator state.
///
/// One instance per voice; the memory cells must never be shared.
pub struct SvFilter {
    mem1: f32,
    mem2: f32,
}

impl SvFilter {
    pub fn new() -> Self {
        Self {
            mem1: 0.0,
            mem2: 0.0,
        }
    }

    /// Run one sample through the filter and return the lowpass output.
    ///
    /// `resonance` is the raw panel value (1..100); larger values mean a
    /// sharper resonant peak. Coefficients are derived fresh from the current
    /// sample rate every call.
    pub fn next_sample(&mut self, input: f32, cutoff_hz: f32, resonance: f32, ctx: &FrameCtx) -> f32 {
        // A single NaN would live in mem1/mem2 forever.
        let input = if input.is_finite() { input } else { 0.0 };

        let g = (PI * cutoff_hz / ctx.sample_rate).tan();
        let r = 1.0 / (2.0 * resonance);

        let hp = (input - (2.0 * r + g) * self.mem1 - self.mem2)
            / (1.0 + 2.0 * r * g + g * g);
        let bp = g * hp + self.mem1;
        let lp = g * bp + self.mem2;

        // Update order matters: both cells advance from this sample's taps.
        self.mem1 = g * hp + bp;
        self.mem2 = g * bp + lp;

        lp
    }

    pub fn reset(&mut self) {
        self.mem1 = 0.0;
        self.mem2 = 0.0;
    }
}

impl Default for SvFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Map the normalized [0, 1] cutoff control to Hz.
///
/// Exponential sweep over 2^4.5 .. 2^13 Hz (≈23 Hz to ≈8.2 kHz), which spreads
/// the control's travel evenly in octaves. Out-of-range and non-finite values
/// are clamped into the control range first.
pub fn cutoff_hz_from_control(control: f32) -> f32 {
    let control = if control.is_finite() { control.clamp(0.0, 1.0) } else { 0.0 };
    (4.5 + control * 8.5).exp2()
}

/// One-pole RC filter (bilinear transform), exposing lowpass and highpass taps.
pub struct RcFilter {
    c: f32,
    last_in: f32,
    last_out: f32,
}

impl RcFilter {
    pub fn new() -> Self {
        Self {
            c: 0.0,
            last_in: 0.0,
            last_out: 0.0,
        }
    }

    /// Set the cutoff as a fraction of the sample rate (`f = f_c / f_s`).
    pub fn set_cutoff(&mut self, f: f32) {
        self.c = 2.0 / (TAU * f);
    }

    pub fn process(&mut self, x: f32) {
        let y = (x + self.last_in - self.last_out * (1.0 - self.c)) / (1.0 + self.c);
        self.last_in = x;
        self.last_out = y;
    }

    pub fn lowpass(&self) -> f32 {
        self.last_out
    }

    pub fn highpass(&self) -> f32 {
        self.last_in - self.last_out
    }

    pub fn reset(&mut self) {
        self.last_in = 0.0;
        self.last_out = 0.0;
    }
}

impl Default for RcFilter {
    fn default() -> Self {
        Self::new()
    }
}
