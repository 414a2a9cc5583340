use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::filter::RcFilter;
use crate::{FrameCtx, FREQ_C4};

/*
LFO Bank
========

Three identical low-frequency phase accumulators summed into one modulation
signal. Each accumulator caches all three of its waveforms every frame and the
bank picks one shape (shared across the voices) when it sums them.

The waveforms:

  Triangle   Not a straight-line triangle. The folded, doubled phase is run
             through a polynomial curve that approximates an exponential
             segment, giving a rounded, non-peaky triangle that sounds smooth
             as a modulation source.

  Square     Plain 50% duty threshold on the phase.

  Pulse      The square fed through a one-pole RC highpass (cutoff tracks
             20 · Δt) and attenuated by 0.95. The highpass strips the DC so
             the pulse behaves as an AC-coupled modulation source, but the
             attenuation varies with rate - see the gain compensation below.

Phase slew is clamped to 0.35 per frame, which bounds how far the accumulator
can jump at very high rates or very low sample rates and keeps the wraparound
from aliasing into garbage.

Pulse gain compensation
-----------------------

The highpassed pulse loses amplitude differently across the 8-octave rate
range. The bank remaps the rate control's travel linearly into a 0.6..0.9
gain window and applies it to the pulse only, keeping the perceived level
roughly constant across the sweep.
*/

/// Which waveform the bank sums this frame.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LfoShape {
    Triangle,
    Square,
    Pulse,
}

/// Polynomial "exponential-like" shaping curve, 1 at x=0 down to -1 at x=1.
fn exp_curve(x: f32) -> f32 {
    (3.0 + x * (-13.0 + 5.0 * x)) / (3.0 + 2.0 * x)
}

/// One low-frequency phase accumulator with cached per-frame waveform values.
pub struct LowFrequencyOscillator {
    phase: f32, // always wrapped into [0, 1)
    freq: f32,  // Hz
    pulse_width: f32,
    pls_filter: RcFilter,

    tri_value: f32,
    sqr_value: f32,
    pls_value: f32,
}

impl LowFrequencyOscillator {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            freq: 0.0,
            pulse_width: 0.5,
            pls_filter: RcFilter::new(),
            tri_value: 0.0,
            sqr_value: 0.0,
            pls_value: 0.0,
        }
    }

    /// Set the frequency from a log2 pitch value: `freq = C4 · 2^pitch`.
    ///
    /// The panel rate control spans [-7, -1], i.e. roughly 2 Hz to 131 Hz.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.freq = FREQ_C4 * pitch.exp2();
    }

    /// Advance the accumulator by one frame and refresh the cached waveforms.
    pub fn process(&mut self, delta_time: f32) {
        // The upper clamp bounds phase slew at extreme rate/sample-rate
        // combinations.
        let delta_phase = (self.freq * delta_time).clamp(1e-6, 0.35);
        self.phase += delta_phase;
        self.phase -= self.phase.floor();

        self.tri_value = self.tri_at(self.phase);
        self.sqr_value = self.sqr_at(self.phase);
        self.pls_value = self.pls_at(self.phase, delta_time);
    }

    fn tri_at(&self, phase: f32) -> f32 {
        // Shift a quarter cycle, fold into the half cycle, double, and shape.
        let mut x = phase + 0.25;
        x -= x.trunc();
        let second_half = x >= 0.5;
        let mut x = x * 2.0;
        x -= x.trunc();
        let v = exp_curve(x);
        if second_half {
            v
        } else {
            -v
        }
    }

    fn sqr_at(&self, phase: f32) -> f32 {
        if phase < self.pulse_width {
            1.0
        } else {
            -1.0
        }
    }

    fn pls_at(&mut self, phase: f32, delta_time: f32) -> f32 {
        let v = if phase < self.pulse_width { 1.0 } else { -1.0 };
        self.pls_filter.set_cutoff(20.0 * delta_time);
        self.pls_filter.process(v);
        self.pls_filter.highpass() * 0.95
    }

    pub fn tri(&self) -> f32 {
        self.tri_value
    }

    pub fn sqr(&self) -> f32 {
        self.sqr_value
    }

    pub fn pls(&self) -> f32 {
        self.pls_value
    }

    /// LED drive for the rate indicator.
    pub fn light(&self) -> f32 {
        (TAU * self.phase).sin()
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}

impl Default for LowFrequencyOscillator {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of one bank frame: the summed modulation signal and the LED drive.
#[derive(Debug, Clone, Copy)]
pub struct LfoFrame {
    pub sum: f32,
    pub led: f32,
}

/// Three-voice LFO bank with a shared rate and shape.
pub struct LfoBank {
    voices: [LowFrequencyOscillator; 3],
}

impl LfoBank {
    /// Panel range of the rate control, in log2-Hz relative to C4.
    pub const RATE_MIN: f32 = -7.0;
    pub const RATE_MAX: f32 = -1.0;

    pub fn new() -> Self {
        Self {
            voices: [
                LowFrequencyOscillator::new(),
                LowFrequencyOscillator::new(),
                LowFrequencyOscillator::new(),
            ],
        }
    }

    /// Advance all three voices and sum the selected waveform.
    ///
    /// The LED follows the last voice by convention.
    pub fn process(&mut self, rate: f32, shape: LfoShape, ctx: &FrameCtx) -> LfoFrame {
        let gain = Self::pulse_gain(rate);
        let mut sum = 0.0;
        let mut led = 0.0;

        for voice in &mut self.voices {
            voice.set_pitch(rate);
            voice.process(ctx.sample_time);

            sum += match shape {
                LfoShape::Triangle => voice.tri(),
                LfoShape::Square => voice.sqr(),
                LfoShape::Pulse => voice.pls() * gain,
            };
            led = voice.light();
        }

        LfoFrame { sum, led }
    }

    /// Remap the rate control's travel into the 0.6..0.9 pulse gain window.
    fn pulse_gain(rate: f32) -> f32 {
        let travel = (rate - Self::RATE_MIN) / (Self::RATE_MAX - Self::RATE_MIN);
        0.6 + 0.3 * travel
    }

    #[cfg(test)]
    pub(crate) fn phases(&self) -> [f32; 3] {
        [
            self.voices[0].phase(),
            self.voices[1].phase(),
            self.voices[2].phase(),
        ]
    }
}

impl Default for LfoBank {
    fn default() -> Self {
        Self::new()
    }
}
