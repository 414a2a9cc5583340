#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::FREQ_C4;

/*
Pitched Oscillator (VCO)
========================

The audio-rate tone source. A single phase accumulator running over the
signed range [-0.5, 0.5), which keeps the ramp shape symmetric around zero:
the ramp is just a linear map of the phase and the square is its sign.

Pitch is a control-voltage-style value with a two-octave-per-unit mapping:

    freq = C4 · 2^(2 · pitch)

so the panel range [-1, 2] covers C2 up to four octaves above C4, and summed
modulation (external CV at 1 V/octave, LFO, envelope) lands in the same units.
*/

/// Output waveform, decoded from the panel switch at the parameter boundary.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcoShape {
    Ramp,
    Square,
}

pub struct PitchedOscillator {
    phase: f32, // always wrapped into [-0.5, 0.5)
    freq: f32,  // Hz
}

impl PitchedOscillator {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            freq: 0.0,
        }
    }

    /// Set the frequency from the summed pitch value (two octaves per unit).
    pub fn set_pitch(&mut self, pitch: f32) {
        self.freq = FREQ_C4 * (2.0 * pitch).exp2();
    }

    /// Advance the accumulator by one frame.
    pub fn process(&mut self, delta_time: f32) {
        self.phase += self.freq * delta_time;
        // Wrap into [-0.5, 0.5). floor-based so even an extreme modulated
        // frequency cannot leave the phase out of range for a frame.
        self.phase -= (self.phase + 0.5).floor();
    }

    /// Linear ramp over the phase, [-1, 1).
    pub fn ramp(&self) -> f32 {
        2.0 * (self.phase + 0.5) - 1.0
    }

    /// Sign of the phase.
    pub fn square(&self) -> f32 {
        if self.phase < 0.0 {
            -1.0
        } else {
            1.0
        }
    }

    pub fn sample(&self, shape: VcoShape) -> f32 {
        match shape {
            VcoShape::Ramp => self.ramp(),
            VcoShape::Square => self.square(),
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn freq(&self) -> f32 {
        self.freq
    }
}

impl Default for PitchedOscillator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44_100.0;

    #[test]
    fn phase_stays_in_signed_range() {
        let mut osc = PitchedOscillator::new();
        osc.set_pitch(2.0); // top of the panel range
        let dt = 1.0 / SAMPLE_RATE;
        for _ in 0..100_000 {
            osc.process(dt);
            let phase = osc.phase();
            assert!((-0.5..0.5).contains(&phase), "phase {phase} left [-0.5, 0.5)");
        }
    }

    #[test]
    fn phase_wraps_even_under_extreme_modulation() {
        let mut osc = PitchedOscillator::new();
        // Far outside the documented range, as heavy AR modulation can push it.
        osc.set_pitch(7.0);
        let dt = 1.0 / SAMPLE_RATE;
        for _ in 0..10_000 {
            osc.process(dt);
            assert!((-0.5..0.5).contains(&osc.phase()));
        }
    }

    #[test]
    fn pitch_zero_runs_at_c4() {
        let mut osc = PitchedOscillator::new();
        osc.set_pitch(0.0);
        let dt = 1.0 / SAMPLE_RATE;

        // Count wraps over one second; should match C4 within a cycle.
        let mut wraps = 0;
        let mut last_phase = osc.phase();
        for _ in 0..SAMPLE_RATE as usize {
            osc.process(dt);
            if osc.phase() < last_phase {
                wraps += 1;
            }
            last_phase = osc.phase();
        }
        assert!(
            (260..=263).contains(&wraps),
            "expected ~261 cycles at pitch 0, got {wraps}"
        );
    }

    #[test]
    fn pitch_is_two_octaves_per_unit() {
        let mut osc = PitchedOscillator::new();
        osc.set_pitch(0.5);
        let f_half = osc.freq();
        osc.set_pitch(1.5);
        let f_three_halves = osc.freq();
        assert!(((f_three_halves / f_half) - 4.0).abs() < 1e-3);
    }

    #[test]
    fn ramp_and_square_track_phase() {
        let mut osc = PitchedOscillator::new();
        osc.set_pitch(0.0);
        let dt = 1.0 / SAMPLE_RATE;
        for _ in 0..10_000 {
            osc.process(dt);
            let ramp = osc.sample(VcoShape::Ramp);
            assert!((-1.0..1.0).contains(&ramp));
            assert!((ramp - 2.0 * osc.phase()).abs() < 1e-6);

            let square = osc.sample(VcoShape::Square);
            assert!(square == 1.0 || square == -1.0);
            assert_eq!(square >= 0.0, osc.phase() >= 0.0);
        }
    }
}
