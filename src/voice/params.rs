#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{LfoShape, VcoShape};

/*
Parameter snapshot for one frame.

The host owns parameter metadata (ranges, defaults, display units) and hands
the core plain resolved numbers. Switch-style parameters arrive from the host
as floats compared against thresholds; they are decoded into tagged enums
right here at the boundary so the DSP code branches on enums, never on float
thresholds.
*/

/// What feeds the filter this frame.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterInput {
    Vco,
    Noise,
}

impl FilterInput {
    /// Decode the panel switch: low selects the VCO, high selects noise.
    pub fn from_switch(value: f32) -> Self {
        if value < 1.0 {
            FilterInput::Vco
        } else {
            FilterInput::Noise
        }
    }
}

/// Which signal modulates the filter cutoff.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModSource {
    Lfo,
    Ar,
}

impl ModSource {
    /// Decode the panel switch: high selects the AR generator.
    pub fn from_switch(value: f32) -> Self {
        if value > 0.0 {
            ModSource::Ar
        } else {
            ModSource::Lfo
        }
    }
}

impl VcoShape {
    /// Decode the panel switch: high selects the ramp.
    pub fn from_switch(value: f32) -> Self {
        if value > 0.0 {
            VcoShape::Ramp
        } else {
            VcoShape::Square
        }
    }
}

impl LfoShape {
    /// Decode the two shape selectors: triangle unless selector 1 is high,
    /// then square unless selector 2 is also high, then pulse.
    pub fn from_selectors(shape1: f32, shape2: f32) -> Self {
        if shape1 < 1.0 {
            LfoShape::Triangle
        } else if shape2 < 1.0 {
            LfoShape::Square
        } else {
            LfoShape::Pulse
        }
    }
}

/// All control values for one frame, already resolved by the host.
///
/// Documented ranges are host-enforced; the core assumes them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct VoiceParams {
    /// VCO base pitch, two octaves per unit. Range -1..2.
    pub vco_pitch: f32,
    pub vco_shape: VcoShape,
    /// LFO-to-pitch modulation depth. Range 0..0.05.
    pub vco_lfo_mod_depth: f32,
    /// Envelope-to-pitch modulation depth. Range 0..1.
    pub vco_ar_mod_depth: f32,
    /// Enables the envelope-to-pitch path.
    pub vco_ar_mod_on: bool,

    pub vcf_input: FilterInput,
    /// Normalized cutoff control. Range 0..1.
    pub vcf_cutoff: f32,
    /// Resonance, sets the damping coefficient directly. Range 1..100.
    pub vcf_resonance: f32,
    /// Cutoff modulation depth. Range 0..0.3.
    pub vcf_mod_depth: f32,
    pub vcf_mod_source: ModSource,

    /// Multiplies the filter output by the envelope when on.
    pub vca_on: bool,
    /// Output volume. Range 0..1.
    pub output_volume: f32,

    /// Attack time in milliseconds. Range 2.5..2500.
    pub ar_attack_ms: f32,
    /// Release time in milliseconds. Range 2.5..3000.
    pub ar_release_ms: f32,
    /// Free-running retrigger toggle.
    pub ar_repeat: bool,
    /// Momentary manual trigger.
    pub ar_manual: bool,

    /// LFO rate in log2-Hz relative to C4. Range -7..-1 (~2 Hz to ~131 Hz).
    pub lfo_rate: f32,
    pub lfo_shape: LfoShape,
}

impl Default for VoiceParams {
    /// Panel defaults.
    fn default() -> Self {
        Self {
            vco_pitch: 0.0,
            vco_shape: VcoShape::Ramp,
            vco_lfo_mod_depth: 0.0,
            vco_ar_mod_depth: 0.0,
            vco_ar_mod_on: false,

            vcf_input: FilterInput::Vco,
            vcf_cutoff: 1.0,
            vcf_resonance: 1.0,
            vcf_mod_depth: 0.0,
            vcf_mod_source: ModSource::Ar,

            vca_on: true,
            output_volume: 0.5,

            ar_attack_ms: 2.5,
            ar_release_ms: 2.5,
            ar_repeat: false,
            ar_manual: false,

            lfo_rate: -2.0,
            lfo_shape: LfoShape::Triangle,
        }
    }
}
