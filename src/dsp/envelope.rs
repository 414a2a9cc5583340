use crate::{FrameCtx, MAX_VOLTS};

/*
AR Envelope Generator
=====================

A two-stage attack/release envelope - no decay, no sustain. The generator
ramps from 0 V up to MAX_VOLTS, then immediately ramps back down to 0 V and
rests. It is the modulation workhorse of the NoiseMachine voice: it can drive
the VCA, sweep the filter cutoff, and bend the VCO pitch.

The State Machine
-----------------

    ┌────────┐  trigger   ┌────────┐  level = MAX   ┌─────────┐
    │  Idle  │ ─────────→ │ Attack │ ─────────────→ │ Release │
    └────────┘            └────────┘                └─────────┘
        ↑                                                │
        └────────────────── level = 0 ───────────────────┘

Idle freezes the level where it is (normally 0). There is no gate: once
triggered, the envelope always runs attack-then-release to completion.

Triggering
----------

Two controls feed the trigger logic each frame:

  repeat    While held on, the envelope retriggers itself every time it
            returns to Idle, producing a free-running cycle.

  manual    A momentary push. From Idle it starts an attack. If pressed again
            while still attacking (and repeat is off), the envelope snaps back
            to 0 and restarts - single-shot retriggering, never stacking.

Rates
-----

Attack and release rates are volts-per-sample values derived from the user's
millisecond time parameters and the *current* sample rate:

    increment = MAX_VOLTS / (attack_ms / 1000 * sample_rate)

They are recomputed every frame, never cached, so a host sample-rate change
does not alter the perceived envelope duration.
*/

/// The current stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArStage {
    Idle,
    Attack,
    Release,
}

pub struct ArEnvelope {
    stage: ArStage,
    level: f32,     // current output, volts
    increment: f32, // volts per sample during Attack
    decrement: f32, // volts per sample during Release
}

impl ArEnvelope {
    pub fn new() -> Self {
        Self {
            stage: ArStage::Idle,
            level: 0.0,
            increment: 0.0,
            decrement: 0.0,
        }
    }

    /// Derive the per-sample ramp rates from millisecond time parameters.
    ///
    /// Called once per frame before [`next_sample`](Self::next_sample) so the
    /// envelope tracks parameter edits and sample-rate changes immediately.
    pub fn set_rates(&mut self, attack_ms: f32, release_ms: f32, ctx: &FrameCtx) {
        let attack_samples = (attack_ms / 1000.0 * ctx.sample_rate).max(1.0);
        let release_samples = (release_ms / 1000.0 * ctx.sample_rate).max(1.0);
        self.increment = MAX_VOLTS / attack_samples;
        self.decrement = MAX_VOLTS / release_samples;
    }

    /// Apply the per-frame trigger policy.
    pub fn trigger(&mut self, repeat: bool, manual: bool) {
        if (repeat || manual) && self.stage == ArStage::Idle {
            self.stage = ArStage::Attack;
        }

        // Single-shot retrigger: restart a running attack from zero rather
        // than letting presses stack.
        if !repeat && manual && self.stage == ArStage::Attack {
            self.level = 0.0;
        }
    }

    /// Advance the envelope by one sample and return the new level in volts.
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            ArStage::Idle => {}

            ArStage::Attack => {
                self.level += self.increment;
                if self.level >= MAX_VOLTS {
                    self.level = MAX_VOLTS;
                    self.stage = ArStage::Release;
                }
            }

            ArStage::Release => {
                self.level -= self.decrement;
                if self.level <= 0.0 {
                    self.level = 0.0;
                    self.stage = ArStage::Idle;
                }
            }
        }

        debug_assert!((0.0..=MAX_VOLTS).contains(&self.level));
        self.level
    }

    /// Force the envelope back to Idle at 0 V.
    pub fn reset(&mut self) {
        self.stage = ArStage::Idle;
        self.level = 0.0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> ArStage {
        self.stage
    }

    /// Returns true while the envelope is ramping (not idle).
    pub fn is_active(&self) -> bool {
        self.stage != ArStage::Idle
    }
}

impl Default for ArEnvelope {
    fn default() -> Self {
        Self::new()
    }
}
