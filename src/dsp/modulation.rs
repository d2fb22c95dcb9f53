//! # Modulation (LFO)
//!
//! A slow sine oscillator per comb. Each comb's read head sits at
//!
//! ```text
//! offset = base_delay + depth * sin(phase)
//! ```
//!
//! so its delay, and with it every resonant peak of the comb, drifts by
//! a few samples. That drift smears the fixed, evenly spaced resonances
//! that make an unmodulated comb bank sound metallic.
//!
//! Each LFO starts at its own phase so the combs never move in lockstep.

use std::f32::consts::TAU;

pub struct Lfo {
    /// Current phase in radians, kept in `0..TAU`.
    phase: f32,
    /// Phase advance per sample, in radians.
    increment: f32,
}

impl Lfo {
    pub fn new(initial_phase: f32) -> Self {
        Self {
            phase: initial_phase.rem_euclid(TAU),
            increment: 0.0,
        }
    }

    pub fn set_rate(&mut self, rate_hz: f32, sample_rate: f32) {
        self.increment = TAU * rate_hz / sample_rate;
    }

    /// Return the current sine value and advance one sample.
    #[inline]
    pub fn next(&mut self) -> f32 {
        let value = self.phase.sin();
        self.phase += self.increment;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        value
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}
