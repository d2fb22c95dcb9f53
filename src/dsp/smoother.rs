//! # Parameter Smoother
//!
//! Slews a control value toward its target with a one-pole lowpass.
//!
//! The smoother runs at *control rate*, once per parameter update, not
//! once per audio sample. Its cutoff is therefore specified against the
//! update rate, and has to be re-derived whenever the sample rate (and
//! so the update rate) changes.
//!
//! The Size control uses it: a jump in size moves every comb read head
//! at once, which is audible as a click or a pitch glitch. Slewed at
//! 20 Hz, the same jump becomes a short, smooth glide.

use super::{filter::OnePoleFilter, Processor};

/// Default slew cutoff for control signals.
pub const DEFAULT_SLEW_HZ: f32 = 20.0;

/// Distance from the target at which the slew is considered done.
const SETTLE_EPSILON: f32 = 1e-6;

pub struct ParameterSmoother {
    filter: OnePoleFilter,
    cutoff_hz: f32,
}

impl ParameterSmoother {
    /// Create a smoother sitting at `initial`, with its cutoff
    /// expressed against an update rate of `update_rate_hz`.
    pub fn new(initial: f32, cutoff_hz: f32, update_rate_hz: f32) -> Self {
        let mut filter = OnePoleFilter::new();
        filter.set_cutoff(cutoff_hz, update_rate_hz);
        filter.reset_to(initial);
        Self { filter, cutoff_hz }
    }

    /// Re-derive the coefficient for a new update rate.
    pub fn set_update_rate(&mut self, update_rate_hz: f32) {
        self.filter.set_cutoff(self.cutoff_hz, update_rate_hz);
    }

    /// Advance one control step toward `target` and return the slewed
    /// value.
    ///
    /// Within [`SETTLE_EPSILON`] of the target the output snaps onto it,
    /// so a settled smoother returns exactly the same value every step.
    pub fn next(&mut self, target: f32) -> f32 {
        let value = self.filter.process(target);
        if (value - target).abs() <= SETTLE_EPSILON {
            self.filter.reset_to(target);
            return target;
        }
        value
    }

    /// Jump straight to `value` (used when the host re-initializes).
    pub fn snap_to(&mut self, value: f32) {
        self.filter.reset_to(value);
    }
}
