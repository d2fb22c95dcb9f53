//! # One-Pole Lowpass Filter
//!
//! The simplest IIR lowpass. The reverb uses it twice:
//!
//! - inside every comb's feedback loop, as the **damping** filter that
//!   models high-frequency absorption (each trip around the loop loses
//!   a little more treble, so the tail darkens as it decays);
//! - at control rate, as the core of the
//!   [`ParameterSmoother`](super::smoother::ParameterSmoother).
//!
//! ## The Filter Equation
//!
//! ```text
//! y[n] = (1 - a) * x[n] + a * y[n-1]
//! ```
//!
//! - `a = 0.0` → output = input (passthrough)
//! - `a → 1.0` → heavy smoothing
//!
//! The DC gain is exactly 1 for any `a`, which matters in the comb
//! loop: damping never changes the low-frequency decay time that the
//! feedback gain was computed for, it only shortens the decay of the
//! highs.
//!
//! ## Computing the Coefficient from Frequency
//!
//! ```text
//! a = e^(-2π * cutoff_hz / sample_rate)
//! ```

use std::f32::consts::PI;

use super::{sanitize, Processor};

/// A one-pole (6 dB/octave) lowpass filter.
pub struct OnePoleFilter {
    /// Range: 0.0 (no filtering) to ~0.997 (20 Hz at 44.1 kHz).
    coefficient: f32,

    /// The previous output sample, the filter's only state.
    state: f32,
}

impl OnePoleFilter {
    /// Create a new filter initialized to passthrough (no filtering).
    pub fn new() -> Self {
        Self {
            coefficient: 0.0,
            state: 0.0,
        }
    }

    /// Update the filter coefficient for a given cutoff frequency.
    ///
    /// The cutoff is clamped to `20 Hz ..= 0.49 * sample_rate`. Below
    /// 20 Hz the coefficient crowds 1.0 and the filter stagnates; near
    /// Nyquist the mapping stops being meaningful.
    ///
    /// Example at 44100 Hz:
    /// - cutoff = 12000 Hz → coeff ≈ 0.18 (small room, bright tail)
    /// - cutoff = 2500 Hz  → coeff ≈ 0.70 (large hall, dark tail)
    pub fn set_cutoff(&mut self, cutoff_hz: f32, sample_rate: f32) {
        let safe_cutoff = cutoff_hz.clamp(20.0, sample_rate * 0.49);

        self.coefficient = (-2.0 * PI * safe_cutoff / sample_rate).exp();
    }

    /// Turn the filter into a passthrough, keeping its state.
    ///
    /// Freeze bypasses damping this way so the frozen loop keeps its
    /// full spectrum.
    pub fn bypass(&mut self) {
        self.coefficient = 0.0;
    }

    pub fn coefficient(&self) -> f32 {
        self.coefficient
    }

    /// Snap the filter's memory to `value`, so the next output starts
    /// there instead of gliding up from zero.
    pub fn reset_to(&mut self, value: f32) {
        self.state = sanitize(value);
    }
}

impl Default for OnePoleFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for OnePoleFilter {
    /// ```text
    /// output = (1 - a) * input + a * state
    /// ```
    ///
    /// The stored state is sanitized; a NaN fed in once would otherwise
    /// poison every later output.
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let output = (1.0 - self.coefficient) * input + self.coefficient * self.state;
        self.state = sanitize(output);
        output
    }

    fn reset(&mut self) {
        self.state = 0.0;
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
