//! # Allpass Diffusion
//!
//! The comb bank produces a tail whose early part is a sparse train of
//! discrete echoes. A cascade of short Schroeder allpasses smears each
//! echo into a dense cluster without colouring the spectrum: an allpass
//! passes every frequency at unit gain and only scrambles phase.
//!
//! ## The Schroeder Allpass
//!
//! ```text
//! w[n] = x[n] + g * w[n-D]
//! y[n] = -g * w[n] + w[n-D]
//! ```
//!
//! giving `H(z) = (-g + z^-D) / (1 - g z^-D)`, whose magnitude is 1 at
//! every frequency.
//!
//! Left and right chains use different delay lengths, which decorrelates
//! the two channels and is most of what makes the reverb sound wide.

use std::num::NonZeroUsize;

use super::{delay_line::DelayLine, sanitize, Processor};

/// Allpass stages per channel.
pub const NUM_DIFFUSION_STAGES: usize = 4;

/// Stage delays in milliseconds. These are the 556/441/341/225-sample
/// lengths of the classic tuning, expressed at 44.1 kHz.
pub const LEFT_STAGE_MS: [f32; NUM_DIFFUSION_STAGES] = [12.61, 10.00, 7.73, 5.10];

/// Right-channel stages are offset by about half a millisecond.
pub const RIGHT_STAGE_MS: [f32; NUM_DIFFUSION_STAGES] = [13.13, 10.52, 8.25, 5.62];

/// Stage coefficients. Above ~0.7 individual stages start to ring
/// audibly; below ~0.5 they barely diffuse.
pub const STAGE_COEFFICIENTS: [f32; NUM_DIFFUSION_STAGES] = [0.7, 0.65, 0.6, 0.55];

pub struct AllpassFilter {
    delay_line: DelayLine,
    delay: f32,
    coefficient: f32,
}

impl AllpassFilter {
    /// Create a stage with a fixed delay of `delay_samples` (rounded,
    /// at least one sample).
    pub fn new(delay_samples: f32, coefficient: f32) -> Self {
        let delay = delay_samples.round().max(1.0);
        let capacity = NonZeroUsize::new(delay as usize).unwrap_or(NonZeroUsize::MIN);
        Self {
            delay_line: DelayLine::new(capacity),
            delay,
            coefficient,
        }
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }
}

impl Processor for AllpassFilter {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let delayed = self.delay_line.read(self.delay);
        let w = sanitize(input + self.coefficient * delayed);
        self.delay_line.write(w);
        delayed - self.coefficient * w
    }

    fn reset(&mut self) {
        self.delay_line.clear();
    }
}

/// A fixed cascade of allpass stages for one channel.
pub struct DiffusionNetwork {
    stages: [AllpassFilter; NUM_DIFFUSION_STAGES],
}

impl DiffusionNetwork {
    pub fn new(stage_ms: &[f32; NUM_DIFFUSION_STAGES], sample_rate: f32) -> Self {
        let stages = std::array::from_fn(|i| {
            AllpassFilter::new(stage_ms[i] * 0.001 * sample_rate, STAGE_COEFFICIENTS[i])
        });
        Self { stages }
    }

    /// Total delay through the cascade, in samples.
    pub fn total_delay(&self) -> f32 {
        self.stages.iter().map(AllpassFilter::delay).sum()
    }
}

impl Processor for DiffusionNetwork {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.stages
            .iter_mut()
            .fold(input, |signal, stage| stage.process(signal))
    }

    fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
