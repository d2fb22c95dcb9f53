//! # DSP (Digital Signal Processing) Primitives
//!
//! This module contains the building blocks of the Moorer reverb, leaf
//! first:
//!
//! - **`delay_line`**: A ring buffer with fractional reads. Every comb
//!   and allpass stage owns one.
//!
//! - **`filter`**: A one-pole lowpass. Damps the comb feedback paths so
//!   the tail darkens as it decays.
//!
//! - **`smoother`**: The same one-pole, run at control rate to slew
//!   parameter jumps before they reach the engine.
//!
//! - **`modulation`**: Slow sine LFOs that wobble each comb's read head
//!   to break up metallic resonances.
//!
//! - **`comb`**: Damped, modulated feedback comb filters and the
//!   parallel bank that sums them.
//!
//! - **`allpass`**: Schroeder allpass stages and the diffusion cascade.
//!
//! - **`freeze`**: The Normal/Frozen state machine.
//!
//! - **`mixer`**: Dry/wet crossfade and output clipping.
//!
//! - **`moorer`**: The engine that owns and wires all of the above.

pub mod allpass;
pub mod comb;
pub mod delay_line;
pub mod filter;
pub mod freeze;
pub mod mixer;
pub mod modulation;
pub mod moorer;
pub mod smoother;

/// Magnitudes below this are flushed to zero. Around -400 dBFS, far
/// below anything audible, but well above the f32 denormal range.
const FLUSH_THRESHOLD: f32 = 1e-20;

/// A single-sample audio processor.
///
/// Implemented by every filter stage of the reverb. The engine wires
/// stages into fixed arrays at construction, so calls are statically
/// dispatched; there are no trait objects on the audio path.
pub trait Processor {
    /// Consume one input sample and produce one output sample.
    fn process(&mut self, input: f32) -> f32;

    /// Return the stage to silence without touching its coefficients.
    fn reset(&mut self);
}

/// Make a sample safe to store in a recursive structure.
///
/// A NaN or infinity that reaches a feedback loop would circulate
/// forever, and denormals decaying geometrically never quite reach zero
/// (and are slow on many CPUs). Both are flushed to 0.0 here, before
/// anything is written into a delay line or filter state.
#[inline]
pub fn sanitize(sample: f32) -> f32 {
    if sample.is_finite() && sample.abs() >= FLUSH_THRESHOLD {
        sample
    } else {
        0.0
    }
}
