//! # Feedback Comb Filters
//!
//! The combs generate the reverb tail. Each one is a delay line whose
//! output is fed back into its own input:
//!
//! ```text
//!          ┌──────────────────────────────────────┐
//!          │                                      │
//! x[n] ──►(+)──► [delay d, modulated] ──┬──► [damping LPF] × g
//!                                       │
//!                                       └──► output
//! ```
//!
//! An impulse comes back every `d` samples, scaled by `g` each time, so
//! the echo train decays geometrically. Eight combs with unrelated
//! lengths, run in parallel and summed, give an echo density that grows
//! over time, like reflections in a room.
//!
//! ## Feedback Gain from RT60
//!
//! RT60 is the time it takes the tail to fall by 60 dB. A signal that
//! recirculates through a comb of length `d` seconds makes `rt60 / d`
//! trips in that time, and must lose 60 dB in total (a factor of 1000),
//! so each trip scales it by
//!
//! ```text
//! g = 10^(-3 * d / rt60)
//! ```
//!
//! Longer combs get a smaller `g` so that every comb decays at the same
//! rate in dB per second.

use std::num::NonZeroUsize;

use super::{delay_line::DelayLine, filter::OnePoleFilter, modulation::Lfo, sanitize, Processor};

/// Combs per channel.
pub const NUM_COMBS: usize = 8;

/// Comb lengths relative to `comb_time`. Taken from the classic
/// 1116..1617-sample tuning, which keeps the lengths mutually prime so
/// that no two combs share resonant peaks.
pub const COMB_RATIOS: [f32; NUM_COMBS] = [
    1.0, 1.0645, 1.1443, 1.2151, 1.2742, 1.3360, 1.3952, 1.4489,
];

/// Right-channel combs are this much longer than the left ones.
pub const STEREO_SPREAD: f32 = 1.0206;

/// Shortest and longest supported `comb_time`, in seconds.
pub const MIN_COMB_TIME: f32 = 0.01;
pub const MAX_COMB_TIME: f32 = 1.0;

/// Largest supported `variation`.
pub const MAX_VARIATION: f32 = 0.5;

/// Modulation depth in seconds per unit of `variation`.
pub const MOD_DEPTH_SECONDS: f32 = 0.01;

/// LFO rate for the comb read heads.
pub const MOD_RATE_HZ: f32 = 1.1;

/// Damping cutoff at the smallest and the largest `comb_time`.
pub const DAMPING_CUTOFF_SMALL_HZ: f32 = 12_000.0;
pub const DAMPING_CUTOFF_LARGE_HZ: f32 = 2_500.0;

/// Ceiling for rt60-derived gains. Strictly below 1 and below
/// [`FREEZE_GAIN`].
pub const MAX_DECAY_GAIN: f32 = 0.9999;

/// Feedback gain while frozen. Just under unity: the loop sustains for
/// minutes, and floating-point drift can never make it grow. Frozen
/// combs are also unmodulated, so nothing else in the loop loses level.
pub const FREEZE_GAIN: f32 = 0.999_99;

/// Per-trip feedback gain that makes a comb of `delay_seconds` decay by
/// 60 dB in `rt60` seconds.
pub fn feedback_gain(delay_seconds: f32, rt60: f32) -> f32 {
    10.0_f32
        .powf(-3.0 * delay_seconds / rt60)
        .min(MAX_DECAY_GAIN)
}

/// Damping cutoff for a given `comb_time`.
///
/// Falls log-linearly from [`DAMPING_CUTOFF_SMALL_HZ`] at
/// [`MIN_COMB_TIME`] to [`DAMPING_CUTOFF_LARGE_HZ`] at [`MAX_COMB_TIME`]:
/// bigger spaces absorb more treble.
pub fn damping_cutoff(comb_time: f32) -> f32 {
    let span = (MAX_COMB_TIME / MIN_COMB_TIME).log10();
    let t = ((comb_time / MIN_COMB_TIME).log10() / span).clamp(0.0, 1.0);
    DAMPING_CUTOFF_SMALL_HZ * (DAMPING_CUTOFF_LARGE_HZ / DAMPING_CUTOFF_SMALL_HZ).powf(t)
}

/// One damped, modulated feedback comb.
pub struct CombFilter {
    delay_line: DelayLine,
    damping: OnePoleFilter,
    lfo: Lfo,

    /// Nominal delay in whole samples.
    base_delay: f32,

    /// LFO excursion in samples, either side of `base_delay`.
    mod_depth: f32,

    feedback: f32,
}

impl CombFilter {
    pub fn new(capacity: NonZeroUsize, lfo_phase: f32) -> Self {
        Self {
            delay_line: DelayLine::new(capacity),
            damping: OnePoleFilter::new(),
            lfo: Lfo::new(lfo_phase),
            base_delay: 1.0,
            mod_depth: 0.0,
            feedback: 0.0,
        }
    }

    /// Set the nominal delay. Rounded to whole samples so that an
    /// unmodulated comb reads exact stored values.
    pub fn set_delay(&mut self, delay_samples: f32) {
        self.base_delay = delay_samples
            .round()
            .clamp(1.0, self.delay_line.capacity() as f32);
    }

    pub fn set_modulation(&mut self, depth_samples: f32, rate_hz: f32, sample_rate: f32) {
        self.mod_depth = depth_samples.max(0.0);
        self.lfo.set_rate(rate_hz, sample_rate);
    }

    pub fn set_feedback(&mut self, gain: f32) {
        self.feedback = gain;
    }

    pub fn set_damping(&mut self, cutoff_hz: f32, sample_rate: f32) {
        self.damping.set_cutoff(cutoff_hz, sample_rate);
    }

    pub fn bypass_damping(&mut self) {
        self.damping.bypass();
    }

    pub fn base_delay(&self) -> f32 {
        self.base_delay
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    pub fn mod_depth(&self) -> f32 {
        self.mod_depth
    }

    pub fn capacity(&self) -> usize {
        self.delay_line.capacity()
    }

    #[inline]
    fn read_offset(&mut self) -> f32 {
        let wobble = self.lfo.next();
        if self.mod_depth == 0.0 {
            return self.base_delay;
        }
        (self.base_delay + self.mod_depth * wobble).clamp(1.0, self.delay_line.capacity() as f32)
    }
}

impl Processor for CombFilter {
    /// Returns the delayed signal; the input itself never reaches the
    /// output directly.
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let offset = self.read_offset();
        let delayed = self.delay_line.read(offset);
        let damped = self.damping.process(delayed);
        self.delay_line.write(sanitize(input + self.feedback * damped));
        delayed
    }

    fn reset(&mut self) {
        self.delay_line.clear();
        self.damping.reset();
    }
}

/// Coefficients shared by every comb of a bank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombSettings {
    pub comb_time: f32,
    pub variation: f32,
    pub rt60: f32,
    pub frozen: bool,
}

/// The parallel comb bank for one channel.
pub struct CombBank {
    combs: [CombFilter; NUM_COMBS],
    spread: f32,
    sample_rate: f32,
}

impl CombBank {
    /// Allocate a bank for `sample_rate`.
    ///
    /// Every comb is sized for the longest `comb_time` plus the deepest
    /// modulation, so no later parameter change can outgrow its buffer.
    /// `spread` stretches all lengths (1.0 for left, [`STEREO_SPREAD`]
    /// for right) and `phase_shift` rotates all LFO start phases.
    pub fn new(sample_rate: f32, spread: f32, phase_shift: f32) -> Self {
        let max_mod_seconds = MAX_VARIATION * MOD_DEPTH_SECONDS;
        let combs = std::array::from_fn(|i| {
            let max_seconds = MAX_COMB_TIME * COMB_RATIOS[i] * spread + max_mod_seconds;
            let capacity = (max_seconds * sample_rate).ceil() as usize + 2;
            let phase = std::f32::consts::TAU * i as f32 / NUM_COMBS as f32 + phase_shift;
            CombFilter::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN), phase)
        });

        Self {
            combs,
            spread,
            sample_rate,
        }
    }

    /// Recompute delays, modulation, gains, and damping.
    ///
    /// Takes effect on the next processed sample. Buffered history is
    /// left untouched.
    pub fn configure(&mut self, settings: &CombSettings) {
        let sample_rate = self.sample_rate;
        let depth = settings.variation * MOD_DEPTH_SECONDS * sample_rate;
        let cutoff = damping_cutoff(settings.comb_time);

        for (comb, ratio) in self.combs.iter_mut().zip(COMB_RATIOS) {
            comb.set_delay(settings.comb_time * ratio * self.spread * sample_rate);

            if settings.frozen {
                // Fractional reads interpolate, and interpolation is a
                // lowpass. A frozen loop reads whole samples only.
                comb.set_modulation(0.0, MOD_RATE_HZ, sample_rate);
                comb.set_feedback(FREEZE_GAIN);
                comb.bypass_damping();
            } else {
                comb.set_modulation(depth, MOD_RATE_HZ, sample_rate);
                comb.set_feedback(feedback_gain(comb.base_delay() / sample_rate, settings.rt60));
                comb.set_damping(cutoff, sample_rate);
            }
        }
    }

    /// Feed one sample to every comb and return the mean of their
    /// outputs.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let sum: f32 = self.combs.iter_mut().map(|comb| comb.process(input)).sum();
        sum / NUM_COMBS as f32
    }

    pub fn clear(&mut self) {
        for comb in &mut self.combs {
            comb.reset();
        }
    }

    pub fn combs(&self) -> &[CombFilter; NUM_COMBS] {
        &self.combs
    }

    /// Longest nominal delay in the bank, in samples.
    pub fn longest_delay(&self) -> f32 {
        self.combs
            .iter()
            .map(CombFilter::base_delay)
            .fold(0.0, f32::max)
    }

    /// Shortest nominal delay in the bank, in samples.
    pub fn shortest_delay(&self) -> f32 {
        self.combs
            .iter()
            .map(CombFilter::base_delay)
            .fold(f32::MAX, f32::min)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
