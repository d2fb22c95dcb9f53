//! # Moorer Reverb Engine
//!
//! Wires the primitives into a stereo reverberator:
//!
//! ```text
//!             ┌──────────────── COMB BANK (×8, parallel) ───┐
//!             │                                              │
//! in L ──┬──►(+)► [delay + LFO] ─► [damping] × g ─┐         │
//!        │    ▲                                   │  mean   │      ┌───────────┐
//!        │    └───────────────────────────────────┘ ──────────────►│ 4 allpass │──► wet L
//!        │                                                  │      └───────────┘
//!        │    (right channel: longer combs, longer allpasses)│
//!        │                                                          ┌───────┐
//!        └──────────────────────────────────────────── dry L ──────►│ mixer │──► out L
//!                                                          wet L ──►└───────┘
//! ```
//!
//! The engine owns all state. Only three entry points mutate it:
//! [`set_sample_rate()`](MoorerEngine::set_sample_rate) (allocates),
//! [`update_parameters()`](MoorerEngine::update_parameters) (recomputes
//! coefficients), and [`process_stereo()`](MoorerEngine::process_stereo)
//! (advances one sample, never allocates). The caller must not overlap
//! them; in the plugin they all run on the audio thread.

use std::f32::consts::TAU;

use super::allpass::{DiffusionNetwork, LEFT_STAGE_MS, RIGHT_STAGE_MS};
use super::comb::{
    CombBank, CombSettings, MAX_COMB_TIME, MAX_VARIATION, MIN_COMB_TIME, NUM_COMBS, STEREO_SPREAD,
};
use super::freeze::{FreezeController, FreezeRelease, FreezeTransition};
use super::mixer::StereoMixer;
use super::Processor;

/// Shortest and longest supported decay time, in seconds.
pub const MIN_RT60: f32 = 0.05;
pub const MAX_RT60: f32 = 60.0;

/// Everything the host can change, in engine units.
///
/// Passed wholesale; the engine derives every coefficient from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParameters {
    /// Hold the current tail indefinitely.
    pub freeze: bool,
    /// Base comb length in seconds (the "size" of the space).
    pub comb_time: f32,
    /// Comb modulation depth. 0.0 turns modulation off.
    pub variation: f32,
    /// Time for the tail to fall by 60 dB, in seconds.
    pub rt60: f32,
    /// 0.0 = dry only, 1.0 = reverb only.
    pub dry_wet: f32,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            freeze: false,
            comb_time: 0.1,
            variation: 0.1,
            rt60: 10.0,
            dry_wet: 1.0,
        }
    }
}

impl EngineParameters {
    /// Pull every field into its supported range. Non-finite values fall
    /// back to the field's default.
    pub fn clamped(self) -> Self {
        let defaults = Self::default();
        Self {
            freeze: self.freeze,
            comb_time: finite_or(self.comb_time, defaults.comb_time)
                .clamp(MIN_COMB_TIME, MAX_COMB_TIME),
            variation: finite_or(self.variation, defaults.variation).clamp(0.0, MAX_VARIATION),
            rt60: finite_or(self.rt60, defaults.rt60).clamp(MIN_RT60, MAX_RT60),
            dry_wet: finite_or(self.dry_wet, defaults.dry_wet).clamp(0.0, 1.0),
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Host audio is trusted to be finite, but not required to be.
fn finite_or_zero(sample: f32) -> f32 {
    finite_or(sample, 0.0)
}

fn assert_valid_sample_rate(sample_rate: f32) {
    assert!(
        sample_rate.is_finite() && sample_rate > 0.0,
        "reverb engine needs a positive sample rate, got {sample_rate}"
    );
}

/// One side of the stereo image.
struct Channel {
    combs: CombBank,
    diffusion: DiffusionNetwork,
}

impl Channel {
    fn left(sample_rate: f32) -> Self {
        Self {
            combs: CombBank::new(sample_rate, 1.0, 0.0),
            diffusion: DiffusionNetwork::new(&LEFT_STAGE_MS, sample_rate),
        }
    }

    /// Longer combs, longer allpasses, and LFOs rotated half a slot
    /// relative to the left side.
    fn right(sample_rate: f32) -> Self {
        Self {
            combs: CombBank::new(sample_rate, STEREO_SPREAD, TAU / (2 * NUM_COMBS) as f32),
            diffusion: DiffusionNetwork::new(&RIGHT_STAGE_MS, sample_rate),
        }
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let tail = self.combs.process(input);
        self.diffusion.process(tail)
    }

    fn clear(&mut self) {
        self.combs.clear();
        self.diffusion.reset();
    }
}

pub struct MoorerEngine {
    params: EngineParameters,
    sample_rate: f32,
    channels: [Channel; 2],
    freeze: FreezeController,
    mixer: StereoMixer,
}

impl MoorerEngine {
    /// Build an engine for `sample_rate` with `params` already applied.
    ///
    /// # Panics
    ///
    /// If `sample_rate` is not a positive, finite number. That is a host
    /// integration bug, not something to limp along with.
    pub fn new(params: EngineParameters, sample_rate: f32) -> Self {
        assert_valid_sample_rate(sample_rate);

        let params = params.clamped();
        let mut engine = Self {
            params,
            sample_rate,
            channels: [Channel::left(sample_rate), Channel::right(sample_rate)],
            freeze: FreezeController::new(params.freeze),
            mixer: StereoMixer::new(params.dry_wet),
        };
        engine.apply_coefficients();
        engine
    }

    /// Reallocate every delay line for a new sample rate and recompute
    /// all rate-dependent coefficients. The current tail is dropped.
    ///
    /// Allocates, so never call this from inside `process_stereo()`'s
    /// real-time context.
    ///
    /// # Panics
    ///
    /// Same condition as [`new()`](Self::new).
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        assert_valid_sample_rate(sample_rate);

        self.sample_rate = sample_rate;
        self.channels = [Channel::left(sample_rate), Channel::right(sample_rate)];
        self.apply_coefficients();
    }

    /// Apply a new parameter snapshot from the next sample on.
    ///
    /// Values are clamped, never rejected. An identical snapshot is a
    /// no-op, so calling this every sample is correct (if wasteful).
    pub fn update_parameters(&mut self, params: EngineParameters) {
        let params = params.clamped();
        if params == self.params {
            return;
        }

        if self.freeze.update(params.freeze) == FreezeTransition::Released(FreezeRelease::Clear) {
            self.clear_tail();
        }

        self.params = params;
        self.apply_coefficients();
    }

    /// Advance the engine by exactly one sample.
    ///
    /// Bounded time, no allocation, deterministic: the output depends
    /// only on the engine's state and `input`.
    #[inline]
    pub fn process_stereo(&mut self, input: [f32; 2]) -> [f32; 2] {
        let dry = input.map(finite_or_zero);
        let frozen = self.freeze.is_frozen();

        let mut wet = [0.0; 2];
        for (ch, channel) in self.channels.iter_mut().enumerate() {
            // Frozen combs recirculate what they hold and take nothing new.
            let injected = if frozen { 0.0 } else { dry[ch] };
            wet[ch] = channel.process(injected);
        }

        self.mixer.mix(dry, wet)
    }

    /// Silence the tail without touching parameters or coefficients.
    pub fn reset(&mut self) {
        self.clear_tail();
    }

    pub fn set_freeze_release(&mut self, release: FreezeRelease) {
        self.freeze.set_release(release);
    }

    pub fn freeze_release(&self) -> FreezeRelease {
        self.freeze.release()
    }

    pub fn params(&self) -> EngineParameters {
        self.params
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze.is_frozen()
    }

    /// How long the output keeps ringing after the input stops, in
    /// samples. `None` while frozen: the tail never ends.
    pub fn tail_samples(&self) -> Option<u32> {
        if self.is_frozen() {
            return None;
        }

        let longest_path = self
            .channels
            .iter()
            .map(|ch| ch.combs.longest_delay() + ch.diffusion.total_delay())
            .fold(0.0, f32::max);
        Some((self.params.rt60 * self.sample_rate + longest_path).ceil() as u32)
    }

    fn clear_tail(&mut self) {
        for channel in &mut self.channels {
            channel.clear();
        }
    }

    fn apply_coefficients(&mut self) {
        let settings = CombSettings {
            comb_time: self.params.comb_time,
            variation: self.params.variation,
            rt60: self.params.rt60,
            frozen: self.freeze.is_frozen(),
        };
        for channel in &mut self.channels {
            channel.combs.configure(&settings);
        }
        self.mixer.set_dry_wet(self.params.dry_wet);
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::mixer::OUTPUT_CEILING;

    const SR: f32 = 48000.0;

    /// Deterministic white noise in -1..1.
    struct Noise(u32);

    impl Noise {
        fn next(&mut self) -> f32 {
            self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (self.0 >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
        }
    }

    /// A bright, short, unmodulated room: easy to reason about.
    fn test_params() -> EngineParameters {
        EngineParameters {
            freeze: false,
            comb_time: 0.05,
            variation: 0.0,
            rt60: 0.5,
            dry_wet: 1.0,
        }
    }

    fn seconds(s: f32) -> usize {
        (s * SR) as usize
    }

    fn run_silence(engine: &mut MoorerEngine, n: usize) -> Vec<[f32; 2]> {
        (0..n).map(|_| engine.process_stereo([0.0, 0.0])).collect()
    }

    fn run_noise(
        engine: &mut MoorerEngine,
        noise: &mut Noise,
        gain: f32,
        n: usize,
    ) -> Vec<[f32; 2]> {
        (0..n)
            .map(|_| engine.process_stereo([noise.next() * gain, noise.next() * gain]))
            .collect()
    }

    fn peak(frames: &[[f32; 2]]) -> f32 {
        frames
            .iter()
            .flat_map(|f| f.iter())
            .fold(0.0_f32, |m, s| m.max(s.abs()))
    }

    fn rms(frames: &[[f32; 2]]) -> f32 {
        let sum: f64 = frames
            .iter()
            .flat_map(|f| f.iter())
            .map(|&s| f64::from(s) * f64::from(s))
            .sum();
        (sum / (frames.len() * 2) as f64).sqrt() as f32
    }

    #[test]
    #[should_panic(expected = "positive sample rate")]
    fn test_new_rejects_zero_sample_rate() {
        let _ = MoorerEngine::new(EngineParameters::default(), 0.0);
    }

    #[test]
    #[should_panic(expected = "positive sample rate")]
    fn test_set_sample_rate_rejects_nan() {
        let mut engine = MoorerEngine::new(EngineParameters::default(), SR);
        engine.set_sample_rate(f32::NAN);
    }

    #[test]
    fn test_parameters_are_clamped() {
        let mut engine = MoorerEngine::new(test_params(), SR);
        engine.update_parameters(EngineParameters {
            freeze: false,
            comb_time: 5.0,
            variation: f32::NAN,
            rt60: -1.0,
            dry_wet: 3.0,
        });

        let p = engine.params();
        assert_eq!(p.comb_time, MAX_COMB_TIME);
        assert_eq!(p.variation, EngineParameters::default().variation);
        assert_eq!(p.rt60, MIN_RT60);
        assert_eq!(p.dry_wet, 1.0);
    }

    /// An impulse decays steadily and is more than 60 dB down well
    /// before 1.5 × rt60.
    #[test]
    fn test_impulse_decays_by_rt60() {
        let params = test_params();
        let mut engine = MoorerEngine::new(params, SR);

        let mut out = vec![engine.process_stereo([1.0, 1.0])];
        out.extend(run_silence(&mut engine, seconds(1.0)));

        let window = seconds(0.1);
        let peaks: Vec<f32> = out.chunks(window).map(peak).collect();
        assert!(peaks[0] > 0.0);
        for (i, pair) in peaks.windows(2).enumerate() {
            assert!(
                pair[1] <= pair[0] * 1.05,
                "Tail grew between windows {i} and {}: {peaks:?}",
                i + 1
            );
        }

        let late_start = seconds(params.rt60 * 1.5);
        let late = peak(&out[late_start..late_start + window]);
        assert!(
            late < peaks[0] * 1e-3,
            "Expected -60 dB by 1.5 × rt60, got {} dB",
            20.0 * (late / peaks[0]).log10()
        );
    }

    /// A longer rt60 leaves more energy at the same instant.
    #[test]
    fn test_rt60_controls_decay_length() {
        let mut short = MoorerEngine::new(test_params(), SR);
        let mut long = MoorerEngine::new(
            EngineParameters {
                rt60: 2.0,
                ..test_params()
            },
            SR,
        );

        short.process_stereo([1.0, 1.0]);
        long.process_stereo([1.0, 1.0]);
        let short_tail = run_silence(&mut short, seconds(0.5));
        let long_tail = run_silence(&mut long, seconds(0.5));

        let tail = seconds(0.4)..;
        assert!(rms(&long_tail[tail.clone()]) > 10.0 * rms(&short_tail[tail]));
    }

    #[test]
    fn test_update_parameters_is_idempotent() {
        let changed = EngineParameters {
            comb_time: 0.08,
            variation: 0.2,
            rt60: 1.5,
            dry_wet: 0.7,
            freeze: false,
        };

        let mut once = MoorerEngine::new(test_params(), SR);
        let mut twice = MoorerEngine::new(test_params(), SR);
        once.update_parameters(changed);
        twice.update_parameters(changed);
        twice.update_parameters(changed);

        let mut noise_a = Noise(7);
        let mut noise_b = Noise(7);
        let a = run_noise(&mut once, &mut noise_a, 0.3, 20_000);
        let b = run_noise(&mut twice, &mut noise_b, 0.3, 20_000);
        assert_eq!(a, b);
    }

    /// Identical inputs and parameter changes give bit-identical output.
    #[test]
    fn test_processing_is_deterministic() {
        let run = || {
            let mut engine = MoorerEngine::new(EngineParameters::default(), SR);
            let mut noise = Noise(42);
            let mut out = run_noise(&mut engine, &mut noise, 0.2, 10_000);

            engine.update_parameters(EngineParameters {
                variation: 0.3,
                comb_time: 0.3,
                ..EngineParameters::default()
            });
            out.extend(run_noise(&mut engine, &mut noise, 0.2, 10_000));

            engine.update_parameters(EngineParameters {
                freeze: true,
                ..engine.params()
            });
            out.extend(run_silence(&mut engine, 5_000));
            out.into_iter()
                .flat_map(|f| f.map(f32::to_bits))
                .collect::<Vec<u32>>()
        };

        assert_eq!(run(), run());
    }

    /// A frozen tail holds its level, and decays again once released.
    #[test]
    fn test_freeze_sustains_then_releases() {
        let mut params = EngineParameters {
            rt60: 5.0,
            ..test_params()
        };
        let mut engine = MoorerEngine::new(params, SR);
        let mut noise = Noise(1);
        run_noise(&mut engine, &mut noise, 0.1, seconds(0.5));

        params.freeze = true;
        engine.update_parameters(params);
        assert!(engine.is_frozen());

        let settle = run_silence(&mut engine, seconds(0.4));
        let early = rms(&settle[seconds(0.2)..]);
        run_silence(&mut engine, seconds(2.0));
        let later = rms(&run_silence(&mut engine, seconds(0.2)));

        assert!(early > 1e-3, "Freeze captured nothing");
        assert!(
            later > early * 0.9 && later < early * 1.1,
            "Frozen tail drifted from {early} to {later}"
        );

        params.freeze = false;
        params.rt60 = 0.3;
        engine.update_parameters(params);
        assert!(!engine.is_frozen());

        let released = run_silence(&mut engine, seconds(1.2));
        let end = rms(&released[seconds(1.0)..]);
        assert!(end < early * 1e-3, "Released tail should decay, got {end}");
    }

    /// At the default settings (modulation on) a frozen tail holds its
    /// level for ten seconds with no measurable decay.
    #[test]
    fn test_freeze_holds_modulated_tail() {
        let mut params = EngineParameters::default();
        assert!(params.variation > 0.0);
        let mut engine = MoorerEngine::new(params, SR);
        let mut noise = Noise(11);
        run_noise(&mut engine, &mut noise, 0.1, seconds(1.0));

        params.freeze = true;
        engine.update_parameters(params);
        run_silence(&mut engine, seconds(0.5));

        let early = rms(&run_silence(&mut engine, seconds(1.0)));
        run_silence(&mut engine, seconds(9.0));
        let late = rms(&run_silence(&mut engine, seconds(1.0)));

        assert!(early > 1e-3, "Freeze captured nothing");
        let drift_db = 20.0 * (late / early).log10();
        assert!(drift_db.abs() < 0.5, "Frozen tail drifted by {drift_db} dB over 10 s");
    }

    /// Releasing freeze with the rt60 the tail was frozen under lets it
    /// die away on that schedule: more than 60 dB down by 1.2 × rt60.
    #[test]
    fn test_released_tail_decays_with_its_rt60() {
        let mut params = EngineParameters {
            rt60: 2.0,
            ..EngineParameters::default()
        };
        let mut engine = MoorerEngine::new(params, SR);
        let mut noise = Noise(5);
        run_noise(&mut engine, &mut noise, 0.1, seconds(1.0));

        params.freeze = true;
        engine.update_parameters(params);
        run_silence(&mut engine, seconds(0.5));
        let frozen = rms(&run_silence(&mut engine, seconds(0.5)));

        params.freeze = false;
        engine.update_parameters(params);
        assert!(!engine.is_frozen());

        let released = run_silence(&mut engine, seconds(params.rt60 * 1.2 + 0.1));
        let end = rms(&released[seconds(params.rt60 * 1.2)..]);
        assert!(
            end < frozen * 1e-3,
            "Expected -60 dB by 1.2 × rt60, got {} dB",
            20.0 * (end / frozen).log10()
        );
    }

    /// Input arriving while frozen is not added to the held tail.
    #[test]
    fn test_freeze_suppresses_input() {
        let mut engine = MoorerEngine::new(
            EngineParameters {
                freeze: true,
                ..test_params()
            },
            SR,
        );
        let mut noise = Noise(3);

        let out = run_noise(&mut engine, &mut noise, 0.5, seconds(0.3));
        assert!(out.iter().all(|f| *f == [0.0, 0.0]));
    }

    /// Entering freeze keeps the tail that is already ringing.
    #[test]
    fn test_entering_freeze_preserves_tail() {
        let mut params = test_params();
        let mut engine = MoorerEngine::new(params, SR);
        engine.process_stereo([1.0, 1.0]);
        run_silence(&mut engine, 100);

        params.freeze = true;
        engine.update_parameters(params);
        let out = run_silence(&mut engine, seconds(0.2));
        assert!(peak(&out) > 0.0);
    }

    /// With the Clear policy, releasing freeze silences the tail at once.
    #[test]
    fn test_freeze_release_clear() {
        let mut params = EngineParameters {
            rt60: 5.0,
            ..test_params()
        };
        let mut engine = MoorerEngine::new(params, SR);
        engine.set_freeze_release(FreezeRelease::Clear);
        assert_eq!(engine.freeze_release(), FreezeRelease::Clear);

        let mut noise = Noise(9);
        run_noise(&mut engine, &mut noise, 0.1, seconds(0.2));
        params.freeze = true;
        engine.update_parameters(params);
        assert!(peak(&run_silence(&mut engine, seconds(0.1))) > 0.0);

        params.freeze = false;
        engine.update_parameters(params);
        assert!(run_silence(&mut engine, seconds(0.5))
            .iter()
            .all(|f| *f == [0.0, 0.0]));
    }

    /// Fully dry output is the input, clipped, sample for sample.
    #[test]
    fn test_fully_dry_passes_input() {
        let mut engine = MoorerEngine::new(
            EngineParameters {
                dry_wet: 0.0,
                ..test_params()
            },
            SR,
        );
        let mut noise = Noise(11);

        for _ in 0..seconds(0.5) {
            let input = [noise.next() * 3.0, noise.next() * 0.5];
            let out = engine.process_stereo(input);
            assert_eq!(out, input.map(|s| s.clamp(-OUTPUT_CEILING, OUTPUT_CEILING)));
        }
    }

    /// Fully wet output has no direct path: nothing comes out before the
    /// shortest comb has delayed the input.
    #[test]
    fn test_fully_wet_has_no_direct_signal() {
        let mut engine = MoorerEngine::new(test_params(), SR);
        let shortest = engine.channels[0].combs.shortest_delay() as usize;
        assert_eq!(shortest, seconds(0.05));

        let mut out = vec![engine.process_stereo([1.0, 1.0])];
        out.extend(run_silence(&mut engine, seconds(0.2)));

        assert!(out[..shortest].iter().all(|f| *f == [0.0, 0.0]));
        assert!(peak(&out[shortest..]) > 0.0);
    }

    #[test]
    fn test_silence_in_silence_out() {
        let mut engine = MoorerEngine::new(EngineParameters::default(), SR);
        assert!(run_silence(&mut engine, seconds(0.5))
            .iter()
            .all(|f| *f == [0.0, 0.0]));
    }

    /// After the input stops, the tail reaches exact digital silence in
    /// bounded time instead of lingering in denormals.
    #[test]
    fn test_tail_converges_to_exact_silence() {
        let mut engine = MoorerEngine::new(
            EngineParameters {
                rt60: 0.2,
                variation: 0.1,
                ..test_params()
            },
            SR,
        );
        let mut noise = Noise(5);
        run_noise(&mut engine, &mut noise, 0.5, seconds(0.1));

        let out = run_silence(&mut engine, seconds(4.0));
        assert!(out[seconds(3.5)..].iter().all(|f| *f == [0.0, 0.0]));
    }

    /// A NaN or infinity in the input never shows up in the output.
    #[test]
    fn test_nan_input_does_not_propagate() {
        let mut engine = MoorerEngine::new(
            EngineParameters {
                dry_wet: 0.5,
                rt60: 3.0,
                ..test_params()
            },
            SR,
        );
        let mut noise = Noise(13);
        run_noise(&mut engine, &mut noise, 0.5, 1000);

        let hit = engine.process_stereo([f32::NAN, f32::INFINITY]);
        assert!(hit.iter().all(|s| s.is_finite()));

        let after = run_noise(&mut engine, &mut noise, 0.5, seconds(0.5));
        assert!(after.iter().flat_map(|f| f.iter()).all(|s| s.is_finite()));
        assert!(peak(&after) > 0.0);
    }

    /// A gain change only affects samples written after it: the first
    /// echo, already in the buffer, comes back unchanged.
    #[test]
    fn test_gain_change_does_not_rewrite_history() {
        let mut reference = MoorerEngine::new(test_params(), SR);
        let mut changed = MoorerEngine::new(test_params(), SR);

        let mut a = vec![reference.process_stereo([1.0, 1.0])];
        let mut b = vec![changed.process_stereo([1.0, 1.0])];
        a.extend(run_silence(&mut reference, 100));
        b.extend(run_silence(&mut changed, 100));

        changed.update_parameters(EngineParameters {
            rt60: 4.0,
            ..test_params()
        });
        a.extend(run_silence(&mut reference, seconds(0.08)));
        b.extend(run_silence(&mut changed, seconds(0.08)));

        assert_eq!(a, b);
    }

    #[test]
    fn test_reset_silences_tail() {
        let mut engine = MoorerEngine::new(test_params(), SR);
        let mut noise = Noise(17);
        run_noise(&mut engine, &mut noise, 0.5, seconds(0.2));

        engine.reset();
        assert_eq!(engine.params(), test_params());
        assert!(run_silence(&mut engine, seconds(0.2))
            .iter()
            .all(|f| *f == [0.0, 0.0]));
    }

    #[test]
    fn test_set_sample_rate_rescales_delays() {
        let mut engine = MoorerEngine::new(test_params(), SR);
        let before = engine.channels[0].combs.shortest_delay();

        engine.set_sample_rate(SR * 2.0);
        assert_eq!(engine.sample_rate(), SR * 2.0);
        assert_eq!(engine.channels[0].combs.shortest_delay(), before * 2.0);
        assert_eq!(engine.params(), test_params());
    }

    #[test]
    fn test_tail_samples() {
        let mut params = test_params();
        let mut engine = MoorerEngine::new(params, SR);
        let tail = engine.tail_samples().expect("tail should be finite");
        assert!(tail as f32 > params.rt60 * SR);

        params.freeze = true;
        engine.update_parameters(params);
        assert_eq!(engine.tail_samples(), None);
    }
}
