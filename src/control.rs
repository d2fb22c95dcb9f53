//! # Control-Rate Parameter Mapping
//!
//! Turns knob positions into [`EngineParameters`].
//!
//! Recomputing comb coefficients costs a handful of `powf`s per comb,
//! which is wasteful to do every sample for knobs that rarely move. So
//! knob values are mapped only every [`PARAM_UPDATE_INTERVAL`] samples,
//! and the engine only hears about the result when it actually differs
//! from what it already has. The engine is correct either way; this is
//! purely about CPU.
//!
//! ```text
//! knobs ──► map ──► slew size ──► changed? ──► engine.update_parameters()
//!           (every 8 samples)
//! ```

use crate::dsp::comb::{MAX_COMB_TIME, MIN_COMB_TIME};
use crate::dsp::moorer::EngineParameters;
use crate::dsp::smoother::{ParameterSmoother, DEFAULT_SLEW_HZ};

/// Knob values are re-mapped once every this many samples.
pub const PARAM_UPDATE_INTERVAL: u32 = 8;

/// Map the 0-1 Size knob to a comb length in seconds.
///
/// ```text
/// comb_time = 0.3 * 3^size - 0.3
/// ```
///
/// Exponential, so equal knob turns feel like equal changes in room
/// size. Clamped into the engine's range; the bottom of the knob sits
/// on the 10 ms floor.
pub fn size_to_comb_time(size: f32) -> f32 {
    (0.3 * 3.0_f32.powf(size) - 0.3).clamp(MIN_COMB_TIME, MAX_COMB_TIME)
}

/// One snapshot of the knobs, in control units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlValues {
    pub size: f32,
    pub variation: f32,
    /// Seconds.
    pub time: f32,
    /// 0-1.
    pub dry_wet: f32,
    pub freeze: bool,
}

impl ControlValues {
    /// The engine parameters these knobs ask for, before slewing.
    fn target(&self) -> EngineParameters {
        EngineParameters {
            freeze: self.freeze,
            comb_time: size_to_comb_time(self.size),
            variation: self.variation,
            rt60: self.time,
            dry_wet: self.dry_wet.clamp(0.0, 1.0),
        }
    }
}

pub struct ControlState {
    size_slew: ParameterSmoother,
    /// Samples left until the next mapping pass.
    countdown: u32,
    last_sent: EngineParameters,
}

fn control_rate(sample_rate: f32) -> f32 {
    sample_rate / PARAM_UPDATE_INTERVAL as f32
}

impl ControlState {
    pub fn new(initial: &ControlValues, sample_rate: f32) -> Self {
        let target = initial.target();
        Self {
            size_slew: ParameterSmoother::new(
                target.comb_time,
                DEFAULT_SLEW_HZ,
                control_rate(sample_rate),
            ),
            countdown: 0,
            last_sent: target,
        }
    }

    /// Jump straight to `values` at a (possibly new) sample rate, with
    /// no slewing. Used when the host (re)initializes the plugin.
    pub fn reinitialize(&mut self, values: &ControlValues, sample_rate: f32) {
        let target = values.target();
        self.size_slew.set_update_rate(control_rate(sample_rate));
        self.size_slew.snap_to(target.comb_time);
        self.countdown = 0;
        self.last_sent = target;
    }

    /// The parameters most recently handed out (or the initial ones).
    pub fn parameters(&self) -> EngineParameters {
        self.last_sent
    }

    /// Call once per sample with the current knob values.
    ///
    /// Returns new engine parameters on a mapping pass that produced a
    /// change, `None` otherwise.
    pub fn tick(&mut self, values: &ControlValues) -> Option<EngineParameters> {
        if self.countdown > 0 {
            self.countdown -= 1;
            return None;
        }
        self.countdown = PARAM_UPDATE_INTERVAL - 1;

        let mut params = values.target();
        params.comb_time = self.size_slew.next(params.comb_time);

        if params == self.last_sent {
            return None;
        }
        self.last_sent = params;
        Some(params)
    }
}
