//! # Plugin Parameters
//!
//! The knobs the user sees in the DAW. Each has a **unique string ID**
//! (`#[id = "..."]`) that hosts use to save and recall presets. Once
//! published, never change these IDs or existing presets will break.
//!
//! Knob values are in *control* units (a 0-1 size knob, seconds of
//! decay, a percentage mix). [`crate::control`] maps them into the
//! engine's units at control rate.
//!
//! ## Smoothing
//!
//! Variation, Time, and Mix use nih-plug's linear smoothers, like any
//! other continuous control. Size does not: it moves every comb read
//! head at once, so it is slewed more gently by the engine-side
//! [`ParameterSmoother`](crate::dsp::smoother::ParameterSmoother) after
//! mapping.

use std::sync::Arc;

use nih_plug::prelude::*;

use crate::control::size_to_comb_time;
use crate::dsp::freeze::FreezeRelease;

/// What happens to the frozen tail when Freeze is switched off.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnfreezeMode {
    /// The held tail dies away with the current Time setting.
    #[name = "Decay"]
    Decay,
    /// The held tail stops dead.
    #[name = "Clear"]
    Clear,
}

impl From<UnfreezeMode> for FreezeRelease {
    fn from(mode: UnfreezeMode) -> Self {
        match mode {
            UnfreezeMode::Decay => FreezeRelease::Decay,
            UnfreezeMode::Clear => FreezeRelease::Clear,
        }
    }
}

/// All user-facing parameters for the Loveless Reverb plugin.
#[derive(Params)]
pub struct PluginParams {
    /// **Size**: how big the space is.
    ///
    /// Sets the base comb length through an exponential curve, so the
    /// lower half of the knob covers small rooms (10-100 ms combs) with
    /// fine resolution and the top end reaches 600 ms halls.
    #[id = "size"]
    pub size: FloatParam,

    /// **Variation**: how much the comb lengths wobble.
    ///
    /// At 0 the combs are static and the tail can ring metallically.
    /// A little variation blurs the resonances; a lot gives a chorused,
    /// seasick tail.
    #[id = "var"]
    pub variation: FloatParam,

    /// **Time**: RT60, the time for the tail to fall by 60 dB.
    #[id = "time"]
    pub time: FloatParam,

    /// **Dry/Wet**: balance between the input and the reverb.
    #[id = "mix"]
    pub dry_wet: FloatParam,

    /// **Freeze**: hold the current tail forever and ignore new input.
    #[id = "frz"]
    pub freeze: BoolParam,

    /// **Unfreeze**: whether releasing Freeze lets the tail decay or
    /// cuts it.
    #[id = "unfrz"]
    pub unfreeze: EnumParam<UnfreezeMode>,
}

impl Default for PluginParams {
    fn default() -> Self {
        Self {
            size: FloatParam::new(
                "Size",
                0.25, // ≈ 95 ms combs: a mid-sized room
                FloatRange::Linear {
                    min: 0.01,
                    max: 1.0,
                },
            )
            // Show the comb length the knob actually produces.
            .with_value_to_string(Arc::new(|size| {
                format!("{:.0} ms", size_to_comb_time(size) * 1000.0)
            })),

            variation: FloatParam::new(
                "Variation",
                0.1,
                FloatRange::Linear { min: 0.0, max: 0.2 },
            )
            .with_smoother(SmoothingStyle::Linear(20.0))
            .with_step_size(0.001),

            time: FloatParam::new(
                "Time",
                10.0,
                FloatRange::Skewed {
                    min: 0.1,
                    max: 20.0,
                    // Most of the musically interesting decay times are
                    // short; give them most of the knob.
                    factor: FloatRange::skew_factor(-1.5),
                },
            )
            .with_unit(" s")
            .with_smoother(SmoothingStyle::Linear(50.0))
            .with_step_size(0.01),

            dry_wet: FloatParam::new(
                "Dry/Wet",
                0.50, // equal blend
                FloatRange::Linear { min: 0.0, max: 1.0 },
            )
            .with_unit("%")
            .with_smoother(SmoothingStyle::Linear(20.0))
            .with_value_to_string(formatters::v2s_f32_percentage(1))
            .with_string_to_value(formatters::s2v_f32_percentage()),

            freeze: BoolParam::new("Freeze", false),

            unfreeze: EnumParam::new("Unfreeze", UnfreezeMode::Decay),
        }
    }
}
