//! # Loveless Reverb — An AU/VST3/CLAP Moorer Reverb
//!
//! A stereo algorithmic reverb built with [nih-plug](https://github.com/robbert-vdh/nih-plug),
//! following J. A. Moorer's classic design: a bank of parallel feedback
//! combs for the decaying tail, damped and slowly modulated, followed by
//! allpass diffusion. A Freeze switch holds the tail indefinitely.
//!
//! ## Signal Flow
//!
//! ```text
//! Input ──┬─────────────────────────────────────────────── × (1 - mix) ──┐
//!         │                                                              │
//!         │   ┌────────── COMB BANK (8 per channel) ──────────┐          │
//!         │   │                                               │          │
//!         └──►│ (+)─► [delay, LFO-modulated] ─┬─► mean ───────┼─► [4 allpass]
//!             │  ▲                            │               │     │    │
//!             │  └── × g ◄── [damping LPF] ◄──┘               │     │    │
//!             └───────────────────────────────────────────────┘     │    │
//!                                                                  × mix │
//!                                                                   │    │
//!                                                                   └──►(+)──► [clip] ──► Output
//! ```
//!
//! The DSP lives in [`dsp`], and [`dsp::moorer::MoorerEngine`] is usable
//! on its own, without a plugin host. This file is the host glue: it
//! reads knobs, hands them to [`control`] for mapping, and feeds audio
//! through the engine one sample frame at a time.

mod control;
pub mod dsp;
mod params;

use std::num::NonZeroU32;
use std::sync::Arc;

use control::{ControlState, ControlValues};
use nih_plug::prelude::*;
use params::PluginParams;

pub use dsp::freeze::FreezeRelease;
pub use dsp::moorer::{EngineParameters, MoorerEngine};

/// The main plugin struct.
///
/// `params` is shared with the host through an `Arc`; everything else
/// is owned by the audio thread and only touched from `initialize()`,
/// `reset()`, and `process()`, which the host never runs concurrently.
struct LovelessReverb {
    params: Arc<PluginParams>,

    /// 1 (mono) or 2 (stereo), from the negotiated layout.
    num_channels: usize,

    /// Knob → engine mapping, run at control rate.
    control: ControlState,

    /// Built in `initialize()`, once the sample rate is known. The
    /// engine owns several megabytes of delay memory, so it is not
    /// allocated speculatively in `default()`.
    engine: Option<MoorerEngine>,
}

impl Default for LovelessReverb {
    fn default() -> Self {
        let params = Arc::new(PluginParams::default());
        // 44100 Hz is a placeholder until initialize() reports the real
        // rate.
        let control = ControlState::new(&current_controls(&params), 44100.0);
        Self {
            params,
            num_channels: 2,
            control,
            engine: None,
        }
    }
}

/// Unsmoothed knob values, for (re)initialization.
fn current_controls(params: &PluginParams) -> ControlValues {
    ControlValues {
        size: params.size.value(),
        variation: params.variation.value(),
        time: params.time.value(),
        dry_wet: params.dry_wet.value(),
        freeze: params.freeze.value(),
    }
}

impl Plugin for LovelessReverb {
    const NAME: &'static str = "Loveless Reverb";
    const VENDOR: &'static str = "Loveless Audio";
    const URL: &'static str = "";
    const EMAIL: &'static str = "steve.loveless@gmail.com";
    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    // Stereo first: the engine is inherently stereo. Mono tracks get the
    // input duplicated and the two reverb channels folded back down.
    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(2),
            main_output_channels: NonZeroU32::new(2),
            aux_input_ports: &[],
            aux_output_ports: &[],
            names: PortNames::const_default(),
        },
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(1),
            main_output_channels: NonZeroU32::new(1),
            aux_input_ports: &[],
            aux_output_ports: &[],
            names: PortNames::const_default(),
        },
    ];

    const MIDI_INPUT: MidiConfig = MidiConfig::None;

    const SAMPLE_ACCURATE_AUTOMATION: bool = true;

    type SysExMessage = ();
    type BackgroundTask = ();

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    /// Allocate (or reallocate) the engine for the host's sample rate.
    ///
    /// Returning `false` tells the host we can't run in this
    /// configuration. We do that for a nonsensical sample rate rather
    /// than let the engine's construction-time assertion take the host
    /// down with it.
    fn initialize(
        &mut self,
        audio_io_layout: &AudioIOLayout,
        buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        let sample_rate = buffer_config.sample_rate;
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            nih_plug::nih_log!("Refusing to initialize at a sample rate of {sample_rate} Hz");
            return false;
        }

        self.num_channels = audio_io_layout
            .main_input_channels
            .map(|c| c.get() as usize)
            .unwrap_or(2);

        self.control
            .reinitialize(&current_controls(&self.params), sample_rate);
        let initial = self.control.parameters();

        match self.engine.as_mut() {
            Some(engine) => {
                engine.set_sample_rate(sample_rate);
                engine.update_parameters(initial);
            }
            None => self.engine = Some(MoorerEngine::new(initial, sample_rate)),
        }

        nih_plug::nih_log!(
            "Reverb initialized at {} Hz with {} channel(s)",
            sample_rate,
            self.num_channels
        );
        true
    }

    /// Called when playback stops or the plugin is bypassed. Drops the
    /// tail so it doesn't spill into the next play.
    fn reset(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.reset();
        }
    }

    /// Per sample frame:
    ///
    /// 1. **Advance** the nih-plug smoothers and snapshot the knobs
    /// 2. **Map** them to engine parameters (every 8th frame, if changed)
    /// 3. **Run** the stereo engine on the frame
    /// 4. **Write** the result back in place
    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        _context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        let Some(engine) = self.engine.as_mut() else {
            return ProcessStatus::Normal;
        };

        engine.set_freeze_release(self.params.unfreeze.value().into());

        for mut channel_samples in buffer.iter_samples() {
            let controls = ControlValues {
                size: self.params.size.value(),
                variation: self.params.variation.smoothed.next(),
                time: self.params.time.smoothed.next(),
                dry_wet: self.params.dry_wet.smoothed.next(),
                freeze: self.params.freeze.value(),
            };
            if let Some(params) = self.control.tick(&controls) {
                engine.update_parameters(params);
            }

            let mut frame = [0.0_f32; 2];
            for (slot, sample) in frame.iter_mut().zip(channel_samples.iter_mut()) {
                *slot = *sample;
            }
            if self.num_channels == 1 {
                frame[1] = frame[0];
            }

            let out = engine.process_stereo(frame);

            if self.num_channels == 1 {
                for sample in channel_samples.iter_mut() {
                    *sample = 0.5 * (out[0] + out[1]);
                }
            } else {
                for (sample, value) in channel_samples.iter_mut().zip(out) {
                    *sample = value;
                }
            }
        }

        // Keep the host calling process() while the tail rings out. A
        // frozen tail never ends, so ask to be kept alive instead.
        match engine.tail_samples() {
            Some(tail) => ProcessStatus::Tail(tail),
            None => ProcessStatus::KeepAlive,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Plugin format trait implementations
// ─────────────────────────────────────────────────────────────────────

impl ClapPlugin for LovelessReverb {
    const CLAP_ID: &'static str = "com.loveless-audio.loveless-reverb-v1";
    const CLAP_DESCRIPTION: Option<&'static str> =
        Some("A Moorer reverb with modulated combs and freeze, built for learning DSP");
    const CLAP_MANUAL_URL: Option<&'static str> = None;
    const CLAP_SUPPORT_URL: Option<&'static str> = None;
    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Stereo,
        ClapFeature::Reverb,
    ];
}

impl Vst3Plugin for LovelessReverb {
    // 16 ASCII bytes. For a production plugin, use a proper UUID.
    const VST3_CLASS_ID: [u8; 16] = *b"LvlssReverb_v001";

    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] =
        &[Vst3SubCategory::Fx, Vst3SubCategory::Reverb];
}

// ─────────────────────────────────────────────────────────────────────
// Export macros
// ─────────────────────────────────────────────────────────────────────
//
// nih_export_clap! exports the `clap_entry` symbol for CLAP hosts.
// nih_export_vst3! exports `GetPluginFactory` for VST3 hosts.
// clap_wrapper re-exports the CLAP entry point as AUv2 for Logic Pro.

nih_export_clap!(LovelessReverb);
nih_export_vst3!(LovelessReverb);

clap_wrapper::export_auv2!();
