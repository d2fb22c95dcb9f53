//! # Stereo Mixer
//!
//! The last stage: a linear dry/wet crossfade per channel, then a hard
//! clip.
//!
//! ```text
//! out = dry_wet * wet + (1 - dry_wet) * dry
//! ```
//!
//! - `dry_wet = 0.0` → the input, untouched (apart from the clip)
//! - `dry_wet = 1.0` → reverb only
//!
//! Mix coefficients are stateless, so a new value applies on the very
//! next sample.

/// Output clip level, +6 dBFS. A near-unity frozen tail stacked on a
/// hot input can exceed full scale; beyond this it is clipped rather
/// than sent to the host at arbitrary level.
pub const OUTPUT_CEILING: f32 = 2.0;

pub struct StereoMixer {
    dry_wet: f32,
}

impl StereoMixer {
    pub fn new(dry_wet: f32) -> Self {
        let mut mixer = Self { dry_wet: 0.0 };
        mixer.set_dry_wet(dry_wet);
        mixer
    }

    /// Clamped to `0.0..=1.0`; a NaN falls back to fully dry.
    pub fn set_dry_wet(&mut self, dry_wet: f32) {
        self.dry_wet = if dry_wet.is_nan() {
            0.0
        } else {
            dry_wet.clamp(0.0, 1.0)
        };
    }

    pub fn dry_wet(&self) -> f32 {
        self.dry_wet
    }

    #[inline]
    pub fn mix(&self, dry: [f32; 2], wet: [f32; 2]) -> [f32; 2] {
        std::array::from_fn(|ch| {
            let out = self.dry_wet * wet[ch] + (1.0 - self.dry_wet) * dry[ch];
            out.clamp(-OUTPUT_CEILING, OUTPUT_CEILING)
        })
    }
}
