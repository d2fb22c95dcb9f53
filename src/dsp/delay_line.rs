//! # Delay Line (Ring Buffer)
//!
//! A delay line stores audio samples and lets you read them back after a
//! specified time delay. Every stage of the reverb is built on one: the
//! combs use long lines (tens to hundreds of milliseconds) and the
//! diffusion allpasses use short ones (a few milliseconds).
//!
//! ## Read/Write Contract
//!
//! - `write(sample)` stores one sample and advances the write head.
//! - `read(offset)` returns the sample written `offset` writes ago, so
//!   `read(1.0)` is the most recent sample and `read(capacity)` is the
//!   oldest one still stored.
//!
//! A feedback stage therefore reads first and writes second:
//!
//! ```text
//! let delayed = line.read(d);          // y[n - d]
//! line.write(input + g * delayed);     // y[n]
//! ```
//!
//! ## Linear Interpolation
//!
//! The comb read heads are modulated by slow LFOs, so offsets are
//! usually fractional. We blend the two neighbouring samples:
//!
//! ```text
//! result = sample_a * (1 - frac) + sample_b * frac
//! ```
//!
//! Integral offsets skip the blend entirely and return the stored
//! sample bit-for-bit, which keeps an unmodulated (or frozen) loop
//! lossless.

use std::num::NonZeroUsize;

/// A fixed-capacity ring buffer that functions as an audio delay line.
///
/// The buffer is allocated once, in [`new()`](Self::new). Nothing on the
/// audio path ever resizes it; a sample-rate change builds a new line.
pub struct DelayLine {
    /// Stored history, silent (all zeros) until written.
    samples: Vec<f32>,

    /// Slot the next `write()` lands in.
    head: usize,

    /// `samples.len()`, cached.
    len: usize,
}

impl DelayLine {
    /// Create a new delay line holding at most `capacity` samples.
    ///
    /// `NonZeroUsize` guarantees the ring can't be zero-length, which
    /// would make every modulo below a division by zero.
    pub fn new(capacity: NonZeroUsize) -> Self {
        let len = capacity.get();
        Self {
            samples: vec![0.0; len],
            head: 0,
            len,
        }
    }

    /// The longest offset [`read()`](Self::read) can honour.
    pub fn capacity(&self) -> usize {
        self.len
    }

    /// Store a sample at the write head, then advance the head.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.samples[self.head] = sample;
        self.head = (self.head + 1) % self.len;
    }

    /// Read the sample written `delay` writes ago.
    ///
    /// Valid offsets are `1.0..=capacity`. Asking for more than the
    /// capacity is a sizing bug in the caller; it trips a debug
    /// assertion and is clamped so release builds stay well-defined.
    ///
    /// # Index math
    ///
    /// The most recent sample sits one slot behind `head`, so
    /// reading `N` back means:
    ///
    /// ```text
    /// index = (head + len - N) % len
    /// ```
    ///
    /// `len` is added first because `usize` can't go negative.
    #[inline]
    pub fn read(&self, delay: f32) -> f32 {
        nih_plug::nih_debug_assert!(
            delay <= self.len as f32,
            "delay line read of {} samples exceeds capacity {}",
            delay,
            self.len
        );

        let offset = delay.clamp(1.0, self.len as f32);
        let whole = offset as usize;
        let frac = offset - whole as f32;

        let index_a = (self.head + self.len - whole) % self.len;
        let sample_a = self.samples[index_a];
        if frac == 0.0 {
            return sample_a;
        }

        // A fractional part means whole < len, so this can't
        // underflow.
        let index_b = (self.head + self.len - whole - 1) % self.len;
        let sample_b = self.samples[index_b];

        sample_a * (1.0 - frac) + sample_b * frac
    }

    /// Forget all history and rewind the write head.
    pub fn clear(&mut self) {
        self.samples.fill(0.0);
        self.head = 0;
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
