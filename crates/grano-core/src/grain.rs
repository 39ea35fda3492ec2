//! Grains: short enveloped excerpts of a source signal.
//!
//! Two lifecycles, one per scheduling policy:
//!
//! - [`Grain`] copies its window out of the source and applies a short
//!   [`Adsr`] immediately. It owns its samples until the batch scheduler has
//!   mixed it into the output.
//! - [`StreamingGrain`] owns nothing but a cursor. Each [`advance`] reads the
//!   channel's shared [`RingBuffer`] at an offset equal to the cursor, so any
//!   number of grains can walk the same history at once.
//!
//! [`advance`]: StreamingGrain::advance

use crate::{Adsr, RingBuffer, SampleBuffer};

/// Attack, decay and release time of a batch grain, in seconds.
pub const GRAIN_EDGE_SECONDS: f32 = 0.01;

/// Sustain level of a batch grain.
pub const GRAIN_SUSTAIN_LEVEL: f32 = 0.8;

/// Output gain of a streaming grain, keeps overlapping grains from piling up.
pub const STREAMING_GRAIN_GAIN: f32 = 0.5;

/// Fixed-length, eagerly enveloped segment of a source buffer.
///
/// # Example
///
/// ```rust
/// use grano_core::{Grain, SampleBuffer};
///
/// let source = SampleBuffer::from_mono(vec![1.0; 48_000], 48_000.0);
/// let grain = Grain::extract(&source, 4_800, 4_800, 48_000.0).unwrap();
///
/// assert_eq!(grain.start(), 4_800);
/// assert_eq!(grain.len(), 4_800);
/// assert_eq!(grain.samples().channel(0)[0], 0.0); // envelope starts at zero
///
/// // Windows that overrun the source are not extracted
/// assert!(Grain::extract(&source, 44_000, 4_800, 48_000.0).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Grain {
    start: usize,
    samples: SampleBuffer,
}

impl Grain {
    /// Copy `length` frames from `source` starting at `start` and envelope them.
    ///
    /// Returns `None` when `start + length` exceeds the source length.
    pub fn extract(
        source: &SampleBuffer,
        start: usize,
        length: usize,
        sample_rate: f32,
    ) -> Option<Self> {
        let mut samples = source.extract(start, length)?;
        Adsr::from_seconds(
            GRAIN_EDGE_SECONDS,
            GRAIN_EDGE_SECONDS,
            GRAIN_SUSTAIN_LEVEL,
            GRAIN_EDGE_SECONDS,
            sample_rate,
        )
        .apply(&mut samples);

        Some(Self { start, samples })
    }

    /// Offset of the window in the source, in samples.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Length in samples.
    pub fn len(&self) -> usize {
        self.samples.num_frames()
    }

    /// Check if the grain holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The enveloped samples.
    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    /// Enveloped samples of one channel.
    pub fn channel(&self, index: usize) -> &[f32] {
        self.samples.channel(index)
    }
}

/// Cursor-only grain for the streaming scheduler.
///
/// The grain shape is a trapezoid: a linear ramp over the first quarter of the
/// duration, unity in the middle, and a mirrored ramp over the last quarter.
///
/// ```text
///  1.0 ┐    ______
///      │   ╱      ╲
///  0.0 └──╱────────╲──→ cursor
///        0  d/4  3d/4  d
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamingGrain {
    spawn_index: usize,
    duration: usize,
    cursor: usize,
}

impl StreamingGrain {
    /// Create a grain spawned at input index `spawn_index` that lasts `duration` samples.
    pub fn new(spawn_index: usize, duration: usize) -> Self {
        Self {
            spawn_index,
            duration,
            cursor: 0,
        }
    }

    /// Input index the grain was spawned at.
    pub fn spawn_index(&self) -> usize {
        self.spawn_index
    }

    /// Duration in samples.
    pub fn duration(&self) -> usize {
        self.duration
    }

    /// Number of samples already produced.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the grain still has samples to produce.
    pub fn is_active(&self) -> bool {
        self.cursor < self.duration
    }

    /// Envelope value at cursor position `k`.
    ///
    /// Symmetric: `envelope_at(k) == envelope_at(duration - 1 - k)`. Grains
    /// shorter than 4 samples have no ramps.
    pub fn envelope_at(&self, k: usize) -> f32 {
        let ramp = self.duration / 4;
        if ramp == 0 {
            return 1.0;
        }

        if k < ramp {
            k as f32 / ramp as f32
        } else if k >= self.duration - ramp {
            (self.duration - 1).saturating_sub(k) as f32 / ramp as f32
        } else {
            1.0
        }
    }

    /// Produce the next sample from `ring` and report whether the grain is still alive.
    ///
    /// The sample is `ring.read(cursor) * envelope * STREAMING_GRAIN_GAIN`. The
    /// call that consumes the last sample already reports `false`, so a grain of
    /// duration `d` is retired after exactly `d` calls. Calling it again on a
    /// finished grain returns `(0.0, false)`.
    #[inline]
    pub fn advance(&mut self, ring: &RingBuffer) -> (f32, bool) {
        if !self.is_active() {
            return (0.0, false);
        }

        let envelope = self.envelope_at(self.cursor);
        let sample = ring.read(self.cursor) * envelope * STREAMING_GRAIN_GAIN;
        self.cursor += 1;

        (sample, self.is_active())
    }
}
