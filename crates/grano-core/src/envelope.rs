//! Linear ADSR envelope applied over a fixed buffer region.
//!
//! Unlike a gated envelope that runs sample by sample, [`Adsr`] knows the total
//! length of the region up front and places the release stage at its end:
//!
//! ```text
//!   1.0 ┐   ╱╲
//!       │  ╱  ╲________
//!     S │ ╱            ╲
//!   0.0 └╱──────────────╲──→ i
//!        0  aE  dE     sE  total-1
//! ```
//!
//! Stage boundaries, in samples:
//!
//! - `attack_end  = attack`
//! - `decay_end   = attack_end + decay`
//! - `sustain_end = max(decay_end, total - release)`
//!
//! The four stages are contiguous and cover `0..total`; any of them may be
//! empty when the region is shorter than the stage times.

/// Stage length substituted for non-positive durations given in seconds.
pub const DEFAULT_STAGE_SECONDS: f32 = 0.1;

/// Convert a duration in seconds to a whole number of frames.
///
/// Truncates toward zero; negative or NaN durations give 0.
#[inline]
pub fn seconds_to_frames(seconds: f32, sample_rate: f32) -> usize {
    (seconds * sample_rate) as usize
}

/// Resolved stage boundaries for a region of `total` samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeStages {
    /// First sample index past the attack ramp.
    pub attack_end: f32,
    /// First sample index past the decay ramp.
    pub decay_end: f32,
    /// First sample index of the release ramp.
    pub sustain_end: f32,
    /// Region length in samples.
    pub total: usize,
}

/// Linear attack/decay/sustain/release shape with stage lengths in samples.
///
/// # Example
///
/// ```rust
/// use grano_core::{Adsr, SampleBuffer};
///
/// let mut buffer = SampleBuffer::from_mono(vec![1.0; 1000], 1000.0);
/// Adsr::from_seconds(0.1, 0.1, 0.5, 0.2, 1000.0).apply(&mut buffer);
///
/// assert_eq!(buffer.channel(0)[0], 0.0);
/// assert_eq!(buffer.channel(0)[500], 0.5);
/// assert_eq!(buffer.channel(0)[999], 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    attack_samples: f32,
    decay_samples: f32,
    sustain_level: f32,
    release_samples: f32,
}

impl Adsr {
    /// Create from stage durations in seconds.
    ///
    /// Non-positive durations are replaced by [`DEFAULT_STAGE_SECONDS`] before
    /// conversion, so every stage given in seconds is at least that long.
    /// `sustain_level` is used as given.
    pub fn from_seconds(
        attack: f32,
        decay: f32,
        sustain_level: f32,
        release: f32,
        sample_rate: f32,
    ) -> Self {
        let stage = |seconds: f32| {
            let seconds = if seconds > 0.0 {
                seconds
            } else {
                DEFAULT_STAGE_SECONDS
            };
            seconds * sample_rate
        };

        Self {
            attack_samples: stage(attack),
            decay_samples: stage(decay),
            sustain_level,
            release_samples: stage(release),
        }
    }

    /// Create from stage lengths in samples.
    ///
    /// No clamping: zero-length stages are kept, so
    /// `Adsr::from_samples(0, 0, 1.0, 0)` is the identity envelope.
    pub fn from_samples(attack: usize, decay: usize, sustain_level: f32, release: usize) -> Self {
        Self {
            attack_samples: attack as f32,
            decay_samples: decay as f32,
            sustain_level,
            release_samples: release as f32,
        }
    }

    /// Sustain level.
    pub fn sustain_level(&self) -> f32 {
        self.sustain_level
    }

    /// Stage boundaries for a region of `total` samples.
    pub fn stages(&self, total: usize) -> EnvelopeStages {
        let attack_end = self.attack_samples;
        let decay_end = attack_end + self.decay_samples;
        let sustain_end = (total as f32 - self.release_samples).max(decay_end);

        EnvelopeStages {
            attack_end,
            decay_end,
            sustain_end,
            total,
        }
    }

    /// Amplitude at sample `index` of a region with the given boundaries.
    #[inline]
    pub fn amplitude_at(&self, index: usize, stages: &EnvelopeStages) -> f32 {
        let i = index as f32;
        let sustain = self.sustain_level;

        if i < stages.attack_end {
            i / stages.attack_end
        } else if i < stages.decay_end {
            let span = stages.decay_end - stages.attack_end;
            1.0 + (i - stages.attack_end) * ((sustain - 1.0) / span)
        } else if i < stages.sustain_end {
            sustain
        } else {
            let last = stages.total as f32 - 1.0;
            // No room left for a ramp: close at zero instead of dividing by zero.
            if last > stages.sustain_end {
                sustain * (1.0 - (i - stages.sustain_end) / (last - stages.sustain_end))
            } else {
                0.0
            }
        }
    }

    /// Amplitude at sample `index` of a region of `total` samples.
    pub fn amplitude(&self, index: usize, total: usize) -> f32 {
        self.amplitude_at(index, &self.stages(total))
    }

    /// Multiply a single channel in place; the slice length is the region length.
    pub fn apply_to_slice(&self, samples: &mut [f32]) {
        let stages = self.stages(samples.len());
        for (i, sample) in samples.iter_mut().enumerate() {
            *sample *= self.amplitude_at(i, &stages);
        }
    }

    /// Multiply every channel of `buffer` in place.
    pub fn apply(&self, buffer: &mut crate::SampleBuffer) {
        for channel in buffer.channels_mut() {
            self.apply_to_slice(channel);
        }
    }
}
