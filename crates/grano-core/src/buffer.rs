//! Multichannel sample buffer.
//!
//! [`SampleBuffer`] is the interchange type at the core boundary: the driver
//! layer fills one from a decoded file, the renderers consume it and hand
//! back a new one. Each channel is a `Vec<f32>` and all channels have the same
//! length.

use alloc::vec;
use alloc::vec::Vec;

use thiserror::Error;

/// Errors raised when building a [`SampleBuffer`] from caller-supplied data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// A buffer needs at least one channel.
    #[error("sample buffer has no channels")]
    NoChannels,

    /// Channel lengths differ.
    #[error("channel {channel} has {found} samples, expected {expected}")]
    ChannelLengthMismatch {
        /// Index of the offending channel.
        channel: usize,
        /// Length of channel 0.
        expected: usize,
        /// Length of the offending channel.
        found: usize,
    },

    /// Interleaved data is not a whole number of frames.
    #[error("{len} interleaved samples do not divide into {channels} channels")]
    RaggedInterleaved {
        /// Total number of interleaved samples.
        len: usize,
        /// Requested channel count.
        channels: usize,
    },
}

/// Ordered set of equal-length sample channels with a sample rate.
///
/// # Example
///
/// ```rust
/// use grano_core::SampleBuffer;
///
/// let buffer = SampleBuffer::from_channels(vec![vec![0.0; 4], vec![1.0; 4]], 48000.0).unwrap();
/// assert_eq!(buffer.num_channels(), 2);
/// assert_eq!(buffer.num_frames(), 4);
///
/// // Windows past the end are rejected rather than truncated
/// assert!(buffer.extract(2, 3).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: f32,
}

impl SampleBuffer {
    /// Create a silent buffer.
    pub fn new(num_channels: usize, num_frames: usize, sample_rate: f32) -> Self {
        Self {
            channels: vec![vec![0.0; num_frames]; num_channels],
            sample_rate,
        }
    }

    /// Create a buffer from per-channel sample vectors.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: f32) -> Result<Self, BufferError> {
        let Some(first) = channels.first() else {
            return Err(BufferError::NoChannels);
        };
        let expected = first.len();
        if let Some((channel, found)) = channels
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(BufferError::ChannelLengthMismatch {
                channel,
                expected,
                found,
            });
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Create a single-channel buffer.
    pub fn from_mono(samples: Vec<f32>, sample_rate: f32) -> Self {
        Self {
            channels: vec![samples],
            sample_rate,
        }
    }

    /// Create from interleaved frames (`c0, c1, .., c0, c1, ..`).
    pub fn from_interleaved(
        interleaved: &[f32],
        num_channels: usize,
        sample_rate: f32,
    ) -> Result<Self, BufferError> {
        if num_channels == 0 {
            return Err(BufferError::NoChannels);
        }
        if interleaved.len() % num_channels != 0 {
            return Err(BufferError::RaggedInterleaved {
                len: interleaved.len(),
                channels: num_channels,
            });
        }

        let frames = interleaved.len() / num_channels;
        let mut channels = vec![Vec::with_capacity(frames); num_channels];
        for frame in interleaved.chunks_exact(num_channels) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Convert to interleaved frames.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut interleaved = Vec::with_capacity(self.num_frames() * self.num_channels());
        for frame in 0..self.num_frames() {
            for channel in &self.channels {
                interleaved.push(channel[frame]);
            }
        }
        interleaved
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples per channel.
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Check if the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.num_frames() == 0
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate > 0.0 {
            self.num_frames() as f32 / self.sample_rate
        } else {
            0.0
        }
    }

    /// Samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_channels()`.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Mutable samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_channels()`.
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.channels[index]
    }

    /// Iterate over channels.
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Iterate over channels mutably.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        self.channels.iter_mut().map(Vec::as_mut_slice)
    }

    /// Consume the buffer and return its channels.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    /// Copy `len` frames starting at `start` from every channel.
    ///
    /// Returns `None` if the window reaches past the end of the buffer.
    pub fn extract(&self, start: usize, len: usize) -> Option<Self> {
        let end = start.checked_add(len)?;
        if end > self.num_frames() {
            return None;
        }

        Some(Self {
            channels: self
                .channels
                .iter()
                .map(|channel| channel[start..end].to_vec())
                .collect(),
            sample_rate: self.sample_rate,
        })
    }

    /// Overlap-add `other` into `self`, starting at frame `offset`.
    ///
    /// Frames of `other` that land past the end of `self` are dropped, as are
    /// channels beyond `self.num_channels()`.
    pub fn add_from(&mut self, other: &SampleBuffer, offset: usize) {
        for (dst, src) in self.channels.iter_mut().zip(&other.channels) {
            let Some(dst) = dst.get_mut(offset..) else {
                continue;
            };
            for (d, &s) in dst.iter_mut().zip(src) {
                *d += s;
            }
        }
    }

    /// Largest absolute sample value across all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .fold(0.0, |peak: f32, &s| peak.max(libm::fabsf(s)))
    }
}
