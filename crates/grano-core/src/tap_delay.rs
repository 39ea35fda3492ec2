//! Single-tap delay effect.
//!
//! Mixes a signal with one delayed copy of itself. There is no feedback path:
//! the delay line holds the dry input only.
//!
//! ```text
//! wet = (1 - mix) * (dry + mix * delayed)
//! ```
//!
//! `mix` is applied as given, without clamping. At `mix = 1` the output is
//! silence; values outside `0..=1` scale or invert the result.

use crate::{DelayLine, Effect, SampleBuffer, seconds_to_frames};

/// Dry/wet mix of a signal with itself delayed by a fixed number of samples.
///
/// # Example
///
/// ```rust
/// use grano_core::{Effect, SingleTapDelay};
///
/// let mut delay = SingleTapDelay::new(2, 0.5);
/// let out: Vec<f32> = [1.0, 0.0, 0.0, 0.0].iter().map(|&x| delay.process(x)).collect();
///
/// // Dry impulse at 0, its echo two samples later
/// assert_eq!(out, vec![0.5, 0.0, 0.25, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct SingleTapDelay {
    line: DelayLine,
    delay_samples: usize,
    mix: f32,
}

impl SingleTapDelay {
    /// Create a delay of `delay_samples` with the given wet/dry mix.
    pub fn new(delay_samples: usize, mix: f32) -> Self {
        Self {
            line: DelayLine::new(delay_samples.saturating_add(1)),
            delay_samples,
            mix,
        }
    }

    /// Create a delay from a time in seconds.
    pub fn from_time(delay_seconds: f32, sample_rate: f32, mix: f32) -> Self {
        Self::new(seconds_to_frames(delay_seconds, sample_rate), mix)
    }

    /// Delay in samples.
    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    /// Wet/dry mix.
    pub fn mix(&self) -> f32 {
        self.mix
    }

    /// Run every channel of `buffer` through its own delay, in place.
    pub fn apply(buffer: &mut SampleBuffer, delay_seconds: f32, mix: f32) {
        let sample_rate = buffer.sample_rate();
        for channel in buffer.channels_mut() {
            Self::from_time(delay_seconds, sample_rate, mix).process_block_inplace(channel);
        }
    }
}

impl Effect for SingleTapDelay {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let delayed = self.line.process(input, self.delay_samples);
        (1.0 - self.mix) * (input + self.mix * delayed)
    }

    fn reset(&mut self) {
        self.line.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_zero_offset_zero_mix_is_dry() {
        let mut delay = SingleTapDelay::new(0, 0.0);
        for x in [0.1, -0.4, 0.9, 0.0, 0.33] {
            assert_eq!(delay.process(x), x);
        }
    }

    #[test]
    fn test_full_mix_is_silent() {
        let mut delay = SingleTapDelay::new(3, 1.0);
        for i in 0..20 {
            assert_eq!(delay.process(i as f32 * 0.1), 0.0);
        }
    }

    #[test]
    fn test_zero_offset_doubles_wet_part() {
        // Offset 0 reads the sample just written: (1 - m) * (1 + m) * x
        let mut delay = SingleTapDelay::new(0, 0.5);
        assert!((delay.process(1.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_echo_position() {
        let mut delay = SingleTapDelay::new(4, 0.3);
        let mut impulse = vec![0.0; 10];
        impulse[0] = 1.0;
        delay.process_block_inplace(&mut impulse);

        assert!((impulse[0] - 0.7).abs() < 1e-6);
        assert!((impulse[4] - 0.21).abs() < 1e-6);
        let others: Vec<f32> = impulse
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != 0 && i != 4)
            .map(|(_, &s)| s)
            .collect();
        assert!(others.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_reset_clears_history() {
        let mut delay = SingleTapDelay::new(1, 0.5);
        delay.process(1.0);
        delay.reset();
        assert_eq!(delay.process(0.0), 0.0);
    }

    #[test]
    fn test_apply_per_channel() {
        let mut buffer =
            SampleBuffer::from_channels(vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]], 10.0)
                .unwrap();
        SingleTapDelay::apply(&mut buffer, 0.1, 0.5);

        assert_eq!(buffer.channel(0), &[0.5, 0.25, 0.0]);
        assert_eq!(buffer.channel(1), &[0.0, 0.5, 0.25]);
    }

    #[test]
    fn test_from_time() {
        let delay = SingleTapDelay::from_time(0.5, 48000.0, 0.3);
        assert_eq!(delay.delay_samples(), 24000);
        assert_eq!(delay.mix(), 0.3);
    }
}
