//! Per-sample processing trait.
//!
//! The [`Effect`] trait gives sample-by-sample processors a consistent
//! interface for single-sample and block-based use.
//!
//! ## Design Decisions
//!
//! - **Mono processing**: One `f32` in, one `f32` out. Multichannel buffers
//!   use one instance per channel so channels never share state.
//!
//! - **Object-safe**: `dyn Effect` works for runtime selection, but the
//!   renderers use static dispatch.
//!
//! - **Sample counts, not seconds**: Effects are built with their timing
//!   already converted to samples, so there is no sample-rate hook.

/// Core trait for per-sample audio processors.
///
/// # Example
///
/// ```rust
/// use grano_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut gain = Gain { gain: 0.5 };
/// let mut block = [1.0, 2.0];
/// gain.process_block_inplace(&mut block);
/// assert_eq!(block, [0.5, 1.0]);
/// ```
pub trait Effect {
    /// Process a single sample, advancing internal state by one step.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// # Panics
    /// Default implementation panics in debug builds if `input.len() != output.len()`
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in-place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear internal state (delay memory, cursors) without changing parameters.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offset(f32);

    impl Effect for Offset {
        fn process(&mut self, input: f32) -> f32 {
            input + self.0
        }
        fn reset(&mut self) {}
    }

    #[test]
    fn test_process_block() {
        let mut effect = Offset(1.0);
        let input = [1.0, 2.0, 3.0];
        let mut output = [0.0; 3];
        effect.process_block(&input, &mut output);
        assert_eq!(output, [2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_process_block_inplace() {
        let mut effect = Offset(-1.0);
        let mut buffer = [1.0, 2.0];
        effect.process_block_inplace(&mut buffer);
        assert_eq!(buffer, [0.0, 1.0]);
    }
}
