//! Core operations described by a [`ProcessConfig`](crate::ProcessConfig).

use grano_core::{SampleBuffer, SchedulingPolicy, SingleTapDelay};

use crate::EnvelopeConfig;

/// A resolved render operation, ready to run on a source buffer.
///
/// # Example
///
/// ```rust
/// use grano_config::{DelayConfig, ProcessConfig};
/// use grano_core::SampleBuffer;
///
/// let source = SampleBuffer::from_mono(vec![1.0, 0.0, 0.0], 10.0);
/// let job = ProcessConfig::Delay(DelayConfig { delay_seconds: 0.1, mix: 0.5 }).to_job();
///
/// let rendered = job.run(&source);
/// assert_eq!(rendered.channel(0), &[0.5, 0.25, 0.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Job {
    /// ADSR over the whole source, stage times relative to its duration.
    Envelope(EnvelopeConfig),
    /// One of the two grain engines.
    Granular(SchedulingPolicy),
    /// Single-tap delay on every channel.
    Delay {
        /// Delay time in seconds.
        delay_seconds: f32,
        /// Wet/dry mix.
        mix: f32,
    },
}

impl Job {
    /// Render `source` into a new buffer.
    ///
    /// Envelope and delay keep the source length; granular output length is
    /// decided by the scheduler.
    pub fn run(&self, source: &SampleBuffer) -> SampleBuffer {
        match *self {
            Self::Envelope(env) => {
                let mut output = source.clone();
                env.to_adsr(source.duration_secs(), source.sample_rate())
                    .apply(&mut output);
                output
            }
            Self::Granular(policy) => policy.render(source),
            Self::Delay { delay_seconds, mix } => {
                let mut output = source.clone();
                SingleTapDelay::apply(&mut output, delay_seconds, mix);
                output
            }
        }
    }
}
