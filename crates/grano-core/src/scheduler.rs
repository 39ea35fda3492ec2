//! Grain scheduling and overlap-add mixing.
//!
//! Two independent engines sit behind [`SchedulingPolicy`]. They use different
//! grain shapes and mixing rules and are kept separate on purpose: their
//! outputs are not meant to match.
//!
//! # Batch
//!
//! [`BatchScheduler`] lays out a fixed number of evenly spaced onsets,
//! extracts every [`Grain`] up front, then mixes. Each channel pushes its grains
//! through one [`DelayLine`] whose read offset equals the hop, so every onset
//! in the output carries the *previous* grain:
//!
//! ```text
//! source:  |g0  |g1  |g2  |g3  |
//! output:  |··  |g0  |g1  |g2  |
//! ```
//!
//! # Streaming
//!
//! [`StreamingScheduler`] walks the input one sample at a time. Every sample is
//! written into a per-channel [`RingBuffer`]; every `hop` samples a
//! [`StreamingGrain`] is spawned; then every live grain is advanced once and
//! their sum is added to the output sample. Finished grains are dropped in the
//! same pass.
//!
//! The streaming pool has no size cap. With `overlap` close to 1 the hop shrinks
//! to a single sample and about `grain_samples` grains are alive at once; the
//! peak pool size is reported in [`StreamingStats`].

use alloc::vec::Vec;

use crate::{DelayLine, Grain, RingBuffer, SampleBuffer, StreamingGrain, seconds_to_frames};

/// Parameters of the batch scheduler, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchParams {
    /// Length of every grain.
    pub grain_seconds: f32,
    /// Distance between consecutive grain onsets.
    pub hop_seconds: f32,
}

impl Default for BatchParams {
    fn default() -> Self {
        Self {
            grain_seconds: 0.1,
            hop_seconds: 0.1,
        }
    }
}

/// Grain layout for a batch run, all values in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrainPlan {
    /// Length of each grain.
    pub grain_samples: usize,
    /// Distance between onsets, at least 1.
    pub hop: usize,
    /// Number of onset slots, `(total - grain_samples) / hop + 1`.
    pub num_grains: usize,
    /// Output length, `(num_grains - 1) * hop + grain_samples`.
    pub output_len: usize,
}

impl GrainPlan {
    /// Lay out grains of `grain_samples` every `hop` samples over `total` samples.
    ///
    /// The grain count follows truncating signed division of
    /// `total - grain_samples` by `hop`, so a source shorter than one grain by
    /// less than a hop still gets one (unfillable) slot, while a source
    /// shorter by a hop or more gets none. A zero hop is raised to 1.
    ///
    /// `output_len` saturates at `usize::MAX`.
    pub fn new(total: usize, grain_samples: usize, hop: usize) -> Self {
        let hop = hop.max(1);
        let num_grains = if grain_samples <= total {
            (total - grain_samples) / hop + 1
        } else {
            usize::from(grain_samples - total < hop)
        };
        let output_len = match num_grains {
            0 => 0,
            n => (n - 1).saturating_mul(hop).saturating_add(grain_samples),
        };

        Self {
            grain_samples,
            hop,
            num_grains,
            output_len,
        }
    }

    /// Onset of every grain slot, in source samples.
    pub fn onsets(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_grains).map(move |i| i * self.hop)
    }
}

/// Fixed-count grain scheduler.
///
/// # Example
///
/// ```rust
/// use grano_core::{BatchParams, BatchScheduler, SampleBuffer};
///
/// let scheduler = BatchScheduler::new(BatchParams { grain_seconds: 0.1, hop_seconds: 0.1 });
/// let plan = scheduler.plan(48_000, 48_000.0);
/// assert_eq!(plan.num_grains, 10);
/// assert_eq!(plan.output_len, 48_000);
///
/// let source = SampleBuffer::from_mono(vec![0.25; 48_000], 48_000.0);
/// let output = scheduler.render(&source);
/// assert_eq!(output.num_frames(), plan.output_len);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatchScheduler {
    params: BatchParams,
}

impl BatchScheduler {
    /// Create a scheduler with the given parameters.
    pub fn new(params: BatchParams) -> Self {
        Self { params }
    }

    /// Parameters.
    pub fn params(&self) -> &BatchParams {
        &self.params
    }

    /// Grain layout for a source of `total` samples at `sample_rate`.
    pub fn plan(&self, total: usize, sample_rate: f32) -> GrainPlan {
        GrainPlan::new(
            total,
            seconds_to_frames(self.params.grain_seconds, sample_rate),
            seconds_to_frames(self.params.hop_seconds, sample_rate),
        )
    }

    /// Extract every grain that fits inside `source`, in onset order.
    pub fn extract_grains(&self, source: &SampleBuffer, plan: &GrainPlan) -> Vec<Grain> {
        plan.onsets()
            .filter_map(|onset| {
                Grain::extract(source, onset, plan.grain_samples, source.sample_rate())
            })
            .collect()
    }

    /// Render `source` into a new buffer of `plan.output_len` frames.
    pub fn render(&self, source: &SampleBuffer) -> SampleBuffer {
        let plan = self.plan(source.num_frames(), source.sample_rate());
        let grains = self.extract_grains(source, &plan);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "batch: {} slots, {} grains of {} samples, hop {}, output {} samples",
            plan.num_grains,
            grains.len(),
            plan.grain_samples,
            plan.hop,
            plan.output_len
        );

        let mut output =
            SampleBuffer::new(source.num_channels(), plan.output_len, source.sample_rate());
        for (channel, out) in output.channels_mut().enumerate() {
            mix_grains(&grains, channel, plan.hop, out);
        }
        output
    }
}

/// Accumulate one channel of every grain into `out` through a hop-length delay.
///
/// The delay line spans the whole output and persists across grains, so each
/// grain's samples come out `hop` writes later, i.e. over the next grain's slot.
fn mix_grains(grains: &[Grain], channel: usize, hop: usize, out: &mut [f32]) {
    let mut delay = DelayLine::new(out.len());

    for grain in grains {
        for (j, &sample) in grain.channel(channel).iter().enumerate() {
            let pos = grain.start() + j;
            if pos < out.len() {
                out[pos] += delay.process(sample, hop);
            }
        }
    }
}

/// Parameters of the streaming scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamingParams {
    /// Length of every grain, in seconds.
    pub grain_seconds: f32,
    /// Fraction of a grain shared with the next one, 0.0 = back to back.
    pub overlap: f32,
    /// Length of the per-channel ring buffer, in seconds.
    pub buffer_seconds: f32,
}

impl Default for StreamingParams {
    fn default() -> Self {
        Self {
            grain_seconds: 0.05,
            overlap: 0.4,
            buffer_seconds: 1.0,
        }
    }
}

/// Counters from one streaming channel render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamingStats {
    /// Grain length in samples.
    pub grain_samples: usize,
    /// Spawn interval in samples.
    pub hop: usize,
    /// Grains spawned over the whole channel.
    pub grains_spawned: usize,
    /// Largest number of grains alive at one time.
    pub peak_active: usize,
}

/// Dynamically pooled grain scheduler with overlap-add accumulation.
///
/// # Example
///
/// ```rust
/// use grano_core::{SampleBuffer, StreamingParams, StreamingScheduler};
///
/// let scheduler = StreamingScheduler::new(StreamingParams::default());
/// let source = SampleBuffer::from_mono(vec![0.5; 4_800], 48_000.0);
///
/// let output = scheduler.render(&source);
/// assert_eq!(output.num_frames(), source.num_frames());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StreamingScheduler {
    params: StreamingParams,
}

impl StreamingScheduler {
    /// Create a scheduler with the given parameters.
    pub fn new(params: StreamingParams) -> Self {
        Self { params }
    }

    /// Parameters.
    pub fn params(&self) -> &StreamingParams {
        &self.params
    }

    /// Grain length in samples.
    pub fn grain_samples(&self, sample_rate: f32) -> usize {
        seconds_to_frames(self.params.grain_seconds, sample_rate)
    }

    /// Spawn interval in samples, `grain * (1 - overlap) * rate`, at least 1.
    pub fn hop_samples(&self, sample_rate: f32) -> usize {
        let hop = self.params.grain_seconds * (1.0 - self.params.overlap) * sample_rate;
        (hop as usize).max(1)
    }

    /// Render every channel of `source` into a buffer of the same shape.
    pub fn render(&self, source: &SampleBuffer) -> SampleBuffer {
        let sample_rate = source.sample_rate();
        let mut output = SampleBuffer::new(source.num_channels(), source.num_frames(), sample_rate);

        for (input, out) in source.channels().zip(output.channels_mut()) {
            let stats = self.render_channel(input, out, sample_rate);

            #[cfg(feature = "tracing")]
            tracing::debug!(
                "streaming: {} grains of {} samples every {} samples, peak pool {}",
                stats.grains_spawned,
                stats.grain_samples,
                stats.hop,
                stats.peak_active
            );
            #[cfg(not(feature = "tracing"))]
            let _ = stats;
        }
        output
    }

    /// Render one channel, adding the grain sum into `output`.
    ///
    /// Only `min(input.len(), output.len())` samples are processed. The ring
    /// buffer and the grain pool live for this call only.
    pub fn render_channel(
        &self,
        input: &[f32],
        output: &mut [f32],
        sample_rate: f32,
    ) -> StreamingStats {
        let grain_samples = self.grain_samples(sample_rate);
        let hop = self.hop_samples(sample_rate);

        let mut ring = RingBuffer::from_time(sample_rate, self.params.buffer_seconds);
        let mut grains: Vec<StreamingGrain> = Vec::new();
        let mut stats = StreamingStats {
            grain_samples,
            hop,
            ..StreamingStats::default()
        };

        for (i, (&sample, out)) in input.iter().zip(output.iter_mut()).enumerate() {
            ring.write(sample);

            if i % hop == 0 {
                grains.push(StreamingGrain::new(i, grain_samples));
                stats.grains_spawned += 1;
            }
            stats.peak_active = stats.peak_active.max(grains.len());

            let mut sum = 0.0;
            grains.retain_mut(|grain| {
                let (value, active) = grain.advance(&ring);
                sum += value;
                active
            });
            *out += sum;
        }

        stats
    }
}

/// Selects one of the two grain engines.
///
/// # Example
///
/// ```rust
/// use grano_core::{SampleBuffer, SchedulingPolicy, StreamingParams};
///
/// let source = SampleBuffer::from_mono(vec![0.5; 1_000], 10_000.0);
/// let policy = SchedulingPolicy::Streaming(StreamingParams::default());
/// assert_eq!(policy.render(&source).num_frames(), 1_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchedulingPolicy {
    /// Precomputed, evenly spaced grains mixed through a hop-length delay.
    Batch(BatchParams),
    /// Sample-by-sample spawning with a live grain pool.
    Streaming(StreamingParams),
}

impl SchedulingPolicy {
    /// Render `source` with the selected engine.
    pub fn render(&self, source: &SampleBuffer) -> SampleBuffer {
        match *self {
            Self::Batch(params) => BatchScheduler::new(params).render(source),
            Self::Streaming(params) => StreamingScheduler::new(params).render(source),
        }
    }
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self::Batch(BatchParams::default())
    }
}
