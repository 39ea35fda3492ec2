//! Grano Core - granular scheduling and delay primitives
//!
//! This crate provides the processing core of the grano renderer: it cuts short
//! enveloped windows ("grains") out of a sample buffer, schedules them against a
//! timeline and mixes them back together, and offers a single-tap delay built from
//! the same ring-buffer primitive.
//!
//! # Core Abstractions
//!
//! ## Buffers
//!
//! - [`SampleBuffer`] - Multichannel, equal-length `f32` channels plus a sample rate
//!
//! ## Envelopes
//!
//! - [`Adsr`] - Linear attack/decay/sustain/release applied in place to a buffer region
//!
//! ## Delay Lines
//!
//! - [`DelayLine`] - Wrapping write-then-read circular buffer
//! - [`RingBuffer`] - Split write/read ring buffer whose out-of-range reads are silent
//!
//! ## Grains & Scheduling
//!
//! - [`Grain`] - Extracted, eagerly enveloped segment (batch rendering)
//! - [`StreamingGrain`] - Cursor over a shared [`RingBuffer`] (streaming rendering)
//! - [`SchedulingPolicy`] - Selects between [`BatchScheduler`] and [`StreamingScheduler`]
//!
//! ## Effects
//!
//! - [`Effect`] - Per-sample processing trait
//! - [`SingleTapDelay`] - Dry/wet mix of a signal with a delayed copy of itself
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc`). Disable the default `std`
//! feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! grano-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use grano_core::{BatchParams, SampleBuffer, SchedulingPolicy};
//!
//! let source = SampleBuffer::from_mono(vec![0.5; 48_000], 48_000.0);
//! let policy = SchedulingPolicy::Batch(BatchParams {
//!     grain_seconds: 0.1,
//!     hop_seconds: 0.1,
//! });
//!
//! let rendered = policy.render(&source);
//! assert_eq!(rendered.num_frames(), 48_000);
//! ```
//!
//! # Design Principles
//!
//! - **Deterministic**: every operation runs to completion, single threaded
//! - **Local recovery**: degenerate parameters are clamped, out-of-range reads are silent
//! - **Owned state**: ring buffers are owned per channel and per run; grains only
//!   hold indices into them

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod buffer;
pub mod delay;
pub mod effect;
pub mod envelope;
pub mod grain;
pub mod scheduler;
pub mod tap_delay;

// Re-export main types at crate root
pub use buffer::{BufferError, SampleBuffer};
pub use delay::{DelayLine, RingBuffer};
pub use effect::Effect;
pub use envelope::{Adsr, DEFAULT_STAGE_SECONDS, EnvelopeStages, seconds_to_frames};
pub use grain::{
    GRAIN_EDGE_SECONDS, GRAIN_SUSTAIN_LEVEL, Grain, STREAMING_GRAIN_GAIN, StreamingGrain,
};
pub use scheduler::{
    BatchParams, BatchScheduler, GrainPlan, SchedulingPolicy, StreamingParams,
    StreamingScheduler, StreamingStats,
};
pub use tap_delay::SingleTapDelay;
