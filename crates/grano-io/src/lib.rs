//! File layer for grano.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] move every channel of a
//!   file in and out of a [`SampleBuffer`](grano_core::SampleBuffer)
//! - **Render runs**: [`render_file`] reads the configured source, runs the
//!   configured operation and writes the result; [`render_buffer`] does the
//!   middle step alone
//!
//! Progress is logged with `tracing`; installing a subscriber is left to the
//! embedding application.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use grano_config::RenderConfig;
//! use grano_io::render_file;
//!
//! let config = RenderConfig::load("job.toml")?;
//! let summary = render_file(&config)?;
//! println!("wrote {} frames", summary.output_frames);
//! # Ok::<(), grano_io::Error>(())
//! ```

mod render;
mod wav;

pub use render::{RenderSummary, render_buffer, render_file};
pub use wav::{WavSpec, read_wav, write_wav};

use std::path::PathBuf;

/// Error types for file I/O and render runs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoded samples do not form a valid buffer.
    #[error("invalid sample data: {0}")]
    Buffer(#[from] grano_core::BufferError),

    /// The render config could not be used.
    #[error("configuration error: {0}")]
    Config(#[from] grano_config::ConfigError),

    /// The source file holds no audio frames.
    #[error("source file '{}' contains no audio", .0.display())]
    EmptySource(PathBuf),
}

/// Convenience result type for I/O and render operations.
pub type Result<T> = std::result::Result<T, Error>;
