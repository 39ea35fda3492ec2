//! Render configuration for grano.
//!
//! A [`RenderConfig`] names a source file, a destination file, an output bit
//! depth and one [`ProcessConfig`]: a whole-buffer envelope, one of the two
//! grain engines, or the single-tap delay. Configs are stored as TOML.
//!
//! # Features
//!
//! - **TOML format**: Load and save configs with `serde`
//! - **Validation**: Reject values no render can use
//! - **Jobs**: Resolve a process section into a runnable [`Job`]
//!
//! # Example
//!
//! ```rust
//! use grano_config::{ProcessConfig, RenderConfig, StreamingConfig};
//!
//! let config = RenderConfig::from_toml(r#"
//!     input = "voice.wav"
//!     output = "voice_grains.wav"
//!
//!     [process]
//!     kind = "streaming"
//!     overlap = 0.75
//! "#).unwrap();
//!
//! assert_eq!(
//!     config.process,
//!     ProcessConfig::Streaming(StreamingConfig { overlap: 0.75, ..StreamingConfig::default() })
//! );
//! config.validate().unwrap();
//! ```

mod config;
mod error;
mod job;

/// Render config validation.
pub mod validation;

pub use config::{
    BatchConfig, DelayConfig, EnvelopeConfig, ProcessConfig, RenderConfig, StreamingConfig,
};
pub use error::ConfigError;
pub use job::Job;
pub use validation::{
    MAX_DURATION_SECONDS, SUPPORTED_BIT_DEPTHS, validate_process, validate_render_config,
};
