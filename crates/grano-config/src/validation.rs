//! Render configuration validation.
//!
//! Only values that cannot describe any run are rejected: non-finite numbers,
//! durations longer than [`MAX_DURATION_SECONDS`], empty paths and bit depths
//! the WAV writer does not produce. Degenerate but finite values (zero hop,
//! negative envelope times, `mix` outside `0..=1`) pass through; the core
//! recovers from them locally.
//!
//! # Example
//!
//! ```rust
//! use grano_config::{ConfigError, DelayConfig, ProcessConfig, RenderConfig};
//!
//! let config = RenderConfig::new("in.wav", "out.wav")
//!     .with_process(ProcessConfig::Delay(DelayConfig { delay_seconds: f32::NAN, mix: 0.3 }));
//!
//! let err = config.validate().unwrap_err();
//! assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "process.delay_seconds"));
//! ```

use std::path::Path;

use crate::{ConfigError, ProcessConfig, RenderConfig};

/// Bit depths accepted for `bits_per_sample`.
pub const SUPPORTED_BIT_DEPTHS: &[u16] = &[16, 24, 32];

/// Longest grain, hop, ring buffer or delay time accepted, in seconds.
///
/// Ring buffers and delay lines allocate this many seconds of samples up
/// front.
pub const MAX_DURATION_SECONDS: f32 = 3600.0;

/// Validate a whole render config, reporting the first offending field.
pub fn validate_render_config(config: &RenderConfig) -> Result<(), ConfigError> {
    validate_path("input", &config.input)?;
    validate_path("output", &config.output)?;

    if !SUPPORTED_BIT_DEPTHS.contains(&config.bits_per_sample) {
        return Err(ConfigError::invalid(
            "bits_per_sample",
            format!(
                "{} is not supported, expected one of {:?}",
                config.bits_per_sample, SUPPORTED_BIT_DEPTHS
            ),
        ));
    }

    validate_process(&config.process)
}

/// Validate the numeric fields of a process section.
pub fn validate_process(process: &ProcessConfig) -> Result<(), ConfigError> {
    match process {
        ProcessConfig::Envelope(env) => {
            validate_finite("process.attack_fraction", env.attack_fraction)?;
            validate_finite("process.decay_fraction", env.decay_fraction)?;
            validate_finite("process.release_fraction", env.release_fraction)?;
            validate_finite("process.sustain_level", env.sustain_level)
        }
        ProcessConfig::Batch(batch) => {
            validate_duration("process.grain_seconds", batch.grain_seconds)?;
            validate_duration("process.hop_seconds", batch.hop_seconds)
        }
        ProcessConfig::Streaming(streaming) => {
            validate_duration("process.grain_seconds", streaming.grain_seconds)?;
            validate_finite("process.overlap", streaming.overlap)?;
            validate_duration("process.buffer_seconds", streaming.buffer_seconds)
        }
        ProcessConfig::Delay(delay) => {
            validate_duration("process.delay_seconds", delay.delay_seconds)?;
            validate_finite("process.mix", delay.mix)
        }
    }
}

fn validate_finite(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be finite, got {value}"),
        ))
    }
}

fn validate_duration(field: &str, seconds: f32) -> Result<(), ConfigError> {
    validate_finite(field, seconds)?;
    if seconds > MAX_DURATION_SECONDS {
        return Err(ConfigError::invalid(
            field,
            format!("{seconds}s exceeds the {MAX_DURATION_SECONDS}s limit"),
        ));
    }
    Ok(())
}

fn validate_path(field: &str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        Err(ConfigError::invalid(field, "path is empty"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BatchConfig, EnvelopeConfig, StreamingConfig};

    fn field_of(err: ConfigError) -> String {
        match err {
            ConfigError::Invalid { field, .. } => field,
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        for process in [
            ProcessConfig::Envelope(EnvelopeConfig::default()),
            ProcessConfig::Batch(BatchConfig::default()),
            ProcessConfig::Streaming(StreamingConfig::default()),
            ProcessConfig::Delay(crate::DelayConfig::default()),
        ] {
            let config = RenderConfig::new("in.wav", "out.wav").with_process(process);
            assert!(config.validate().is_ok(), "{process:?}");
        }
    }

    #[test]
    fn test_empty_paths_rejected() {
        let err = RenderConfig::new("", "out.wav").validate().unwrap_err();
        assert_eq!(field_of(err), "input");

        let err = RenderConfig::new("in.wav", "").validate().unwrap_err();
        assert_eq!(field_of(err), "output");
    }

    #[test]
    fn test_bit_depth() {
        for bits in [16, 24, 32] {
            let config = RenderConfig::new("in.wav", "out.wav").with_bits_per_sample(bits);
            assert!(config.validate().is_ok());
        }
        let err = RenderConfig::new("in.wav", "out.wav")
            .with_bits_per_sample(8)
            .validate()
            .unwrap_err();
        assert_eq!(field_of(err), "bits_per_sample");
    }

    #[test]
    fn test_non_finite_rejected() {
        let process = ProcessConfig::Streaming(StreamingConfig {
            overlap: f32::INFINITY,
            ..StreamingConfig::default()
        });
        let err = validate_process(&process).unwrap_err();
        assert_eq!(field_of(err), "process.overlap");
    }

    #[test]
    fn test_oversized_durations_rejected() {
        let process = ProcessConfig::Batch(BatchConfig {
            grain_seconds: 1e30,
            hop_seconds: 0.1,
        });
        let err = validate_process(&process).unwrap_err();
        assert_eq!(field_of(err), "process.grain_seconds");

        let process = ProcessConfig::Streaming(StreamingConfig {
            buffer_seconds: 1e6,
            ..StreamingConfig::default()
        });
        let err = validate_process(&process).unwrap_err();
        assert_eq!(field_of(err), "process.buffer_seconds");

        let process = ProcessConfig::Delay(crate::DelayConfig {
            delay_seconds: 1e6,
            mix: 0.3,
        });
        let err = validate_process(&process).unwrap_err();
        assert_eq!(field_of(err), "process.delay_seconds");

        let process = ProcessConfig::Delay(crate::DelayConfig {
            delay_seconds: MAX_DURATION_SECONDS,
            mix: 0.3,
        });
        assert!(validate_process(&process).is_ok());
    }

    #[test]
    fn test_degenerate_values_pass() {
        let process = ProcessConfig::Batch(BatchConfig {
            grain_seconds: 0.0,
            hop_seconds: -1.0,
        });
        assert!(validate_process(&process).is_ok());

        let process = ProcessConfig::Delay(crate::DelayConfig {
            delay_seconds: 0.0,
            mix: 4.0,
        });
        assert!(validate_process(&process).is_ok());
    }
}
