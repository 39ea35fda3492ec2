//! Render configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::job::Job;

/// One render run: where to read, where to write, and what to do in between.
///
/// # TOML Format
///
/// ```toml
/// input = "input.wav"
/// output = "out.wav"
/// bits_per_sample = 16
///
/// [process]
/// kind = "streaming"
/// grain_seconds = 0.05
/// overlap = 0.4
/// buffer_seconds = 1.0
/// ```
///
/// `bits_per_sample` defaults to 16 and every `[process]` field falls back to
/// its default when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Source WAV file.
    pub input: PathBuf,

    /// Destination WAV file, created only after a successful render.
    pub output: PathBuf,

    /// Output bit depth: 16 or 24 (integer PCM) or 32 (float).
    #[serde(default = "default_bits_per_sample")]
    pub bits_per_sample: u16,

    /// Operation applied to the source.
    #[serde(default)]
    pub process: ProcessConfig,
}

fn default_bits_per_sample() -> u16 {
    16
}

impl RenderConfig {
    /// Create a config with default bit depth and processing.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            bits_per_sample: default_bits_per_sample(),
            process: ProcessConfig::default(),
        }
    }

    /// Set the operation.
    pub fn with_process(mut self, process: ProcessConfig) -> Self {
        self.process = process;
        self
    }

    /// Set the output bit depth.
    pub fn with_bits_per_sample(mut self, bits: u16) -> Self {
        self.bits_per_sample = bits;
        self
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a config from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the config to a TOML file, creating missing parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values that cannot describe any run.
    ///
    /// See [`validate_render_config`](crate::validate_render_config).
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::validation::validate_render_config(self)
    }
}

/// The operation a render applies, selected by `kind`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProcessConfig {
    /// ADSR over the whole source.
    Envelope(EnvelopeConfig),
    /// Fixed-count grains mixed through a hop-length delay.
    Batch(BatchConfig),
    /// Sample-by-sample grain pool.
    Streaming(StreamingConfig),
    /// Single-tap delay.
    Delay(DelayConfig),
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self::Batch(BatchConfig::default())
    }
}

impl ProcessConfig {
    /// Name used for `kind` in TOML.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Envelope(_) => "envelope",
            Self::Batch(_) => "batch",
            Self::Streaming(_) => "streaming",
            Self::Delay(_) => "delay",
        }
    }

    /// The core operation this config describes.
    pub fn to_job(&self) -> Job {
        match *self {
            Self::Envelope(env) => Job::Envelope(env),
            Self::Batch(batch) => Job::Granular(grano_core::SchedulingPolicy::Batch(
                grano_core::BatchParams {
                    grain_seconds: batch.grain_seconds,
                    hop_seconds: batch.hop_seconds,
                },
            )),
            Self::Streaming(streaming) => Job::Granular(
                grano_core::SchedulingPolicy::Streaming(grano_core::StreamingParams {
                    grain_seconds: streaming.grain_seconds,
                    overlap: streaming.overlap,
                    buffer_seconds: streaming.buffer_seconds,
                }),
            ),
            Self::Delay(delay) => Job::Delay {
                delay_seconds: delay.delay_seconds,
                mix: delay.mix,
            },
        }
    }
}

/// Envelope over the whole source; stage times are fractions of its duration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Attack time as a fraction of the source duration.
    pub attack_fraction: f32,
    /// Decay time as a fraction of the source duration.
    pub decay_fraction: f32,
    /// Release time as a fraction of the source duration.
    pub release_fraction: f32,
    /// Sustain level.
    pub sustain_level: f32,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            attack_fraction: 0.5,
            decay_fraction: 0.1,
            release_fraction: 0.2,
            sustain_level: 0.5,
        }
    }
}

impl EnvelopeConfig {
    /// Envelope for a source of `duration_secs` at `sample_rate`.
    ///
    /// Stage times that come out non-positive (e.g. an empty source) fall back
    /// to [`grano_core::DEFAULT_STAGE_SECONDS`].
    pub fn to_adsr(&self, duration_secs: f32, sample_rate: f32) -> grano_core::Adsr {
        grano_core::Adsr::from_seconds(
            self.attack_fraction * duration_secs,
            self.decay_fraction * duration_secs,
            self.sustain_level,
            self.release_fraction * duration_secs,
            sample_rate,
        )
    }
}

/// Batch granular settings, in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    /// Grain length.
    pub grain_seconds: f32,
    /// Distance between grain onsets.
    pub hop_seconds: f32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            grain_seconds: 0.1,
            hop_seconds: 0.1,
        }
    }
}

/// Streaming granular settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamingConfig {
    /// Grain length in seconds.
    pub grain_seconds: f32,
    /// Fraction of a grain shared with the next.
    pub overlap: f32,
    /// Ring buffer length in seconds.
    pub buffer_seconds: f32,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            grain_seconds: 0.05,
            overlap: 0.4,
            buffer_seconds: 1.0,
        }
    }
}

/// Single-tap delay settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DelayConfig {
    /// Delay time in seconds.
    pub delay_seconds: f32,
    /// Wet/dry mix, not range-checked.
    ///
    /// The output is `(1 - mix) * (dry + mix * delayed)`, so the default 0.3
    /// gives `0.7 * dry + 0.21 * delayed`.
    pub mix: f32,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            delay_seconds: 0.5,
            mix: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = RenderConfig::from_toml(
            r#"
            input = "in.wav"
            output = "out.wav"
            "#,
        )
        .unwrap();

        assert_eq!(config.bits_per_sample, 16);
        assert_eq!(config.process, ProcessConfig::Batch(BatchConfig::default()));
    }

    #[test]
    fn test_partial_process_section() {
        let config = RenderConfig::from_toml(
            r#"
            input = "in.wav"
            output = "out.wav"

            [process]
            kind = "delay"
            mix = 0.6
            "#,
        )
        .unwrap();

        assert_eq!(
            config.process,
            ProcessConfig::Delay(DelayConfig {
                delay_seconds: 0.5,
                mix: 0.6
            })
        );
    }

    #[test]
    fn test_unknown_kind_fails() {
        let result = RenderConfig::from_toml(
            r#"
            input = "in.wav"
            output = "out.wav"

            [process]
            kind = "reverse"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_to_toml_writes_kind() {
        let config = RenderConfig::new("a.wav", "b.wav")
            .with_process(ProcessConfig::Streaming(StreamingConfig::default()));
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("kind = \"streaming\""), "got: {toml_str}");
        assert_eq!(RenderConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_envelope_defaults() {
        let env = EnvelopeConfig::default();
        assert_eq!(env.attack_fraction, 0.5);
        assert_eq!(env.decay_fraction, 0.1);
        assert_eq!(env.release_fraction, 0.2);
        assert_eq!(env.sustain_level, 0.5);
    }

    #[test]
    fn test_envelope_fractions_scale_with_duration() {
        let adsr = EnvelopeConfig::default().to_adsr(2.0, 1000.0);
        let stages = adsr.stages(2000);
        assert_eq!(stages.attack_end, 1000.0);
        assert_eq!(stages.decay_end, 1200.0);
        assert_eq!(stages.sustain_end, 1600.0);
    }

    #[test]
    fn test_to_job_maps_parameters() {
        let job = ProcessConfig::Streaming(StreamingConfig {
            grain_seconds: 0.02,
            overlap: 0.75,
            buffer_seconds: 2.0,
        })
        .to_job();

        assert_eq!(
            job,
            Job::Granular(grano_core::SchedulingPolicy::Streaming(
                grano_core::StreamingParams {
                    grain_seconds: 0.02,
                    overlap: 0.75,
                    buffer_seconds: 2.0,
                }
            ))
        );

        let job = ProcessConfig::Delay(DelayConfig::default()).to_job();
        assert_eq!(
            job,
            Job::Delay {
                delay_seconds: 0.5,
                mix: 0.3
            }
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ProcessConfig::default().kind(), "batch");
        assert_eq!(
            ProcessConfig::Envelope(EnvelopeConfig::default()).kind(),
            "envelope"
        );
    }
}
