//! Configured render runs: read, process, write.

use grano_config::{ProcessConfig, RenderConfig};
use grano_core::SampleBuffer;

use crate::{Error, Result, WavSpec, read_wav, write_wav};

/// What a [`render_file`] run read and wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    /// Process kind that ran, as named in the config.
    pub kind: &'static str,
    /// Channels in both input and output.
    pub channels: usize,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Frames per channel read from the source.
    pub input_frames: usize,
    /// Frames per channel written to the output.
    pub output_frames: usize,
    /// Largest absolute input sample.
    pub input_peak: f32,
    /// Largest absolute output sample.
    pub output_peak: f32,
}

/// Run the configured operation on `source` and return the rendered buffer.
///
/// Degenerate parameters are not errors here; they are logged at debug level
/// and the core recovers from them.
pub fn render_buffer(source: &SampleBuffer, process: &ProcessConfig) -> SampleBuffer {
    log_degenerate(process);
    process.to_job().run(source)
}

/// Read `config.input`, render it and write `config.output`.
///
/// The config is validated first. Nothing is written unless the source was
/// read and rendered successfully.
///
/// # Errors
///
/// Returns [`Error::Config`] for an invalid config, [`Error::Wav`] when the
/// source cannot be decoded or the output cannot be encoded, and
/// [`Error::EmptySource`] when the source holds no frames.
pub fn render_file(config: &RenderConfig) -> Result<RenderSummary> {
    config.validate()?;

    tracing::info!(input = %config.input.display(), "reading source");
    let (source, spec) = read_wav(&config.input)?;
    if source.is_empty() {
        return Err(Error::EmptySource(config.input.clone()));
    }
    tracing::info!(
        channels = source.num_channels(),
        frames = source.num_frames(),
        sample_rate = spec.sample_rate,
        "source loaded"
    );

    let kind = config.process.kind();
    tracing::info!(kind, "rendering");
    let output = render_buffer(&source, &config.process);

    let out_spec = WavSpec {
        channels: output.num_channels() as u16,
        sample_rate: spec.sample_rate,
        bits_per_sample: config.bits_per_sample,
    };
    tracing::info!(
        output = %config.output.display(),
        frames = output.num_frames(),
        bits = out_spec.bits_per_sample,
        "writing output"
    );
    write_wav(&config.output, &output, out_spec)?;

    Ok(RenderSummary {
        kind,
        channels: output.num_channels(),
        sample_rate: spec.sample_rate,
        input_frames: source.num_frames(),
        output_frames: output.num_frames(),
        input_peak: source.peak(),
        output_peak: output.peak(),
    })
}

fn log_degenerate(process: &ProcessConfig) {
    match process {
        ProcessConfig::Envelope(env) => {
            for (stage, fraction) in [
                ("attack", env.attack_fraction),
                ("decay", env.decay_fraction),
                ("release", env.release_fraction),
            ] {
                if fraction <= 0.0 {
                    tracing::debug!(
                        stage,
                        fraction,
                        "non-positive envelope stage, using {}s",
                        grano_core::DEFAULT_STAGE_SECONDS
                    );
                }
            }
        }
        ProcessConfig::Batch(batch) => {
            if batch.hop_seconds <= 0.0 {
                tracing::debug!(hop_seconds = batch.hop_seconds, "hop raised to one sample");
            }
            if batch.grain_seconds <= 0.0 {
                tracing::debug!(
                    grain_seconds = batch.grain_seconds,
                    "empty grains, output is silent"
                );
            }
        }
        ProcessConfig::Streaming(streaming) => {
            if streaming.overlap >= 1.0 {
                tracing::debug!(
                    overlap = streaming.overlap,
                    "hop raised to one sample, grain pool grows to grain length"
                );
            }
            if streaming.buffer_seconds <= 0.0 {
                tracing::debug!(
                    buffer_seconds = streaming.buffer_seconds,
                    "empty ring buffer, output is silent"
                );
            }
        }
        ProcessConfig::Delay(delay) => {
            if !(0.0..=1.0).contains(&delay.mix) {
                tracing::debug!(mix = delay.mix, "mix outside 0..=1 applied as given");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grano_config::{BatchConfig, DelayConfig};

    #[test]
    fn test_render_buffer_batch_length() {
        let source = SampleBuffer::from_mono(vec![0.5; 2000], 1000.0);
        let output = render_buffer(&source, &ProcessConfig::Batch(BatchConfig::default()));
        assert_eq!(output.num_frames(), 2000);
        assert_eq!(output.peak(), 0.5);
    }

    #[test]
    fn test_render_buffer_degenerate_params_recover() {
        let source = SampleBuffer::from_mono(vec![0.5; 100], 1000.0);
        let output = render_buffer(
            &source,
            &ProcessConfig::Batch(BatchConfig {
                grain_seconds: 0.0,
                hop_seconds: 0.0,
            }),
        );
        // Zero-length grains on every sample leave the output silent
        assert_eq!(output.num_frames(), 100);
        assert_eq!(output.peak(), 0.0);

        let output = render_buffer(
            &source,
            &ProcessConfig::Delay(DelayConfig {
                delay_seconds: 0.0,
                mix: 1.0,
            }),
        );
        assert_eq!(output.peak(), 0.0);
    }
}
