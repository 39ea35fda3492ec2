//! WAV file reading and writing.
//!
//! Integer PCM is scaled by `2^(bits - 1)` in both directions. Files are read
//! with every channel kept; writing interleaves the buffer's channels back.

use crate::Result;
use grano_core::SampleBuffer;
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample; 32 is written as float, anything else as integer PCM.
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 16,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Full-scale value of a signed integer sample of `bits` bits.
fn int_scale(bits: u16) -> f32 {
    (1i64 << (bits.clamp(1, 32) - 1)) as f32
}

/// Read a WAV file into a buffer holding every channel, plus its spec.
///
/// # Example
/// ```ignore
/// let (buffer, spec) = read_wav("input.wav")?;
/// println!("{} channels, {} frames at {} Hz", buffer.num_channels(), buffer.num_frames(), spec.sample_rate);
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(SampleBuffer, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());

    let interleaved: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = int_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let buffer = SampleBuffer::from_interleaved(
        &interleaved,
        usize::from(spec.channels),
        spec.sample_rate as f32,
    )?;
    Ok((buffer, spec))
}

/// Write every channel of `buffer` to a WAV file.
///
/// `spec.channels` is taken from the buffer; the sample rate and bit depth
/// come from `spec`. Integer output is clipped to full scale.
///
/// # Example
/// ```ignore
/// let buffer = SampleBuffer::new(2, 48000, 48000.0); // 1 second of stereo silence
/// write_wav("output.wav", &buffer, WavSpec { channels: 2, ..Default::default() })?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &SampleBuffer, spec: WavSpec) -> Result<()> {
    let spec = WavSpec {
        channels: buffer.num_channels() as u16,
        ..spec
    };
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;
    let interleaved = buffer.to_interleaved();

    if spec.bits_per_sample == 32 {
        for sample in interleaved {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = int_scale(spec.bits_per_sample);
        for sample in interleaved {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sine(len: usize, phase: f32) -> Vec<f32> {
        (0..len).map(|i| (i as f32 / 100.0 + phase).sin() * 0.9).collect()
    }

    #[test]
    fn test_roundtrip_f32_stereo() {
        let buffer =
            SampleBuffer::from_channels(vec![sine(1000, 0.0), sine(1000, 1.0)], 48000.0).unwrap();
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &buffer, spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec, spec);
        assert_eq!(loaded, buffer);
    }

    #[test]
    fn test_roundtrip_i16() {
        let buffer = SampleBuffer::from_mono(sine(1000, 0.0), 44100.0);
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &buffer, spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 44100);
        assert_eq!(loaded.num_frames(), 1000);
        assert_eq!(loaded.sample_rate(), 44100.0);

        // 16-bit has less precision
        for (a, b) in buffer.channel(0).iter().zip(loaded.channel(0)) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_roundtrip_i24_keeps_channels_apart() {
        let buffer =
            SampleBuffer::from_channels(vec![vec![0.5; 64], vec![-0.25; 64], vec![0.0; 64]], 8000.0)
                .unwrap();
        let spec = WavSpec {
            channels: 3,
            sample_rate: 8000,
            bits_per_sample: 24,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &buffer, spec).unwrap();

        let (loaded, _) = read_wav(file.path()).unwrap();
        assert_eq!(loaded.num_channels(), 3);
        assert!(loaded.channel(0).iter().all(|&s| (s - 0.5).abs() < 1e-6));
        assert!(loaded.channel(1).iter().all(|&s| (s + 0.25).abs() < 1e-6));
        assert!(loaded.channel(2).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_write_clips_integer_output() {
        let buffer = SampleBuffer::from_mono(vec![2.0, -2.0], 8000.0);
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &buffer, WavSpec::default()).unwrap();

        let (loaded, _) = read_wav(file.path()).unwrap();
        assert!((loaded.channel(0)[0] - 32767.0 / 32768.0).abs() < 1e-6);
        assert_eq!(loaded.channel(0)[1], -1.0);
    }

    #[test]
    fn test_channel_count_follows_buffer() {
        let buffer = SampleBuffer::new(2, 10, 48000.0);
        let file = NamedTempFile::new().unwrap();
        // WavSpec::default() is mono, the buffer has two channels
        write_wav(file.path(), &buffer, WavSpec::default()).unwrap();

        let (_, spec) = read_wav(file.path()).unwrap();
        assert_eq!(spec.channels, 2);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_wav(dir.path().join("missing.wav"));
        assert!(matches!(result, Err(crate::Error::Wav(_))));
    }
}
