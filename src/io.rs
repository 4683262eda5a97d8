//! WAV input/output and test-signal generation.

use std::path::Path;

/// Generate a pure sine tone.
///
/// # Arguments
/// * `frequency` - Tone frequency in Hz
/// * `sr` - Sample rate in Hz
/// * `duration` - Length in seconds
///
/// # Example
/// ```
/// use skylark::io::tone;
///
/// let signal = tone(440.0, 16000, 1.0);
/// assert_eq!(signal.len(), 16000);
/// ```
pub fn tone(frequency: f32, sr: u32, duration: f32) -> Vec<f32> {
    let n_samples = (sr as f32 * duration).round() as usize;
    (0..n_samples)
        .map(|i| (2.0 * std::f32::consts::PI * frequency * i as f32 / sr as f32).sin())
        .collect()
}

/// Load a WAV file as a mono f32 signal in [-1, 1].
///
/// Multi-channel files are mixed down by averaging the channels.
///
/// # Returns
/// `(samples, sample_rate)`
pub fn load_wav<P: AsRef<Path>>(path: P) -> crate::Result<(Vec<f32>, u32)> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    if channels <= 1 {
        return Ok((interleaved, spec.sample_rate));
    }
    let mono = interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();
    Ok((mono, spec.sample_rate))
}

/// Write a mono f32 signal to a 16-bit PCM WAV file.
///
/// Samples are clamped to [-1, 1] before quantization.
pub fn save_wav<P: AsRef<Path>>(path: P, signal: &[f32], sr: u32) -> crate::Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: sr,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &s in signal {
        let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(v)?;
    }
    writer.finalize()?;
    Ok(())
}
