use crate::onset::detect::OnsetMethod;
use crate::spectrum::{StftConfig, stft};

/// Compute a per-frame onset strength envelope.
///
/// One STFT pass over the signal; the per-frame strength depends on the
/// method:
/// - `Energy`: total spectral power
/// - `Hfc`: high-frequency content (magnitude weighted by bin index)
/// - `SpecFlux`: half-wave rectified magnitude increase between frames
///
/// # Arguments
/// * `y` - Input audio signal
/// * `n_fft` - FFT window size
/// * `hop_length` - Hop between frames
/// * `method` - Strength function
///
/// # Returns
/// Envelope with one value per STFT frame; empty for empty input.
pub fn onset_strength(
    y: &[f32],
    n_fft: usize,
    hop_length: usize,
    method: OnsetMethod,
) -> crate::Result<Vec<f32>> {
    if y.is_empty() || n_fft == 0 {
        return Ok(Vec::new());
    }
    let cfg = StftConfig::new(n_fft, hop_length.max(1));
    let stft_matrix = stft(y, &cfg)?;
    let n_freq = stft_matrix.shape()[0];
    let n_frames = stft_matrix.shape()[1];
    if n_freq == 0 || n_frames == 0 {
        return Ok(Vec::new());
    }

    let mut env = vec![0.0f32; n_frames];
    let mut prev_mag = vec![0.0f32; n_freq];

    for t in 0..n_frames {
        let mut sum = 0.0f32;
        for f in 0..n_freq {
            let v = stft_matrix[(f, t)];
            let mag = (v.re * v.re + v.im * v.im).sqrt();
            match method {
                OnsetMethod::Energy => sum += mag * mag,
                OnsetMethod::Hfc => sum += f as f32 * mag,
                OnsetMethod::SpecFlux => {
                    sum += (mag - prev_mag[f]).max(0.0);
                    prev_mag[f] = mag;
                }
            }
        }
        env[t] = sum;
    }

    Ok(env)
}
