//! Mel-scale filterbank and spectrogram.

use crate::spectrum::{StftConfig, stft};
use ndarray::Array2;

/// Convert frequency in Hz to mel scale (Slaney formulation).
///
/// # Example
/// ```
/// use skylark::feature::mel::hz_to_mel;
///
/// let mel = hz_to_mel(440.0);
/// assert!(mel > 6.0 && mel < 7.0);
/// ```
pub fn hz_to_mel(hz: f32) -> f32 {
    let f_sp = 200.0 / 3.0;
    let min_log_hz = 1000.0;
    let min_log_mel = min_log_hz / f_sp;
    let logstep = (6.4f32).ln() / 27.0;
    if hz < min_log_hz {
        hz / f_sp
    } else {
        min_log_mel + (hz / min_log_hz).ln() / logstep
    }
}

/// Convert frequency from mel scale to Hz (inverse of [`hz_to_mel`]).
pub fn mel_to_hz(mel: f32) -> f32 {
    let f_sp = 200.0 / 3.0;
    let min_log_hz = 1000.0;
    let min_log_mel = min_log_hz / f_sp;
    let logstep = (6.4f32).ln() / 27.0;
    if mel < min_log_mel {
        mel * f_sp
    } else {
        min_log_hz * (logstep * (mel - min_log_mel)).exp()
    }
}

/// Generate `n_mels` frequencies evenly spaced on the mel scale.
pub fn mel_frequencies(n_mels: usize, fmin: f32, fmax: f32) -> Vec<f32> {
    if n_mels == 0 {
        return Vec::new();
    }
    let mel_min = hz_to_mel(fmin.max(0.0));
    let mel_max = hz_to_mel(fmax.max(fmin));
    let step = (mel_max - mel_min) / (n_mels as f32 - 1.0).max(1.0);
    (0..n_mels)
        .map(|i| mel_to_hz(mel_min + step * i as f32))
        .collect()
}

/// Create a mel filterbank matrix with Slaney area normalization.
///
/// # Returns
/// Filterbank of shape (n_mels, n_fft / 2 + 1).
///
/// # Example
/// ```
/// use skylark::feature::mel::mel_filterbank;
///
/// let fb = mel_filterbank(16000, 512, 40, 0.0, 8000.0);
/// assert_eq!(fb.shape(), &[40, 257]);
/// ```
pub fn mel_filterbank(sr: u32, n_fft: usize, n_mels: usize, fmin: f32, fmax: f32) -> Array2<f32> {
    let n_freq = n_fft / 2 + 1;
    let mut fb = Array2::<f32>::zeros((n_mels, n_freq));
    if n_mels == 0 || n_fft == 0 {
        return fb;
    }

    let fmax = fmax.min(sr as f32 / 2.0).max(fmin);
    let mel_points = mel_frequencies(n_mels + 2, fmin, fmax);

    let fft_freqs: Vec<f32> = (0..n_freq)
        .map(|i| i as f32 * sr as f32 / n_fft as f32)
        .collect();

    // Accumulate in f64: triangle edges are differences of close floats.
    for m in 0..n_mels {
        let f_m_minus = mel_points[m];
        let f_m = mel_points[m + 1];
        let f_m_plus = mel_points[m + 2];
        let denom_left = (f_m - f_m_minus).max(1e-8) as f64;
        let denom_right = (f_m_plus - f_m).max(1e-8) as f64;
        let enorm = 2.0 / (f_m_plus - f_m_minus).max(1e-8) as f64;

        for (k, &freq) in fft_freqs.iter().enumerate() {
            let lower = (freq - f_m_minus) as f64 / denom_left;
            let upper = (f_m_plus - freq) as f64 / denom_right;
            let w = lower.min(upper).max(0.0) * enorm;
            fb[(m, k)] = w as f32;
        }
    }

    fb
}

/// Compute a mel-scaled power spectrogram.
///
/// # Returns
/// Mel spectrogram of shape (n_mels, n_frames).
///
/// # Example
/// ```
/// use skylark::feature::mel::melspectrogram;
///
/// let signal = vec![0.1f32; 16000];
/// let mel = melspectrogram(&signal, 16000, 512, 256, 40).unwrap();
/// assert_eq!(mel.shape()[0], 40);
/// ```
pub fn melspectrogram(
    y: &[f32],
    sr: u32,
    n_fft: usize,
    hop_length: usize,
    n_mels: usize,
) -> crate::Result<Array2<f32>> {
    let cfg = StftConfig::new(n_fft, hop_length);
    let stft_matrix = stft(y, &cfg)?;
    let n_freq = stft_matrix.shape()[0];
    let n_frames = stft_matrix.shape()[1];

    let fb = mel_filterbank(sr, n_fft, n_mels, 0.0, sr as f32 / 2.0);
    let mut mel_spec = Array2::<f32>::zeros((n_mels, n_frames));

    for t in 0..n_frames {
        for f in 0..n_freq {
            let v = stft_matrix[(f, t)];
            let power = (v.re * v.re + v.im * v.im) as f64;
            for m in 0..n_mels {
                let w = fb[(m, f)] as f64;
                if w > 0.0 {
                    mel_spec[(m, t)] += (w * power) as f32;
                }
            }
        }
    }

    Ok(mel_spec)
}
