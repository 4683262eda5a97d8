//! Short-time Fourier transform and spectrogram helpers.

use crate::fft::FftPlan;
use crate::window;
use ndarray::Array2;
use num_complex::Complex32;

/// STFT configuration.
#[derive(Debug, Clone)]
pub struct StftConfig {
    pub n_fft: usize,
    pub hop_length: usize,
    pub center: bool,
    pub window: Vec<f32>,
}

impl StftConfig {
    /// Configuration with a Hann window of `n_fft` samples.
    pub fn new(n_fft: usize, hop_length: usize) -> Self {
        Self {
            n_fft,
            hop_length,
            center: true,
            window: window::hann(n_fft),
        }
    }
}

impl Default for StftConfig {
    fn default() -> Self {
        Self::new(2048, 512)
    }
}

fn pad_center(y: &[f32], n_fft: usize, center: bool) -> Vec<f32> {
    if !center {
        return y.to_vec();
    }
    let pad = n_fft / 2;
    let mut out = vec![0.0f32; y.len() + 2 * pad];
    out[pad..pad + y.len()].copy_from_slice(y);
    out
}

/// Compute the Short-Time Fourier Transform (STFT).
///
/// # Arguments
/// * `y` - Input audio signal
/// * `config` - STFT configuration (FFT size, hop length, window)
///
/// # Returns
/// Complex STFT matrix of shape (n_freq, n_frames) where n_freq = n_fft/2 + 1
///
/// # Errors
/// Returns an error if the audio is empty/non-finite or a size is zero.
pub fn stft(y: &[f32], config: &StftConfig) -> crate::Result<Array2<Complex32>> {
    if y.is_empty() {
        return Err(crate::Error::EmptyAudio);
    }
    if y.iter().any(|v| !v.is_finite()) {
        return Err(crate::Error::NonFiniteAudio);
    }
    if config.n_fft == 0 {
        return Err(crate::Error::InvalidSize {
            name: "n_fft",
            value: 0,
            reason: "must be > 0",
        });
    }
    if config.hop_length == 0 {
        return Err(crate::Error::InvalidSize {
            name: "hop_length",
            value: 0,
            reason: "must be > 0",
        });
    }

    let padded = pad_center(y, config.n_fft, config.center);
    let n_frames = if padded.len() < config.n_fft {
        0
    } else {
        (padded.len() - config.n_fft) / config.hop_length + 1
    };

    let n_freq = config.n_fft / 2 + 1;
    let fft = FftPlan::new(config.n_fft);
    let mut stft_matrix = Array2::<Complex32>::zeros((n_freq, n_frames));

    let mut buffer = vec![Complex32::new(0.0, 0.0); config.n_fft];
    for frame in 0..n_frames {
        let start = frame * config.hop_length;
        for i in 0..config.n_fft {
            let sample = padded.get(start + i).copied().unwrap_or(0.0);
            let w = config.window.get(i).copied().unwrap_or(0.0);
            buffer[i] = Complex32::new(sample * w, 0.0);
        }
        fft.forward(&mut buffer);
        for f in 0..n_freq {
            stft_matrix[(f, frame)] = buffer[f];
        }
    }

    Ok(stft_matrix)
}

/// Magnitude spectrogram from a complex STFT matrix.
pub fn magnitude(stft_matrix: &Array2<Complex32>) -> Array2<f32> {
    stft_matrix.mapv(|v| (v.re * v.re + v.im * v.im).sqrt())
}

/// Frequency value of each rFFT bin for a given FFT size and sample rate.
pub fn fft_frequencies(sr: u32, n_fft: usize) -> Vec<f32> {
    let n_freq = n_fft / 2 + 1;
    (0..n_freq)
        .map(|k| k as f32 * sr as f32 / n_fft as f32)
        .collect()
}
