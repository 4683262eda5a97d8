//! Mel-frequency cepstral coefficients, aggregated per chunk.

use crate::feature::FeatureProducer;
use crate::feature::mel::melspectrogram;
use ndarray::Array2;

/// Compute the Discrete Cosine Transform (DCT) Type-II with orthonormal
/// scaling.
///
/// # Example
/// ```
/// use skylark::feature::mfcc::dct_type_ii;
///
/// let signal = vec![1.0f32, 2.0, 3.0, 4.0];
/// let dct = dct_type_ii(&signal, 4);
/// assert_eq!(dct.len(), 4);
/// ```
pub fn dct_type_ii(x: &[f32], n_out: usize) -> Vec<f32> {
    let n = x.len() as f32;
    if n == 0.0 || n_out == 0 {
        return Vec::new();
    }
    let mut out = vec![0.0f32; n_out];
    for (k, out_val) in out.iter_mut().enumerate() {
        let mut sum = 0.0f32;
        for (i, v) in x.iter().enumerate() {
            let angle = std::f32::consts::PI / n * (i as f32 + 0.5) * k as f32;
            sum += v * angle.cos();
        }
        let scale = if k == 0 {
            (1.0 / n).sqrt()
        } else {
            (2.0 / n).sqrt()
        };
        *out_val = sum * scale;
    }
    out
}

fn power_to_db(x: f32) -> f32 {
    let amin = 1e-10f32;
    10.0 * x.max(amin).log10()
}

/// Compute MFCCs for a signal.
///
/// # Arguments
/// * `y` - Input audio signal (mono)
/// * `sr` - Sample rate in Hz
/// * `n_mfcc` - Number of coefficients to return
/// * `n_fft` - FFT window size
/// * `hop_length` - Number of samples between frames
/// * `n_mels` - Number of mel bands
///
/// # Returns
/// MFCC matrix of shape (n_mfcc, n_frames)
pub fn mfcc(
    y: &[f32],
    sr: u32,
    n_mfcc: usize,
    n_fft: usize,
    hop_length: usize,
    n_mels: usize,
) -> crate::Result<Array2<f32>> {
    let mel = melspectrogram(y, sr, n_fft, hop_length, n_mels)?;
    let n_frames = mel.shape()[1];
    let mut out = Array2::<f32>::zeros((n_mfcc, n_frames));

    for t in 0..n_frames {
        let mut log_mel = vec![0.0f32; n_mels];
        let mut max_db = f32::NEG_INFINITY;
        for m in 0..n_mels {
            let db = power_to_db(mel[(m, t)]);
            log_mel[m] = db;
            if db > max_db {
                max_db = db;
            }
        }
        // Dynamic-range floor at max - 80 dB
        let floor = max_db - 80.0;
        for v in &mut log_mel {
            if *v < floor {
                *v = floor;
            }
        }
        let coeffs = dct_type_ii(&log_mel, n_mfcc);
        for k in 0..n_mfcc {
            out[(k, t)] = coeffs[k];
        }
    }

    Ok(out)
}

/// MFCC feature producer: per-coefficient mean over a chunk's frames.
///
/// Keys are `mfcc_0 .. mfcc_{n-1}`.
#[derive(Debug, Clone)]
pub struct MfccMeans {
    pub n_fft: usize,
    pub hop_length: usize,
    pub n_mfcc: usize,
    pub n_mels: usize,
}

impl MfccMeans {
    pub fn new(n_fft: usize, hop_length: usize) -> Self {
        Self {
            n_fft,
            hop_length,
            n_mfcc: 13,
            n_mels: 40,
        }
    }
}

impl FeatureProducer for MfccMeans {
    fn names(&self) -> Vec<String> {
        (0..self.n_mfcc).map(|k| format!("mfcc_{k}")).collect()
    }

    fn produce(&self, chunk: &[f32], fs: u32) -> crate::Result<Vec<f32>> {
        let coeffs = mfcc(
            chunk,
            fs,
            self.n_mfcc,
            self.n_fft,
            self.hop_length,
            self.n_mels,
        )?;
        let n_frames = coeffs.shape()[1];
        if n_frames == 0 {
            return Err(crate::Error::InsufficientChunk {
                len: chunk.len(),
                needed: 1,
            });
        }
        let mut means = Vec::with_capacity(self.n_mfcc);
        for k in 0..self.n_mfcc {
            let sum: f32 = (0..n_frames).map(|t| coeffs[(k, t)]).sum();
            means.push(sum / n_frames as f32);
        }
        Ok(means)
    }
}
