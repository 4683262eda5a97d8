//! Power-weighted spectral statistics over a chunk's periodogram.

use crate::feature::FeatureProducer;
use crate::fft::rfft;

/// Output keys for [`spectral_statistics`], in schema order.
pub const SPECTRAL_NAMES: [&str; 7] = [
    "freq_mean",
    "freq_sd",
    "freq_median",
    "freq_Q25",
    "freq_Q75",
    "freq_IQR",
    "freq_peak",
];

/// Compute power-weighted frequency statistics of a chunk.
///
/// A single rFFT over the whole chunk yields the periodogram; bins below
/// `lowcut` are dropped and the remaining power distribution over
/// frequency is summarized with weighted mean, standard deviation,
/// quartiles (linear interpolation over the cumulative distribution) and
/// the peak-bin frequency.
///
/// A chunk whose in-band power is zero yields all-zero statistics.
///
/// # Arguments
/// * `chunk` - Audio segment (at least 2 samples)
/// * `fs` - Sample rate in Hz
/// * `lowcut` - Bins below this frequency are excluded
///
/// # Returns
/// Values aligned with [`SPECTRAL_NAMES`].
pub fn spectral_statistics(chunk: &[f32], fs: u32, lowcut: f32) -> crate::Result<[f32; 7]> {
    if chunk.is_empty() {
        return Err(crate::Error::EmptyAudio);
    }
    if chunk.len() < 2 {
        return Err(crate::Error::InsufficientChunk {
            len: chunk.len(),
            needed: 2,
        });
    }

    let spectrum = rfft(chunk);
    let n = chunk.len();
    let freq_step = fs as f32 / n as f32;

    let mut freqs = Vec::with_capacity(spectrum.len());
    let mut power = Vec::with_capacity(spectrum.len());
    for (k, bin) in spectrum.iter().enumerate() {
        let f = k as f32 * freq_step;
        if f < lowcut {
            continue;
        }
        freqs.push(f);
        power.push(bin.re * bin.re + bin.im * bin.im);
    }

    let total: f32 = power.iter().sum();
    if freqs.is_empty() || total <= 1e-20 {
        return Ok([0.0; 7]);
    }

    let mean = freqs
        .iter()
        .zip(&power)
        .map(|(f, p)| f * p)
        .sum::<f32>()
        / total;

    let variance = freqs
        .iter()
        .zip(&power)
        .map(|(f, p)| (f - mean) * (f - mean) * p)
        .sum::<f32>()
        / total;
    let sd = variance.max(0.0).sqrt();

    let q25 = weighted_quantile(&freqs, &power, total, 0.25);
    let median = weighted_quantile(&freqs, &power, total, 0.5);
    let q75 = weighted_quantile(&freqs, &power, total, 0.75);

    let peak_idx = power
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    Ok([mean, sd, median, q25, q75, q75 - q25, freqs[peak_idx]])
}

/// Quantile of a frequency distribution weighted by per-bin power.
fn weighted_quantile(freqs: &[f32], power: &[f32], total: f32, q: f32) -> f32 {
    let target = q * total;
    let mut cumsum = 0.0f32;
    for (i, &p) in power.iter().enumerate() {
        let next = cumsum + p;
        if next >= target {
            // Interpolate within the bin crossing the target mass
            if i == 0 || p <= 0.0 {
                return freqs[i];
            }
            let frac = (target - cumsum) / p;
            return freqs[i - 1] + (freqs[i] - freqs[i - 1]) * frac;
        }
        cumsum = next;
    }
    freqs[freqs.len() - 1]
}

/// Spectral statistics producer with a fixed low cut.
#[derive(Debug, Clone)]
pub struct SpectralStatistics {
    pub lowcut: f32,
}

impl FeatureProducer for SpectralStatistics {
    fn names(&self) -> Vec<String> {
        SPECTRAL_NAMES.iter().map(|s| s.to_string()).collect()
    }

    fn produce(&self, chunk: &[f32], fs: u32) -> crate::Result<Vec<f32>> {
        Ok(spectral_statistics(chunk, fs, self.lowcut)?.to_vec())
    }
}
