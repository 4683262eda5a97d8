//! Frame-level signal descriptors.

use ndarray::Array2;

/// Compute the zero-crossing rate of an audio signal.
///
/// # Returns
/// The fraction of sample intervals containing a sign change (0.0 to 1.0).
///
/// # Example
/// ```
/// use skylark::feature::basic::zero_crossing_rate;
///
/// let signal = vec![1.0, -1.0, 1.0, -1.0];
/// assert_eq!(zero_crossing_rate(&signal), 1.0);
/// ```
pub fn zero_crossing_rate(y: &[f32]) -> f32 {
    if y.len() < 2 {
        return 0.0;
    }
    let mut count = 0usize;
    for i in 1..y.len() {
        let prev = y[i - 1];
        let curr = y[i];
        if (prev >= 0.0 && curr < 0.0) || (prev < 0.0 && curr >= 0.0) {
            count += 1;
        }
    }
    count as f32 / (y.len() - 1) as f32
}

/// Compute the root mean square (RMS) energy of a signal.
///
/// # Example
/// ```
/// use skylark::feature::basic::rms;
///
/// let signal = vec![1.0, 1.0, 1.0, 1.0];
/// assert_eq!(rms(&signal), 1.0);
/// ```
pub fn rms(y: &[f32]) -> f32 {
    if y.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0f32;
    for v in y {
        sum += v * v;
    }
    (sum / y.len() as f32).sqrt()
}

/// Compute spectral flatness per frame (geometric / arithmetic mean of power).
///
/// `spec`: magnitude spectrogram (freq_bins x time_frames). Values near 1
/// indicate noise-like frames, near 0 tone-like frames.
pub fn spectral_flatness(spec: &Array2<f32>) -> Vec<f32> {
    let (n_freq, n_frames) = (spec.shape()[0], spec.shape()[1]);
    if n_freq == 0 {
        return Vec::new();
    }

    let amin = 1e-10f32;
    let mut out = Vec::with_capacity(n_frames);
    for t in 0..n_frames {
        let mut log_sum = 0.0f32;
        let mut lin_sum = 0.0f32;
        for f in 0..n_freq {
            let power = (spec[(f, t)] * spec[(f, t)]).max(amin);
            log_sum += power.ln();
            lin_sum += power;
        }
        let geo_mean = (log_sum / n_freq as f32).exp();
        let arith_mean = lin_sum / n_freq as f32;
        out.push(if arith_mean > 0.0 {
            geo_mean / arith_mean
        } else {
            0.0
        });
    }
    out
}

/// Compute spectral rolloff per frame: the frequency below which
/// `roll_percent` of the spectral energy is contained.
///
/// `spec`: magnitude spectrogram (freq_bins x time_frames);
/// `freq_bins`: frequency of each bin.
pub fn spectral_rolloff(
    spec: &Array2<f32>,
    freq_bins: &[f32],
    roll_percent: f32,
) -> crate::Result<Vec<f32>> {
    let (n_freq, n_frames) = (spec.shape()[0], spec.shape()[1]);
    if n_freq != freq_bins.len() {
        return Err(crate::Error::InvalidSize {
            name: "freq_bins",
            value: freq_bins.len(),
            reason: "must match spectrogram frequency bins",
        });
    }
    if n_freq == 0 {
        return Ok(Vec::new());
    }

    let mut rolloffs = Vec::with_capacity(n_frames);
    for t in 0..n_frames {
        let mut total = 0.0f32;
        for f in 0..n_freq {
            total += spec[(f, t)];
        }
        let threshold = total * roll_percent;
        let mut cumsum = 0.0f32;
        let mut rolloff_freq = freq_bins[n_freq - 1];
        for f in 0..n_freq {
            cumsum += spec[(f, t)];
            if cumsum >= threshold {
                rolloff_freq = freq_bins[f];
                break;
            }
        }
        rolloffs.push(if total > 1e-10 { rolloff_freq } else { 0.0 });
    }
    Ok(rolloffs)
}
