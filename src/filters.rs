//! Band-pass filtering applied before onset detection and segmentation.

/// Biquad filter coefficients for IIR filtering.
#[derive(Clone, Debug)]
pub struct BiquadCoeffs {
    /// Numerator coefficients [b0, b1, b2]
    pub b: [f32; 3],
    /// Denominator coefficients [a0, a1, a2] (a0 is normalized to 1.0)
    pub a: [f32; 3],
}

impl BiquadCoeffs {
    /// Design a bandpass biquad filter (constant 0 dB peak gain).
    ///
    /// # Arguments
    /// * `center_freq` - Center frequency in Hz
    /// * `bandwidth` - Bandwidth in Hz
    /// * `sample_rate` - Sample rate in Hz
    pub fn bandpass(center_freq: f32, bandwidth: f32, sample_rate: f32) -> Self {
        use std::f32::consts::PI;

        let omega0 = 2.0 * PI * center_freq / sample_rate;
        let cos_omega0 = omega0.cos();
        let sin_omega0 = omega0.sin();

        let q = center_freq / bandwidth.max(1.0);
        let alpha = sin_omega0 / (2.0 * q);

        let b0 = alpha;
        let b1 = 0.0;
        let b2 = -alpha;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega0;
        let a2 = 1.0 - alpha;

        BiquadCoeffs {
            b: [b0 / a0, b1 / a0, b2 / a0],
            a: [1.0, a1 / a0, a2 / a0],
        }
    }

    /// Apply the biquad filter to a signal (direct form II transposed).
    pub fn filter(&self, input: &[f32]) -> Vec<f32> {
        let mut output = vec![0.0f32; input.len()];
        let mut z1 = 0.0f32;
        let mut z2 = 0.0f32;

        for (i, &x) in input.iter().enumerate() {
            let y = self.b[0] * x + z1;
            z1 = self.b[1] * x - self.a[1] * y + z2;
            z2 = self.b[2] * x - self.a[2] * y;
            output[i] = y;
        }

        output
    }

    /// Apply zero-phase filtering (forward-backward filtering).
    ///
    /// Filters forward then backward: zero phase distortion, doubled
    /// filter order. The output has the same length as the input.
    pub fn filtfilt(&self, input: &[f32]) -> Vec<f32> {
        if input.is_empty() {
            return Vec::new();
        }

        // Reflect-pad to reduce edge effects
        let pad_len = 3 * 3.max(input.len() / 10).min(100);
        let mut padded = Vec::with_capacity(input.len() + 2 * pad_len);

        for i in (1..=pad_len).rev() {
            let idx = i.min(input.len() - 1);
            padded.push(2.0 * input[0] - input[idx]);
        }
        padded.extend_from_slice(input);
        for i in 1..=pad_len {
            let idx = (input.len() - 1).saturating_sub(i);
            padded.push(2.0 * input[input.len() - 1] - input[idx]);
        }

        let forward = self.filter(&padded);
        let reversed: Vec<f32> = forward.into_iter().rev().collect();
        let backward = self.filter(&reversed);

        backward
            .into_iter()
            .rev()
            .skip(pad_len)
            .take(input.len())
            .collect()
    }
}

/// Band-pass filter a signal between `lowcut` and `highcut`.
///
/// Zero-phase filtering: the output is the same length as the input and
/// onsets are not shifted in time.
///
/// # Arguments
/// * `signal` - Input audio signal
/// * `fs` - Sample rate in Hz
/// * `lowcut` - Lower passband edge in Hz
/// * `highcut` - Upper passband edge in Hz
///
/// # Example
/// ```
/// use skylark::filters::frequency_filter;
/// use skylark::io;
///
/// let signal = io::tone(2000.0, 16000, 0.25);
/// let filtered = frequency_filter(&signal, 16000, 500.0, 6000.0);
/// assert_eq!(filtered.len(), signal.len());
/// ```
pub fn frequency_filter(signal: &[f32], fs: u32, lowcut: f32, highcut: f32) -> Vec<f32> {
    if signal.is_empty() {
        return Vec::new();
    }
    let highcut = highcut.min(fs as f32 / 2.0 - 1.0).max(lowcut + 1.0);
    let center = (lowcut * highcut).sqrt();
    let bandwidth = highcut - lowcut;
    BiquadCoeffs::bandpass(center, bandwidth, fs as f32).filtfilt(signal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::basic::rms;
    use crate::io;

    #[test]
    fn test_bandpass_passes_center() {
        let fs = 16000;
        let in_band = io::tone(2000.0, fs, 0.5);
        let out = frequency_filter(&in_band, fs, 500.0, 6000.0);
        // Passband tone survives with most of its energy.
        assert!(rms(&out) > 0.5 * rms(&in_band));
    }

    #[test]
    fn test_bandpass_attenuates_out_of_band() {
        let fs = 16000;
        let low = io::tone(50.0, fs, 0.5);
        let out = frequency_filter(&low, fs, 500.0, 6000.0);
        assert!(rms(&out) < 0.2 * rms(&low));
    }

    #[test]
    fn test_filtfilt_preserves_length() {
        let signal = io::tone(440.0, 8000, 0.1);
        let coeffs = BiquadCoeffs::bandpass(440.0, 200.0, 8000.0);
        assert_eq!(coeffs.filtfilt(&signal).len(), signal.len());
    }

    #[test]
    fn test_frequency_filter_empty() {
        assert!(frequency_filter(&[], 16000, 500.0, 6000.0).is_empty());
    }
}
