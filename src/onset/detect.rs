use crate::feature::basic::rms;
use crate::onset::strength::onset_strength;
use std::str::FromStr;

/// Onset strength function selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnsetMethod {
    /// Total spectral power per frame.
    Energy,
    /// High-frequency content.
    Hfc,
    /// Half-wave rectified spectral flux.
    SpecFlux,
}

impl FromStr for OnsetMethod {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "energy" => Ok(OnsetMethod::Energy),
            "hfc" => Ok(OnsetMethod::Hfc),
            "specflux" | "spectral_flux" => Ok(OnsetMethod::SpecFlux),
            other => Err(crate::Error::InvalidParameter {
                name: "onset_method",
                value: other.to_string(),
                reason: "expected one of: energy, hfc, specflux".to_string(),
            }),
        }
    }
}

/// Detector producing ascending onset times from a signal.
///
/// # Example
/// ```
/// use skylark::onset::{OnsetDetector, OnsetMethod};
/// use skylark::io;
///
/// let fs = 16000;
/// let mut signal = vec![0.0f32; fs as usize];
/// signal.extend(io::tone(1000.0, fs, 0.5));
///
/// let detector = OnsetDetector::new(fs, 512, 256, OnsetMethod::SpecFlux, 0.3, -70.0, 0.02);
/// let onsets = detector.get_all(&signal).unwrap();
/// assert!(!onsets.is_empty());
/// assert!((onsets[0] - 1.0).abs() < 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct OnsetDetector {
    fs: u32,
    n_fft: usize,
    hop: usize,
    method: OnsetMethod,
    threshold: f32,
    silence_threshold_db: f32,
    min_duration_s: f32,
}

impl OnsetDetector {
    /// Create a detector.
    ///
    /// # Arguments
    /// * `fs` - Sample rate in Hz
    /// * `n_fft` - FFT window size for the strength envelope
    /// * `hop` - Hop between envelope frames
    /// * `method` - Strength function
    /// * `threshold` - Peak-picking threshold on the max-normalized envelope
    /// * `silence_threshold_db` - Frames quieter than this (dBFS) are ignored
    /// * `min_duration_s` - Minimum spacing between reported onsets
    pub fn new(
        fs: u32,
        n_fft: usize,
        hop: usize,
        method: OnsetMethod,
        threshold: f32,
        silence_threshold_db: f32,
        min_duration_s: f32,
    ) -> Self {
        Self {
            fs,
            n_fft,
            hop,
            method,
            threshold,
            silence_threshold_db,
            min_duration_s,
        }
    }

    /// Detect all onsets in a signal.
    ///
    /// # Returns
    /// Ascending onset times in seconds; empty for silence or empty input.
    pub fn get_all(&self, signal: &[f32]) -> crate::Result<Vec<f32>> {
        let mut env = onset_strength(signal, self.n_fft, self.hop, self.method)?;
        if env.is_empty() {
            return Ok(Vec::new());
        }

        let max = env.iter().cloned().fold(0.0f32, f32::max);
        if max > 0.0 {
            for v in env.iter_mut() {
                *v /= max;
            }
        }

        let mut onsets = Vec::new();
        let mut last_kept = f32::NEG_INFINITY;

        for i in 1..env.len().saturating_sub(1) {
            let v = env[i];
            if v <= self.threshold || v < env[i - 1] || v <= env[i + 1] {
                continue;
            }
            if self.frame_db(signal, i) <= self.silence_threshold_db {
                continue;
            }
            let t = (i * self.hop) as f32 / self.fs as f32;
            if t - last_kept < self.min_duration_s {
                continue;
            }
            last_kept = t;
            onsets.push(t);
        }

        log::debug!("detected {} onsets via {:?}", onsets.len(), self.method);
        Ok(onsets)
    }

    /// Level in dBFS of the signal around an envelope frame.
    fn frame_db(&self, signal: &[f32], frame: usize) -> f32 {
        let start = frame * self.hop;
        let end = (start + self.n_fft).min(signal.len());
        if start >= end {
            return f32::NEG_INFINITY;
        }
        let level = rms(&signal[start..end]);
        20.0 * (level + 1e-10).log10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io;

    fn burst_signal(fs: u32, starts: &[f32], burst_len: f32) -> Vec<f32> {
        let total = starts.iter().cloned().fold(0.0f32, f32::max) + burst_len + 0.5;
        let mut signal = vec![0.0f32; (total * fs as f32) as usize];
        let burst = io::tone(1200.0, fs, burst_len);
        for &start in starts {
            let offset = (start * fs as f32) as usize;
            for (i, &s) in burst.iter().enumerate() {
                if offset + i < signal.len() {
                    signal[offset + i] += s;
                }
            }
        }
        signal
    }

    #[test]
    fn test_detects_two_bursts() {
        let fs = 16000;
        let signal = burst_signal(fs, &[0.5, 2.0], 0.3);
        let detector =
            OnsetDetector::new(fs, 512, 256, OnsetMethod::SpecFlux, 0.3, -70.0, 0.1);
        let onsets = detector.get_all(&signal).unwrap();

        assert!(onsets.len() >= 2, "got {onsets:?}");
        assert!((onsets[0] - 0.5).abs() < 0.1);
        assert!(onsets.iter().any(|&t| (t - 2.0).abs() < 0.1));
    }

    #[test]
    fn test_onsets_ascending() {
        let fs = 16000;
        let signal = burst_signal(fs, &[0.3, 1.0, 1.7], 0.2);
        let detector = OnsetDetector::new(fs, 512, 256, OnsetMethod::Hfc, 0.2, -70.0, 0.05);
        let onsets = detector.get_all(&signal).unwrap();
        for pair in onsets.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_silence_yields_no_onsets() {
        let detector =
            OnsetDetector::new(16000, 512, 256, OnsetMethod::SpecFlux, 0.3, -70.0, 0.1);
        let onsets = detector.get_all(&vec![0.0f32; 16000]).unwrap();
        assert!(onsets.is_empty());
    }

    #[test]
    fn test_min_duration_merges_close_onsets() {
        let fs = 16000;
        let signal = burst_signal(fs, &[1.0, 1.05], 0.03);
        let detector =
            OnsetDetector::new(fs, 512, 256, OnsetMethod::SpecFlux, 0.2, -70.0, 0.5);
        let onsets = detector.get_all(&signal).unwrap();
        assert!(onsets.len() <= 1, "got {onsets:?}");
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("hfc".parse::<OnsetMethod>().unwrap(), OnsetMethod::Hfc);
        assert_eq!(
            "SpecFlux".parse::<OnsetMethod>().unwrap(),
            OnsetMethod::SpecFlux
        );
        assert!("wavelet".parse::<OnsetMethod>().is_err());
    }
}
