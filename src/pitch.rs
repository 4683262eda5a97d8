//! Monophonic pitch estimation and per-chunk pitch statistics.
//!
//! The estimator is YIN: cumulative mean normalized difference function
//! (CMNDF) with threshold-based trough picking and parabolic interpolation.
//! Each estimate carries a confidence score in [0, 1]: one minus the
//! deepest CMNDF minimum, whichever period the trough rule selects.

use crate::frame::hop_frames;
use crate::stats::{median, quantile_sorted};

/// A single frame-level pitch estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchEstimate {
    /// Estimated fundamental frequency in Hz (0.0 when nothing was found).
    pub pitch_hz: f32,
    /// Estimator confidence in [0, 1].
    pub confidence: f32,
}

/// Streaming pitch tracker over hop-sized input blocks.
///
/// Mirrors the behaviour of buffered frame-based estimators: the analysis
/// window is `block_size` samples long, each call shifts `hop` new samples
/// into it, and the estimate is computed over the whole window. The buffer
/// starts zero-filled, so the first few estimates carry low confidence.
#[derive(Debug, Clone)]
pub struct PitchTracker {
    buffer: Vec<f32>,
    hop: usize,
    fs: u32,
    tolerance: f32,
}

impl PitchTracker {
    /// Create a tracker with a `block_size`-sample analysis window.
    ///
    /// # Errors
    /// Returns `InvalidSize` if `block_size` or `hop` is zero, or if
    /// `hop > block_size`.
    pub fn new(block_size: usize, hop: usize, fs: u32, tolerance: f32) -> crate::Result<Self> {
        if block_size == 0 {
            return Err(crate::Error::InvalidSize {
                name: "block_size",
                value: 0,
                reason: "must be > 0",
            });
        }
        if hop == 0 {
            return Err(crate::Error::InvalidSize {
                name: "hop",
                value: 0,
                reason: "must be > 0",
            });
        }
        if hop > block_size {
            return Err(crate::Error::InvalidSize {
                name: "hop",
                value: hop,
                reason: "must not exceed block_size",
            });
        }
        Ok(Self {
            buffer: vec![0.0; block_size],
            hop,
            fs,
            tolerance,
        })
    }

    /// Push one hop-sized block and estimate pitch over the updated window.
    pub fn process(&mut self, block: &[f32]) -> PitchEstimate {
        let n = self.buffer.len();
        let take = block.len().min(self.hop).min(n);
        self.buffer.copy_within(take.., 0);
        self.buffer[n - take..].copy_from_slice(&block[..take]);
        yin_frame(&self.buffer, self.fs, self.tolerance)
    }
}

/// Run YIN over a single analysis window.
///
/// # Arguments
/// * `frame` - Analysis window
/// * `fs` - Sample rate in Hz
/// * `tolerance` - CMNDF threshold for trough picking
///
/// # Returns
/// `(pitch_hz, confidence)`; pitch is 0.0 with confidence 0.0 when the
/// window is too short to search any period.
pub fn yin_frame(frame: &[f32], fs: u32, tolerance: f32) -> PitchEstimate {
    let frame_len = frame.len();
    let tau_max = frame_len / 2;
    let tau_min = 2usize;

    if tau_max <= tau_min {
        return PitchEstimate {
            pitch_hz: 0.0,
            confidence: 0.0,
        };
    }

    // Difference function
    let mut diff = vec![0.0f32; tau_max];
    for (tau, d) in diff.iter_mut().enumerate() {
        let mut sum = 0.0f32;
        for j in 0..(frame_len - tau) {
            let delta = frame[j] - frame[j + tau];
            sum += delta * delta;
        }
        *d = sum;
    }

    // Cumulative mean normalized difference function
    let mut cmndf = vec![1.0f32; tau_max];
    let mut running_sum = 0.0f32;
    for tau in 1..tau_max {
        running_sum += diff[tau];
        if running_sum > 0.0 {
            cmndf[tau] = diff[tau] * tau as f32 / running_sum;
        }
    }

    // Global minimum: fallback period, and the confidence source even
    // when an earlier trough is selected for the period.
    let mut tau_global = tau_min;
    let mut min_cmndf = cmndf[tau_min];
    for tau in (tau_min + 1)..tau_max {
        if cmndf[tau] < min_cmndf {
            min_cmndf = cmndf[tau];
            tau_global = tau;
        }
    }

    // First trough below the tolerance, descended to its local minimum.
    let mut tau_best = tau_global;
    for tau in tau_min..tau_max {
        if cmndf[tau] < tolerance {
            let mut t = tau;
            while t + 1 < tau_max && cmndf[t + 1] < cmndf[t] {
                t += 1;
            }
            tau_best = t;
            break;
        }
    }

    let confidence = (1.0 - min_cmndf).clamp(0.0, 1.0);

    // Parabolic interpolation for sub-sample period accuracy
    let mut tau_refined = tau_best as f32;
    if tau_best > 0 && tau_best < tau_max - 1 {
        let s0 = cmndf[tau_best - 1];
        let s1 = cmndf[tau_best];
        let s2 = cmndf[tau_best + 1];
        let denom = s0 - 2.0 * s1 + s2;
        if denom.abs() > 1e-12 {
            let adjustment = 0.5 * (s0 - s2) / denom;
            if adjustment.abs() <= 1.0 {
                tau_refined += adjustment;
            }
        }
    }

    let pitch_hz = if tau_refined > 0.0 {
        fs as f32 / tau_refined
    } else {
        0.0
    };

    PitchEstimate {
        pitch_hz,
        confidence,
    }
}

/// Per-chunk pitch statistics.
///
/// `mean` duplicates the 50% quantile and `median` is computed
/// independently; both fields are kept in the output schema.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PitchStats {
    pub mean: f32,
    pub median: f32,
    pub q25: f32,
    pub q75: f32,
    pub iqr: f32,
}

impl PitchStats {
    /// Output keys, in schema order.
    pub const NAMES: [&'static str; 5] = [
        "pitch_mean",
        "pitch_median",
        "pitch_Q25",
        "pitch_Q75",
        "pitch_IQR",
    ];

    /// Values aligned with [`PitchStats::NAMES`].
    pub fn values(&self) -> [f32; 5] {
        [self.mean, self.median, self.q25, self.q75, self.iqr]
    }
}

/// Compute quartile statistics over confident pitch estimates in a chunk.
///
/// The chunk is split into consecutive `hop`-sized blocks (the trailing
/// block is dropped), each block is fed to a [`PitchTracker`] with a
/// `block_size` analysis window, and estimates with
/// `confidence > tolerance` are kept. With no confident estimates all
/// five statistics are exactly 0.0; silence is not an error.
///
/// # Arguments
/// * `chunk` - Audio segment (any length; short chunks yield the fallback)
/// * `fs` - Sample rate in Hz
/// * `block_size` - Analysis window length in samples
/// * `hop` - Step between estimates in samples
/// * `tolerance` - Shared YIN threshold and confidence gate
///
/// # Example
/// ```
/// use skylark::pitch::pitch_stats;
/// use skylark::io;
///
/// let signal = io::tone(440.0, 16000, 1.0);
/// let stats = pitch_stats(&signal, 16000, 512, 256, 0.5).unwrap();
/// assert!((stats.median - 440.0).abs() < 5.0);
/// ```
pub fn pitch_stats(
    chunk: &[f32],
    fs: u32,
    block_size: usize,
    hop: usize,
    tolerance: f32,
) -> crate::Result<PitchStats> {
    let mut tracker = PitchTracker::new(block_size, hop, fs, tolerance)?;

    let mut pitches = Vec::new();
    for block in hop_frames(chunk, hop) {
        let estimate = tracker.process(block);
        if estimate.confidence > tolerance {
            pitches.push(estimate.pitch_hz);
        }
    }

    if pitches.is_empty() {
        return Ok(PitchStats::default());
    }

    pitches.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let q25 = quantile_sorted(&pitches, 0.25);
    let q50 = quantile_sorted(&pitches, 0.5);
    let q75 = quantile_sorted(&pitches, 0.75);

    Ok(PitchStats {
        mean: q50,
        median: median(&pitches),
        q25,
        q75,
        iqr: q75 - q25,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io;

    #[test]
    fn test_yin_frame_pure_tone() {
        let signal = io::tone(440.0, 16000, 0.1);
        let estimate = yin_frame(&signal[..512], 16000, 0.5);
        assert!(estimate.confidence > 0.5);
        assert!(
            (estimate.pitch_hz - 440.0).abs() < 5.0,
            "detected {} Hz",
            estimate.pitch_hz
        );
    }

    #[test]
    fn test_confidence_from_deepest_minimum() {
        // 600 Hz with a weak 200 Hz component: the first trough below the
        // threshold sits at the 600 Hz period, but the deepest CMNDF
        // minimum is at the 200 Hz common period and sets the confidence.
        let fs = 16000u32;
        let frame: Vec<f32> = (0..1024)
            .map(|i| {
                let t = i as f32 / fs as f32;
                (2.0 * std::f32::consts::PI * 600.0 * t).sin()
                    + 0.35 * (2.0 * std::f32::consts::PI * 200.0 * t).sin()
            })
            .collect();

        let estimate = yin_frame(&frame, fs, 0.5);
        assert!(
            (estimate.pitch_hz - 600.0).abs() < 50.0,
            "detected {} Hz",
            estimate.pitch_hz
        );
        assert!(
            estimate.confidence > 0.95,
            "confidence {}",
            estimate.confidence
        );
    }

    #[test]
    fn test_yin_frame_silence() {
        let estimate = yin_frame(&vec![0.0f32; 512], 16000, 0.5);
        assert_eq!(estimate.confidence, 0.0);
    }

    #[test]
    fn test_yin_frame_too_short() {
        let estimate = yin_frame(&[0.1, 0.2], 16000, 0.5);
        assert_eq!(estimate.pitch_hz, 0.0);
        assert_eq!(estimate.confidence, 0.0);
    }

    #[test]
    fn test_pitch_stats_silent_fallback() {
        let stats = pitch_stats(&vec![0.0f32; 16000], 16000, 512, 256, 0.5).unwrap();
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.median, 0.0);
        assert_eq!(stats.q25, 0.0);
        assert_eq!(stats.q75, 0.0);
        assert_eq!(stats.iqr, 0.0);
    }

    #[test]
    fn test_pitch_stats_iqr_identity() {
        let signal = io::tone(330.0, 16000, 0.5);
        let stats = pitch_stats(&signal, 16000, 512, 256, 0.5).unwrap();
        assert!(stats.q75 >= stats.q25);
        assert_eq!(stats.iqr, stats.q75 - stats.q25);
    }

    #[test]
    fn test_pitch_stats_mean_is_q50() {
        let signal = io::tone(880.0, 16000, 0.5);
        let stats = pitch_stats(&signal, 16000, 512, 256, 0.5).unwrap();
        assert_eq!(stats.mean, stats.median);
    }

    #[test]
    fn test_pitch_stats_short_chunk_fallback() {
        // Shorter than one hop: zero frames, fallback stats.
        let stats = pitch_stats(&vec![0.3f32; 100], 16000, 512, 256, 0.5).unwrap();
        assert_eq!(stats.values(), [0.0; 5]);
    }

    #[test]
    fn test_tracker_invalid_sizes() {
        assert!(PitchTracker::new(0, 256, 16000, 0.5).is_err());
        assert!(PitchTracker::new(512, 0, 16000, 0.5).is_err());
        assert!(PitchTracker::new(256, 512, 16000, 0.5).is_err());
    }
}
