//! Extraction pipeline configuration.

use crate::onset::OnsetMethod;

/// Options for one extraction run.
///
/// All fields are validated up front by [`ExtractionConfig::validate`];
/// nothing touches the signal before validation passes.
///
/// # Example
/// ```
/// use skylark::config::ExtractionConfig;
/// use skylark::onset::OnsetMethod;
///
/// let config = ExtractionConfig::default()
///     .with_block_size(1024)
///     .with_sample_len(0.5)
///     .with_onset_method(OnsetMethod::Hfc);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.step_size(), 512);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Lower band-pass edge in Hz.
    pub lowcut: f32,
    /// Upper band-pass edge in Hz.
    pub highcut: f32,
    /// Analysis window length in samples.
    pub block_size: usize,
    /// Hop between analysis frames; `None` defaults to `block_size / 2`.
    pub step_size: Option<usize>,
    /// Onset strength function.
    pub onset_method: OnsetMethod,
    /// Peak-picking threshold on the normalized onset envelope.
    pub onset_threshold: f32,
    /// Frames quieter than this (dBFS) produce no onsets.
    pub onset_silence_threshold: f32,
    /// Minimum spacing between onsets in seconds.
    pub min_duration_s: f32,
    /// Chunk duration anchored at each onset, in seconds.
    pub sample_len: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            lowcut: 500.0,
            highcut: 6000.0,
            block_size: 512,
            step_size: None,
            onset_method: OnsetMethod::Hfc,
            onset_threshold: 0.1,
            onset_silence_threshold: -70.0,
            min_duration_s: 0.1,
            sample_len: 1.0,
        }
    }
}

impl ExtractionConfig {
    pub fn with_lowcut(mut self, lowcut: f32) -> Self {
        self.lowcut = lowcut;
        self
    }

    pub fn with_highcut(mut self, highcut: f32) -> Self {
        self.highcut = highcut;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_step_size(mut self, step_size: usize) -> Self {
        self.step_size = Some(step_size);
        self
    }

    pub fn with_onset_method(mut self, method: OnsetMethod) -> Self {
        self.onset_method = method;
        self
    }

    pub fn with_onset_threshold(mut self, threshold: f32) -> Self {
        self.onset_threshold = threshold;
        self
    }

    pub fn with_onset_silence_threshold(mut self, db: f32) -> Self {
        self.onset_silence_threshold = db;
        self
    }

    pub fn with_min_duration_s(mut self, seconds: f32) -> Self {
        self.min_duration_s = seconds;
        self
    }

    pub fn with_sample_len(mut self, seconds: f32) -> Self {
        self.sample_len = seconds;
        self
    }

    /// Effective hop between analysis frames.
    pub fn step_size(&self) -> usize {
        self.step_size.unwrap_or(self.block_size / 2)
    }

    /// Validate every option before any signal processing starts.
    pub fn validate(&self) -> crate::Result<()> {
        if self.block_size == 0 {
            return Err(crate::Error::InvalidSize {
                name: "block_size",
                value: 0,
                reason: "must be > 0",
            });
        }
        if self.step_size() == 0 {
            return Err(crate::Error::InvalidSize {
                name: "step_size",
                value: 0,
                reason: "must be > 0",
            });
        }
        if self.step_size() > self.block_size {
            return Err(crate::Error::InvalidSize {
                name: "step_size",
                value: self.step_size(),
                reason: "must not exceed block_size",
            });
        }
        if !self.lowcut.is_finite() || self.lowcut <= 0.0 {
            return Err(crate::Error::InvalidParameter {
                name: "lowcut",
                value: self.lowcut.to_string(),
                reason: "must be a positive frequency".to_string(),
            });
        }
        if !self.highcut.is_finite() || self.highcut <= self.lowcut {
            return Err(crate::Error::InvalidParameter {
                name: "highcut",
                value: self.highcut.to_string(),
                reason: "must exceed lowcut".to_string(),
            });
        }
        if !self.sample_len.is_finite() || self.sample_len <= 0.0 {
            return Err(crate::Error::InvalidParameter {
                name: "sample_len",
                value: self.sample_len.to_string(),
                reason: "must be a positive duration".to_string(),
            });
        }
        if !self.min_duration_s.is_finite() || self.min_duration_s < 0.0 {
            return Err(crate::Error::InvalidParameter {
                name: "min_duration_s",
                value: self.min_duration_s.to_string(),
                reason: "must be non-negative".to_string(),
            });
        }
        if !self.onset_threshold.is_finite() {
            return Err(crate::Error::InvalidParameter {
                name: "onset_threshold",
                value: self.onset_threshold.to_string(),
                reason: "must be finite".to_string(),
            });
        }
        if !self.onset_silence_threshold.is_finite() {
            return Err(crate::Error::InvalidParameter {
                name: "onset_silence_threshold",
                value: self.onset_silence_threshold.to_string(),
                reason: "must be finite".to_string(),
            });
        }
        Ok(())
    }
}
