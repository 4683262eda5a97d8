//! Feature producers: each one maps a chunk to a fixed set of named
//! floating-point values.
//!
//! Producers expose their key schema independently of any data, so the
//! output table can carry the full column set even for zero detected
//! events.

pub mod basic;
pub mod descriptors;
pub mod mel;
pub mod mfcc;
pub mod spectral;

pub use descriptors::Descriptors;
pub use mfcc::MfccMeans;
pub use spectral::SpectralStatistics;

/// A capability that turns an audio chunk into named numeric features.
///
/// `produce` must return exactly `names().len()` values, aligned with the
/// names. Implementations must tolerate variable-length chunks (segments
/// near the signal end are truncated) and must be `Send + Sync` so a
/// fresh extractor can run on any worker thread.
pub trait FeatureProducer: Send + Sync {
    /// Fixed key schema of this producer, in output order.
    fn names(&self) -> Vec<String>;

    /// Compute feature values for one chunk.
    fn produce(&self, chunk: &[f32], fs: u32) -> crate::Result<Vec<f32>>;
}

/// Pitch statistics producer (quartile summary of confident YIN frames).
#[derive(Debug, Clone)]
pub struct PitchStatistics {
    pub block_size: usize,
    pub hop: usize,
    pub tolerance: f32,
}

impl PitchStatistics {
    pub fn new(block_size: usize, hop: usize) -> Self {
        Self {
            block_size,
            hop,
            tolerance: 0.5,
        }
    }
}

impl FeatureProducer for PitchStatistics {
    fn names(&self) -> Vec<String> {
        crate::pitch::PitchStats::NAMES
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn produce(&self, chunk: &[f32], fs: u32) -> crate::Result<Vec<f32>> {
        let stats = crate::pitch::pitch_stats(chunk, fs, self.block_size, self.hop, self.tolerance)?;
        Ok(stats.values().to_vec())
    }
}
