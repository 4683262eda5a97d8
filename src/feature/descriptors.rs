//! Generic per-chunk descriptors, mean-aggregated over analysis frames.

use crate::feature::FeatureProducer;
use crate::feature::basic::{rms, spectral_flatness, spectral_rolloff, zero_crossing_rate};
use crate::frame::frame_signal;
use crate::spectrum::{StftConfig, fft_frequencies, magnitude, stft};
use crate::stats::mean;

/// Output keys for [`Descriptors`], in schema order.
pub const DESCRIPTOR_NAMES: [&str; 4] = ["zcr_mean", "rms_mean", "flatness_mean", "rolloff_mean"];

/// General-purpose descriptor producer.
///
/// Time-domain descriptors (zero-crossing rate, RMS) are averaged over
/// `(block_size, step_size)` frames of the chunk; frequency-domain
/// descriptors (flatness, 85% rolloff) over the frames of one STFT pass.
#[derive(Debug, Clone)]
pub struct Descriptors {
    pub block_size: usize,
    pub step_size: usize,
}

impl FeatureProducer for Descriptors {
    fn names(&self) -> Vec<String> {
        DESCRIPTOR_NAMES.iter().map(|s| s.to_string()).collect()
    }

    fn produce(&self, chunk: &[f32], fs: u32) -> crate::Result<Vec<f32>> {
        if chunk.is_empty() {
            return Err(crate::Error::EmptyAudio);
        }

        let frames = frame_signal(chunk, self.block_size, self.step_size, true)?;
        let zcr_vals: Vec<f32> = frames.iter().map(|f| zero_crossing_rate(f)).collect();
        let rms_vals: Vec<f32> = frames.iter().map(|f| rms(f)).collect();

        let cfg = StftConfig::new(self.block_size, self.step_size);
        let mag = magnitude(&stft(chunk, &cfg)?);
        let freqs = fft_frequencies(fs, self.block_size);

        let flatness = spectral_flatness(&mag);
        let rolloff = spectral_rolloff(&mag, &freqs, 0.85)?;

        Ok(vec![
            mean(&zcr_vals),
            mean(&rms_vals),
            mean(&flatness),
            mean(&rolloff),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io;

    #[test]
    fn test_schema_matches_values() {
        let producer = Descriptors {
            block_size: 512,
            step_size: 256,
        };
        let signal = io::tone(440.0, 16000, 0.5);
        let values = producer.produce(&signal, 16000).unwrap();
        assert_eq!(values.len(), producer.names().len());
    }

    #[test]
    fn test_rms_mean_tracks_amplitude() {
        let producer = Descriptors {
            block_size: 512,
            step_size: 256,
        };
        let loud = io::tone(440.0, 16000, 0.5);
        let quiet: Vec<f32> = loud.iter().map(|s| s * 0.1).collect();

        let loud_vals = producer.produce(&loud, 16000).unwrap();
        let quiet_vals = producer.produce(&quiet, 16000).unwrap();
        assert!(loud_vals[1] > quiet_vals[1]);
    }

    #[test]
    fn test_empty_chunk_errors() {
        let producer = Descriptors {
            block_size: 512,
            step_size: 256,
        };
        assert!(producer.produce(&[], 16000).is_err());
    }
}
