//! The end-to-end extraction pipeline: band-pass, onset detection,
//! chunking, per-chunk feature production and table assembly.

use crate::config::ExtractionConfig;
use crate::feature::{
    Descriptors, FeatureProducer, MfccMeans, PitchStatistics, SpectralStatistics,
};
use crate::filters::frequency_filter;
use crate::onset::OnsetDetector;
use crate::split::{chunks_by_onsets, into_groups};
use crate::table::{FeatureTable, assemble};

/// Low cut applied inside the spectral statistics, independent of the
/// band-pass configuration.
const SPECTRAL_LOWCUT: f32 = 500.0;

/// The fixed, ordered set of feature producers applied to every chunk.
///
/// The producer order defines the column order of the output table:
/// spectral statistics, then MFCC means, then pitch statistics, then the
/// generic descriptors.
pub struct FeatureExtractor {
    producers: Vec<Box<dyn FeatureProducer>>,
}

impl FeatureExtractor {
    /// Build the producer set for one configuration.
    pub fn new(config: &ExtractionConfig) -> Self {
        let block_size = config.block_size;
        let step_size = config.step_size();
        let producers: Vec<Box<dyn FeatureProducer>> = vec![
            Box::new(SpectralStatistics {
                lowcut: SPECTRAL_LOWCUT,
            }),
            Box::new(MfccMeans::new(block_size, step_size)),
            Box::new(PitchStatistics::new(block_size, step_size)),
            Box::new(Descriptors {
                block_size,
                step_size,
            }),
        ];
        Self { producers }
    }

    /// Full feature column schema, independent of any data.
    pub fn schema(&self) -> Vec<String> {
        self.producers.iter().flat_map(|p| p.names()).collect()
    }

    /// Compute the concatenated feature row for one chunk.
    pub fn get_features(&self, chunk: &[f32], fs: u32) -> crate::Result<Vec<f32>> {
        let mut row = Vec::new();
        for producer in &self.producers {
            row.extend(producer.produce(chunk, fs)?);
        }
        Ok(row)
    }
}

/// Compute feature rows for a batch of chunks with a fresh extractor.
///
/// Rows come back in chunk order; the first failing chunk aborts the
/// batch.
pub fn extract_batch(
    chunks: &[&[f32]],
    fs: u32,
    config: &ExtractionConfig,
) -> crate::Result<Vec<Vec<f32>>> {
    let extractor = FeatureExtractor::new(config);
    chunks
        .iter()
        .map(|chunk| extractor.get_features(chunk, fs))
        .collect()
}

/// Detect onsets in a signal and extract per-event features.
///
/// The signal is band-pass filtered with the configured `lowcut` and
/// `highcut` before onset detection; chunks are sliced from the filtered
/// signal. Row `i` of the result corresponds to detected onset `i`.
///
/// # Arguments
/// * `signal` - Mono input signal
/// * `fs` - Sample rate in Hz
/// * `config` - Pipeline options, validated before any processing
/// * `worker_count` - Number of worker threads; 1 runs sequentially
///
/// # Example
/// ```
/// use skylark::config::ExtractionConfig;
/// use skylark::extract::extract;
/// use skylark::io;
///
/// let fs = 16000;
/// let mut signal = vec![0.0f32; fs as usize];
/// signal.extend(io::tone(1000.0, fs, 0.5));
/// signal.extend(vec![0.0f32; fs as usize]);
///
/// let config = ExtractionConfig::default().with_sample_len(0.5);
/// let table = extract(&signal, fs, &config, 1).unwrap();
/// assert_eq!(table.columns()[0], "onset");
/// ```
pub fn extract(
    signal: &[f32],
    fs: u32,
    config: &ExtractionConfig,
    worker_count: usize,
) -> crate::Result<FeatureTable> {
    config.validate()?;
    if signal.is_empty() {
        return Err(crate::Error::EmptyAudio);
    }

    let filtered = frequency_filter(signal, fs, config.lowcut, config.highcut);
    let detector = OnsetDetector::new(
        fs,
        config.block_size,
        config.step_size(),
        config.onset_method,
        config.onset_threshold,
        config.onset_silence_threshold,
        config.min_duration_s,
    );
    let onsets = detector.get_all(&filtered)?;
    log::debug!("extracting features for {} onsets", onsets.len());

    extract_at_filtered(&filtered, fs, &onsets, config, worker_count)
}

/// Extract per-event features at caller-supplied onset times.
///
/// The band-pass filter still runs, but onset detection is skipped;
/// `onsets` must be ascending. Row `i` corresponds to `onsets[i]`.
pub fn extract_at(
    signal: &[f32],
    fs: u32,
    onsets: &[f32],
    config: &ExtractionConfig,
    worker_count: usize,
) -> crate::Result<FeatureTable> {
    config.validate()?;
    if signal.is_empty() {
        return Err(crate::Error::EmptyAudio);
    }
    for pair in onsets.windows(2) {
        if pair[1] <= pair[0] {
            return Err(crate::Error::InvalidParameter {
                name: "onsets",
                value: format!("{} after {}", pair[1], pair[0]),
                reason: "must be strictly ascending".to_string(),
            });
        }
    }

    let filtered = frequency_filter(signal, fs, config.lowcut, config.highcut);
    extract_at_filtered(&filtered, fs, onsets, config, worker_count)
}

fn extract_at_filtered(
    filtered: &[f32],
    fs: u32,
    onsets: &[f32],
    config: &ExtractionConfig,
    worker_count: usize,
) -> crate::Result<FeatureTable> {
    let schema = FeatureExtractor::new(config).schema();
    if onsets.is_empty() {
        return assemble(onsets, config.sample_len, schema, Vec::new());
    }

    let chunks = chunks_by_onsets(filtered, fs, onsets, config.sample_len);
    let groups = into_groups(&chunks, worker_count);
    let grouped_rows = crate::dispatch::run(&groups, fs, config, worker_count)?;
    let rows: Vec<Vec<f32>> = grouped_rows.into_iter().flatten().collect();

    assemble(onsets, config.sample_len, schema, rows)
}
