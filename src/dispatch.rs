//! Fan-out of chunk groups over a bounded thread pool.

use crate::config::ExtractionConfig;
use crate::extract::extract_batch;
use rayon::prelude::*;

/// Run feature extraction over pre-split chunk groups.
///
/// With `worker_count <= 1` the groups run sequentially on the calling
/// thread. Otherwise a pool of exactly `worker_count` threads processes
/// groups in parallel; results are collected by group index, so the
/// concatenated output order is identical to the sequential one. Any
/// failing chunk aborts the whole call.
///
/// # Returns
/// One feature-row vector per group, in input order.
pub fn run(
    groups: &[&[&[f32]]],
    fs: u32,
    config: &ExtractionConfig,
    worker_count: usize,
) -> crate::Result<Vec<Vec<Vec<f32>>>> {
    if worker_count <= 1 {
        return groups
            .iter()
            .map(|group| extract_batch(group, fs, config))
            .collect();
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(worker_count)
        .build()
        .map_err(|e| crate::Error::InvalidParameter {
            name: "worker_count",
            value: worker_count.to_string(),
            reason: e.to_string(),
        })?;

    log::debug!(
        "dispatching {} chunk groups across {} workers",
        groups.len(),
        worker_count
    );
    pool.install(|| {
        groups
            .par_iter()
            .map(|group| extract_batch(group, fs, config))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io;
    use crate::split::into_groups;

    #[test]
    fn test_parallel_matches_sequential() {
        let fs = 16000;
        let tones: Vec<Vec<f32>> = [440.0, 880.0, 1320.0, 1760.0]
            .iter()
            .map(|&f| io::tone(f, fs, 0.5))
            .collect();
        let chunks: Vec<&[f32]> = tones.iter().map(|t| t.as_slice()).collect();
        let config = ExtractionConfig::default();

        let sequential = run(&into_groups(&chunks, 1), fs, &config, 1).unwrap();
        let parallel = run(&into_groups(&chunks, 4), fs, &config, 4).unwrap();

        let seq_rows: Vec<&Vec<f32>> = sequential.iter().flatten().collect();
        let par_rows: Vec<&Vec<f32>> = parallel.iter().flatten().collect();
        assert_eq!(seq_rows, par_rows);
    }

    #[test]
    fn test_failing_chunk_aborts_run() {
        let fs = 16000;
        let good = io::tone(440.0, fs, 0.5);
        let chunks: Vec<&[f32]> = vec![good.as_slice(), &[]];
        let config = ExtractionConfig::default();

        assert!(run(&into_groups(&chunks, 2), fs, &config, 2).is_err());
    }
}
