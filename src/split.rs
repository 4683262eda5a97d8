//! Onset-anchored chunk splitting and contiguous grouping for fan-out.

/// Slice a signal into one chunk per onset.
///
/// Chunk `i` covers `[round(onsets[i] * fs), round((onsets[i] + sample_len) * fs))`,
/// clamped to the signal length: a chunk near the end is simply shorter,
/// with no padding and no error.
///
/// # Arguments
/// * `signal` - Full input signal
/// * `fs` - Sample rate in Hz
/// * `onsets` - Ascending onset times in seconds
/// * `sample_len` - Chunk duration in seconds
///
/// # Example
/// ```
/// use skylark::split::chunks_by_onsets;
///
/// let signal = vec![0.0f32; 160_000]; // 10 s at 16 kHz
/// let chunks = chunks_by_onsets(&signal, 16000, &[9.8], 0.5);
/// assert_eq!(chunks[0].len(), 3200); // truncated at the signal end
/// ```
pub fn chunks_by_onsets<'a>(
    signal: &'a [f32],
    fs: u32,
    onsets: &[f32],
    sample_len: f32,
) -> Vec<&'a [f32]> {
    onsets
        .iter()
        .map(|&onset| {
            let start = ((onset * fs as f32).round() as usize).min(signal.len());
            let end = (((onset + sample_len) * fs as f32).round() as usize).min(signal.len());
            &signal[start..end.max(start)]
        })
        .collect()
}

/// Partition chunks into `split_count` contiguous, order-preserving groups
/// of nearly equal size.
///
/// The first `len % split_count` groups receive one extra chunk. With
/// `split_count <= 1` a single group holds everything. Grouping only fans
/// out work; concatenating the groups reproduces the input order exactly.
///
/// # Example
/// ```
/// use skylark::split::into_groups;
///
/// let chunks: Vec<&[f32]> = vec![&[0.0], &[1.0], &[2.0], &[3.0], &[4.0]];
/// let groups = into_groups(&chunks, 2);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].len(), 3);
/// assert_eq!(groups[1].len(), 2);
/// ```
pub fn into_groups<'a, 'b>(chunks: &'b [&'a [f32]], split_count: usize) -> Vec<&'b [&'a [f32]]> {
    if split_count <= 1 || chunks.is_empty() {
        return vec![chunks];
    }
    let split_count = split_count.min(chunks.len());
    let base = chunks.len() / split_count;
    let extra = chunks.len() % split_count;

    let mut groups = Vec::with_capacity(split_count);
    let mut start = 0;
    for i in 0..split_count {
        let size = base + usize::from(i < extra);
        groups.push(&chunks[start..start + size]);
        start += size;
    }
    groups
}
