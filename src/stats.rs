//! Order statistics over per-frame feature values.

/// Compute the `q`-quantile of a set of values using linear interpolation
/// between the two nearest ranks.
///
/// # Arguments
/// * `values` - Input values (need not be sorted)
/// * `q` - Quantile in [0, 1]
///
/// # Returns
/// The interpolated quantile, or 0.0 for empty input.
///
/// # Example
/// ```
/// use skylark::stats::quantile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile(&values, 0.5), 2.5);
/// assert_eq!(quantile(&values, 0.0), 1.0);
/// assert_eq!(quantile(&values, 1.0), 4.0);
/// ```
pub fn quantile(values: &[f32], q: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    quantile_sorted(&sorted, q)
}

/// Quantile over values already sorted ascending.
pub fn quantile_sorted(sorted: &[f32], q: f32) -> f32 {
    if sorted.is_empty() {
        return 0.0;
    }
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q.clamp(0.0, 1.0) * (n - 1) as f32;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = pos - lo as f32;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Median via the 0.5-quantile.
pub fn median(values: &[f32]) -> f32 {
    quantile(values, 0.5)
}

/// Arithmetic mean, 0.0 for empty input.
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}
