//! Window functions for spectral analysis.

use std::f32::consts::PI;

/// Generate a Hann window of length `n`.
///
/// # Example
/// ```
/// use skylark::window::hann;
///
/// let w = hann(4);
/// assert_eq!(w.len(), 4);
/// assert_eq!(w[0], 0.0);
/// ```
pub fn hann(n: usize) -> Vec<f32> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![1.0];
    }
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f32 / n as f32).cos())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_symmetry() {
        let w = hann(512);
        for i in 1..256 {
            assert!((w[i] - w[512 - i]).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hann_empty() {
        assert!(hann(0).is_empty());
    }

    #[test]
    fn test_hann_single() {
        assert_eq!(hann(1), vec![1.0]);
    }
}
