//! Window function implementations

use std::f64::consts::PI;

/// Symmetric Hann window, zero at both ends.
///
/// A single-sample window is `[1.0]` so that a one-sample frame still
/// passes its energy through.
pub fn hann(size: usize) -> Vec<f64> {
    match size {
        0 => return Vec::new(),
        1 => return vec![1.0],
        _ => {}
    }
    let denom = (size - 1) as f64;
    (0..size)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / denom).cos())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window() {
        let window = hann(5);
        assert!(window[0].abs() < 1e-12);
        assert!(window[4].abs() < 1e-12);
        assert!((window[2] - 1.0).abs() < 1e-12);
        assert!((window[1] - window[3]).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(hann(0).is_empty());
        assert_eq!(hann(1), vec![1.0]);
        assert!(hann(2).iter().all(|w| w.abs() < 1e-12));
    }
}
