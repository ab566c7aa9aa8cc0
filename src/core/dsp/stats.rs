//! Statistical helpers over sample buffers
//!
//! Sums are accumulated in `f64` regardless of the sample type.

/// Absolute level at or above which a sample counts as clipped
pub const CLIP_THRESHOLD: f64 = 0.999;

/// Replace NaN/Inf with zero
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Compute peak amplitude over the finite samples
pub fn peak_amplitude(samples: &[f32]) -> f64 {
    samples
        .iter()
        .filter(|s| s.is_finite())
        .map(|&s| (s as f64).abs())
        .fold(0.0f64, f64::max)
}

/// Compute RMS (Root Mean Square) over the finite samples
pub fn rms(samples: &[f32]) -> f64 {
    let (sum_sq, count) = samples
        .iter()
        .filter(|s| s.is_finite())
        .fold((0.0f64, 0usize), |(sum, n), &s| (sum + (s as f64) * (s as f64), n + 1));
    if count == 0 {
        return 0.0;
    }
    (sum_sq / count as f64).sqrt()
}

/// Signed mean of the raw samples
pub fn dc_offset(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|&s| s as f64).sum::<f64>() / samples.len() as f64
}

/// Zero-crossing rate; zero is treated as positive
pub fn zero_crossing_rate(samples: &[f32]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }

    let crossings = samples
        .windows(2)
        .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
        .count();

    crossings as f64 / (samples.len() - 1) as f64
}

/// Fraction of samples at or beyond the clip threshold
pub fn clipping_ratio(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let clipped = samples
        .iter()
        .filter(|&&s| (s as f64).abs() >= CLIP_THRESHOLD)
        .count();
    clipped as f64 / samples.len() as f64
}
