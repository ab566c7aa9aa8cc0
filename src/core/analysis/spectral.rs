// src/core/analysis/spectral.rs
//
// Frame-averaged spectral descriptors: centroid, bandwidth, rolloff,
// flatness and flux over Hann-windowed real FFT frames.

use log::debug;
use serde::Serialize;

use crate::config::SpectralConfig;
use crate::core::dsp::{finite_or_zero, mean, FftProcessor};
use crate::error::Result;

const EPSILON: f64 = 1e-12;

/// Spectral descriptors averaged across frames
///
/// The descriptor fields are `None` only when no analysis ran (empty input).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectralFeatures {
    pub spectral_centroid: Option<f64>,
    pub spectral_bandwidth: Option<f64>,
    pub spectral_rolloff: Option<f64>,
    pub spectral_flatness: Option<f64>,
    pub spectral_flux: Option<f64>,
    pub spectral_frame_size: usize,
    pub spectral_hop_size: usize,
    pub spectral_rolloff_ratio: f64,
    pub spectral_available: bool,
}

impl SpectralFeatures {
    /// Features for a buffer that could not be analyzed
    pub fn unavailable(config: &SpectralConfig) -> Self {
        Self {
            spectral_centroid: None,
            spectral_bandwidth: None,
            spectral_rolloff: None,
            spectral_flatness: None,
            spectral_flux: None,
            spectral_frame_size: config.frame_size,
            spectral_hop_size: config.hop(),
            spectral_rolloff_ratio: config.rolloff_ratio,
            spectral_available: false,
        }
    }
}

/// Per-frame descriptor values, collected before averaging
#[derive(Debug, Default)]
struct FrameSeries {
    centroid: Vec<f64>,
    bandwidth: Vec<f64>,
    rolloff: Vec<f64>,
    flatness: Vec<f64>,
    flux: Vec<f64>,
}

/// Analyze a channel buffer in the frequency domain.
///
/// Fails with `InvalidConfig` before any framing if `config` does not
/// pass [`SpectralConfig::validate`].
pub fn analyze_spectral(
    samples: &[f32],
    sample_rate: u32,
    config: &SpectralConfig,
) -> Result<SpectralFeatures> {
    config.validate()?;
    if samples.is_empty() {
        return Ok(SpectralFeatures::unavailable(config));
    }

    let frame_size = config.frame_size;
    let hop_size = config.hop();

    let padded;
    let signal: &[f32] = if samples.len() < frame_size {
        let mut buf = samples.to_vec();
        buf.resize(frame_size, 0.0);
        padded = buf;
        &padded
    } else {
        samples
    };

    let mut fft = FftProcessor::new(frame_size);
    let freqs = fft.bin_frequencies(sample_rate);
    let mut series = FrameSeries::default();
    let mut mags = Vec::with_capacity(fft.num_bins());
    let mut prev_mags: Option<Vec<f64>> = None;
    let mut frames = 0usize;

    let mut offset = 0;
    while offset + frame_size <= signal.len() {
        fft.magnitude_spectrum(&signal[offset..offset + frame_size], &mut mags)?;

        let total: f64 = mags.iter().sum();
        let centroid = spectral_centroid(&mags, &freqs, total);
        series.centroid.push(centroid);
        series.bandwidth.push(spectral_bandwidth(&mags, &freqs, total, centroid));
        series.rolloff.push(spectral_rolloff(&mags, &freqs, total, config.rolloff_ratio));
        series.flatness.push(spectral_flatness(&mags));

        if let Some(prev) = prev_mags.as_mut() {
            series.flux.push(spectral_flux(prev, &mags));
            prev.copy_from_slice(&mags);
        } else {
            prev_mags = Some(mags.clone());
        }

        frames += 1;
        offset += hop_size;
    }

    debug!(
        "spectral: {} samples, {} frames of {} (hop {})",
        samples.len(),
        frames,
        frame_size,
        hop_size
    );

    if frames == 0 {
        return Ok(SpectralFeatures::unavailable(config));
    }

    Ok(SpectralFeatures {
        spectral_centroid: Some(finite_or_zero(mean(&series.centroid))),
        spectral_bandwidth: Some(finite_or_zero(mean(&series.bandwidth))),
        spectral_rolloff: Some(finite_or_zero(mean(&series.rolloff))),
        spectral_flatness: Some(finite_or_zero(mean(&series.flatness))),
        spectral_flux: Some(finite_or_zero(mean(&series.flux))),
        spectral_frame_size: frame_size,
        spectral_hop_size: hop_size,
        spectral_rolloff_ratio: config.rolloff_ratio,
        spectral_available: true,
    })
}

/// Magnitude-weighted mean frequency
fn spectral_centroid(mags: &[f64], freqs: &[f64], total: f64) -> f64 {
    let weighted: f64 = mags.iter().zip(freqs).map(|(m, f)| f * m).sum();
    weighted / (total + EPSILON)
}

/// Magnitude-weighted standard deviation around the centroid
fn spectral_bandwidth(mags: &[f64], freqs: &[f64], total: f64, centroid: f64) -> f64 {
    let variance: f64 = mags
        .iter()
        .zip(freqs)
        .map(|(m, f)| {
            let diff = f - centroid;
            diff * diff * m
        })
        .sum();
    (variance / (total + EPSILON)).sqrt()
}

/// Lowest bin frequency whose cumulative magnitude reaches `ratio` of the total
fn spectral_rolloff(mags: &[f64], freqs: &[f64], total: f64, ratio: f64) -> f64 {
    let threshold = ratio * total;
    let mut cumulative = 0.0;
    for (m, f) in mags.iter().zip(freqs) {
        cumulative += m;
        if cumulative >= threshold {
            return *f;
        }
    }
    freqs.last().copied().unwrap_or(0.0)
}

/// Geometric over arithmetic mean; near 1 for noise, near 0 for tones
fn spectral_flatness(mags: &[f64]) -> f64 {
    let n = mags.len() as f64;
    let log_mean = mags.iter().map(|m| (m + EPSILON).ln()).sum::<f64>() / n;
    let arithmetic_mean = mags.iter().sum::<f64>() / n;
    log_mean.exp() / (arithmetic_mean + EPSILON)
}

/// Positive magnitude change relative to the previous frame's total
fn spectral_flux(prev: &[f64], curr: &[f64]) -> f64 {
    let rise: f64 = curr
        .iter()
        .zip(prev)
        .map(|(c, p)| (c - p).max(0.0))
        .sum();
    rise / (prev.iter().sum::<f64>() + EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::f64::consts::PI;

    fn sine(freq: f64, sample_rate: u32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f64 / sample_rate as f64).sin() as f32)
            .collect()
    }

    #[test]
    fn test_empty_is_unavailable() {
        let config = SpectralConfig::new(1024).with_rolloff_ratio(0.9);
        let features = analyze_spectral(&[], 44100, &config).unwrap();
        assert!(!features.spectral_available);
        assert!(features.spectral_centroid.is_none());
        assert!(features.spectral_flux.is_none());
        assert_eq!(features.spectral_frame_size, 1024);
        assert_eq!(features.spectral_hop_size, 512);
        assert_eq!(features.spectral_rolloff_ratio, 0.9);
    }

    #[test]
    fn test_short_buffer_is_padded_to_one_frame() {
        let config = SpectralConfig::default();
        let features = analyze_spectral(&[0.5; 10], 44100, &config).unwrap();
        assert!(features.spectral_available);
        // Single frame: no flux samples
        assert_eq!(features.spectral_flux, Some(0.0));
    }

    #[test]
    fn test_sine_centroid_near_tone() {
        let config = SpectralConfig::default();
        let samples = sine(1000.0, 44100, 44100);
        let features = analyze_spectral(&samples, 44100, &config).unwrap();
        let centroid = features.spectral_centroid.unwrap();
        assert!((centroid - 1000.0).abs() < 44100.0 / 2048.0, "centroid {}", centroid);
        let rolloff = features.spectral_rolloff.unwrap();
        assert!(rolloff > 900.0 && rolloff < 1100.0, "rolloff {}", rolloff);
    }

    #[test]
    fn test_silent_frames_stay_finite() {
        let config = SpectralConfig::new(256);
        let features = analyze_spectral(&[0.0; 1024], 8000, &config).unwrap();
        assert_eq!(features.spectral_centroid, Some(0.0));
        assert_eq!(features.spectral_rolloff, Some(0.0));
        assert_eq!(features.spectral_flux, Some(0.0));
        assert!((features.spectral_flatness.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_onset_produces_flux() {
        let config = SpectralConfig::new(256).with_hop_size(256);
        let mut samples = vec![0.0f32; 256];
        samples.extend(sine(1000.0, 8000, 256));
        let features = analyze_spectral(&samples, 8000, &config).unwrap();
        assert!(features.spectral_flux.unwrap() > 1.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        for config in [
            SpectralConfig::new(0),
            SpectralConfig::default().with_rolloff_ratio(5.0),
            SpectralConfig::default().with_hop_size(0),
        ] {
            assert!(matches!(
                analyze_spectral(&[0.5; 8], 44100, &config),
                Err(Error::InvalidConfig(_))
            ));
            assert!(matches!(
                analyze_spectral(&[], 44100, &config),
                Err(Error::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_rolloff_ratio_one_reaches_top() {
        let mags = [1.0, 1.0, 1.0, 1.0];
        let freqs = [0.0, 10.0, 20.0, 30.0];
        assert_eq!(spectral_rolloff(&mags, &freqs, 4.0, 1.0), 30.0);
        assert_eq!(spectral_rolloff(&mags, &freqs, 4.0, 0.5), 10.0);
        // Accumulated rounding can leave cumulative just short of the threshold
        assert_eq!(spectral_rolloff(&mags, &freqs, 4.5, 1.0), 30.0);
    }
}
