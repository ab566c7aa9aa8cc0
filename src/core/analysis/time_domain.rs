// src/core/analysis/time_domain.rs
//
// Level, offset and peakiness statistics for a single channel buffer

use serde::Serialize;

use crate::core::dsp::finite_or_zero;
use crate::core::dsp::stats;

/// Peak level below which a buffer is reported as silent
pub const SILENCE_THRESHOLD: f64 = 1e-4;

const CREST_EPSILON: f64 = 1e-12;

/// Time-domain statistics of one buffer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeDomainStats {
    pub max_amplitude: f64,
    pub rms: f64,
    /// Signed mean of the raw samples
    pub dc_offset: f64,
    pub zero_crossing_rate: f64,
    /// Fraction of samples at |x| >= 0.999
    pub clipping_ratio: f64,
    /// Peak over RMS, 0 when the buffer has no energy
    pub crest_factor: f64,
    pub is_silent: bool,
}

impl Default for TimeDomainStats {
    fn default() -> Self {
        Self {
            max_amplitude: 0.0,
            rms: 0.0,
            dc_offset: 0.0,
            zero_crossing_rate: 0.0,
            clipping_ratio: 0.0,
            crest_factor: 0.0,
            is_silent: true,
        }
    }
}

/// Analyze a channel buffer in the time domain
pub fn analyze_time_domain(samples: &[f32]) -> TimeDomainStats {
    if samples.is_empty() {
        return TimeDomainStats::default();
    }

    let max_amplitude = finite_or_zero(stats::peak_amplitude(samples));
    let rms = finite_or_zero(stats::rms(samples));
    let crest_factor = if rms > 0.0 {
        finite_or_zero(max_amplitude / (rms + CREST_EPSILON))
    } else {
        0.0
    };

    TimeDomainStats {
        max_amplitude,
        rms,
        dc_offset: finite_or_zero(stats::dc_offset(samples)),
        zero_crossing_rate: stats::zero_crossing_rate(samples),
        clipping_ratio: stats::clipping_ratio(samples),
        crest_factor,
        is_silent: max_amplitude < SILENCE_THRESHOLD,
    }
}
