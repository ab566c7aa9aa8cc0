//! Report types produced by one analysis call
//!
//! Field names mirror the JSON payload consumers read, one to one.

use serde::Serialize;

use crate::core::analysis::{SpectralFeatures, TimeDomainStats};

/// Secondary statistics attached to every signal report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Features {
    pub dc_offset: f64,
    pub zero_crossing_rate: f64,
    pub crest_factor: f64,
    pub clipping_ratio: f64,
    #[serde(flatten)]
    pub spectral: SpectralFeatures,
}

/// Metrics for one buffer: a single channel or the mixdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalReport {
    pub max_amplitude: f64,
    pub rms: f64,
    pub is_silent: bool,
    pub waveform_ascii: String,
    pub features: Features,
}

impl SignalReport {
    pub fn new(time: TimeDomainStats, spectral: SpectralFeatures, waveform_ascii: String) -> Self {
        Self {
            max_amplitude: time.max_amplitude,
            rms: time.rms,
            is_silent: time.is_silent,
            waveform_ascii,
            features: Features {
                dc_offset: time.dc_offset,
                zero_crossing_rate: time.zero_crossing_rate,
                crest_factor: time.crest_factor,
                clipping_ratio: time.clipping_ratio,
                spectral,
            },
        }
    }
}

/// Report for one output channel, analyzed at its own full length
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelReport {
    pub index: usize,
    #[serde(flatten)]
    pub signal: SignalReport,
}

/// Mixdown metrics plus the per-channel breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalReport {
    #[serde(flatten)]
    pub mix: SignalReport,
    pub sample_rate: u32,
    /// Length of the mixdown (shortest channel)
    pub num_samples: usize,
    pub num_outputs: usize,
    pub channels: Vec<ChannelReport>,
}

impl GlobalReport {
    /// True when the mixdown and every channel are silent
    pub fn all_silent(&self) -> bool {
        self.mix.is_silent && self.channels.iter().all(|c| c.signal.is_silent)
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_samples as f64 / self.sample_rate as f64
    }
}
