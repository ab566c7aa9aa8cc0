// src/core/analyzer.rs
//
// Multichannel aggregation: mixdown, per-channel fan-out and report assembly.

use log::debug;

use super::analysis::{analyze_spectral, analyze_time_domain, ascii_waveform};
use crate::config::{AnalysisConfig, SpectralConfig};
use crate::error::{Error, Result};
use crate::report::{ChannelReport, GlobalReport, SignalReport};

/// Builder for AudioAnalyzer configuration
pub struct AnalyzerBuilder {
    config: AnalysisConfig,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    pub fn from_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn frame_size(mut self, frame_size: usize) -> Self {
        self.config.spectral.frame_size = frame_size;
        self
    }

    pub fn hop_size(mut self, hop_size: usize) -> Self {
        self.config.spectral.hop_size = Some(hop_size);
        self
    }

    pub fn rolloff_ratio(mut self, ratio: f64) -> Self {
        self.config.spectral.rolloff_ratio = ratio;
        self
    }

    pub fn waveform_width(mut self, width: usize) -> Self {
        self.config.waveform_width = width;
        self
    }

    /// Validate the configuration and produce an analyzer
    pub fn build(self) -> Result<AudioAnalyzer> {
        self.config.validate()?;
        Ok(AudioAnalyzer {
            config: self.config,
        })
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Stateless analyzer over a validated configuration
#[derive(Debug, Clone)]
pub struct AudioAnalyzer {
    config: AnalysisConfig,
}

impl AudioAnalyzer {
    /// Create analyzer with default configuration
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    /// Create analyzer with custom configuration
    pub fn with_config(config: AnalysisConfig) -> Result<Self> {
        AnalyzerBuilder::from_config(config).build()
    }

    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a multichannel buffer into a global report.
    ///
    /// The mixdown is computed over the shortest channel's length; each
    /// channel report covers that channel's full length.
    pub fn analyze<C: AsRef<[f32]>>(&self, channels: &[C], sample_rate: u32) -> Result<GlobalReport> {
        if sample_rate == 0 {
            return Err(Error::InvalidConfig("sample_rate must be positive".into()));
        }

        let mono = mixdown(channels);
        debug!(
            "analyzing {} channel(s), mixdown length {} at {} Hz",
            channels.len(),
            mono.len(),
            sample_rate
        );

        let mix = self.analyze_buffer(&mono, sample_rate)?;
        let channel_reports = channels
            .iter()
            .enumerate()
            .map(|(index, buf)| {
                Ok(ChannelReport {
                    index,
                    signal: self.analyze_buffer(buf.as_ref(), sample_rate)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(GlobalReport {
            mix,
            sample_rate,
            num_samples: mono.len(),
            num_outputs: channels.len(),
            channels: channel_reports,
        })
    }

    /// Analyze a single buffer
    pub fn analyze_buffer(&self, samples: &[f32], sample_rate: u32) -> Result<SignalReport> {
        let time = analyze_time_domain(samples);
        let spectral = analyze_spectral(samples, sample_rate, &self.config.spectral)?;
        let waveform = ascii_waveform(samples, self.config.waveform_width);
        Ok(SignalReport::new(time, spectral, waveform))
    }
}

impl Default for AudioAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot analysis with an explicit spectral config and the default
/// waveform width.
pub fn analyze<C: AsRef<[f32]>>(
    channels: &[C],
    sample_rate: u32,
    config: &SpectralConfig,
) -> Result<GlobalReport> {
    let config = AnalysisConfig {
        spectral: *config,
        ..Default::default()
    };
    AudioAnalyzer::with_config(config)?.analyze(channels, sample_rate)
}

/// Elementwise mean across channels, truncated to the shortest channel
pub fn mixdown<C: AsRef<[f32]>>(channels: &[C]) -> Vec<f32> {
    let len = match channels.iter().map(|c| c.as_ref().len()).min() {
        Some(len) => len,
        None => return Vec::new(),
    };

    if channels.len() == 1 {
        return channels[0].as_ref()[..len].to_vec();
    }

    let count = channels.len() as f64;
    (0..len)
        .map(|i| {
            let sum: f64 = channels.iter().map(|c| c.as_ref()[i] as f64).sum();
            (sum / count) as f32
        })
        .collect()
}
