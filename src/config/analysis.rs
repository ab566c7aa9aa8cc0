// src/config/analysis.rs
//
// Analysis parameters: spectral framing plus waveform rendering width

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

pub const DEFAULT_FRAME_SIZE: usize = 2048;
pub const DEFAULT_ROLLOFF_RATIO: f64 = 0.85;
pub const DEFAULT_WAVEFORM_WIDTH: usize = 60;

/// Framing parameters for the spectral analyzer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralConfig {
    /// FFT length in samples
    pub frame_size: usize,
    /// Offset between frames; `None` means half the frame size
    pub hop_size: Option<usize>,
    /// Fraction of total magnitude the rolloff frequency must enclose
    pub rolloff_ratio: f64,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
            hop_size: None,
            rolloff_ratio: DEFAULT_ROLLOFF_RATIO,
        }
    }
}

impl SpectralConfig {
    pub fn new(frame_size: usize) -> Self {
        Self {
            frame_size,
            ..Default::default()
        }
    }

    pub fn with_hop_size(mut self, hop_size: usize) -> Self {
        self.hop_size = Some(hop_size);
        self
    }

    pub fn with_rolloff_ratio(mut self, ratio: f64) -> Self {
        self.rolloff_ratio = ratio;
        self
    }

    /// Hop size actually used for framing
    pub fn hop(&self) -> usize {
        self.hop_size.unwrap_or((self.frame_size / 2).max(1))
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_size == 0 {
            return Err(Error::InvalidConfig("frame_size must be positive".into()));
        }
        if self.hop_size == Some(0) {
            return Err(Error::InvalidConfig("hop_size must be positive".into()));
        }
        if !self.rolloff_ratio.is_finite() || self.rolloff_ratio <= 0.0 || self.rolloff_ratio > 1.0 {
            return Err(Error::InvalidConfig(format!(
                "rolloff_ratio must be in (0, 1], got {}",
                self.rolloff_ratio
            )));
        }
        Ok(())
    }
}

/// Complete configuration for one analyzer instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub spectral: SpectralConfig,
    /// Number of glyphs in each ASCII waveform strip
    pub waveform_width: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            spectral: SpectralConfig::default(),
            waveform_width: DEFAULT_WAVEFORM_WIDTH,
        }
    }
}

impl AnalysisConfig {
    /// Load a JSON config file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.spectral.validate()?;
        if self.waveform_width == 0 {
            return Err(Error::InvalidConfig("waveform_width must be positive".into()));
        }
        Ok(())
    }
}
