//! Configuration module for rendercheckr

mod analysis;

pub use analysis::{
    AnalysisConfig, SpectralConfig, DEFAULT_FRAME_SIZE, DEFAULT_ROLLOFF_RATIO,
    DEFAULT_WAVEFORM_WIDTH,
};
