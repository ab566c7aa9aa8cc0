//! rendercheckr - Diagnostics for rendered DSP audio
//!
//! A deterministic analysis engine for validating synthesized signals. Given
//! one or more channels of PCM audio at a known sample rate it produces a
//! self-contained report of time-domain and spectral statistics.
//!
//! ## Module Structure
//!
//! - `core` - Analyzers, multichannel aggregation, PCM codec
//! - `config` - Spectral framing and rendering configuration
//! - `report` - Report types (serializable, field names match the JSON payload)
//! - `testgen` - Sine, noise, silence and file test signals
//! - `cli` - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust
//! use rendercheckr::core::AudioAnalyzer;
//! use rendercheckr::testgen::sine;
//!
//! let left = sine(1000.0, 1.0, 44100, 44100);
//! let right = left.clone();
//!
//! let analyzer = AudioAnalyzer::builder().frame_size(2048).build()?;
//! let report = analyzer.analyze(&[left, right], 44100)?;
//!
//! assert_eq!(report.num_outputs, 2);
//! assert!(!report.mix.is_silent);
//! # Ok::<(), rendercheckr::Error>(())
//! ```
//!
//! ## Report Contents
//!
//! | Field              | Meaning                                        |
//! |--------------------|------------------------------------------------|
//! | max_amplitude      | Peak absolute sample value                     |
//! | rms                | Root mean square level                         |
//! | is_silent          | Peak below 1e-4                                |
//! | waveform_ascii     | Fixed-width glyph strip (`_`, `-`, `=`, `#`)   |
//! | features           | DC offset, zero crossings, crest, clipping and |
//! |                    | frame-averaged spectral descriptors            |
//!
//! The engine performs no I/O and keeps no state between calls: the same
//! input and config always yield the same report.

// Core analysis functionality
pub mod core;

// Command-line interface
pub mod cli;

// Configuration
pub mod config;

pub mod error;

// Report types
pub mod report;

// Test signal generation
pub mod testgen;

// Re-export commonly used types at crate root for convenience
pub use crate::config::{AnalysisConfig, SpectralConfig};
pub use crate::core::{
    analyze, conform_channels, decode, decode_file, encode, mixdown, AnalyzerBuilder,
    AudioAnalyzer, ChannelPolicy, DecodedAudio,
};
pub use error::{Error, Result};
pub use report::{ChannelReport, Features, GlobalReport, SignalReport};
pub use testgen::TestSignal;
