//! Core analysis and codec modules

pub mod analysis;
pub mod analyzer;
pub mod decoder;
pub mod dsp;

pub use analyzer::{analyze, mixdown, AnalyzerBuilder, AudioAnalyzer};
pub use decoder::{conform_channels, decode, decode_file, encode, ChannelPolicy, DecodedAudio};
