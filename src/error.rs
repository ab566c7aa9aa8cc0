//! Error types for the analysis engine

use thiserror::Error;

/// Errors raised by the engine and its file/codec helpers.
///
/// Degenerate audio (empty buffers, zero channels, ragged channel lengths)
/// is never an error; it produces zeroed reports instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration rejected before any computation ran
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Container or channel layout the decoder/encoder will not handle
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("FFT error: {0}")]
    Fft(#[from] realfft::FftError),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
