//! Audio analysis algorithms
//!
//! Contains the per-buffer analyzers driven by the multichannel aggregator:
//! - Time-domain statistics (peak, RMS, DC offset, zero crossings, clipping)
//! - Spectral descriptors (centroid, bandwidth, rolloff, flatness, flux)
//! - ASCII waveform rendering

mod spectral;
mod time_domain;
mod waveform;

pub use spectral::{analyze_spectral, SpectralFeatures};
pub use time_domain::{analyze_time_domain, TimeDomainStats, SILENCE_THRESHOLD};
pub use waveform::ascii_waveform;
