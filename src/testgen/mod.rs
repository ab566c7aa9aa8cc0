// src/testgen/mod.rs
//
// Test signal generation for rendercheckr
// Produces the synthetic inputs fed to a DSP graph in place of live audio:
// silence, a sine tone, seeded white noise, or a decoded local file.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f64::consts::PI;
use std::path::PathBuf;

use crate::core::decoder::{conform_channels, decode_file, ChannelPolicy};
use crate::error::{Error, Result};

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_DURATION_SECS: f64 = 2.0;
pub const DEFAULT_SINE_FREQ: f64 = 440.0;

/// Sine tone of `num_samples` samples
pub fn sine(freq_hz: f64, amplitude: f32, sample_rate: u32, num_samples: usize) -> Vec<f32> {
    let step = 2.0 * PI * freq_hz / sample_rate as f64;
    (0..num_samples)
        .map(|i| (amplitude as f64 * (step * i as f64).sin()) as f32)
        .collect()
}

/// Uniform white noise in `[-amplitude, amplitude]`, deterministic per seed
pub fn white_noise(amplitude: f32, num_samples: usize, seed: u64) -> Vec<f32> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..num_samples)
        .map(|_| rng.gen_range(-1.0f32..=1.0) * amplitude)
        .collect()
}

pub fn silence(num_samples: usize) -> Vec<f32> {
    vec![0.0; num_samples]
}

/// Input source for a render or probe run
#[derive(Debug, Clone, PartialEq)]
pub enum TestSignal {
    None,
    Sine { freq_hz: f64 },
    Noise { seed: u64 },
    /// Local WAV file; no remote paths
    File(PathBuf),
}

impl Default for TestSignal {
    fn default() -> Self {
        Self::None
    }
}

impl TestSignal {
    pub fn name(&self) -> &'static str {
        match self {
            TestSignal::None => "none",
            TestSignal::Sine { .. } => "sine",
            TestSignal::Noise { .. } => "noise",
            TestSignal::File(_) => "file",
        }
    }

    /// Render `channels` channels of this signal.
    ///
    /// Generated signals use `sample_rate` and `duration_secs`. A file keeps
    /// its own rate and length and must match `channels` exactly or by
    /// downmix under `policy`. Returns the buffers and their sample rate.
    pub fn render(
        &self,
        sample_rate: u32,
        duration_secs: f64,
        channels: usize,
        policy: ChannelPolicy,
    ) -> Result<(Vec<Vec<f32>>, u32)> {
        if let TestSignal::File(path) = self {
            let audio = decode_file(path)?;
            let rate = audio.sample_rate;
            let conformed = conform_channels(audio.channels, channels, policy)?;
            return Ok((conformed, rate));
        }

        if sample_rate == 0 {
            return Err(Error::InvalidConfig("sample_rate must be positive".into()));
        }
        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "duration must be a non-negative number of seconds, got {}",
                duration_secs
            )));
        }

        let num_samples = (duration_secs * sample_rate as f64).round() as usize;
        let buffers = (0..channels)
            .map(|ch| match self {
                TestSignal::Sine { freq_hz } => sine(*freq_hz, 1.0, sample_rate, num_samples),
                // Independent stream per channel
                TestSignal::Noise { seed } => white_noise(1.0, num_samples, seed.wrapping_add(ch as u64)),
                _ => silence(num_samples),
            })
            .collect();

        Ok((buffers, sample_rate))
    }
}

impl std::fmt::Display for TestSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestSignal::Sine { freq_hz } => write!(f, "sine {} Hz", freq_hz),
            TestSignal::Noise { seed } => write!(f, "noise (seed {})", seed),
            TestSignal::File(path) => write!(f, "file {}", path.display()),
            TestSignal::None => write!(f, "none"),
        }
    }
}
