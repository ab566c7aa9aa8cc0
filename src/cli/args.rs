//! CLI argument parsing with config-file and environment layering

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::AnalysisConfig;
use crate::core::ChannelPolicy;
use crate::error::{Error, Result};
use crate::testgen::{TestSignal, DEFAULT_DURATION_SECS, DEFAULT_SAMPLE_RATE, DEFAULT_SINE_FREQ};

#[derive(Parser, Debug)]
#[command(name = "rendercheckr", version)]
#[command(about = "Time-domain and spectral diagnostics for rendered DSP audio")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (also enables debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze WAV files (directories are searched recursively)
    Analyze {
        /// Input files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        channels: ChannelArgs,
    },

    /// Generate a test signal, optionally write it, and analyze it
    Probe {
        #[arg(long, value_enum, default_value_t = SignalKind::Sine)]
        signal: SignalKind,

        /// Sine frequency in Hz
        #[arg(long, default_value_t = DEFAULT_SINE_FREQ)]
        freq: f64,

        /// Noise seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// WAV file used when --signal=file
        #[arg(long)]
        input: Option<PathBuf>,

        /// Duration in seconds
        #[arg(long, default_value_t = DEFAULT_DURATION_SECS)]
        duration: f64,

        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Number of output channels
        #[arg(long, default_value_t = 1)]
        channels: usize,

        /// Mix down or duplicate a file's channels to match --channels
        #[arg(long)]
        downmix: bool,

        /// Write the generated signal to this WAV path
        #[arg(long)]
        write: Option<PathBuf>,

        /// Bit depth for --write (8, 16 or 32)
        #[arg(long, default_value_t = 16)]
        bits: u16,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SignalKind {
    None,
    Sine,
    Noise,
    File,
}

/// Channel-count expectations for decoded inputs
#[derive(Args, Debug, Clone, Default)]
pub struct ChannelArgs {
    /// Require this many channels
    #[arg(long)]
    pub expect_channels: Option<usize>,

    /// Allow downmix/duplication to reach --expect-channels
    #[arg(long, requires = "expect_channels")]
    pub downmix: bool,
}

impl ChannelArgs {
    pub fn policy(&self) -> ChannelPolicy {
        policy_for(self.downmix)
    }
}

/// Spectral and rendering overrides, applied on top of an optional config file
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// FFT frame size in samples
    #[arg(long, global = true, env = "RENDERCHECKR_FRAME_SIZE")]
    pub frame_size: Option<usize>,

    /// Hop between frames (defaults to half the frame size)
    #[arg(long, global = true, env = "RENDERCHECKR_HOP_SIZE")]
    pub hop_size: Option<usize>,

    /// Rolloff energy fraction in (0, 1]
    #[arg(long, global = true, env = "RENDERCHECKR_ROLLOFF_RATIO")]
    pub rolloff_ratio: Option<f64>,

    /// Waveform strip width in glyphs
    #[arg(long, global = true)]
    pub width: Option<usize>,
}

impl AnalysisArgs {
    /// Merge defaults, config file and overrides, then validate
    pub fn resolve(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(frame_size) = self.frame_size {
            config.spectral.frame_size = frame_size;
        }
        if let Some(hop_size) = self.hop_size {
            config.spectral.hop_size = Some(hop_size);
        }
        if let Some(ratio) = self.rolloff_ratio {
            config.spectral.rolloff_ratio = ratio;
        }
        if let Some(width) = self.width {
            config.waveform_width = width;
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn policy_for(downmix: bool) -> ChannelPolicy {
    if downmix {
        ChannelPolicy::Downmix
    } else {
        ChannelPolicy::Exact
    }
}

/// Build the test signal described by probe flags
pub fn test_signal(kind: SignalKind, freq: f64, seed: u64, input: Option<&PathBuf>) -> Result<TestSignal> {
    match kind {
        SignalKind::None => Ok(TestSignal::None),
        SignalKind::Sine => {
            if !freq.is_finite() || freq < 0.0 {
                return Err(Error::InvalidConfig(format!("invalid sine frequency: {}", freq)));
            }
            Ok(TestSignal::Sine { freq_hz: freq })
        }
        SignalKind::Noise => Ok(TestSignal::Noise { seed }),
        SignalKind::File => input
            .cloned()
            .map(TestSignal::File)
            .ok_or_else(|| Error::InvalidConfig("--signal=file requires --input".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_defaults() {
        let cli = Cli::try_parse_from(["rendercheckr", "probe"]).unwrap();
        match cli.command {
            Command::Probe { signal, freq, channels, sample_rate, bits, .. } => {
                assert_eq!(signal, SignalKind::Sine);
                assert_eq!(freq, DEFAULT_SINE_FREQ);
                assert_eq!(channels, 1);
                assert_eq!(sample_rate, DEFAULT_SAMPLE_RATE);
                assert_eq!(bits, 16);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "rendercheckr",
            "analyze",
            "a.wav",
            "--frame-size=1024",
            "--rolloff-ratio=0.9",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        let config = cli.analysis.resolve().unwrap();
        assert_eq!(config.spectral.frame_size, 1024);
        assert_eq!(config.spectral.hop(), 512);
        assert_eq!(config.spectral.rolloff_ratio, 0.9);
    }

    #[test]
    fn test_analyze_requires_paths() {
        assert!(Cli::try_parse_from(["rendercheckr", "analyze"]).is_err());
    }

    #[test]
    fn test_downmix_requires_expected_count() {
        assert!(Cli::try_parse_from(["rendercheckr", "analyze", "a.wav", "--downmix"]).is_err());
        let cli = Cli::try_parse_from([
            "rendercheckr",
            "analyze",
            "a.wav",
            "--expect-channels=1",
            "--downmix",
        ])
        .unwrap();
        match cli.command {
            Command::Analyze { channels, .. } => {
                assert_eq!(channels.expect_channels, Some(1));
                assert_eq!(channels.policy(), ChannelPolicy::Downmix);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_rejects_invalid_override() {
        let args = AnalysisArgs {
            hop_size: Some(0),
            ..Default::default()
        };
        assert!(matches!(args.resolve(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_file_signal_needs_input() {
        assert!(test_signal(SignalKind::File, 0.0, 0, None).is_err());
        let path = PathBuf::from("in.wav");
        assert_eq!(
            test_signal(SignalKind::File, 0.0, 0, Some(&path)).unwrap(),
            TestSignal::File(path)
        );
        assert!(test_signal(SignalKind::Sine, f64::NAN, 0, None).is_err());
    }
}
