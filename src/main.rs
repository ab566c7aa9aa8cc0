// src/main.rs
use anyhow::{bail, Context, Result};
use clap::Parser;
use colorful::Colorful;
use log::{debug, info};
use std::path::Path;

use rendercheckr::cli::{
    collect_wav_files, format_json, format_report, policy_for, test_signal, Cli, Command,
};
use rendercheckr::core::{conform_channels, decode_file, encode, AudioAnalyzer};
use rendercheckr::report::GlobalReport;

fn main() -> Result<()> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = args.analysis.resolve().context("Invalid analysis configuration")?;
    let analyzer = AudioAnalyzer::with_config(config)?;
    let spectral = &analyzer.config().spectral;
    debug!(
        "frame size {}, hop {}, rolloff ratio {}",
        spectral.frame_size,
        spectral.hop(),
        spectral.rolloff_ratio
    );

    match &args.command {
        Command::Analyze { paths, channels } => {
            let files = collect_wav_files(paths);
            if files.is_empty() {
                println!("{}", "No WAV files found!".red());
                return Ok(());
            }
            info!("analyzing {} file(s)", files.len());

            for file in files {
                let mut audio = decode_file(&file)
                    .with_context(|| format!("Failed to decode {}", file.display()))?;
                info!(
                    "{}: {} channel(s), {:.2}s at {} Hz",
                    file.display(),
                    audio.num_channels(),
                    audio.duration_secs(),
                    audio.sample_rate
                );
                if let Some(expected) = channels.expect_channels {
                    audio.channels = conform_channels(audio.channels, expected, channels.policy())
                        .with_context(|| format!("Channel layout mismatch in {}", file.display()))?;
                }

                let report = analyzer
                    .analyze(&audio.channels, audio.sample_rate)
                    .with_context(|| format!("Failed to analyze {}", file.display()))?;
                emit(&file.display().to_string(), &report, &args)?;
            }
        }

        Command::Probe {
            signal,
            freq,
            seed,
            input,
            duration,
            sample_rate,
            channels,
            downmix,
            write,
            bits,
        } => {
            let signal = test_signal(*signal, *freq, *seed, input.as_ref())?;
            info!("rendering {} signal", signal.name());
            let (buffers, rate) = signal
                .render(*sample_rate, *duration, *channels, policy_for(*downmix))
                .with_context(|| format!("Failed to render test signal: {}", signal))?;

            if let Some(path) = write {
                write_wav(path, &buffers, rate, *bits)?;
            }

            let report = analyzer.analyze(&buffers, rate)?;
            emit(&signal.to_string(), &report, &args)?;
        }
    }

    Ok(())
}

fn write_wav(path: &Path, buffers: &[Vec<f32>], sample_rate: u32, bits: u16) -> Result<()> {
    if buffers.is_empty() {
        bail!("Nothing to write: signal has 0 channels");
    }
    let bytes = encode(buffers, sample_rate, bits)?;
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn emit(source: &str, report: &GlobalReport, args: &Cli) -> Result<()> {
    if args.json {
        println!("{}", format_json(source, report)?);
    } else {
        println!("{}", format_report(source, report, args.verbose));
    }
    Ok(())
}
