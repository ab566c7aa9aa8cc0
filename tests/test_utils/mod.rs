#![allow(dead_code)]

use rendercheckr::report::{GlobalReport, SignalReport};
use std::path::PathBuf;
use std::process::Command;

pub const SAMPLE_RATE: u32 = 44100;

pub fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rendercheckr"))
}

pub fn run_rendercheckr() -> Command {
    let mut cmd = Command::new(binary_path());
    // Keep the environment from overriding flags under test
    cmd.env_remove("RENDERCHECKR_FRAME_SIZE")
        .env_remove("RENDERCHECKR_HOP_SIZE")
        .env_remove("RENDERCHECKR_ROLLOFF_RATIO")
        .env_remove("RUST_LOG");
    cmd
}

/// Scratch directory under the cargo target dir
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

pub fn assert_signal_invariants(signal: &SignalReport) {
    assert!(signal.max_amplitude >= 0.0 && signal.max_amplitude.is_finite());
    assert!(signal.rms >= 0.0 && signal.rms <= signal.max_amplitude + 1e-6);

    let f = &signal.features;
    assert!((0.0..=1.0).contains(&f.zero_crossing_rate));
    assert!((0.0..=1.0).contains(&f.clipping_ratio));
    assert!(f.dc_offset.is_finite());
    assert!(f.crest_factor.is_finite() && f.crest_factor >= 0.0);

    let s = &f.spectral;
    for value in [
        s.spectral_centroid,
        s.spectral_bandwidth,
        s.spectral_rolloff,
        s.spectral_flatness,
        s.spectral_flux,
    ] {
        match value {
            Some(v) => assert!(v.is_finite(), "non-finite spectral value"),
            None => assert!(!s.spectral_available),
        }
    }
}

pub fn assert_report_invariants(report: &GlobalReport) {
    assert_signal_invariants(&report.mix);
    assert_eq!(report.channels.len(), report.num_outputs);
    for (i, channel) in report.channels.iter().enumerate() {
        assert_eq!(channel.index, i);
        assert_signal_invariants(&channel.signal);
    }
}
