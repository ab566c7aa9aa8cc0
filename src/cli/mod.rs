// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use args::{policy_for, test_signal, AnalysisArgs, ChannelArgs, Cli, Command, SignalKind};
pub use output::{format_json, format_report};

/// Expand inputs into WAV files; directories are walked recursively
pub fn collect_wav_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| e.into_path())
                .filter(|p| p.is_file() && is_wav(p))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            // Explicit file arguments are kept so missing paths surface as errors
            files.push(path.clone());
        }
    }

    files
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("wav") || e.eq_ignore_ascii_case("wave"))
        .unwrap_or(false)
}
