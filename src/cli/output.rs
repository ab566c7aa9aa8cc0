//! Output formatting for CLI results

use colorful::Colorful;
use serde::Serialize;

use crate::report::{GlobalReport, SignalReport};

/// JSON payload: a success marker and source around the flattened report
#[derive(Serialize)]
struct JsonEnvelope<'a> {
    status: &'static str,
    source: &'a str,
    #[serde(flatten)]
    report: &'a GlobalReport,
}

/// Serialize a report as pretty JSON
pub fn format_json(source: &str, report: &GlobalReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonEnvelope {
        status: "success",
        source,
        report,
    })
}

/// Format a report for terminal output
pub fn format_report(source: &str, report: &GlobalReport, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("Source: {}\n", source.cyan()));
    output.push_str(&format!("  Sample Rate: {} Hz\n", report.sample_rate));
    output.push_str(&format!("  Channels: {}\n", report.num_outputs));
    output.push_str(&format!("  Duration: {:.2}s\n", report.duration_secs()));

    if report.all_silent() {
        output.push_str(&format!("  Status: {}\n", "✗ SILENT".red()));
    } else {
        output.push_str(&format!("  Status: {}\n", "✓ SIGNAL".green()));
    }

    push_signal(&mut output, "Mix", &report.mix, verbose);
    for channel in &report.channels {
        push_signal(&mut output, &format!("Ch {}", channel.index), &channel.signal, verbose);
    }

    output
}

fn push_signal(output: &mut String, label: &str, signal: &SignalReport, verbose: bool) {
    output.push_str(&format!(
        "  {:<5} peak {:.4}  rms {:.4}  [{}]\n",
        label, signal.max_amplitude, signal.rms, signal.waveform_ascii
    ));

    if !verbose {
        return;
    }

    let f = &signal.features;
    output.push_str(&format!(
        "        dc {:+.5}  zcr {:.4}  crest {:.3}  clip {:.4}\n",
        f.dc_offset, f.zero_crossing_rate, f.crest_factor, f.clipping_ratio
    ));

    let s = &f.spectral;
    if s.spectral_available {
        output.push_str(&format!(
            "        centroid {} Hz  bandwidth {} Hz  rolloff {} Hz  flatness {}  flux {}\n",
            fmt_opt(s.spectral_centroid, 1),
            fmt_opt(s.spectral_bandwidth, 1),
            fmt_opt(s.spectral_rolloff, 1),
            fmt_opt(s.spectral_flatness, 4),
            fmt_opt(s.spectral_flux, 4),
        ));
    } else {
        output.push_str("        spectral: unavailable\n");
    }
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "n/a".to_string(),
    }
}
