// src/core/analysis/waveform.rs
//
// Fixed-width ASCII summary of a buffer's amplitude envelope

/// Render `samples` as a strip of `width` glyphs.
///
/// Each glyph summarizes one chunk of `max(1, N / width)` samples:
/// `_` silent, `#` peak above 0.5, `=` above 0.2, `-` anything else.
/// Chunks past the end of the buffer render as `_`.
pub fn ascii_waveform(samples: &[f32], width: usize) -> String {
    if samples.is_empty() || width == 0 {
        return String::new();
    }

    let step = (samples.len() / width).max(1);
    (0..width)
        .map(|i| {
            let start = (i * step).min(samples.len());
            let end = (start + step).min(samples.len());
            classify_chunk(&samples[start..end])
        })
        .collect()
}

fn classify_chunk(chunk: &[f32]) -> char {
    if chunk.is_empty() {
        return '_';
    }
    let max = chunk.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let min = chunk.iter().copied().fold(f32::INFINITY, f32::min);

    if max < 0.01 && min > -0.01 {
        '_'
    } else if max > 0.5 {
        '#'
    } else if max > 0.2 {
        '='
    } else {
        '-'
    }
}
