// src/core/decoder.rs
//
// Linear PCM WAV decoding/encoding and channel-count reconciliation.
// Uses hound for the container; samples are normalized to [-1.0, 1.0].

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, warn};
use std::io::Cursor;
use std::path::Path;

use super::analyzer::mixdown;
use crate::error::{Error, Result};

/// Decoded audio, one buffer per channel
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Channel-major samples normalized by the container's full scale
    pub channels: Vec<Vec<f32>>,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl DecodedAudio {
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames() as f64 / self.sample_rate as f64
    }
}

/// Full-scale divisor for a supported integer bit depth
fn full_scale(bits_per_sample: u16) -> Result<f64> {
    match bits_per_sample {
        8 => Ok(128.0),
        16 => Ok(32768.0),
        32 => Ok(2_147_483_648.0),
        other => Err(Error::UnsupportedFormat(format!(
            "{}-bit PCM is not supported (expected 8, 16 or 32)",
            other
        ))),
    }
}

/// Decode a WAV container held in memory.
///
/// 8-bit data is unsigned in the container and comes back offset-centered.
pub fn decode(bytes: &[u8]) -> Result<DecodedAudio> {
    let mut reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int {
        return Err(Error::UnsupportedFormat(
            "IEEE float samples are not linear PCM".into(),
        ));
    }
    let scale = full_scale(spec.bits_per_sample)?;

    let num_channels = spec.channels as usize;
    if num_channels == 0 {
        return Err(Error::UnsupportedFormat("container reports 0 channels".into()));
    }

    // The header's length is untrusted; the buffer bounds what can be read
    let frames = (reader.duration() as usize).min(bytes.len() / num_channels);
    let mut channels: Vec<Vec<f32>> = (0..num_channels)
        .map(|_| Vec::with_capacity(frames))
        .collect();

    for (i, sample) in reader.samples::<i32>().enumerate() {
        let value = sample? as f64 / scale;
        channels[i % num_channels].push(value as f32);
    }

    // A trailing partial frame leaves the last channels one sample short
    let shortest = channels.iter().map(Vec::len).min().unwrap_or(0);
    if channels.iter().any(|c| c.len() != shortest) {
        warn!("dropping incomplete trailing frame");
        for channel in &mut channels {
            channel.truncate(shortest);
        }
    }

    debug!(
        "decoded {} channel(s) x {} frames, {}-bit at {} Hz",
        num_channels, shortest, spec.bits_per_sample, spec.sample_rate
    );

    Ok(DecodedAudio {
        channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
    })
}

/// Read and decode a local WAV file
pub fn decode_file(path: &Path) -> Result<DecodedAudio> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

/// Encode channel-major buffers as an integer PCM WAV container.
///
/// Channels are truncated to the shortest and samples clamped to [-1, 1].
pub fn encode<C: AsRef<[f32]>>(channels: &[C], sample_rate: u32, bits_per_sample: u16) -> Result<Vec<u8>> {
    let scale = full_scale(bits_per_sample)?;
    if channels.is_empty() {
        return Err(Error::InvalidConfig("cannot encode zero channels".into()));
    }
    if sample_rate == 0 {
        return Err(Error::InvalidConfig("sample_rate must be positive".into()));
    }

    let num_channels = u16::try_from(channels.len()).map_err(|_| {
        Error::UnsupportedFormat(format!("{} channels exceeds the WAV limit", channels.len()))
    })?;
    let spec = WavSpec {
        channels: num_channels,
        sample_rate,
        bits_per_sample,
        sample_format: SampleFormat::Int,
    };

    let (min, max) = (-scale, scale - 1.0);
    let frames = channels.iter().map(|c| c.as_ref().len()).min().unwrap_or(0);

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for i in 0..frames {
            for channel in channels {
                let x = (channel.as_ref()[i] as f64).clamp(-1.0, 1.0);
                let value = (x * scale).round().clamp(min, max) as i32;
                writer.write_sample(value)?;
            }
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}

/// How to reconcile a source's channel count with what a DSP graph expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelPolicy {
    /// Counts must match
    #[default]
    Exact,
    /// Allow mixing down to mono or duplicating a mono source
    Downmix,
}

/// Reshape `channels` to `expected` channels under `policy`.
pub fn conform_channels(
    channels: Vec<Vec<f32>>,
    expected: usize,
    policy: ChannelPolicy,
) -> Result<Vec<Vec<f32>>> {
    let actual = channels.len();
    if actual == expected {
        return Ok(channels);
    }

    match policy {
        ChannelPolicy::Downmix if expected == 1 && actual > 1 => Ok(vec![mixdown(&channels)]),
        ChannelPolicy::Downmix if actual == 1 && expected > 1 => Ok(vec![channels[0].clone(); expected]),
        _ => Err(Error::UnsupportedFormat(format!(
            "source has {} channel(s) but {} expected",
            actual, expected
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(spec: WavSpec, samples: &[i32]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    fn int_spec(channels: u16, bits: u16) -> WavSpec {
        WavSpec {
            channels,
            sample_rate: 8000,
            bits_per_sample: bits,
            sample_format: SampleFormat::Int,
        }
    }

    #[test]
    fn test_deinterleave_16_bit() {
        let bytes = wav_bytes(int_spec(2, 16), &[16384, -16384, 32767, -32768]);
        let audio = decode(&bytes).unwrap();
        assert_eq!(audio.num_channels(), 2);
        assert_eq!(audio.sample_rate, 8000);
        assert_eq!(audio.channels[0], vec![0.5, 32767.0 / 32768.0]);
        assert_eq!(audio.channels[1], vec![-0.5, -1.0]);
    }

    #[test]
    fn test_8_bit_is_centered() {
        let bytes = wav_bytes(int_spec(1, 8), &[0, 64, -128, 127]);
        let audio = decode(&bytes).unwrap();
        assert_eq!(audio.channels[0], vec![0.0, 0.5, -1.0, 127.0 / 128.0]);
    }

    #[test]
    fn test_32_bit_scale() {
        let bytes = wav_bytes(int_spec(1, 32), &[i32::MIN, 1 << 30]);
        let audio = decode(&bytes).unwrap();
        assert_eq!(audio.channels[0], vec![-1.0, 0.5]);
    }

    #[test]
    fn test_24_bit_rejected() {
        let bytes = wav_bytes(int_spec(1, 24), &[0, 1000]);
        assert!(matches!(decode(&bytes), Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_float_rejected() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            writer.write_sample(0.25f32).unwrap();
            writer.finalize().unwrap();
        }
        assert!(matches!(
            decode(&cursor.into_inner()),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_oversized_data_length_is_wav_error() {
        // 8 channels, 8-bit, data chunk claiming ~4 GiB but holding 16 bytes
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&52u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&8u16.to_le_bytes());
        bytes.extend_from_slice(&8000u32.to_le_bytes());
        bytes.extend_from_slice(&64000u32.to_le_bytes());
        bytes.extend_from_slice(&8u16.to_le_bytes());
        bytes.extend_from_slice(&8u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&0xFFFF_FFF8u32.to_le_bytes());
        bytes.extend_from_slice(&[128u8; 16]);

        assert!(matches!(decode(&bytes), Err(Error::Wav(_))));
    }

    #[test]
    fn test_duration() {
        let audio = decode(&wav_bytes(int_spec(2, 16), &[0; 8000])).unwrap();
        assert_eq!(audio.num_frames(), 4000);
        assert!((audio.duration_secs() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_garbage_is_wav_error() {
        assert!(matches!(decode(b"not a wav file"), Err(Error::Wav(_))));
    }

    #[test]
    fn test_encode_rejects_bad_input() {
        let empty: Vec<Vec<f32>> = Vec::new();
        assert!(matches!(encode(&empty, 44100, 16), Err(Error::InvalidConfig(_))));
        assert!(matches!(
            encode(&[vec![0.0f32]], 44100, 24),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_encode_clamps_overflow() {
        let bytes = encode(&[vec![2.0f32, -2.0]], 8000, 16).unwrap();
        let audio = decode(&bytes).unwrap();
        assert_eq!(audio.channels[0], vec![32767.0 / 32768.0, -1.0]);
    }

    #[test]
    fn test_conform_exact() {
        let stereo = vec![vec![0.5f32; 4], vec![0.0f32; 4]];
        assert_eq!(conform_channels(stereo.clone(), 2, ChannelPolicy::Exact).unwrap(), stereo);
        assert!(matches!(
            conform_channels(stereo, 1, ChannelPolicy::Exact),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_conform_downmix() {
        let stereo = vec![vec![0.5f32; 4], vec![0.0f32; 4]];
        let mono = conform_channels(stereo.clone(), 1, ChannelPolicy::Downmix).unwrap();
        assert_eq!(mono, vec![vec![0.25f32; 4]]);

        let widened = conform_channels(vec![vec![0.1f32; 3]], 2, ChannelPolicy::Downmix).unwrap();
        assert_eq!(widened, vec![vec![0.1f32; 3], vec![0.1f32; 3]]);

        assert!(conform_channels(stereo, 3, ChannelPolicy::Downmix).is_err());
    }
}
