//! WAV renderer: quantizes float buffers to PCM and writes RIFF/WAVE files.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Result, SynthError};

/// Size of the canonical RIFF/WAVE header written by [`encode_wav`].
pub const WAV_HEADER_LEN: usize = 44;

/// PCM sample width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum BitDepth {
    /// Unsigned 8-bit, silence at 128.
    Eight,
    /// Signed 16-bit little-endian.
    Sixteen,
}

impl BitDepth {
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
        }
    }

    pub fn bytes(self) -> u16 {
        self.bits() / 8
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = String;

    fn try_from(bits: u16) -> std::result::Result<Self, Self::Error> {
        match bits {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            other => Err(format!("unsupported bit depth {other}, expected 8 or 16")),
        }
    }
}

impl From<BitDepth> for u16 {
    fn from(depth: BitDepth) -> u16 {
        depth.bits()
    }
}

/// Integer PCM samples at one of the supported depths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantizedSamples {
    U8(Vec<u8>),
    I16(Vec<i16>),
}

impl QuantizedSamples {
    pub fn bit_depth(&self) -> BitDepth {
        match self {
            QuantizedSamples::U8(_) => BitDepth::Eight,
            QuantizedSamples::I16(_) => BitDepth::Sixteen,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            QuantizedSamples::U8(s) => s.len(),
            QuantizedSamples::I16(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Map samples in [-1, 1] to integer PCM.
///
/// Input is expected to be clipped already; float-to-int casts saturate, so
/// out-of-range input pins to the extremes instead of wrapping.
pub fn quantize(samples: &[f64], depth: BitDepth) -> QuantizedSamples {
    match depth {
        BitDepth::Eight => QuantizedSamples::U8(
            samples
                .iter()
                .map(|&s| ((s * 127.0).round() + 128.0) as u8)
                .collect(),
        ),
        BitDepth::Sixteen => QuantizedSamples::I16(
            samples
                .iter()
                .map(|&s| (s * i16::MAX as f64).round() as i16)
                .collect(),
        ),
    }
}

/// Byte rate, data chunk size and RIFF chunk size for a WAV header.
///
/// Fails when any of them does not fit the header's 32-bit fields.
fn chunk_sizes(
    num_samples: usize,
    depth: BitDepth,
    sample_rate: u32,
    channels: u16,
) -> Result<(u32, u32, u32)> {
    let frame_bytes = channels as u32 * depth.bytes() as u32;
    let byte_rate = sample_rate
        .checked_mul(frame_bytes)
        .ok_or_else(|| SynthError::invalid_int("sample_rate", sample_rate as u64))?;
    let too_long = || SynthError::invalid_int("sample count", num_samples as u64);
    let data_size = u32::try_from(num_samples)
        .ok()
        .and_then(|n| n.checked_mul(frame_bytes))
        .ok_or_else(too_long)?;
    let file_size = data_size.checked_add(36).ok_or_else(too_long)?;
    Ok((byte_rate, data_size, file_size))
}

/// Encode PCM samples to a WAV byte buffer.
pub fn encode_wav(samples: &QuantizedSamples, sample_rate: u32, channels: u16) -> Result<Vec<u8>> {
    let depth = samples.bit_depth();
    let bits_per_sample = depth.bits();
    let block_align = channels * depth.bytes();
    let (byte_rate, data_size, file_size) =
        chunk_sizes(samples.len(), depth, sample_rate, channels)?;

    let mut buf = Vec::with_capacity(WAV_HEADER_LEN + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    match samples {
        QuantizedSamples::U8(s) => buf.extend_from_slice(s),
        QuantizedSamples::I16(s) => {
            for &sample in s {
                buf.extend_from_slice(&sample.to_le_bytes());
            }
        }
    }

    Ok(buf)
}

/// Quantize and encode a mono float buffer in one step.
pub fn render_wav(samples: &[f64], sample_rate: u32, depth: BitDepth) -> Result<Vec<u8>> {
    encode_wav(&quantize(samples, depth), sample_rate, 1)
}

/// Write a mono WAV file.
///
/// The bytes go to a temporary file next to `path` which is then renamed
/// over it, so readers never observe a half-written file.
pub fn write_wav(path: &Path, samples: &QuantizedSamples, sample_rate: u32) -> Result<()> {
    let bytes = encode_wav(samples, sample_rate, 1)?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        bits = samples.bit_depth().bits(),
        "wrote wav"
    );
    Ok(())
}
