//! Audio format validation and PCM conversion.
//!
//! The native engine accepts exactly one input format: 16 kHz mono 32-bit
//! float PCM. This module validates an incoming stream's descriptor against
//! the required source profile (16 kHz mono signed 16-bit little-endian PCM)
//! and reinterprets the byte stream into float samples. Anything else is
//! rejected; no resampling is attempted.

pub mod wav;

use serde::{Deserialize, Serialize};
use std::io::Read;

/// Sample rate required by the engine, in Hz.
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Scale mapping full-scale signed 16-bit samples onto ±1.0.
const PCM_S16_SCALE: f32 = 1.0 / 32_767.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PcmEncoding {
    SignedInt,
    UnsignedInt,
    Float,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

/// Descriptor for a raw PCM stream, carried alongside the bytes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AudioFormat {
    pub encoding: PcmEncoding,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channels: u16,
    /// Bytes per frame (one sample across all channels).
    pub frame_size: u16,
    /// Frames per second; equal to `sample_rate` for uncompressed PCM.
    pub frame_rate: u32,
    pub byte_order: ByteOrder,
}

impl AudioFormat {
    /// The only input profile the converter accepts.
    pub const fn pcm_s16_mono_16khz() -> Self {
        Self {
            encoding: PcmEncoding::SignedInt,
            sample_rate: WHISPER_SAMPLE_RATE,
            bits_per_sample: 16,
            channels: 1,
            frame_size: 2,
            frame_rate: WHISPER_SAMPLE_RATE,
            byte_order: ByteOrder::Little,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("input audio must be 16 kHz mono signed 16-bit little-endian PCM")]
    UnsupportedFormat,

    #[error("stream ends mid-frame: {len} bytes is not a whole number of 16-bit frames")]
    TruncatedFrame { len: usize },

    #[error("failed to read audio stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid wav file: {0}")]
    Wav(#[from] hound::Error),
}

/// Returns true iff the descriptor matches 16 kHz mono signed 16-bit
/// little-endian PCM. Every field must match; no coercion is attempted.
pub fn is_pcm_s16_mono(format: &AudioFormat) -> bool {
    format.frame_rate == WHISPER_SAMPLE_RATE
        && format.frame_size == 2
        && format.sample_rate == WHISPER_SAMPLE_RATE
        && format.bits_per_sample == 16
        && format.byte_order == ByteOrder::Little
        && format.channels == 1
        && format.encoding == PcmEncoding::SignedInt
}

/// Scales signed 16-bit samples onto ±1.0, preserving order.
pub fn pcm_s16_to_f32(samples: &[i16]) -> Vec<f32> {
    samples
        .iter()
        .map(|&s| f32::from(s) * PCM_S16_SCALE)
        .collect()
}

/// Converts a 16 kHz mono signed 16-bit PCM stream into float samples.
///
/// The whole stream is read into memory before conversion, so peak memory is
/// proportional to clip duration; this is intended for short clips, not long
/// recordings. The reader is consumed and dropped on every exit path,
/// including failure.
pub fn pcm_s16_mono_to_f32<R: Read>(
    mut stream: R,
    format: &AudioFormat,
) -> Result<Vec<f32>, AudioError> {
    if !is_pcm_s16_mono(format) {
        return Err(AudioError::UnsupportedFormat);
    }

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw)?;

    if !raw.len().is_multiple_of(2usize) {
        return Err(AudioError::TruncatedFrame { len: raw.len() });
    }

    let samples: Vec<i16> = raw
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect();

    Ok(pcm_s16_to_f32(&samples))
}
