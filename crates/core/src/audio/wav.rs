//! WAV file loading for transcription input.
//!
//! Reads a RIFF/WAV file, checks its format against the required profile and
//! returns engine-ready float samples. The same validate-then-convert rules
//! as the raw stream path apply; a 44.1 kHz or stereo file is rejected, not
//! resampled.

use super::{is_pcm_s16_mono, pcm_s16_to_f32, AudioError, AudioFormat, ByteOrder, PcmEncoding};
use std::path::Path;
use tracing::debug;

fn format_from_spec(spec: &hound::WavSpec) -> AudioFormat {
    AudioFormat {
        encoding: match spec.sample_format {
            hound::SampleFormat::Int => PcmEncoding::SignedInt,
            hound::SampleFormat::Float => PcmEncoding::Float,
        },
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        channels: spec.channels,
        frame_size: spec.channels * (spec.bits_per_sample / 8),
        frame_rate: spec.sample_rate,
        // RIFF data is always little-endian.
        byte_order: ByteOrder::Little,
    }
}

/// Loads a 16 kHz mono signed 16-bit WAV file as float samples.
///
/// The whole clip is held in memory, same as
/// [`pcm_s16_mono_to_f32`](super::pcm_s16_mono_to_f32).
pub fn read_wav_file(path: impl AsRef<Path>) -> Result<Vec<f32>, AudioError> {
    let path = path.as_ref();
    let reader = hound::WavReader::open(path)?;
    let format = format_from_spec(&reader.spec());

    if !is_pcm_s16_mono(&format) {
        return Err(AudioError::UnsupportedFormat);
    }

    let samples = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<i16>, hound::Error>>()?;

    debug!(path = %path.display(), frames = samples.len(), "wav clip loaded");

    Ok(pcm_s16_to_f32(&samples))
}
