#![deny(warnings)]

//! Safe bindings for a whisper.cpp speech-to-text engine.
//!
//! The crate does two things: it owns the lifecycle of the three native
//! allocations a transcription run needs (context parameters, full-run
//! parameters, inference context), and it normalizes input audio into the
//! only format the engine accepts (16 kHz mono f32 samples).
//!
//! ```ignore
//! // Requires the `whisper-cpp` feature and libwhisper at link time.
//! use whisper_bindings::{WhisperCppEngine, WhisperSession};
//!
//! let mut session = WhisperSession::open(WhisperCppEngine, "ggml-tiny.en.bin")?;
//! let samples = whisper_bindings::audio::wav::read_wav_file("clip.wav")?;
//! let segments = session.transcribe(&samples)?;
//! for i in 0..segments {
//!     println!("[{} - {}] {}",
//!         session.segment_start(i)?,
//!         session.segment_end(i)?,
//!         session.segment_text(i)?);
//! }
//! ```

pub mod audio;
pub mod engine;
pub mod handle;
pub mod session;

pub use engine::{NativeEngine, SamplingStrategy};
pub use session::{Segment, SessionError, WhisperSession};

#[cfg(feature = "whisper-cpp")]
pub use engine::WhisperCppEngine;
