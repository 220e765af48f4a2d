//! Boundary to the native whisper engine.
//!
//! [`NativeEngine`] is the narrow seam the session talks through: the
//! allocation, inference, query and free calls of the native library,
//! nothing more. Keeping it a trait makes the session testable against a
//! scripted double and keeps every `unsafe` block in one implementation.

#[cfg(feature = "whisper-cpp")]
mod ffi;

#[cfg(test)]
pub(crate) mod scripted;

#[cfg(feature = "whisper-cpp")]
pub use ffi::WhisperCppEngine;

use crate::handle::{ContextParamsHandle, FullParamsHandle, InferenceContextHandle};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Decoding search strategy selector for the full-run parameters.
///
/// Only [`SamplingStrategy::Greedy`] is exercised by the session's default
/// construction path.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SamplingStrategy {
    Greedy,
    BeamSearch,
}

impl SamplingStrategy {
    /// The integer selector the native API expects.
    pub fn selector(self) -> i32 {
        match self {
            SamplingStrategy::Greedy => 0,
            SamplingStrategy::BeamSearch => 1,
        }
    }
}

/// The set of native calls the session depends on.
///
/// Misuse of the native library (a freed handle passed back in, overlapping
/// full runs on one context) can crash the process; implementations do plain
/// marshalling and the session supplies the lifecycle discipline.
pub trait NativeEngine {
    /// Allocates default context parameters. `None` means the native
    /// allocation failed.
    fn context_default_params(&self) -> Option<ContextParamsHandle>;

    /// Allocates default full-run parameters for the given strategy.
    fn full_default_params(&self, strategy: SamplingStrategy) -> Option<FullParamsHandle>;

    /// Loads a ggml model file, producing an inference context. May allocate
    /// memory proportional to model size. `None` means the load failed.
    fn init_from_file(
        &self,
        model_path: &Path,
        params: &ContextParamsHandle,
    ) -> Option<InferenceContextHandle>;

    /// Runs the full pipeline over `samples` (16 kHz mono f32). Returns the
    /// native status; negative means failure. Not reentrant per context.
    fn full(
        &self,
        ctx: &InferenceContextHandle,
        params: &FullParamsHandle,
        samples: &[f32],
    ) -> i32;

    /// Number of segments produced by the most recent successful [`Self::full`]
    /// call on this context.
    fn n_segments(&self, ctx: &InferenceContextHandle) -> i32;

    /// Text of the given segment.
    fn segment_text(&self, ctx: &InferenceContextHandle, segment: i32) -> String;

    /// Start timestamp of the given segment, in 10 ms units.
    fn segment_t0(&self, ctx: &InferenceContextHandle, segment: i32) -> i64;

    /// End timestamp of the given segment, in 10 ms units.
    fn segment_t1(&self, ctx: &InferenceContextHandle, segment: i32) -> i64;

    /// Frees full-run parameters. Consumes the handle: it cannot be freed
    /// again or used afterwards.
    fn free_params(&self, params: FullParamsHandle);

    /// Frees context parameters. Consumes the handle.
    fn free_context_params(&self, params: ContextParamsHandle);

    /// Frees an inference context. Consumes the handle.
    fn free(&self, ctx: InferenceContextHandle);
}
