//! Transcription session: ownership and lifecycle of the native resources.
//!
//! A [`WhisperSession`] owns one handle of each kind — full-run parameters,
//! context parameters and the inference context — and moves through exactly
//! two states: Open (handles present) and Released (handles freed). Release
//! is idempotent and also runs on drop, so the three frees happen exactly
//! once no matter how the session goes out of scope.

use crate::engine::{NativeEngine, SamplingStrategy};
use crate::handle::{ContextParamsHandle, FullParamsHandle, InferenceContextHandle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("model file does not exist: {0}")]
    ModelNotFound(PathBuf),

    #[error("model file is not readable: {path}")]
    ModelUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load whisper model: {0}")]
    ModelLoadFailed(PathBuf),

    #[error("session is already released")]
    SessionClosed,

    #[error("whisper inference failed with status {0}")]
    InferenceFailed(i32),

    #[error("segment index {index} out of range for {count} segments")]
    SegmentOutOfRange { index: usize, count: usize },
}

/// One span of transcribed speech. Timestamps are in the engine's 10 ms
/// units, relative to the start of the transcribed buffer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub text: String,
    pub start: i64,
    pub end: i64,
}

#[derive(Debug)]
struct Resources {
    full_params: FullParamsHandle,
    context_params: ContextParamsHandle,
    context: InferenceContextHandle,
}

/// A loaded model plus the parameter allocations needed to run it.
///
/// `transcribe` takes `&mut self`, so overlapping runs on one session are a
/// compile error rather than a caller obligation; the native engine is not
/// reentrant per context. Distinct sessions are independent.
#[derive(Debug)]
pub struct WhisperSession<E: NativeEngine> {
    engine: E,
    resources: Option<Resources>,
    segment_count: usize,
}

impl<E: NativeEngine> WhisperSession<E> {
    /// Opens a session with the greedy sampling strategy.
    pub fn open(engine: E, model: impl AsRef<Path>) -> Result<Self, SessionError> {
        Self::open_with_strategy(engine, model, SamplingStrategy::Greedy)
    }

    /// Opens a session by loading the ggml model at `model`.
    ///
    /// The path is checked for existence and readability before any native
    /// allocation, so those failures require no cleanup. If any of the three
    /// allocations fails, the ones already made are freed before the error
    /// is returned; a half-open session never escapes.
    pub fn open_with_strategy(
        engine: E,
        model: impl AsRef<Path>,
        strategy: SamplingStrategy,
    ) -> Result<Self, SessionError> {
        let model = model.as_ref();

        if !model.exists() {
            return Err(SessionError::ModelNotFound(model.to_path_buf()));
        }
        // Readability probe; the handle is dropped immediately.
        fs::File::open(model).map_err(|source| SessionError::ModelUnreadable {
            path: model.to_path_buf(),
            source,
        })?;

        let full_params = engine
            .full_default_params(strategy)
            .ok_or_else(|| SessionError::ModelLoadFailed(model.to_path_buf()))?;

        let context_params = match engine.context_default_params() {
            Some(handle) => handle,
            None => {
                engine.free_params(full_params);
                return Err(SessionError::ModelLoadFailed(model.to_path_buf()));
            }
        };

        let context = match engine.init_from_file(model, &context_params) {
            Some(handle) => handle,
            None => {
                engine.free_params(full_params);
                engine.free_context_params(context_params);
                return Err(SessionError::ModelLoadFailed(model.to_path_buf()));
            }
        };

        debug!(model = %model.display(), "whisper session opened");

        Ok(Self {
            engine,
            resources: Some(Resources {
                full_params,
                context_params,
                context,
            }),
            segment_count: 0,
        })
    }

    fn resources(&self) -> Result<&Resources, SessionError> {
        self.resources.as_ref().ok_or(SessionError::SessionClosed)
    }

    /// Runs the model over `samples` (16 kHz mono f32, see [`crate::audio`])
    /// and returns the number of segments produced. An empty buffer is legal
    /// and yields zero segments.
    ///
    /// Blocks for the duration of the run. On [`SessionError::InferenceFailed`]
    /// the session stays open, but segment data from earlier runs is
    /// invalidated.
    pub fn transcribe(&mut self, samples: &[f32]) -> Result<usize, SessionError> {
        let resources = self.resources.as_ref().ok_or(SessionError::SessionClosed)?;

        let status = self
            .engine
            .full(&resources.context, &resources.full_params, samples);
        if status < 0 {
            self.segment_count = 0;
            warn!(status, "whisper inference failed");
            return Err(SessionError::InferenceFailed(status));
        }

        let count = self.engine.n_segments(&resources.context).max(0) as usize;
        self.segment_count = count;
        debug!(samples = samples.len(), segments = count, "transcription complete");

        Ok(count)
    }

    /// Number of segments from the most recent transcribe call.
    pub fn segment_count(&self) -> Result<usize, SessionError> {
        self.resources()?;
        Ok(self.segment_count)
    }

    fn check_index(&self, index: usize) -> Result<i32, SessionError> {
        if index >= self.segment_count {
            return Err(SessionError::SegmentOutOfRange {
                index,
                count: self.segment_count,
            });
        }
        Ok(index as i32)
    }

    /// Text of the given segment from the most recent transcribe call.
    pub fn segment_text(&self, index: usize) -> Result<String, SessionError> {
        let resources = self.resources()?;
        let index = self.check_index(index)?;
        Ok(self.engine.segment_text(&resources.context, index))
    }

    /// Start timestamp of the given segment, in 10 ms units.
    pub fn segment_start(&self, index: usize) -> Result<i64, SessionError> {
        let resources = self.resources()?;
        let index = self.check_index(index)?;
        Ok(self.engine.segment_t0(&resources.context, index))
    }

    /// End timestamp of the given segment, in 10 ms units.
    pub fn segment_end(&self, index: usize) -> Result<i64, SessionError> {
        let resources = self.resources()?;
        let index = self.check_index(index)?;
        Ok(self.engine.segment_t1(&resources.context, index))
    }

    /// Collects every segment of the most recent transcribe call.
    pub fn segments(&self) -> Result<Vec<Segment>, SessionError> {
        let resources = self.resources()?;
        let mut out = Vec::with_capacity(self.segment_count);
        for index in 0..self.segment_count as i32 {
            out.push(Segment {
                text: self.engine.segment_text(&resources.context, index),
                start: self.engine.segment_t0(&resources.context, index),
                end: self.engine.segment_t1(&resources.context, index),
            });
        }
        Ok(out)
    }

    /// True while the session still owns its native resources.
    pub fn is_open(&self) -> bool {
        self.resources.is_some()
    }

    /// Frees the full-run parameters, context parameters and inference
    /// context, in that order, exactly once. Further calls are no-ops; any
    /// other operation afterwards fails with [`SessionError::SessionClosed`].
    pub fn close(&mut self) {
        if let Some(resources) = self.resources.take() {
            self.engine.free_params(resources.full_params);
            self.engine.free_context_params(resources.context_params);
            self.engine.free(resources.context);
            debug!("whisper session released");
        }
    }
}

impl<E: NativeEngine> Drop for WhisperSession<E> {
    fn drop(&mut self) {
        self.close();
    }
}
