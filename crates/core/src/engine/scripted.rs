//! Scripted in-memory engine for exercising the session lifecycle in tests.
//!
//! Hands out fake handles, records every allocation and free, and replays a
//! configured segment table. Clones share state so a test can keep a copy of
//! the engine it moved into a session and inspect the ledger afterwards.

use super::{NativeEngine, SamplingStrategy};
use crate::handle::{ContextParamsHandle, FullParamsHandle, InferenceContextHandle};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ScriptedSegment {
    pub text: String,
    pub t0: i64,
    pub t1: i64,
}

impl ScriptedSegment {
    pub fn new(text: &str, t0: i64, t1: i64) -> Self {
        Self {
            text: text.to_owned(),
            t0,
            t1,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    next_handle: usize,
    live: BTreeSet<usize>,
    allocations: usize,
    freed_full_params: usize,
    freed_context_params: usize,
    freed_contexts: usize,
    invalid_free: bool,
    fail_context_params: bool,
    fail_model_load: bool,
    full_status: i32,
    segments: Vec<ScriptedSegment>,
    last_sample_count: Option<usize>,
    strategy_selector: Option<i32>,
}

#[derive(Clone, Debug)]
pub(crate) struct ScriptedEngine {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub fn with_segments(segments: Vec<ScriptedSegment>) -> Self {
        let engine = Self::new();
        engine.inner.lock().unwrap().segments = segments;
        engine
    }

    pub fn failing_model_load() -> Self {
        let engine = Self::new();
        engine.inner.lock().unwrap().fail_model_load = true;
        engine
    }

    pub fn failing_context_params() -> Self {
        let engine = Self::new();
        engine.inner.lock().unwrap().fail_context_params = true;
        engine
    }

    pub fn failing_full(status: i32) -> Self {
        let engine = Self::new();
        engine.inner.lock().unwrap().full_status = status;
        engine
    }

    fn alloc(&self) -> usize {
        let mut inner = self.inner.lock().unwrap();
        inner.next_handle += 1;
        let raw = inner.next_handle;
        inner.live.insert(raw);
        inner.allocations += 1;
        raw
    }

    fn release(&self, raw: usize) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.live.remove(&raw) {
            true
        } else {
            inner.invalid_free = true;
            false
        }
    }

    pub fn allocations(&self) -> usize {
        self.inner.lock().unwrap().allocations
    }

    pub fn live_handles(&self) -> usize {
        self.inner.lock().unwrap().live.len()
    }

    pub fn freed_counts(&self) -> (usize, usize, usize) {
        let inner = self.inner.lock().unwrap();
        (
            inner.freed_full_params,
            inner.freed_context_params,
            inner.freed_contexts,
        )
    }

    /// True if a free was ever attempted on a handle that was not live.
    pub fn saw_invalid_free(&self) -> bool {
        self.inner.lock().unwrap().invalid_free
    }

    pub fn last_sample_count(&self) -> Option<usize> {
        self.inner.lock().unwrap().last_sample_count
    }

    pub fn strategy_selector(&self) -> Option<i32> {
        self.inner.lock().unwrap().strategy_selector
    }
}

impl NativeEngine for ScriptedEngine {
    fn context_default_params(&self) -> Option<ContextParamsHandle> {
        if self.inner.lock().unwrap().fail_context_params {
            return None;
        }
        Some(ContextParamsHandle::from_raw(self.alloc()))
    }

    fn full_default_params(&self, strategy: SamplingStrategy) -> Option<FullParamsHandle> {
        self.inner.lock().unwrap().strategy_selector = Some(strategy.selector());
        Some(FullParamsHandle::from_raw(self.alloc()))
    }

    fn init_from_file(
        &self,
        _model_path: &Path,
        params: &ContextParamsHandle,
    ) -> Option<InferenceContextHandle> {
        assert!(
            self.inner.lock().unwrap().live.contains(&params.as_raw()),
            "init_from_file called with a freed params handle"
        );
        if self.inner.lock().unwrap().fail_model_load {
            return None;
        }
        Some(InferenceContextHandle::from_raw(self.alloc()))
    }

    fn full(
        &self,
        ctx: &InferenceContextHandle,
        params: &FullParamsHandle,
        samples: &[f32],
    ) -> i32 {
        let mut inner = self.inner.lock().unwrap();
        assert!(inner.live.contains(&ctx.as_raw()), "full on freed context");
        assert!(inner.live.contains(&params.as_raw()), "full with freed params");
        inner.last_sample_count = Some(samples.len());
        if inner.full_status < 0 {
            inner.full_status
        } else if samples.is_empty() {
            0
        } else {
            inner.segments.len() as i32
        }
    }

    fn n_segments(&self, _ctx: &InferenceContextHandle) -> i32 {
        let inner = self.inner.lock().unwrap();
        match inner.last_sample_count {
            Some(0) | None => 0,
            Some(_) => inner.segments.len() as i32,
        }
    }

    fn segment_text(&self, _ctx: &InferenceContextHandle, segment: i32) -> String {
        self.inner.lock().unwrap().segments[segment as usize].text.clone()
    }

    fn segment_t0(&self, _ctx: &InferenceContextHandle, segment: i32) -> i64 {
        self.inner.lock().unwrap().segments[segment as usize].t0
    }

    fn segment_t1(&self, _ctx: &InferenceContextHandle, segment: i32) -> i64 {
        self.inner.lock().unwrap().segments[segment as usize].t1
    }

    fn free_params(&self, params: FullParamsHandle) {
        if self.release(params.as_raw()) {
            self.inner.lock().unwrap().freed_full_params += 1;
        }
    }

    fn free_context_params(&self, params: ContextParamsHandle) {
        if self.release(params.as_raw()) {
            self.inner.lock().unwrap().freed_context_params += 1;
        }
    }

    fn free(&self, ctx: InferenceContextHandle) {
        if self.release(ctx.as_raw()) {
            self.inner.lock().unwrap().freed_contexts += 1;
        }
    }
}
