//! [`NativeEngine`] implementation over the raw whisper.cpp bindings.
//!
//! All pointer handling lives here. Handles round-trip through `usize`, so
//! every call re-materializes the typed pointer from the handle it was
//! produced with; the session guarantees those handles are still live.

use super::{NativeEngine, SamplingStrategy};
use crate::handle::{ContextParamsHandle, FullParamsHandle, InferenceContextHandle};
use std::ffi::{CStr, CString};
use std::path::Path;
use whisper_bindings_sys as sys;

/// Stateless engine backed by a linked libwhisper.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhisperCppEngine;

impl NativeEngine for WhisperCppEngine {
    fn context_default_params(&self) -> Option<ContextParamsHandle> {
        let ptr = unsafe { sys::whisper_context_default_params_by_ref() };
        if ptr.is_null() {
            None
        } else {
            Some(ContextParamsHandle::from_raw(ptr as usize))
        }
    }

    fn full_default_params(&self, strategy: SamplingStrategy) -> Option<FullParamsHandle> {
        let ptr = unsafe { sys::whisper_full_default_params_by_ref(strategy.selector()) };
        if ptr.is_null() {
            None
        } else {
            Some(FullParamsHandle::from_raw(ptr as usize))
        }
    }

    fn init_from_file(
        &self,
        model_path: &Path,
        params: &ContextParamsHandle,
    ) -> Option<InferenceContextHandle> {
        // Paths that are not valid UTF-8 (or contain NUL) cannot be passed
        // across the C boundary; treat them as a failed load.
        let path = CString::new(model_path.to_str()?).ok()?;
        let ptr = unsafe {
            sys::whisper_bind_init_from_file_with_params(
                path.as_ptr(),
                params.as_raw() as *const sys::whisper_context_params,
            )
        };
        if ptr.is_null() {
            None
        } else {
            Some(InferenceContextHandle::from_raw(ptr as usize))
        }
    }

    fn full(
        &self,
        ctx: &InferenceContextHandle,
        params: &FullParamsHandle,
        samples: &[f32],
    ) -> i32 {
        unsafe {
            sys::whisper_bind_full(
                ctx.as_raw() as *mut sys::whisper_context,
                params.as_raw() as *const sys::whisper_full_params,
                samples.as_ptr(),
                samples.len() as i32,
            )
        }
    }

    fn n_segments(&self, ctx: &InferenceContextHandle) -> i32 {
        unsafe { sys::whisper_full_n_segments(ctx.as_raw() as *mut sys::whisper_context) }
    }

    fn segment_text(&self, ctx: &InferenceContextHandle, segment: i32) -> String {
        let ptr = unsafe {
            sys::whisper_full_get_segment_text(ctx.as_raw() as *mut sys::whisper_context, segment)
        };
        if ptr.is_null() {
            return String::new();
        }
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
    }

    fn segment_t0(&self, ctx: &InferenceContextHandle, segment: i32) -> i64 {
        unsafe {
            sys::whisper_full_get_segment_t0(ctx.as_raw() as *mut sys::whisper_context, segment)
        }
    }

    fn segment_t1(&self, ctx: &InferenceContextHandle, segment: i32) -> i64 {
        unsafe {
            sys::whisper_full_get_segment_t1(ctx.as_raw() as *mut sys::whisper_context, segment)
        }
    }

    fn free_params(&self, params: FullParamsHandle) {
        unsafe { sys::whisper_free_params(params.as_raw() as *mut sys::whisper_full_params) }
    }

    fn free_context_params(&self, params: ContextParamsHandle) {
        unsafe {
            sys::whisper_free_context_params(
                params.as_raw() as *mut sys::whisper_context_params
            )
        }
    }

    fn free(&self, ctx: InferenceContextHandle) {
        unsafe { sys::whisper_free(ctx.as_raw() as *mut sys::whisper_context) }
    }
}
