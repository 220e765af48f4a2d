//! Raw FFI declarations for the whisper.cpp C API subset used by the safe
//! layer in `whisper-bindings`.
//!
//! Only the by-ref parameter helpers are declared so that both parameter
//! structs stay fully opaque on the Rust side. The two calls whose native
//! counterparts take a params struct by value (`whisper_init_from_file_with_params`
//! and `whisper_full`) are reached through thin C glue entry points that
//! accept the pointer and dereference it on the native side.
//!
//! Nothing here is safe to call with a pointer that has already been freed;
//! the lifecycle discipline lives entirely in the safe layer. Locating and
//! linking the native library is the embedder's concern.

#![deny(warnings)]
#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_float, c_int, c_void};

/// Opaque inference context.
pub type whisper_context = c_void;

/// Opaque context parameters.
pub type whisper_context_params = c_void;

/// Opaque full-run parameters.
pub type whisper_full_params = c_void;

extern "C" {
    /// Allocates default context parameters. The caller owns the returned
    /// pointer and must release it with [`whisper_free_context_params`].
    pub fn whisper_context_default_params_by_ref() -> *mut whisper_context_params;

    /// Allocates default full-run parameters for the given sampling strategy
    /// (0 = greedy, 1 = beam search). The caller owns the returned pointer
    /// and must release it with [`whisper_free_params`].
    pub fn whisper_full_default_params_by_ref(strategy: c_int) -> *mut whisper_full_params;

    /// Loads a ggml model from `path_model`, allocating (almost) all memory
    /// needed for it. Returns null on failure.
    pub fn whisper_bind_init_from_file_with_params(
        path_model: *const c_char,
        params: *const whisper_context_params,
    ) -> *mut whisper_context;

    /// Runs the full pipeline: PCM -> log mel spectrogram -> encoder ->
    /// decoder -> text. Returns a negative status on failure. Not thread
    /// safe for the same context.
    pub fn whisper_bind_full(
        ctx: *mut whisper_context,
        params: *const whisper_full_params,
        samples: *const c_float,
        n_samples: c_int,
    ) -> c_int;

    /// Number of text segments generated by the last `whisper_bind_full`
    /// call on this context.
    pub fn whisper_full_n_segments(ctx: *mut whisper_context) -> c_int;

    /// Text of the given segment. The returned string is owned by the
    /// context and is invalidated by the next full run.
    pub fn whisper_full_get_segment_text(
        ctx: *mut whisper_context,
        i_segment: c_int,
    ) -> *const c_char;

    /// Start timestamp of the given segment, in 10 ms units.
    pub fn whisper_full_get_segment_t0(ctx: *mut whisper_context, i_segment: c_int) -> i64;

    /// End timestamp of the given segment, in 10 ms units.
    pub fn whisper_full_get_segment_t1(ctx: *mut whisper_context, i_segment: c_int) -> i64;

    /// Frees an inference context. Must be called at most once per pointer.
    pub fn whisper_free(ctx: *mut whisper_context);

    /// Frees full-run parameters. Must be called at most once per pointer.
    pub fn whisper_free_params(params: *mut whisper_full_params);

    /// Frees context parameters. Must be called at most once per pointer.
    pub fn whisper_free_context_params(params: *mut whisper_context_params);
}
