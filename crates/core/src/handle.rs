//! Typed handles for the three native allocations.
//!
//! The engine hands back raw addresses; wrapping each resource kind in its
//! own newtype makes kind confusion (say, passing context parameters where
//! an inference context is expected) a type error instead of undefined
//! behavior. Handles are deliberately not `Clone`: each one has exactly one
//! owner, and the frees in [`crate::engine::NativeEngine`] consume them by
//! value so a handle cannot be freed twice.

/// Handle to a native `whisper_context_params` allocation.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ContextParamsHandle(usize);

/// Handle to a native `whisper_full_params` allocation.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct FullParamsHandle(usize);

/// Handle to a native `whisper_context` (inference context) allocation.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct InferenceContextHandle(usize);

impl ContextParamsHandle {
    /// Wraps a raw address. Only engine implementations should call this;
    /// a handle built from an arbitrary value is meaningless and unsafe to
    /// pass back into the engine.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// The underlying address, for marshalling back into the engine.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}

impl FullParamsHandle {
    /// Wraps a raw address. See [`ContextParamsHandle::from_raw`].
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// The underlying address, for marshalling back into the engine.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}

impl InferenceContextHandle {
    /// Wraps a raw address. See [`ContextParamsHandle::from_raw`].
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// The underlying address, for marshalling back into the engine.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_underlying_value() {
        assert_eq!(ContextParamsHandle::from_raw(7), ContextParamsHandle::from_raw(7));
        assert_ne!(ContextParamsHandle::from_raw(7), ContextParamsHandle::from_raw(8));
        assert_eq!(InferenceContextHandle::from_raw(7).as_raw(), 7);
    }
}
