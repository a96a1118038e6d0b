//! Stack growth for recursive matching.
//!
//! Patterns and values are trees of arbitrary depth, and both compilation
//! and matching recurse once per level. Each recursive step runs through
//! [`ensure_sufficient_stack`], which grows the stack on native targets when
//! less than `RED_ZONE` bytes remain. On WASM it is a plain call.

/// Grow when less than this much stack remains (128KB).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
