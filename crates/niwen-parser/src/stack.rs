//! Stack growth for recursive grammar evaluation.
//!
//! Each nested node costs several native frames (node, sequence, composite),
//! so deep but legal inputs can outrun a small thread stack long before
//! [`ParseLimits`](crate::ParseLimits) stops them. Evaluation steps run through
//! [`ensure_sufficient_stack`], which moves onto a fresh segment when the
//! remaining stack gets short.

/// Grow when less than this remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
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
