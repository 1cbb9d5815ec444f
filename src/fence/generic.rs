//! Fallback for architectures without a dedicated backend.
//!
//! Correct on uniprocessors and on strongly ordered hardware. Not correct on
//! a weakly ordered multiprocessor.

use super::compiler_fence;
use crate::capability::Backend;

pub(crate) const BACKEND: Backend = Backend::GenericFallback;

#[inline(always)]
pub(super) fn load_load() {
    compiler_fence();
}

#[inline(always)]
pub(super) fn load_store() {
    compiler_fence();
}

#[inline(always)]
pub(super) fn store_load() {
    compiler_fence();
}

#[inline(always)]
pub(super) fn store_store() {
    compiler_fence();
}

#[inline(always)]
pub(super) fn after_lock() {
    compiler_fence();
}

#[inline(always)]
pub(super) fn before_unlock() {
    compiler_fence();
}
