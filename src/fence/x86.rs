//! x86 / x86_64 fences: `mfence` for store-load, compiler fences otherwise.

use core::arch::asm;

use super::compiler_fence;
use crate::capability::Backend;

pub(crate) const BACKEND: Backend = Backend::InlineAsmX86;

#[inline(always)]
fn mfence() {
    // SAFETY: `mfence` only serializes loads and stores. Leaving out `nomem`
    // makes the block a compiler barrier as well.
    unsafe {
        asm!("mfence", options(nostack, preserves_flags));
    }
}

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
    mfence();
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
