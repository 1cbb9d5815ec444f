//! ARMv7 fences: `dmb sy`, and `dmb st` for store-store.

use core::arch::asm;

use crate::capability::Backend;

pub(crate) const BACKEND: Backend = Backend::InlineAsmArmv7;

/// Full barrier: no access floats above it and none sinks below it.
#[inline(always)]
fn dmb() {
    // SAFETY: `dmb` orders memory accesses and has no other effect. Leaving
    // out `nomem` makes the block a compiler barrier as well.
    unsafe {
        asm!("dmb sy", options(nostack, preserves_flags));
    }
}

/// Like [`dmb`], but orders stores only.
#[inline(always)]
fn dmb_st() {
    // SAFETY: as for `dmb`.
    unsafe {
        asm!("dmb st", options(nostack, preserves_flags));
    }
}

#[inline(always)]
pub(super) fn load_load() {
    dmb();
}

#[inline(always)]
pub(super) fn load_store() {
    dmb();
}

#[inline(always)]
pub(super) fn store_load() {
    dmb();
}

#[inline(always)]
pub(super) fn store_store() {
    dmb_st();
}

#[inline(always)]
pub(super) fn after_lock() {
    dmb();
}

#[inline(always)]
pub(super) fn before_unlock() {
    dmb();
}
