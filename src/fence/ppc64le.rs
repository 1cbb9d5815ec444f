//! PPC64 little-endian fences: `sync` for every access pair.

use core::sync::atomic::{fence, Ordering};

use crate::capability::Backend;

pub(crate) const BACKEND: Backend = Backend::InlineAsmPpc64le;

/// Heavyweight `sync` (`hwsync`), the full barrier on POWER.
///
/// A sequentially consistent fence lowers to exactly this instruction, and
/// PowerPC inline assembly is not available on stable.
#[inline(always)]
fn hwsync() {
    fence(Ordering::SeqCst);
}

#[inline(always)]
pub(super) fn load_load() {
    hwsync();
}

#[inline(always)]
pub(super) fn load_store() {
    hwsync();
}

#[inline(always)]
pub(super) fn store_load() {
    hwsync();
}

#[inline(always)]
pub(super) fn store_store() {
    hwsync();
}

#[inline(always)]
pub(super) fn after_lock() {
    hwsync();
}

#[inline(always)]
pub(super) fn before_unlock() {
    hwsync();
}
