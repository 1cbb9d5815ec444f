//! Memory fences.
//!
//! A fence named after an access pair orders accesses of the first kind
//! before it against accesses of the second kind after it, as observed by
//! other processors. Each name resolves to the cheapest barrier that suffices
//! on the target:
//!
//! | Target | load-load | load-store | store-load | store-store | lock aliases |
//! |---|---|---|---|---|---|
//! | x86 / x86_64 | compiler | compiler | `mfence` | compiler | compiler |
//! | ARMv7 | `dmb sy` | `dmb sy` | `dmb sy` | `dmb st` | `dmb sy` |
//! | PPC64 LE | `sync` | `sync` | `sync` | `sync` | `sync` |
//! | other | compiler | compiler | compiler | compiler | compiler |
//!
//! x86 never makes a load visibly overtake an earlier load or store, nor a
//! store overtake an earlier store; only a load overtaking an earlier store
//! is observable, so `store_load_fence` is the one fence that needs an
//! instruction there.
//!
//! The last row is a best effort. On an unrecognized weakly ordered
//! multiprocessor, compiler fences do **not** order accesses between
//! processors. [`Capability::require_sound_fences`](crate::Capability::require_sound_fences)
//! detects that situation at run time.

use core::sync::atomic::{self, Ordering};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[path = "x86.rs"]
mod arch;

#[cfg(all(target_arch = "arm", target_feature = "v7"))]
#[path = "armv7.rs"]
mod arch;

#[cfg(all(target_arch = "powerpc64", target_endian = "little"))]
#[path = "ppc64le.rs"]
mod arch;

#[cfg(not(any(
    target_arch = "x86",
    target_arch = "x86_64",
    all(target_arch = "arm", target_feature = "v7"),
    all(target_arch = "powerpc64", target_endian = "little"),
)))]
#[path = "generic.rs"]
mod arch;

pub(crate) use arch::BACKEND;

/// Keeps the optimizer from moving memory accesses across this point.
///
/// Emits no instruction and gives no guarantee about what other processors
/// observe. It does not get in the way of register allocation or of moving
/// pure computations.
#[inline(always)]
pub fn compiler_fence() {
    atomic::compiler_fence(Ordering::SeqCst);
}

/// Orders earlier loads before later loads.
#[inline(always)]
pub fn load_load_fence() {
    arch::load_load();
}

/// Orders earlier loads before later stores.
#[inline(always)]
pub fn load_store_fence() {
    arch::load_store();
}

/// Orders earlier stores before later loads.
///
/// The only fence that needs a hardware instruction on x86.
#[inline(always)]
pub fn store_load_fence() {
    arch::store_load();
}

/// Orders earlier stores before later stores.
#[inline(always)]
pub fn store_store_fence() {
    arch::store_store();
}

/// Call right after acquiring a lock so that the critical section's accesses
/// cannot move above the acquisition.
#[inline(always)]
pub fn memory_barrier_after_lock() {
    arch::after_lock();
}

/// Call right before releasing a lock so that the critical section's
/// accesses cannot move below the release.
#[inline(always)]
pub fn memory_barrier_before_unlock() {
    arch::before_unlock();
}
