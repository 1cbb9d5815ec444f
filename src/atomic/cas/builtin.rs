//! Compare-and-swap through the compiler's atomic builtins.
//!
//! On Windows this is the interlocked compare-exchange intrinsic. On PPC64 LE
//! it is the `lwarx`/`stwcx.` (`ldarx`/`stdcx.`) reservation pair, emitted
//! as one attempt because the weak form never loops. Elsewhere it is whatever
//! the target's native compare-and-swap is.

use core::sync::atomic::{AtomicPtr, AtomicU32, Ordering};

use crate::capability::Backend;

#[cfg(windows)]
pub(crate) const BACKEND: Backend = Backend::WindowsIntrinsic;
#[cfg(all(not(windows), target_arch = "powerpc64", target_endian = "little"))]
pub(crate) const BACKEND: Backend = Backend::InlineAsmPpc64le;
#[cfg(all(
    not(windows),
    not(all(target_arch = "powerpc64", target_endian = "little")),
))]
pub(crate) const BACKEND: Backend = Backend::GccBuiltin;

#[inline(always)]
pub(super) fn cas_u32(location: &AtomicU32, expected: u32, new_value: u32) -> bool {
    location
        .compare_exchange_weak(expected, new_value, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
}

#[inline(always)]
pub(super) fn cas_ptr<T>(location: &AtomicPtr<T>, expected: *mut T, new_value: *mut T) -> bool {
    location
        .compare_exchange_weak(expected, new_value, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
}
