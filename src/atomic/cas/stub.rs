//! Compare-and-swap for builds without a usable hardware instruction.
//!
//! A compare followed by a plain store would break atomicity for every
//! caller, and returning `false` would look like ordinary contention to a
//! retry loop. Both entry points abort instead.

use core::sync::atomic::{AtomicPtr, AtomicU32};

use crate::capability::{Backend, CapabilityError};
use crate::fatal;

pub(crate) const BACKEND: Backend = Backend::GenericFallback;

#[inline(always)]
pub(super) fn cas_u32(_location: &AtomicU32, _expected: u32, _new_value: u32) -> bool {
    fatal::abort_unsupported(CapabilityError::NoHardwareCas)
}

#[inline(always)]
pub(super) fn cas_ptr<T>(_location: &AtomicPtr<T>, _expected: *mut T, _new_value: *mut T) -> bool {
    fatal::abort_unsupported(CapabilityError::NoHardwareCas)
}
