#[cfg(target_has_atomic = "64")]
use core::sync::atomic::AtomicI64;
use core::sync::atomic::{AtomicI32, Ordering};

use super::private::Sealed;
use crate::capability::Backend;

// All four variants lower to the target's native read-modify-write (the
// interlocked intrinsic on Windows, `atomic_add_value` on QNX, bionic's
// `__atomic_inc` on Android). Only the recorded backend differs.
#[cfg(windows)]
pub(crate) const BACKEND: Backend = Backend::WindowsIntrinsic;
#[cfg(target_os = "nto")]
pub(crate) const BACKEND: Backend = Backend::QnxIntrinsic;
#[cfg(target_os = "android")]
pub(crate) const BACKEND: Backend = Backend::AndroidIntrinsic;
#[cfg(not(any(windows, target_os = "nto", target_os = "android")))]
pub(crate) const BACKEND: Backend = Backend::GccBuiltin;

/// A signed word supporting indivisible `+1` and `-1`.
///
/// Implemented for [`AtomicI32`] everywhere and for [`AtomicI64`] only where
/// the target has 64-bit atomics, so the 64-bit form cannot be called on a
/// target that lacks it.
pub trait AtomicCounter: Sealed {
    /// The integer stored in the location.
    type Value: Copy;

    /// Adds one and returns the new value, wrapping on overflow.
    fn increment(&self) -> Self::Value;

    /// Subtracts one and returns the new value, wrapping on overflow.
    fn decrement(&self) -> Self::Value;
}

macro_rules! impl_atomic_counter {
    ($atomic:ty, $value:ty) => {
        impl Sealed for $atomic {}

        impl AtomicCounter for $atomic {
            type Value = $value;

            #[inline(always)]
            fn increment(&self) -> $value {
                // fetch_add returns the previous value.
                self.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
            }

            #[inline(always)]
            fn decrement(&self) -> $value {
                self.fetch_sub(1, Ordering::SeqCst).wrapping_sub(1)
            }
        }
    };
}

impl_atomic_counter!(AtomicI32, i32);
#[cfg(target_has_atomic = "64")]
impl_atomic_counter!(AtomicI64, i64);

/// Atomically adds one to `location` and returns the value after the update.
///
/// Acts as a full memory barrier.
#[inline(always)]
pub fn increment<A: AtomicCounter>(location: &A) -> A::Value {
    location.increment()
}

/// Atomically subtracts one from `location` and returns the value after the
/// update.
///
/// Acts as a full memory barrier: a thread that sees this return zero also
/// sees every write made before any other thread's decrement of the same
/// location, which is what releasing a shared reference count requires.
#[inline(always)]
pub fn decrement<A: AtomicCounter>(location: &A) -> A::Value {
    location.decrement()
}
