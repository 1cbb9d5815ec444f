//! Weak compare-and-swap.
//!
//! "Weak" means a call may return `false` even though the location held
//! `expected`, because load-linked/store-conditional hardware can lose its
//! reservation. It never returns `true` without having stored the new value.
//! No backend retries internally; a caller that needs the exchange to happen
//! loops until it succeeds or has its own reason to stop.
//!
//! | Build | Backend |
//! |---|---|
//! | Windows | interlocked compare-exchange |
//! | x86 / x86_64 | `lock cmpxchg` |
//! | ARMv7 | `ldrex` / `strex` |
//! | PPC64 LE | `lwarx` / `stwcx.` through the compiler builtin |
//! | other | compiler builtin |
//! | `no-hardware-cas` | aborts the process |

use core::sync::atomic::{AtomicPtr, AtomicU32, AtomicUsize};

use super::bits;
use super::private::Sealed;

#[cfg(all(
    not(feature = "no-hardware-cas"),
    not(windows),
    any(target_arch = "x86", target_arch = "x86_64"),
))]
#[path = "x86.rs"]
mod imp;

#[cfg(all(
    not(feature = "no-hardware-cas"),
    not(windows),
    target_arch = "arm",
    target_feature = "v7",
))]
#[path = "armv7.rs"]
mod imp;

#[cfg(all(
    not(feature = "no-hardware-cas"),
    any(
        windows,
        not(any(
            target_arch = "x86",
            target_arch = "x86_64",
            all(target_arch = "arm", target_feature = "v7"),
        )),
    ),
))]
#[path = "builtin.rs"]
mod imp;

#[cfg(feature = "no-hardware-cas")]
#[path = "stub.rs"]
mod imp;

pub(crate) use imp::BACKEND;

/// A location supporting weak compare-and-swap.
pub trait WeakCompareAndSwap: Sealed {
    /// The value stored in the location.
    type Value: Copy;

    /// If the location holds `expected`, replaces it with `new_value` and
    /// returns `true`. Otherwise leaves it untouched and returns `false`.
    /// May also return `false` spuriously.
    fn weak_compare_and_swap(&self, expected: Self::Value, new_value: Self::Value) -> bool;
}

impl Sealed for AtomicU32 {}

impl WeakCompareAndSwap for AtomicU32 {
    type Value = u32;

    #[inline(always)]
    fn weak_compare_and_swap(&self, expected: u32, new_value: u32) -> bool {
        imp::cas_u32(self, expected, new_value)
    }
}

impl<T> Sealed for AtomicPtr<T> {}

impl<T> WeakCompareAndSwap for AtomicPtr<T> {
    type Value = *mut T;

    #[inline(always)]
    fn weak_compare_and_swap(&self, expected: *mut T, new_value: *mut T) -> bool {
        imp::cas_ptr(self, expected, new_value)
    }
}

/// Weak compare-and-swap on a 32-bit word or a pointer.
///
/// Returns `true` only if `location` held `expected` and now holds
/// `new_value`. A `false` leaves `location` unmodified, but does not prove it
/// differed from `expected`.
///
/// ```rust
/// use core::sync::atomic::{AtomicU32, Ordering};
/// use arch_atomics::weak_compare_and_swap;
///
/// let state = AtomicU32::new(0);
/// # if arch_atomics::Capability::CURRENT.hardware_cas() {
/// while !weak_compare_and_swap(&state, 0, 1) {}
/// assert_eq!(state.load(Ordering::SeqCst), 1);
/// # }
/// ```
#[inline(always)]
pub fn weak_compare_and_swap<A: WeakCompareAndSwap>(
    location: &A,
    expected: A::Value,
    new_value: A::Value,
) -> bool {
    location.weak_compare_and_swap(expected, new_value)
}

/// Weak compare-and-swap on an address-sized integer.
///
/// Runs the pointer-width implementation on the same address, with the
/// integers reinterpreted through [`bits::to_pointer`].
#[inline(always)]
pub fn weak_compare_and_swap_uintptr(
    location: &AtomicUsize,
    expected: usize,
    new_value: usize,
) -> bool {
    imp::cas_ptr(
        bits::pointer_location(location),
        bits::to_pointer(expected),
        bits::to_pointer(new_value),
    )
}

#[cfg(all(test, not(feature = "no-hardware-cas")))]
mod tests {
    use super::*;
    use core::ptr;
    use core::sync::atomic::Ordering;

    #[test]
    fn mismatch_leaves_word_untouched() {
        let word = AtomicU32::new(3);
        assert!(!weak_compare_and_swap(&word, 4, 5));
        assert_eq!(word.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn pointer_swap_installs_new_pointer() {
        let mut a = 1u64;
        let mut b = 2u64;
        let pa: *mut u64 = &mut a;
        let pb: *mut u64 = &mut b;

        let slot = AtomicPtr::new(pa);
        while !weak_compare_and_swap(&slot, pa, pb) {}
        assert_eq!(slot.load(Ordering::SeqCst), pb);
        assert!(!weak_compare_and_swap(&slot, ptr::null_mut(), pa));
        assert_eq!(slot.load(Ordering::SeqCst), pb);
    }

    #[test]
    fn uintptr_swap_uses_the_full_width() {
        let word = AtomicUsize::new(usize::MAX);
        while !weak_compare_and_swap_uintptr(&word, usize::MAX, usize::MAX - 1) {}
        assert_eq!(word.load(Ordering::SeqCst), usize::MAX - 1);

        // Differs from the stored value only in the top bit.
        let expected = (usize::MAX - 1) ^ (1usize << (usize::BITS - 1));
        assert!(!weak_compare_and_swap_uintptr(&word, expected, 0));
        assert_eq!(word.load(Ordering::SeqCst), usize::MAX - 1);
    }

    #[test]
    fn backend_matches_target() {
        #[cfg(windows)]
        assert_eq!(BACKEND, crate::Backend::WindowsIntrinsic);
        #[cfg(all(not(windows), any(target_arch = "x86", target_arch = "x86_64")))]
        assert_eq!(BACKEND, crate::Backend::InlineAsmX86);
        #[cfg(all(not(windows), target_arch = "arm", target_feature = "v7"))]
        assert_eq!(BACKEND, crate::Backend::InlineAsmArmv7);
        #[cfg(all(not(windows), target_arch = "powerpc64", target_endian = "little"))]
        assert_eq!(BACKEND, crate::Backend::InlineAsmPpc64le);
    }
}
