//! Bit-for-bit reinterpretation between pointer-width integers and pointers.
//!
//! The compare-and-swap layer has one pointer-width implementation. Integer
//! locations reach it through these functions instead of ad-hoc casts, and the
//! 32-bit assembly backends use them in the other direction to reach the word
//! sequence from a pointer.

use core::mem;
use core::sync::atomic::{AtomicPtr, AtomicUsize};

use num_traits::{PrimInt, Unsigned};

use super::private::Sealed;

/// A fixed-width unsigned integer exactly as wide as a pointer.
///
/// Implemented for `usize` and for whichever of `u32`/`u64` matches the
/// target's pointer width.
pub trait PointerBits: PrimInt + Unsigned + Sealed {
    /// Widens or narrows to `usize` without changing any bit.
    fn into_address(self) -> usize;

    /// Inverse of [`PointerBits::into_address`].
    fn from_address(address: usize) -> Self;
}

impl Sealed for usize {}

impl PointerBits for usize {
    #[inline(always)]
    fn into_address(self) -> usize {
        self
    }

    #[inline(always)]
    fn from_address(address: usize) -> Self {
        address
    }
}

#[cfg(target_pointer_width = "64")]
impl Sealed for u64 {}

#[cfg(target_pointer_width = "64")]
impl PointerBits for u64 {
    #[inline(always)]
    #[allow(clippy::cast_possible_truncation)]
    fn into_address(self) -> usize {
        self as usize
    }

    #[inline(always)]
    fn from_address(address: usize) -> Self {
        address as u64
    }
}

#[cfg(target_pointer_width = "32")]
impl Sealed for u32 {}

#[cfg(target_pointer_width = "32")]
impl PointerBits for u32 {
    #[inline(always)]
    fn into_address(self) -> usize {
        self as usize
    }

    #[inline(always)]
    #[allow(clippy::cast_possible_truncation)]
    fn from_address(address: usize) -> Self {
        address as u32
    }
}

/// Reinterprets `bits` as a raw pointer. Total: every value maps to exactly
/// one pointer and back.
///
/// The result carries no provenance of its own and is only meant to be
/// compared or stored, never dereferenced, unless it came from a pointer.
#[inline(always)]
pub fn to_pointer<U: PointerBits>(bits: U) -> *mut () {
    const { assert!(mem::size_of::<U>() == mem::size_of::<*mut ()>()) };
    bits.into_address() as *mut ()
}

/// Reinterprets `pointer` as a pointer-width integer.
#[inline(always)]
pub fn from_pointer<U: PointerBits>(pointer: *mut ()) -> U {
    const { assert!(mem::size_of::<U>() == mem::size_of::<*mut ()>()) };
    U::from_address(pointer as usize)
}

/// Views an integer location as a pointer location of the same address.
#[inline(always)]
pub(crate) fn pointer_location(location: &AtomicUsize) -> &AtomicPtr<()> {
    // SAFETY: `AtomicUsize` and `AtomicPtr<()>` have the same size and
    // alignment (asserted at the crate root). The view borrows `location`, so
    // it cannot outlive it, and every access through it is atomic.
    unsafe { AtomicPtr::from_ptr(location.as_ptr().cast::<*mut ()>()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::Ordering;

    #[test]
    fn extreme_values_survive_reinterpretation() {
        for bits in [0usize, 1, usize::MAX, usize::MAX >> 1, 0x1000] {
            assert_eq!(from_pointer::<usize>(to_pointer(bits)), bits);
        }
    }

    #[test]
    fn pointer_view_aliases_the_integer() {
        let word = AtomicUsize::new(0x40);
        let view = pointer_location(&word);
        assert_eq!(view.load(Ordering::SeqCst), to_pointer(0x40usize));

        view.store(to_pointer(0x80usize), Ordering::SeqCst);
        assert_eq!(word.load(Ordering::SeqCst), 0x80);
    }
}
