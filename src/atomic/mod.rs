//! Indivisible read-modify-write operations over caller-owned words.
//!
//! The location is always borrowed, never owned: these functions allocate
//! nothing and keep no state between calls.

/// Pointer/integer bit reinterpretation.
pub mod bits;
/// Weak compare-and-swap.
pub mod cas;
/// Atomic increment and decrement.
pub mod counter;

pub use bits::PointerBits;
pub use cas::{weak_compare_and_swap, weak_compare_and_swap_uintptr, WeakCompareAndSwap};
pub use counter::{decrement, increment, AtomicCounter};

mod private {
    pub trait Sealed {}
}
