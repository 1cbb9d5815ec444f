//! `ldrex`/`strex` sequence for ARMv7.
//!
//! The exclusive store fails whenever the reservation is lost, for example to
//! an interrupt or a context switch between the two instructions. That is the
//! source of spurious failures, and the sequence does not retry. It also
//! emits no `dmb`; callers that need ordering pair it with the fences.

use core::arch::asm;
use core::sync::atomic::{AtomicPtr, AtomicU32};

use crate::atomic::bits;
use crate::capability::Backend;

pub(crate) const BACKEND: Backend = Backend::InlineAsmArmv7;

#[inline(always)]
pub(super) fn cas_u32(location: &AtomicU32, expected: u32, new_value: u32) -> bool {
    // 0 once `strex` succeeds; stays 1 on mismatch or a lost reservation.
    let status: u32;
    // SAFETY: `location` is a live, naturally aligned 32-bit atomic. `strex`
    // only stores while the reservation taken by `ldrex` is still held.
    unsafe {
        asm!(
            "mov {status}, #1",
            "ldrex {current}, [{location}]",
            "cmp {current}, {expected}",
            "bne 2f",
            "strex {status}, {new_value}, [{location}]",
            "2:",
            location = in(reg) location.as_ptr(),
            expected = in(reg) expected,
            new_value = in(reg) new_value,
            status = out(reg) status,
            current = out(reg) _,
            options(nostack),
        );
    }
    status == 0
}

// Pointers are 32 bits on ARMv7, so the word sequence covers them.
#[inline(always)]
pub(super) fn cas_ptr<T>(location: &AtomicPtr<T>, expected: *mut T, new_value: *mut T) -> bool {
    // SAFETY: on a 32-bit target `AtomicPtr<T>` and `AtomicU32` share size and
    // alignment (asserted at the crate root); the view borrows `location`.
    let word = unsafe { AtomicU32::from_ptr(location.as_ptr().cast::<u32>()) };
    cas_u32(
        word,
        bits::from_pointer::<u32>(expected.cast()),
        bits::from_pointer::<u32>(new_value.cast()),
    )
}
