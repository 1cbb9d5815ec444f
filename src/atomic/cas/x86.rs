//! `lock cmpxchg` sequences for x86 and x86_64.
//!
//! `cmpxchg` never fails spuriously, and the `lock` prefix makes it a full
//! barrier, so these are strictly stronger than the weak contract.

use core::arch::asm;
use core::sync::atomic::{AtomicPtr, AtomicU32};

use crate::capability::Backend;

pub(crate) const BACKEND: Backend = Backend::InlineAsmX86;

#[inline(always)]
pub(super) fn cas_u32(location: &AtomicU32, expected: u32, new_value: u32) -> bool {
    let swapped: u8;
    // SAFETY: `location` is a live, naturally aligned 32-bit atomic, so the
    // locked `cmpxchg` touches only memory we are allowed to write atomically.
    unsafe {
        asm!(
            "lock cmpxchg dword ptr [{location}], {new_value:e}",
            "sete {swapped}",
            location = in(reg) location.as_ptr(),
            new_value = in(reg) new_value,
            swapped = out(reg_byte) swapped,
            inout("eax") expected => _,
            options(nostack),
        );
    }
    swapped != 0
}

#[cfg(all(target_arch = "x86_64", target_pointer_width = "64"))]
#[inline(always)]
pub(super) fn cas_ptr<T>(location: &AtomicPtr<T>, expected: *mut T, new_value: *mut T) -> bool {
    const { assert!(core::mem::size_of::<*mut T>() == 8) };
    let swapped: u8;
    // SAFETY: as for `cas_u32`, with a naturally aligned 64-bit slot.
    unsafe {
        asm!(
            "lock cmpxchg qword ptr [{location}], {new_value}",
            "sete {swapped}",
            location = in(reg) location.as_ptr().cast::<*mut ()>(),
            new_value = in(reg) new_value.cast::<()>(),
            swapped = out(reg_byte) swapped,
            inout("rax") expected.cast::<()>() => _,
            options(nostack),
        );
    }
    swapped != 0
}

// Pointers are 32 bits on x86 and on x86_64 ILP32 (x32), so the word
// sequence covers them.
#[cfg(target_pointer_width = "32")]
#[inline(always)]
pub(super) fn cas_ptr<T>(location: &AtomicPtr<T>, expected: *mut T, new_value: *mut T) -> bool {
    use crate::atomic::bits;

    // SAFETY: on a 32-bit target `AtomicPtr<T>` and `AtomicU32` share size and
    // alignment (asserted at the crate root); the view borrows `location`.
    let word = unsafe { AtomicU32::from_ptr(location.as_ptr().cast::<u32>()) };
    cas_u32(
        word,
        bits::from_pointer::<u32>(expected.cast()),
        bits::from_pointer::<u32>(new_value.cast()),
    )
}
