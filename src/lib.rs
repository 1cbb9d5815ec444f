//! # `arch-atomics` - Portable Atomic Primitives
//!
//! Atomic increment/decrement, weak compare-and-swap and memory fences with a
//! small, uniform surface and precisely stated ordering guarantees. Higher-level
//! reference counts, locks and lock-free collections build on top of this layer.
//!
//! ## Components
//!
//! 1. **Arithmetic atomics** ([`increment`], [`decrement`]):
//!    - Indivisible `+1`/`-1` returning the value *after* the update
//!    - Sequentially consistent, so a thread that observes a decrement to zero
//!      sees every write made before any matching decrement
//!    - 32-bit always, 64-bit only where the target has 64-bit atomics
//!
//! 2. **Weak compare-and-swap** ([`weak_compare_and_swap`],
//!    [`weak_compare_and_swap_uintptr`]):
//!    - Replaces the value only if it equals `expected`
//!    - May fail spuriously; callers own the retry loop
//!    - Never reports success without replacing the value
//!
//! 3. **Fences** ([`fence`]):
//!    - [`compiler_fence`] constrains only the optimizer
//!    - Four access-pair fences plus the two lock aliases, each mapped to the
//!      cheapest instruction that is sufficient on the target
//!
//! ## Backend selection
//!
//! Every backend is chosen by `cfg` at build time; nothing branches on the
//! platform at run time. [`Capability::CURRENT`] records the selection:
//!
//! | Target | CAS | Fences |
//! |---|---|---|
//! | x86 / x86_64 | `lock cmpxchg` | `mfence` for store-load only |
//! | ARMv7 | `ldrex`/`strex` | `dmb` (`dmb st` for store-store) |
//! | PPC64 LE | `lwarx`/`stwcx.` | `sync` |
//! | Windows | interlocked intrinsic | per architecture |
//! | other | compiler builtin | compiler fence only |
//!
//! Targets without 32-bit and pointer-width compare-and-swap fail to compile.
//! Builds with the `no-hardware-cas` feature abort the process when
//! compare-and-swap is called instead of returning a misleading `false`.
//!
//! ## Example
//!
//! ```rust
//! use core::sync::atomic::{AtomicI32, AtomicU32};
//! use arch_atomics::{decrement, increment, weak_compare_and_swap};
//!
//! let refs = AtomicI32::new(1);
//! assert_eq!(increment(&refs), 2);
//! assert_eq!(decrement(&refs), 1);
//!
//! let word = AtomicU32::new(7);
//! # if arch_atomics::Capability::CURRENT.hardware_cas() {
//! while !weak_compare_and_swap(&word, 7, 9) {}
//! assert!(!weak_compare_and_swap(&word, 7, 11));
//! # }
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod atomic;
pub mod capability;
pub mod fatal;
pub mod fence;
pub mod litmus;

pub use atomic::{
    decrement, increment, weak_compare_and_swap, weak_compare_and_swap_uintptr, AtomicCounter,
    WeakCompareAndSwap,
};
pub use capability::{Backend, Barrier, Capability, CapabilityError, FencePolicy, MemoryModel};
pub use fence::{
    compiler_fence, load_load_fence, load_store_fence, memory_barrier_after_lock,
    memory_barrier_before_unlock, store_load_fence, store_store_fence,
};

// Layout claims the pointer-width reinterpretation relies on.
const _: () = {
    use core::mem;
    use core::sync::atomic::{AtomicPtr, AtomicUsize};

    assert!(mem::size_of::<AtomicUsize>() == mem::size_of::<AtomicPtr<()>>());
    assert!(mem::align_of::<AtomicUsize>() == mem::align_of::<AtomicPtr<()>>());

    // The 32-bit assembly backends reuse the word sequence for pointers.
    #[cfg(target_pointer_width = "32")]
    assert!(mem::size_of::<core::sync::atomic::AtomicU32>() == mem::size_of::<AtomicPtr<()>>());
    #[cfg(target_pointer_width = "32")]
    assert!(mem::align_of::<core::sync::atomic::AtomicU32>() == mem::align_of::<AtomicPtr<()>>());
};
