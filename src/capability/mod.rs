//! Compile-time platform capability resolution.
//!
//! Each component picks its backend with `cfg` when the crate is built. This
//! module only *reports* that choice; the primitives never consult it.

pub mod probe;

use core::fmt;

use serde::Serialize;

#[cfg(not(all(target_has_atomic = "32", target_has_atomic = "ptr")))]
compile_error!(
    "arch-atomics: the target has no 32-bit or pointer-width compare-and-swap; \
     refusing to build primitives whose atomicity would be false"
);

/// An implementation variant for one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Windows interlocked intrinsics.
    WindowsIntrinsic,
    /// QNX Neutrino `atomic_*` intrinsics.
    QnxIntrinsic,
    /// Android bionic atomic intrinsics.
    AndroidIntrinsic,
    /// The compiler's native atomic builtins.
    GccBuiltin,
    /// Hand-written x86 / x86_64 assembly.
    InlineAsmX86,
    /// Hand-written ARMv7 assembly.
    InlineAsmArmv7,
    /// PPC64 little-endian instruction sequences.
    InlineAsmPpc64le,
    /// No usable hardware support: compiler-only fences, or an aborting
    /// compare-and-swap stub.
    GenericFallback,
}

impl Backend {
    /// Stable kebab-case name, matching the serialized form.
    pub const fn name(self) -> &'static str {
        match self {
            Backend::WindowsIntrinsic => "windows-intrinsic",
            Backend::QnxIntrinsic => "qnx-intrinsic",
            Backend::AndroidIntrinsic => "android-intrinsic",
            Backend::GccBuiltin => "gcc-builtin",
            Backend::InlineAsmX86 => "inline-asm-x86",
            Backend::InlineAsmArmv7 => "inline-asm-armv7",
            Backend::InlineAsmPpc64le => "inline-asm-ppc64le",
            Backend::GenericFallback => "generic-fallback",
        }
    }

    /// The hardware memory model a fence backend is written against.
    pub const fn memory_model(self) -> MemoryModel {
        match self {
            Backend::InlineAsmX86 => MemoryModel::StronglyOrdered,
            Backend::InlineAsmArmv7 | Backend::InlineAsmPpc64le => MemoryModel::WeaklyOrdered,
            _ => MemoryModel::Unrecognized,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hardware memory-ordering class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemoryModel {
    /// Only store-then-load reordering is visible to other processors (x86).
    StronglyOrdered,
    /// Any pair of accesses may be reordered (ARMv7, PPC64).
    WeaklyOrdered,
    /// Not recognized; fences fall back to compiler-only ordering.
    Unrecognized,
}

/// What a fence actually emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Barrier {
    /// Optimizer barrier only; no instruction is emitted.
    Compiler,
    /// Full hardware barrier.
    Hardware,
    /// Hardware barrier that orders stores only.
    HardwareStoreOnly,
}

impl Barrier {
    /// Whether an instruction reaches the processor.
    pub const fn is_hardware(self) -> bool {
        !matches!(self, Barrier::Compiler)
    }
}

/// The barrier each named fence resolves to on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FencePolicy {
    /// [`load_load_fence`](crate::load_load_fence)
    pub load_load: Barrier,
    /// [`load_store_fence`](crate::load_store_fence)
    pub load_store: Barrier,
    /// [`store_load_fence`](crate::store_load_fence)
    pub store_load: Barrier,
    /// [`store_store_fence`](crate::store_store_fence)
    pub store_store: Barrier,
    /// [`memory_barrier_after_lock`](crate::memory_barrier_after_lock)
    pub after_lock: Barrier,
    /// [`memory_barrier_before_unlock`](crate::memory_barrier_before_unlock)
    pub before_unlock: Barrier,
}

impl FencePolicy {
    /// Every fence is a compiler fence.
    pub const COMPILER_ONLY: FencePolicy = FencePolicy::uniform(Barrier::Compiler);

    /// The same barrier for every fence.
    pub const fn uniform(barrier: Barrier) -> Self {
        Self {
            load_load: barrier,
            load_store: barrier,
            store_load: barrier,
            store_store: barrier,
            after_lock: barrier,
            before_unlock: barrier,
        }
    }

    /// Whether any fence emits an instruction.
    pub const fn uses_hardware(&self) -> bool {
        self.load_load.is_hardware()
            || self.load_store.is_hardware()
            || self.store_load.is_hardware()
            || self.store_store.is_hardware()
            || self.after_lock.is_hardware()
            || self.before_unlock.is_hardware()
    }
}

/// The backends this build was compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Capability {
    /// Backend of [`increment`](crate::increment) / [`decrement`](crate::decrement).
    pub arithmetic: Backend,
    /// Backend of the compare-and-swap family.
    pub compare_and_swap: Backend,
    /// Backend of the fence family.
    pub fences: Backend,
    /// Whether the 64-bit counter forms are compiled in.
    pub atomics_64: bool,
}

impl Capability {
    /// The capability of the current build.
    pub const CURRENT: Capability = Capability {
        arithmetic: crate::atomic::counter::BACKEND,
        compare_and_swap: crate::atomic::cas::BACKEND,
        fences: crate::fence::BACKEND,
        atomics_64: cfg!(target_has_atomic = "64"),
    };

    /// Whether compare-and-swap reaches a real instruction rather than the
    /// aborting stub.
    pub const fn hardware_cas(&self) -> bool {
        !matches!(self.compare_and_swap, Backend::GenericFallback)
    }

    /// Memory model the fence backend targets.
    pub const fn memory_model(&self) -> MemoryModel {
        self.fences.memory_model()
    }

    /// Barrier each named fence resolves to.
    pub const fn fence_policy(&self) -> FencePolicy {
        match self.fences {
            Backend::InlineAsmX86 => FencePolicy {
                store_load: Barrier::Hardware,
                ..FencePolicy::COMPILER_ONLY
            },
            Backend::InlineAsmArmv7 => FencePolicy {
                store_store: Barrier::HardwareStoreOnly,
                ..FencePolicy::uniform(Barrier::Hardware)
            },
            Backend::InlineAsmPpc64le => FencePolicy::uniform(Barrier::Hardware),
            _ => FencePolicy::COMPILER_ONLY,
        }
    }

    /// Fails if compare-and-swap would abort.
    ///
    /// # Errors
    /// [`CapabilityError::NoHardwareCas`] on `no-hardware-cas` builds.
    pub fn require_hardware_cas(&self) -> Result<(), CapabilityError> {
        if self.hardware_cas() {
            Ok(())
        } else {
            Err(CapabilityError::NoHardwareCas)
        }
    }

    /// Fails if the 64-bit counter forms are compiled out.
    ///
    /// # Errors
    /// [`CapabilityError::NoAtomics64`] on targets without 64-bit atomics.
    pub fn require_atomics_64(&self) -> Result<(), CapabilityError> {
        if self.atomics_64 {
            Ok(())
        } else {
            Err(CapabilityError::NoAtomics64)
        }
    }

    /// Fails if the fences cannot order accesses across processors on this
    /// host: the generic fallback running on more than one processor.
    ///
    /// Unlike the other checks this one depends on the machine the binary
    /// runs on, so it probes at run time.
    ///
    /// # Errors
    /// [`CapabilityError::UnsoundFences`] with the probed processor count.
    pub fn require_sound_fences(&self) -> Result<(), CapabilityError> {
        if self.memory_model() != MemoryModel::Unrecognized {
            return Ok(());
        }
        let processors = probe::online_processors();
        if processors <= 1 {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            processors,
            backend = %self.fences,
            "compiler-only fences cannot order accesses between processors"
        );

        Err(CapabilityError::UnsoundFences { processors })
    }
}

/// A capability the caller asked for is missing from this build or host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityError {
    /// Compare-and-swap was compiled to the aborting stub.
    NoHardwareCas,
    /// 64-bit atomics are not available on the target.
    NoAtomics64,
    /// Fences are compiler-only but the host has several processors.
    UnsoundFences {
        /// Online processors reported by the probe.
        processors: usize,
    },
}

impl fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityError::NoHardwareCas => {
                f.write_str("compare-and-swap has no hardware instruction in this build")
            }
            CapabilityError::NoAtomics64 => {
                f.write_str("64-bit atomics are not supported on this target")
            }
            CapabilityError::UnsoundFences { processors } => write!(
                f,
                "fences are compiler-only but {processors} processors are online"
            ),
        }
    }
}

impl std::error::Error for CapabilityError {}
