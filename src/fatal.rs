//! Process termination for capability gaps found at run time.
//!
//! Gaps that are knowable when the crate is built are compile errors. What is
//! left, such as a deployment whose hardware lacks compare-and-swap, ends the
//! process here: no primitive reports such a gap through its return value.

use crate::capability::CapabilityError;

/// Terminates the process because `error` makes continuing unsound.
///
/// Never unwinds. On unix this raises `SIGABRT`, so the failure shows up as a
/// crash with a core dump rather than an orderly exit.
///
/// ```no_run
/// use arch_atomics::{fatal, Capability};
///
/// if let Err(error) = Capability::CURRENT.require_sound_fences() {
///     fatal::abort_unsupported(error);
/// }
/// ```
#[cold]
#[inline(never)]
pub fn abort_unsupported(error: CapabilityError) -> ! {
    #[cfg(feature = "tracing")]
    tracing::error!(%error, "unsupported atomic capability, aborting");

    #[cfg(not(feature = "tracing"))]
    let _ = error;

    terminate()
}

#[cfg(unix)]
fn terminate() -> ! {
    // SAFETY: `abort` has no preconditions and does not return.
    unsafe { libc::abort() }
}

#[cfg(not(unix))]
fn terminate() -> ! {
    std::process::abort()
}
