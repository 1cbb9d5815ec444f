//! Run-time host probing.
//!
//! Whether compiler-only fences are sufficient depends on how many processors
//! the binary ends up running on, which is not knowable at build time.

use std::num::NonZeroUsize;

/// Number of processors currently online, at least 1.
pub fn online_processors() -> usize {
    os_online_processors()
        .or_else(|| std::thread::available_parallelism().ok().map(NonZeroUsize::get))
        .unwrap_or(1)
}

/// Whether more than one processor may run threads of this process.
pub fn is_multiprocessor() -> bool {
    online_processors() > 1
}

#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
))]
fn os_online_processors() -> Option<usize> {
    // SAFETY: `sysconf` only reads a configuration value.
    let count = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
    usize::try_from(count).ok().filter(|&n| n > 0)
}

#[cfg(windows)]
fn os_online_processors() -> Option<usize> {
    use windows_sys::Win32::System::SystemInformation::{GetSystemInfo, SYSTEM_INFO};

    // SAFETY: SYSTEM_INFO is plain data, all-zero is a valid value, and
    // GetSystemInfo only writes through the pointer it is given.
    let info = unsafe {
        let mut info: SYSTEM_INFO = core::mem::zeroed();
        GetSystemInfo(&mut info);
        info
    };
    usize::try_from(info.dwNumberOfProcessors)
        .ok()
        .filter(|&n| n > 0)
}

#[cfg(not(any(
    windows,
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
)))]
fn os_online_processors() -> Option<usize> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_at_least_one_processor() {
        assert!(online_processors() >= 1);
        assert_eq!(is_multiprocessor(), online_processors() > 1);
    }
}
