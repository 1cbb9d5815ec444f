//! Builds with `no-hardware-cas` must abort on compare-and-swap instead of
//! returning. Run with `cargo test --features no-hardware-cas`.
#![cfg(feature = "no-hardware-cas")]

use arch_atomics::{weak_compare_and_swap, weak_compare_and_swap_uintptr};
use core::sync::atomic::{AtomicPtr, AtomicU32, AtomicUsize};
use std::process::Command;

const CHILD_ENV: &str = "ARCH_ATOMICS_ABORT_CHILD";

/// Re-runs this test binary filtered to `test_name`, with the child switch set.
fn run_child(test_name: &str) -> std::process::ExitStatus {
    Command::new(std::env::current_exe().unwrap())
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, test_name)
        .status()
        .unwrap()
}

fn is_child(test_name: &str) -> bool {
    std::env::var(CHILD_ENV).is_ok_and(|name| name == test_name)
}

#[test]
fn word_cas_aborts() {
    if is_child("word_cas_aborts") {
        let word = AtomicU32::new(0);
        weak_compare_and_swap(&word, 0, 1);
        // Only reached if the stub returned.
        std::process::exit(0);
    }

    let status = run_child("word_cas_aborts");
    assert!(!status.success(), "compare-and-swap returned instead of aborting");
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        assert_eq!(status.signal(), Some(libc::SIGABRT));
    }
}

#[test]
fn mismatching_cas_still_aborts() {
    if is_child("mismatching_cas_still_aborts") {
        let slot: AtomicPtr<u8> = AtomicPtr::new(core::ptr::null_mut());
        let mut byte = 0u8;
        weak_compare_and_swap(&slot, core::ptr::addr_of_mut!(byte), core::ptr::null_mut());
        std::process::exit(0);
    }

    let status = run_child("mismatching_cas_still_aborts");
    assert!(!status.success(), "a mismatch must not be reported as a plain `false`");
}

#[test]
fn uintptr_cas_aborts() {
    if is_child("uintptr_cas_aborts") {
        let word = AtomicUsize::new(3);
        weak_compare_and_swap_uintptr(&word, 3, 4);
        std::process::exit(0);
    }

    let status = run_child("uintptr_cas_aborts");
    assert!(!status.success());
}
