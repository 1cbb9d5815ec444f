//! Store-buffering litmus harness.
//!
//! Two threads run, once per trial:
//!
//! ```text
//! A: x = 1; fence(); ra = y        B: y = 1; fence(); rb = x
//! ```
//!
//! `(ra, rb) = (0, 0)` means both loads overtook the other thread's store.
//! A working store-load fence forbids that outcome. A compiler fence alone
//! does not, on any multiprocessor with store buffers (x86 included).

use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::thread;

use crossbeam_utils::{Backoff, CachePadded};
use serde::Serialize;

/// Outcome counts of a store-buffering run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LitmusOutcome {
    /// Trials executed.
    pub trials: usize,
    /// Trials per outcome, indexed `[ra][rb]`.
    pub counts: [[u64; 2]; 2],
}

impl LitmusOutcome {
    /// Trials in which `(ra, rb)` was observed.
    pub fn count(&self, ra: bool, rb: bool) -> u64 {
        self.counts[usize::from(ra)][usize::from(rb)]
    }

    /// Trials in which both loads missed the other thread's store.
    pub fn forbidden(&self) -> u64 {
        self.count(false, false)
    }

    /// Sum over all outcomes; equals `trials` for a complete run.
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

#[derive(Default)]
struct Cells {
    x: CachePadded<AtomicU32>,
    y: CachePadded<AtomicU32>,
    ra: CachePadded<AtomicU32>,
    rb: CachePadded<AtomicU32>,
    // Trial number the workers may start; 0 before the first.
    round: CachePadded<AtomicUsize>,
    // Worker completions so far, two per trial.
    finished: CachePadded<AtomicUsize>,
}

/// Runs `trials` store-buffering trials with `fence` between each thread's
/// store and load.
///
/// The calling thread coordinates: it resets the locations, releases both
/// workers into a trial, and waits for both to finish before recording the
/// result.
pub fn store_buffering(trials: usize, fence: fn()) -> LitmusOutcome {
    let cells = Cells::default();
    let mut outcome = LitmusOutcome {
        trials,
        ..LitmusOutcome::default()
    };

    thread::scope(|scope| {
        scope.spawn(|| run_side(&cells, &cells.x, &cells.y, &cells.ra, trials, fence));
        scope.spawn(|| run_side(&cells, &cells.y, &cells.x, &cells.rb, trials, fence));

        for round in 1..=trials {
            cells.x.store(0, Ordering::Relaxed);
            cells.y.store(0, Ordering::Relaxed);
            cells.round.store(round, Ordering::Release);
            wait_for(&cells.finished, 2 * round);

            let ra = cells.ra.load(Ordering::Relaxed) != 0;
            let rb = cells.rb.load(Ordering::Relaxed) != 0;
            outcome.counts[usize::from(ra)][usize::from(rb)] += 1;
        }
    });

    #[cfg(feature = "tracing")]
    tracing::debug!(
        trials,
        forbidden = outcome.forbidden(),
        "store-buffering run finished"
    );

    outcome
}

fn run_side(
    cells: &Cells,
    mine: &AtomicU32,
    theirs: &AtomicU32,
    seen: &AtomicU32,
    trials: usize,
    fence: fn(),
) {
    for round in 1..=trials {
        wait_for(&cells.round, round);
        mine.store(1, Ordering::Relaxed);
        fence();
        seen.store(theirs.load(Ordering::Relaxed), Ordering::Relaxed);
        cells.finished.fetch_add(1, Ordering::Release);
    }
}

fn wait_for(counter: &AtomicUsize, target: usize) {
    let backoff = Backoff::new();
    while counter.load(Ordering::Acquire) < target {
        backoff.snooze();
    }
}
