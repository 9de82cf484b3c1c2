// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-flight wake gate for batch consumers.
//!
//! The advertised pattern layered on the ledger: producers dirty state from
//! many threads and want one consumer pass to run *at least once after the
//! last wake*, but never concurrently with itself. [`ConsumerGate`] is that
//! gate: a wake counter where only the 0→1 transition elects a scheduler,
//! and the drain loop keeps running until it manages to swap the counter it
//! most recently observed back to zero.

use std::sync::atomic::{AtomicU64, Ordering};

/// Coalesces producer wakes into single-flight consumer runs.
#[derive(Debug, Default)]
pub struct ConsumerGate {
    pending: AtomicU64,
}

impl ConsumerGate {
    /// Creates a gate with no pending wakes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a wake. Returns `true` exactly when the caller took the
    /// counter from 0 to 1 and must therefore schedule
    /// [`drain`](Self::drain); every other concurrent waker returns
    /// `false` and does nothing further.
    pub fn notify(&self) -> bool {
        self.pending.fetch_add(1, Ordering::AcqRel) == 0
    }

    /// Runs `consume` until no wakes arrived during the last run.
    ///
    /// Only the thread elected by [`notify`](Self::notify) may call this.
    /// The loop observes the counter, runs once, and terminates when it
    /// successfully swaps the observed count back to zero; a failed swap
    /// means new wakes arrived mid-run and the consumer goes again.
    pub fn drain(&self, mut consume: impl FnMut()) {
        loop {
            let observed = self.pending.load(Ordering::Acquire);
            consume();
            if self
                .pending
                .compare_exchange(observed, 0, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return;
            }
        }
    }

    /// Returns whether wakes are currently pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn first_notify_elects_the_scheduler() {
        let gate = ConsumerGate::new();
        assert!(gate.notify());
        assert!(!gate.notify());
        assert!(gate.is_pending());

        gate.drain(|| {});
        assert!(!gate.is_pending());
        assert!(gate.notify(), "drained gate elects again");
    }

    #[test]
    fn drain_runs_again_for_mid_run_wakes() {
        let gate = ConsumerGate::new();
        assert!(gate.notify());

        let mut runs = 0;
        let mut woke_again = false;
        gate.drain(|| {
            runs += 1;
            if !woke_again {
                // A producer wakes while the consumer is running; the
                // drain loop must go one more time.
                woke_again = true;
                assert!(!gate.notify(), "counter is nonzero mid-run");
            }
        });
        assert_eq!(runs, 2);
        assert!(!gate.is_pending());
    }

    #[test]
    fn concurrent_producers_elect_exactly_one_scheduler() {
        let gate = Arc::new(ConsumerGate::new());
        let elected = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = Arc::clone(&gate);
                let elected = Arc::clone(&elected);
                std::thread::spawn(move || {
                    if gate.notify() {
                        elected.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(elected.load(Ordering::SeqCst), 1);

        // The elected consumer observes all eight wakes in one pass.
        let runs = AtomicUsize::new(0);
        gate.drain(|| {
            runs.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(!gate.is_pending());
    }
}
