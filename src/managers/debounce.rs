//! Cancellable delayed task.
//!
//! Scheduling a task aborts whatever was scheduled before it, whether it is
//! still waiting out the delay or already running.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::trace;

/// Coalesces rapid calls into one delayed execution of the latest task.
///
/// Every scheduled task gets a generation number. `settled` holds the highest
/// generation that finished, was superseded or was cancelled, so the
/// debouncer is idle exactly when `settled == scheduled`.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<AbortHandle>>,
    scheduled: AtomicU64,
    settled: Arc<watch::Sender<u64>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        let (settled, _) = watch::channel(0);
        Self {
            delay,
            pending: Mutex::new(None),
            scheduled: AtomicU64::new(0),
            settled: Arc::new(settled),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `task` after the delay unless another task is scheduled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = match self.pending.lock() {
            Ok(pending) => pending,
            Err(poisoned) => poisoned.into_inner(),
        };

        let generation = self.scheduled.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = pending.take() {
            trace!(generation, "superseding pending debounced task");
            previous.abort();
        }
        settle(&self.settled, generation - 1);

        let delay = self.delay;
        let settled = self.settled.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
            settle(&settled, generation);
        });
        *pending = Some(handle.abort_handle());
    }

    /// Aborts the pending task, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        let mut pending = match self.pending.lock() {
            Ok(pending) => pending,
            Err(poisoned) => poisoned.into_inner(),
        };
        let was_pending = self.is_pending();
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        settle(&self.settled, self.scheduled.load(Ordering::SeqCst));
        was_pending
    }

    /// True while the latest scheduled task has neither finished nor been cancelled.
    pub fn is_pending(&self) -> bool {
        *self.settled.borrow() < self.scheduled.load(Ordering::SeqCst)
    }

    /// Waits until no task is pending.
    ///
    /// Returns immediately when nothing is scheduled. If the task is
    /// superseded while waiting, waits for its replacement too.
    pub async fn flush(&self) {
        let mut settled = self.settled.subscribe();
        loop {
            let target = self.scheduled.load(Ordering::SeqCst);
            if settled.wait_for(|done| *done >= target).await.is_err() {
                return;
            }
            if self.scheduled.load(Ordering::SeqCst) == target {
                return;
            }
        }
    }
}

/// Raises the settled generation, never lowers it.
fn settle(settled: &watch::Sender<u64>, generation: u64) {
    settled.send_if_modified(|done| {
        if *done < generation {
            *done = generation;
            true
        } else {
            false
        }
    });
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
