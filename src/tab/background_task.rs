//! Cancellable per-tab background work.
//!
//! Cancellation is fire-and-forget: [`BackgroundTask::cancel`] raises a flag
//! the task polls and aborts the tokio task, but never waits for it to wind
//! down. A task may therefore still be mid-cleanup when the process exits.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Boxed future a kind hands to [`BackgroundTask::spawn`]
pub type TaskFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// The task's view of its own state
#[derive(Debug, Clone)]
pub struct TaskContext {
    cancel: Arc<AtomicBool>,
    progress: Arc<AtomicU64>,
}

impl TaskContext {
    /// Whether the owning tab asked the task to stop
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    pub fn add_progress(&self, amount: u64) -> u64 {
        self.progress.fetch_add(amount, Ordering::Relaxed) + amount
    }

    pub fn progress(&self) -> u64 {
        self.progress.load(Ordering::Relaxed)
    }
}

/// Clears the running flag when the task future finishes or is dropped by an abort
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Handle to a tab's background work
#[derive(Debug, Default)]
pub struct BackgroundTask {
    running: Arc<AtomicBool>,
    cancel: Arc<AtomicBool>,
    progress: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
    cancel_signals: u64,
}

impl BackgroundTask {
    /// A task slot with nothing running
    pub fn idle() -> Self {
        Self::default()
    }

    /// Running and not yet asked to stop
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire) && !self.cancel.load(Ordering::Acquire)
    }

    pub fn progress(&self) -> u64 {
        self.progress.load(Ordering::Relaxed)
    }

    /// Number of cancellation signals actually delivered to a running task
    pub fn cancel_signals(&self) -> u64 {
        self.cancel_signals
    }

    /// Reset the slot for a new run and return the context the run will poll.
    /// Returns `None` while a run is live and has not been told to stop.
    ///
    /// A cancelled run may still be winding down; it keeps its own flags and
    /// counter, so it can neither mark the new run finished nor add to its
    /// progress.
    pub fn prepare(&mut self) -> Option<TaskContext> {
        if self.is_running() {
            return None;
        }
        if let Some(stale) = self.handle.take() {
            stale.abort();
        }
        self.running = Arc::new(AtomicBool::new(false));
        self.cancel = Arc::new(AtomicBool::new(false));
        self.progress = Arc::new(AtomicU64::new(0));
        Some(TaskContext {
            cancel: Arc::clone(&self.cancel),
            progress: Arc::clone(&self.progress),
        })
    }

    /// Spawn `future`, built from the context [`prepare`](Self::prepare)
    /// returned, on `runtime`. Returns false if a run is already active.
    pub fn spawn(&mut self, runtime: &Handle, future: TaskFuture) -> bool {
        if self.is_running() {
            return false;
        }
        if let Some(stale) = self.handle.take() {
            stale.abort();
        }

        self.running.store(true, Ordering::Release);
        let guard = RunningGuard(Arc::clone(&self.running));
        self.handle = Some(runtime.spawn(async move {
            let _guard = guard;
            future.await;
        }));
        true
    }

    /// Flag the task as running without spawning anything, for work driven
    /// elsewhere that only needs the shell's cancellation path
    pub fn mark_running(&mut self) {
        self.cancel = Arc::new(AtomicBool::new(false));
        self.running = Arc::new(AtomicBool::new(true));
    }

    /// Signal cancellation. Idempotent: returns true only when a running task
    /// received a new signal, false if it had finished or was already told to stop.
    pub fn cancel(&mut self) -> bool {
        let delivered = self.running.load(Ordering::Acquire)
            && !self.cancel.swap(true, Ordering::AcqRel);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        if delivered {
            self.cancel_signals += 1;
            log::debug!("Cancellation signalled to background task");
        }
        delivered
    }
}

impl Drop for BackgroundTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
