//! Per-recorder delivery queues
//!
//! A [`DeliveryQueue`] is an ordered (FIFO) single-consumer work queue with
//! two submission modes: enqueue-and-continue and enqueue-and-wait. Each
//! recorder owns one by default; recorders may deliberately share a queue
//! to preserve interleaving order between them.

use crossbeam_channel::{bounded, unbounded, Sender};
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

type Task = Box<dyn FnOnce() + Send + 'static>;

/// A labeled FIFO work queue backed by a dedicated worker thread.
///
/// Tasks run in submission order. A panicking task is isolated and reported
/// to stderr; the worker keeps consuming. Dropping the last handle closes
/// the queue and joins the worker, draining any pending tasks first.
pub struct DeliveryQueue {
    label: String,
    sender: Option<Sender<Task>>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
}

impl DeliveryQueue {
    /// Creates a queue whose worker thread carries the given label.
    pub fn new(label: impl Into<String>) -> Arc<Self> {
        let label = label.into();
        let (sender, receiver) = unbounded::<Task>();

        let worker_label = label.clone();
        let handle = thread::spawn(move || {
            while let Ok(task) = receiver.recv() {
                if catch_unwind(AssertUnwindSafe(task)).is_err() {
                    eprintln!(
                        "[log-pipeline] task panicked on delivery queue '{}'",
                        worker_label
                    );
                }
            }
        });

        Arc::new(Self {
            label,
            sender: Some(sender),
            worker: Mutex::new(Some(handle)),
        })
    }

    /// The label this queue was created with.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Enqueues a task using the requested submission mode.
    pub fn dispatch(&self, task: impl FnOnce() + Send + 'static, synchronous: bool) {
        if synchronous {
            self.dispatch_sync(task);
        } else {
            self.dispatch_async(task);
        }
    }

    /// Enqueues a task and returns immediately.
    pub fn dispatch_async(&self, task: impl FnOnce() + Send + 'static) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(Box::new(task));
        }
    }

    /// Enqueues a task and blocks the caller until it has completed.
    ///
    /// Must not be called from the queue's own worker thread; doing so
    /// deadlocks, just as waiting on any task that never finishes would.
    /// There is no timeout.
    pub fn dispatch_sync(&self, task: impl FnOnce() + Send + 'static) {
        let Some(sender) = &self.sender else { return };
        let (done_tx, done_rx) = bounded::<()>(1);
        let wrapped = Box::new(move || {
            task();
            let _ = done_tx.send(());
        });
        if sender.send(wrapped).is_ok() {
            let _ = done_rx.recv();
        }
    }

    /// Blocks until every previously enqueued task has completed.
    pub fn barrier(&self) {
        self.dispatch_sync(|| {});
    }
}

impl Drop for DeliveryQueue {
    fn drop(&mut self) {
        // Close the channel so the worker drains pending tasks and exits.
        drop(self.sender.take());
        if let Some(handle) = self.worker.lock().take() {
            if handle.join().is_err() {
                eprintln!(
                    "[log-pipeline] worker for delivery queue '{}' panicked during shutdown",
                    self.label
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_tasks_run_in_submission_order() {
        let queue = DeliveryQueue::new("test.order");
        let log = Arc::new(Mutex::new(Vec::new()));

        for i in 0..100 {
            let log = Arc::clone(&log);
            queue.dispatch_async(move || log.lock().push(i));
        }
        queue.barrier();

        let observed = log.lock().clone();
        assert_eq!(observed, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_dispatch_sync_waits_for_completion() {
        let queue = DeliveryQueue::new("test.sync");
        let counter = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&counter);
        queue.dispatch_sync(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        // No sleep needed: dispatch_sync returns only after the task ran.
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_async_tasks_complete_before_barrier_returns() {
        let queue = DeliveryQueue::new("test.barrier");
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..10 {
            let counter = Arc::clone(&counter);
            queue.dispatch_async(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        queue.barrier();
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_panicking_task_does_not_kill_the_worker() {
        let queue = DeliveryQueue::new("test.panic");
        let counter = Arc::new(AtomicUsize::new(0));

        queue.dispatch_async(|| panic!("boom"));
        let counter_clone = Arc::clone(&counter);
        queue.dispatch_sync(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_drains_pending_tasks() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let queue = DeliveryQueue::new("test.drop");
            for _ in 0..25 {
                let counter = Arc::clone(&counter);
                queue.dispatch_async(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
            }
        }
        assert_eq!(counter.load(Ordering::SeqCst), 25);
    }
}
