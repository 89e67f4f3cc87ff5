use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crossbeam::atomic::AtomicCell;
use crossbeam::channel::{Receiver, TryRecvError, bounded};
use rayon::Yield;

use crate::error::{ForkJoinError, Result};

type Job<T> = Box<dyn FnOnce() -> Result<T> + Send>;
type Outcome<T> = std::thread::Result<Result<T>>;

/// Handle to a task submitted with [`ForkJoinPool::fork`](super::ForkJoinPool::fork)
///
/// The task is claimed exactly once: either by a pool worker that picks it up,
/// or by [`ForkHandle::join`] if no worker has started it yet.
pub struct ForkHandle<T> {
    claim: Arc<AtomicCell<Option<Job<T>>>>,
    result_rx: Receiver<Outcome<T>>,
}

impl<T> ForkHandle<T>
where
    T: Send + 'static,
{
    pub(super) fn spawn<F>(pool: &rayon::ThreadPool, task: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let job: Job<T> = Box::new(task);
        let claim = Arc::new(AtomicCell::new(Some(job)));
        let (result_tx, result_rx) = bounded(1);

        let worker_claim = Arc::clone(&claim);
        pool.spawn(move || {
            // None when the joiner already ran it inline
            if let Some(job) = worker_claim.take() {
                let outcome = panic::catch_unwind(AssertUnwindSafe(job));
                // The handle may have been dropped without joining
                let _ = result_tx.send(outcome);
            }
        });

        Self { claim, result_rx }
    }

    /// Wait for the forked task and return its result
    ///
    /// Runs the task on the current thread when no worker has claimed it yet.
    /// Errors and panics raised by the task are returned here.
    pub fn join(self) -> Result<T> {
        if let Some(job) = self.claim.take() {
            tracing::trace!("forked task unclaimed at join, running inline");
            return settle(panic::catch_unwind(AssertUnwindSafe(job)));
        }

        loop {
            match self.result_rx.try_recv() {
                Ok(outcome) => return settle(outcome),
                Err(TryRecvError::Disconnected) => return Err(lost_result()),
                Err(TryRecvError::Empty) => {}
            }

            match rayon::yield_now() {
                Some(Yield::Executed) => continue,
                // Nothing to help with, or not on a pool thread
                _ => {
                    return match self.result_rx.recv() {
                        Ok(outcome) => settle(outcome),
                        Err(_) => Err(lost_result()),
                    };
                }
            }
        }
    }
}

fn settle<T>(outcome: Outcome<T>) -> Result<T> {
    outcome.unwrap_or_else(|payload| Err(ForkJoinError::from_panic(payload)))
}

fn lost_result() -> ForkJoinError {
    ForkJoinError::Panicked("forked task finished without reporting a result".to_string())
}
