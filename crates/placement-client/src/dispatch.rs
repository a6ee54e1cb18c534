//! Background work with results marshaled back to the presentation thread.
//!
//! [`Dispatcher::dispatch`] runs a `Send` future on the [`WorkerPool`] and
//! delivers its outcome to a completion closure on the thread that owns the
//! `LocalSet`.  Completions are plain `FnOnce`; they run one at a time, never
//! alongside other presentation code, and may freely touch `Rc` state.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{Notify, Semaphore};
use tokio::task::JoinHandle;

use placement_store::StoreError;

use crate::error::{ClientError, Result};

/// Spawns work on a runtime handle, at most `max_in_flight` at a time.
#[derive(Clone)]
pub struct WorkerPool {
    handle: Handle,
    permits: Arc<Semaphore>,
    max_in_flight: usize,
}

impl WorkerPool {
    pub fn new(handle: Handle, max_in_flight: usize) -> Self {
        let max_in_flight = max_in_flight.max(1);
        Self {
            handle,
            permits: Arc::new(Semaphore::new(max_in_flight)),
            max_in_flight,
        }
    }

    /// Pool on the runtime the caller is running in.
    pub fn current(max_in_flight: usize) -> Self {
        Self::new(Handle::current(), max_in_flight)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    pub fn spawn<F, T>(&self, work: F) -> JoinHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        self.handle.spawn(async move {
            // The semaphore is never closed, so acquiring only waits.
            let _permit = permits.acquire_owned().await.ok();
            work.await
        })
    }
}

#[derive(Default)]
struct InFlight {
    count: Cell<usize>,
    idle: Notify,
}

// Held by each dispatch until its completion has returned.
struct InFlightSlot(Rc<InFlight>);

impl InFlightSlot {
    fn enter(tracker: &Rc<InFlight>) -> Self {
        tracker.count.set(tracker.count.get() + 1);
        Self(Rc::clone(tracker))
    }
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        let remaining = self.0.count.get() - 1;
        self.0.count.set(remaining);
        if remaining == 0 {
            self.0.idle.notify_waiters();
        }
    }
}

/// Presentation-side entry point for background work.
///
/// Cloning shares the pool and the in-flight tracker.  Must be used from
/// inside the presentation `LocalSet`.
#[derive(Clone)]
pub struct Dispatcher {
    pool: WorkerPool,
    tracker: Rc<InFlight>,
}

impl Dispatcher {
    pub fn new(pool: WorkerPool) -> Self {
        Self {
            pool,
            tracker: Rc::new(InFlight::default()),
        }
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Run `work` on the pool, then `on_complete` with its outcome on the
    /// presentation thread.  `on_complete` runs exactly once, also when the
    /// worker panics.
    pub fn dispatch<T, W, C>(&self, work: W, on_complete: C) -> DispatchHandle
    where
        T: Send + 'static,
        W: Future<Output = Result<T>> + Send + 'static,
        C: FnOnce(Result<T>) + 'static,
    {
        let slot = InFlightSlot::enter(&self.tracker);
        let worker = self.pool.spawn(work);

        let task = tokio::task::spawn_local(async move {
            let outcome = match worker.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(error = %e, "worker task failed");
                    Err(ClientError::Store(StoreError::Worker(e.to_string())))
                }
            };
            on_complete(outcome);
            drop(slot);
        });

        DispatchHandle { task }
    }

    /// Dispatches whose completion has not returned yet.
    pub fn in_flight(&self) -> usize {
        self.tracker.count.get()
    }

    /// Wait until nothing is in flight, including work dispatched from
    /// completions while waiting.
    pub async fn settle(&self) {
        loop {
            let idle = self.tracker.idle.notified();
            if self.tracker.count.get() == 0 {
                return;
            }
            idle.await;
        }
    }
}

/// Handle to one dispatch.  Dropping it does not cancel anything.
pub struct DispatchHandle {
    task: JoinHandle<()>,
}

impl DispatchHandle {
    /// Resolves once the completion has run.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "completion panicked");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
