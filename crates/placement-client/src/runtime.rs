//! The two runtimes the client lives on.
//!
//! Store work runs on a multi-threaded worker runtime.  Everything the user
//! sees runs on a single current-thread runtime driving a `LocalSet`, which
//! is the presentation thread.

use std::future::Future;

use tokio::runtime::{Builder, Runtime};
use tokio::task::LocalSet;

use crate::dispatch::WorkerPool;

pub struct PresentationRuntime {
    workers: Runtime,
    presentation: Runtime,
    local: LocalSet,
}

impl PresentationRuntime {
    pub fn new(worker_threads: usize) -> std::io::Result<Self> {
        let workers = Builder::new_multi_thread()
            .worker_threads(worker_threads.max(1))
            .thread_name("placement-worker")
            .enable_all()
            .build()?;
        let presentation = Builder::new_current_thread().enable_all().build()?;

        Ok(Self {
            workers,
            presentation,
            local: LocalSet::new(),
        })
    }

    /// Pool spawning onto the worker runtime.
    pub fn worker_pool(&self, max_in_flight: usize) -> WorkerPool {
        WorkerPool::new(self.workers.handle().clone(), max_in_flight)
    }

    /// Drive `fut` on the presentation thread until it resolves.
    pub fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.local.block_on(&self.presentation, fut)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::error::Result;

    #[test]
    fn test_work_on_workers_completion_on_caller() {
        let runtime = PresentationRuntime::new(2).unwrap();
        let caller = std::thread::current().id();

        let (on_worker, on_caller) = runtime.block_on(async {
            let dispatcher = Dispatcher::new(runtime.worker_pool(2));
            let result = Rc::new(Cell::new((false, false)));

            let sink = Rc::clone(&result);
            dispatcher.dispatch(
                async move { Ok(std::thread::current().id() != caller) },
                move |outcome: Result<bool>| {
                    let on_caller = std::thread::current().id() == caller;
                    sink.set((outcome.unwrap_or(false), on_caller));
                },
            );
            dispatcher.settle().await;
            result.get()
        });

        assert!(on_worker);
        assert!(on_caller);
    }
}
