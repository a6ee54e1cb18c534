//! Startup: store, runtimes, and the first screen.

use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;

use placement_store::{DocumentStore, MemoryStore, SqliteStore};

use crate::config::{ClientConfig, StoreKind};
use crate::dispatch::Dispatcher;
use crate::events::Notifier;
use crate::host::ScreenHost;
use crate::runtime::PresentationRuntime;
use crate::screen::{ScreenId, ScreenParams};
use crate::state::AppState;

pub struct App {
    config: ClientConfig,
    store: Arc<dyn DocumentStore>,
    runtime: PresentationRuntime,
}

impl App {
    /// Open the configured store and start the runtimes.  Failing to open
    /// the store fails startup.
    pub fn open(config: ClientConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn DocumentStore> = match config.store {
            StoreKind::Memory => Arc::new(MemoryStore::new()),
            StoreKind::Sqlite => {
                let store = match &config.db_path {
                    Some(path) => SqliteStore::open_at(path),
                    None => SqliteStore::new(),
                }
                .context("Failed to open document store")?;
                Arc::new(store)
            }
        };

        let runtime = PresentationRuntime::new(config.worker_threads)
            .context("Failed to start runtimes")?;

        tracing::info!(
            store = ?config.store,
            max_in_flight = config.max_in_flight,
            worker_threads = config.worker_threads,
            "client ready"
        );
        Ok(Self {
            config,
            store,
            runtime,
        })
    }

    /// Build an app around an already opened store.
    pub fn with_store(config: ClientConfig, store: Arc<dyn DocumentStore>) -> anyhow::Result<Self> {
        let runtime = PresentationRuntime::new(config.worker_threads)
            .context("Failed to start runtimes")?;
        Ok(Self {
            config,
            store,
            runtime,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.store)
    }

    /// Show the login screen and drive `body` on the presentation thread.
    /// Returns once `body` has finished and no dispatched work is left.
    pub fn run<F, Fut, T>(&self, notifier: Rc<dyn Notifier>, body: F) -> T
    where
        F: FnOnce(Rc<ScreenHost>) -> Fut,
        Fut: Future<Output = T>,
    {
        self.runtime.block_on(async {
            let dispatcher = Dispatcher::new(self.runtime.worker_pool(self.config.max_in_flight));
            let state = AppState::new(self.store(), dispatcher.clone(), notifier);
            let host = ScreenHost::new(state);
            host.show(ScreenId::Login, ScreenParams::none());

            let output = body(Rc::clone(&host)).await;
            dispatcher.settle().await;
            output
        })
    }
}
