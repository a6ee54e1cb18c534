//! In-process document store.
//!
//! Used by tests and demos in place of the remote store.  Besides plain CRUD
//! it can simulate latency and an unreachable backend, and it counts reads
//! and writes so callers can assert that an operation never touched the
//! store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::client::DocumentStore;
use crate::document::{merge, Document, Fields, Precondition, Query};
use crate::error::{Result, StoreError};

// Insertion-ordered documents of one collection.
type Collection = Vec<(String, Fields)>;

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Collection>>,
    latency: Mutex<Option<Duration>>,
    unavailable: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
    active: AtomicUsize,
    peak_active: AtomicUsize,
}

/// Tracks how many operations are running at once.
struct ActiveOp<'a> {
    store: &'a MemoryStore,
}

impl<'a> ActiveOp<'a> {
    fn enter(store: &'a MemoryStore) -> Self {
        let now = store.active.fetch_add(1, Ordering::SeqCst) + 1;
        store.peak_active.fetch_max(now, Ordering::SeqCst);
        Self { store }
    }
}

impl Drop for ActiveOp<'_> {
    fn drop(&mut self) {
        self.store.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every operation by `latency` before it touches the data.
    pub fn with_latency(self, latency: Duration) -> Self {
        if let Ok(mut guard) = self.latency.lock() {
            *guard = Some(latency);
        }
        self
    }

    /// While set, every operation fails with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Reads plus writes.
    pub fn op_count(&self) -> usize {
        self.read_count() + self.write_count()
    }

    /// Highest number of operations observed in flight at the same time.
    pub fn peak_concurrency(&self) -> usize {
        self.peak_active.load(Ordering::SeqCst)
    }

    /// Number of documents currently in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    async fn begin(&self, counter: &AtomicUsize) -> Result<ActiveOp<'_>> {
        counter.fetch_add(1, Ordering::SeqCst);
        let op = ActiveOp::enter(self);

        let latency = self.latency.lock().ok().and_then(|guard| *guard);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".into()));
        }
        Ok(op)
    }

    fn with_collections<T>(&self, f: impl FnOnce(&mut HashMap<String, Collection>) -> T) -> Result<T> {
        let mut guard = self
            .collections
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Lock poisoned: {e}")))?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let _op = self.begin(&self.reads).await?;
        self.with_collections(|cols| {
            cols.get(collection).and_then(|docs| {
                docs.iter()
                    .find(|(doc_id, _)| doc_id == id)
                    .map(|(doc_id, fields)| Document::new(doc_id.clone(), fields.clone()))
            })
        })
    }

    async fn query(&self, query: &Query) -> Result<Vec<Document>> {
        let _op = self.begin(&self.reads).await?;
        self.with_collections(|cols| {
            cols.get(&query.collection)
                .map(|docs| {
                    docs.iter()
                        .filter(|(_, fields)| query.matches(fields))
                        .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String> {
        let _op = self.begin(&self.writes).await?;
        let id = Uuid::new_v4().to_string();
        self.with_collections(|cols| {
            cols.entry(collection.to_string())
                .or_default()
                .push((id.clone(), fields));
        })?;
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let _op = self.begin(&self.writes).await?;
        self.with_collections(|cols| {
            let docs = cols.entry(collection.to_string()).or_default();
            match docs.iter_mut().find(|(doc_id, _)| doc_id == id) {
                Some((_, body)) => *body = fields,
                None => docs.push((id.to_string(), fields)),
            }
        })
    }

    async fn update(&self, collection: &str, id: &str, patch: Fields) -> Result<()> {
        let _op = self.begin(&self.writes).await?;
        self.with_collections(|cols| {
            let body = cols
                .get_mut(collection)
                .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == id))
                .map(|(_, body)| body)
                .ok_or_else(|| StoreError::not_found(collection, id))?;
            merge(body, patch);
            Ok(())
        })?
    }

    async fn update_if(
        &self,
        collection: &str,
        id: &str,
        precondition: &Precondition,
        patch: Fields,
    ) -> Result<()> {
        let _op = self.begin(&self.writes).await?;
        self.with_collections(|cols| {
            let body = cols
                .get_mut(collection)
                .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == id))
                .map(|(_, body)| body)
                .ok_or_else(|| StoreError::not_found(collection, id))?;
            precondition.check(collection, id, body)?;
            merge(body, patch);
            Ok(())
        })?
    }
}
