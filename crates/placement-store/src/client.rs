//! The store client contract every engine implements, plus typed helpers on
//! top of it.

use async_trait::async_trait;

use placement_shared::Record;

use crate::document::{to_fields, Document, Fields, Precondition, Query};
use crate::error::{Result, StoreError};

/// Async CRUD over named collections of schemaless documents.
///
/// Implementations are shared across worker tasks behind an
/// `Arc<dyn DocumentStore>`.  No cross-document transactions are offered; the
/// only atomic read-check-write is [`DocumentStore::update_if`] on a single
/// document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point read.  `Ok(None)` when the document does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Matching documents in insertion order.
    async fn query(&self, query: &Query) -> Result<Vec<Document>>;

    /// Insert under a fresh store-assigned id, returned on success.
    async fn add(&self, collection: &str, fields: Fields) -> Result<String>;

    /// Create or fully overwrite the document at `id`.
    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    /// Merge `patch` into an existing document.  `NotFound` if it is missing.
    async fn update(&self, collection: &str, id: &str, patch: Fields) -> Result<()>;

    /// Like [`DocumentStore::update`], but only if `precondition` holds on the
    /// stored document at write time.
    async fn update_if(
        &self,
        collection: &str,
        id: &str,
        precondition: &Precondition,
        patch: Fields,
    ) -> Result<()>;
}

pub async fn get_record<R: Record>(store: &dyn DocumentStore, id: &str) -> Result<Option<R>> {
    match store.get(R::COLLECTION, id).await? {
        Some(doc) => Ok(Some(doc.decode()?)),
        None => Ok(None),
    }
}

/// Like [`get_record`] but a missing document is an error.
pub async fn require_record<R: Record>(store: &dyn DocumentStore, id: &str) -> Result<R> {
    get_record(store, id)
        .await?
        .ok_or_else(|| StoreError::not_found(R::COLLECTION, id))
}

pub async fn query_records<R: Record>(store: &dyn DocumentStore, query: &Query) -> Result<Vec<R>> {
    store
        .query(query)
        .await?
        .into_iter()
        .map(Document::decode)
        .collect()
}

/// Insert a record under a store-assigned id and return it with the id set.
pub async fn add_record<R: Record>(store: &dyn DocumentStore, mut record: R) -> Result<R> {
    let id = store.add(R::COLLECTION, to_fields(&record)?).await?;
    record.set_id(id);
    Ok(record)
}

/// Full overwrite of the record under its own id.
pub async fn set_record<R: Record>(store: &dyn DocumentStore, record: &R) -> Result<()> {
    let fields = to_fields(record)?;
    store.set(R::COLLECTION, record.id(), fields).await
}
