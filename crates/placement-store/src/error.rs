use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error from the local engine.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A point operation targeted a document that does not exist.
    #[error("Document {collection}/{id} not found")]
    NotFound { collection: String, id: String },

    /// A conditional write found the document in an unexpected state.
    #[error("Precondition on {collection}/{id} failed: {field} changed")]
    PreconditionFailed {
        collection: String,
        id: String,
        field: String,
    },

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// A document body could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record did not serialize to a JSON object.
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// The store cannot be reached (network down, lock poisoned, ...).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The worker running the operation died before reporting back.
    #[error("Worker failed: {0}")]
    Worker(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
