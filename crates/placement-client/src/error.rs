use thiserror::Error;

use placement_shared::{CodecError, OfferStatus, ValidationError};
use placement_store::StoreError;

/// Everything a screen operation can fail with.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Bad input; reported before anything is dispatched.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store operation itself failed.
    #[error("{0}")]
    Store(StoreError),

    #[error("Offer is already {from}; it cannot become {to}")]
    InvalidTransition { from: OfferStatus, to: OfferStatus },

    #[error("{collection} record {id} no longer exists")]
    NotFound { collection: String, id: String },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl From<StoreError> for ClientError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { collection, id } => Self::NotFound { collection, id },
            other => Self::Store(other),
        }
    }
}

impl ClientError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
