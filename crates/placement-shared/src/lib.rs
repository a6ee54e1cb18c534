// Domain types shared by the store and the client.

pub mod constants;
pub mod crypto;
pub mod error;
pub mod models;
pub mod types;
pub mod validation;

pub use error::{CodecError, ValidationError};
pub use models::{Candidate, Offer, OfferStatus, Record, Recruiter, User};
pub use types::{OfferId, Role, UserId};
