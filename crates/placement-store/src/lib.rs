//! # placement-store
//!
//! Document store client for Placement Desk.
//!
//! The [`DocumentStore`] trait is the async CRUD contract the client core
//! talks to.  Two engines implement it: [`MemoryStore`] for tests and demos,
//! and [`SqliteStore`] for local persistence.  Typed helpers in [`client`]
//! map documents to the records defined in `placement-shared`.

pub mod client;
pub mod database;
pub mod document;
pub mod memory;
pub mod migrations;

mod error;

pub use client::{add_record, get_record, query_records, require_record, set_record, DocumentStore};
pub use database::SqliteStore;
pub use document::{to_fields, Document, Fields, Filter, Precondition, Query};
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
