//! # Legacy Import Repository
//!
//! This crate provides traits and implementations for writing imported
//! documents. It includes definitions for errors, interfaces, the batch
//! insert result type, and concrete implementations for MongoDB and for an
//! in-memory store used by dry runs and tests.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod mongo;
pub mod types;

pub use config::StoreConfig;
pub use errors::StoreError;
pub use interfaces::{DocumentStore, StoreConnector};
pub use memory::MemoryDocumentStore;
pub use mongo::{MongoConnector, MongoDocumentStore};
pub use types::{BatchInsertResult, InsertFailure};
