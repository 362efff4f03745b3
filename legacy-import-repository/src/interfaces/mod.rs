//! Interface definitions for the document store.
//!
//! This module defines the abstract `DocumentStore` and `StoreConnector`
//! traits that allow for dependency injection and swappable backends.

mod document_store;
mod store_connector;

pub use document_store::DocumentStore;
pub use store_connector::StoreConnector;
