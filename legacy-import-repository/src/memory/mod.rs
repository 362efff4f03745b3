//! In-memory implementation of the document store.

mod provider;

pub use provider::MemoryDocumentStore;
