//! Document store trait definition.
//!
//! This module defines the abstract interface the import writes through,
//! allowing for different backend implementations (MongoDB, in-memory).

use async_trait::async_trait;
use bson::Document;

use crate::errors::StoreError;
use crate::types::BatchInsertResult;

/// Abstracts the underlying document database.
///
/// Implementations are handed to the import loader behind an `Arc` so the
/// pipeline can be exercised against mock or in-memory stores.
///
/// # Insert semantics
///
/// `insert_many` is an unordered bulk insert: a document failing (for
/// instance on a duplicate `_id`) never prevents its siblings from being
/// written. Per-document failures are reported in the returned
/// [`BatchInsertResult`]; `Err` is reserved for failures of the whole batch.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name used in log lines.
    fn backend(&self) -> &'static str;

    /// Insert `documents` into `collection` without stopping at the first
    /// failing document.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchInsertResult)` - How many documents were attempted and
    ///   written, and why the others were rejected
    /// * `Err(StoreError)` - If the batch could not be written at all
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<BatchInsertResult, StoreError>;

    /// Release the connection. Further inserts fail with a connection error.
    async fn shutdown(&self);
}
