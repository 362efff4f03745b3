//! Result types for document store operations.

use bson::Document;

/// A single document rejected by a bulk insert.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertFailure {
    /// Position of the document in the submitted batch.
    pub index: usize,
    /// The rejected document.
    pub document: Document,
    /// Reason reported by the store.
    pub reason: String,
}

/// Outcome of one unordered bulk insert.
///
/// Partial failure is an ordinary outcome: `succeeded` may be lower than
/// `attempted`, and `failures` lists every rejected document with the reason
/// the store gave.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchInsertResult {
    /// Target collection.
    pub collection: String,
    /// Number of documents submitted.
    pub attempted: usize,
    /// Number of documents the store reports as written.
    pub succeeded: usize,
    /// Rejected documents.
    pub failures: Vec<InsertFailure>,
}

impl BatchInsertResult {
    /// An empty result for a batch with nothing to insert.
    pub fn empty(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            attempted: 0,
            succeeded: 0,
            failures: Vec::new(),
        }
    }

    /// Number of rejected documents.
    pub fn failed(&self) -> usize {
        self.attempted.saturating_sub(self.succeeded)
    }

    /// Whether every submitted document was written.
    pub fn is_complete(&self) -> bool {
        self.succeeded == self.attempted
    }
}
