//! In-memory document store.
//!
//! Mirrors the MongoDB semantics the import relies on: a generated `_id` when
//! none is given, a unique `_id` per collection, and unordered bulk inserts
//! that keep going past rejected documents.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use tracing::debug;

use crate::errors::StoreError;
use crate::interfaces::{DocumentStore, StoreConnector};
use crate::types::{BatchInsertResult, InsertFailure};

#[derive(Debug, Default)]
struct MemoryCollection {
    documents: Vec<Document>,
    ids: HashSet<String>,
}

/// Document store kept entirely in process memory.
///
/// Used for dry runs and by the test suites.
///
/// # Example
///
/// ```
/// use bson::doc;
/// use legacy_import_repository::{DocumentStore, MemoryDocumentStore};
///
/// # tokio_test_block_on(async {
/// let store = MemoryDocumentStore::new();
/// let result = store
///     .insert_many("countries", vec![doc! { "_id": 1 }, doc! { "_id": 1 }])
///     .await
///     .unwrap();
/// assert_eq!(result.succeeded, 1);
/// assert_eq!(store.count("countries"), 1);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, MemoryCollection>>,
    shut_down: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, MemoryCollection>> {
        // A poisoned lock only means a panicking test held it; the data is
        // still consistent because every mutation is a single push.
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All documents stored in `collection`, in insertion order.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.lock()
            .get(collection)
            .map(|c| c.documents.clone())
            .unwrap_or_default()
    }

    /// Number of documents stored in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.lock()
            .get(collection)
            .map(|c| c.documents.len())
            .unwrap_or(0)
    }

    /// Names of the collections holding at least one document, sorted.
    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .lock()
            .iter()
            .filter(|(_, c)| !c.documents.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Whether `shutdown` has been called.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    fn id_key(id: &Bson) -> String {
        format!("{:?}", id)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<BatchInsertResult, StoreError> {
        if self.is_shut_down() {
            return Err(StoreError::connection("store has been shut down"));
        }

        let attempted = documents.len();
        let mut failures = Vec::new();
        let mut collections = self.lock();
        let target = collections.entry(collection.to_string()).or_default();

        for (index, mut document) in documents.into_iter().enumerate() {
            if !document.contains_key("_id") {
                document.insert("_id", ObjectId::new());
            }
            let key = document.get("_id").map(Self::id_key).unwrap_or_default();

            if target.ids.contains(&key) {
                let reason = format!(
                    "E11000 duplicate key error collection: {} index: _id_ dup key: {{ _id: {} }}",
                    collection, key
                );
                failures.push(InsertFailure {
                    index,
                    document,
                    reason,
                });
                continue;
            }

            target.ids.insert(key);
            target.documents.push(document);
        }

        debug!(
            collection = %collection,
            attempted = attempted,
            failed = failures.len(),
            "In-memory bulk insert"
        );

        Ok(BatchInsertResult {
            collection: collection.to_string(),
            attempted,
            succeeded: attempted - failures.len(),
            failures,
        })
    }

    async fn shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl StoreConnector for Arc<MemoryDocumentStore> {
    fn target(&self) -> String {
        "in-memory store".to_string()
    }

    /// Reopens a store that was shut down, keeping its collections, the
    /// way a new client sees the same database.
    async fn connect(&self) -> Result<Arc<dyn DocumentStore>, StoreError> {
        self.shut_down.store(false, Ordering::SeqCst);
        Ok(self.clone())
    }
}
