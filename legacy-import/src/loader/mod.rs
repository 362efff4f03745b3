//! Loader module for the legacy import.
//!
//! Writes one table's documents to its collection with a single unordered
//! bulk insert.

use std::sync::Arc;

use bson::Document;
use legacy_import_repository::{BatchInsertResult, DocumentStore, StoreError};
use tracing::{debug, error, instrument, warn};

use crate::errors::ImportError;

/// Configuration for the collection loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Rejected documents logged individually per table.
    pub failure_log_limit: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            failure_log_limit: 10,
        }
    }
}

/// Result of loading one table.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The store processed the batch; some documents may have been rejected.
    Inserted(BatchInsertResult),
    /// The whole batch failed with a non-fatal store error. Nothing counts
    /// as written.
    BatchFailed { attempted: usize, error: StoreError },
}

impl LoadOutcome {
    pub fn attempted(&self) -> usize {
        match self {
            LoadOutcome::Inserted(result) => result.attempted,
            LoadOutcome::BatchFailed { attempted, .. } => *attempted,
        }
    }

    pub fn succeeded(&self) -> usize {
        match self {
            LoadOutcome::Inserted(result) => result.succeeded,
            LoadOutcome::BatchFailed { .. } => 0,
        }
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    pub fn error(&self) -> Option<&StoreError> {
        match self {
            LoadOutcome::Inserted(_) => None,
            LoadOutcome::BatchFailed { error, .. } => Some(error),
        }
    }
}

/// Loader that writes documents into the document store.
///
/// Partial failures and batch-level insert errors are logged and reported;
/// only connection-level errors abort the run.
pub struct CollectionLoader {
    store: Arc<dyn DocumentStore>,
    config: LoaderConfig,
}

impl CollectionLoader {
    /// Create a new loader over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            config: LoaderConfig::default(),
        }
    }

    /// Create a new loader with custom configuration.
    pub fn with_config(store: Arc<dyn DocumentStore>, config: LoaderConfig) -> Self {
        Self { store, config }
    }

    /// Insert `documents` into `collection`.
    ///
    /// # Returns
    ///
    /// * `Ok(LoadOutcome)` - The store's view of the batch, including
    ///   partial and whole-batch failures
    /// * `Err(ImportError)` - If the store connection failed
    #[instrument(skip(self, documents), fields(documents = documents.len(), backend = self.store.backend()))]
    pub async fn load(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<LoadOutcome, ImportError> {
        if documents.is_empty() {
            return Ok(LoadOutcome::Inserted(BatchInsertResult::empty(collection)));
        }

        let attempted = documents.len();
        match self.store.insert_many(collection, documents).await {
            Ok(result) => {
                if result.is_complete() {
                    debug!(inserted = result.succeeded, "Inserted every document");
                } else {
                    self.log_failures(&result);
                }
                Ok(LoadOutcome::Inserted(result))
            }
            Err(e) if e.is_fatal() => {
                error!(error = %e, attempted = attempted, "Store connection failed");
                Err(ImportError::from(e))
            }
            Err(e) => {
                error!(error = %e, attempted = attempted, "Bulk insert failed");
                Ok(LoadOutcome::BatchFailed {
                    attempted,
                    error: e,
                })
            }
        }
    }

    fn log_failures(&self, result: &BatchInsertResult) {
        warn!(
            collection = %result.collection,
            succeeded = result.succeeded,
            failed = result.failed(),
            "Bulk insert completed with some failures"
        );

        for failure in result.failures.iter().take(self.config.failure_log_limit) {
            let old_id = failure
                .document
                .get("oldId")
                .map(|id| id.to_string())
                .unwrap_or_default();
            error!(
                collection = %result.collection,
                index = failure.index,
                old_id = %old_id,
                reason = %failure.reason,
                "Failed to insert document"
            );
        }

        let unlogged = result
            .failures
            .len()
            .saturating_sub(self.config.failure_log_limit);
        if unlogged > 0 {
            warn!(
                collection = %result.collection,
                unlogged = unlogged,
                "Further insert failures not logged"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bson::doc;
    use legacy_import_repository::InsertFailure;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock store that rejects every document whose `oldId` is "bad", or
    /// fails whole batches with a configured error.
    struct MockStore {
        batch_error: Option<StoreError>,
        calls: AtomicUsize,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                batch_error: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(error: StoreError) -> Self {
            Self {
                batch_error: Some(error),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DocumentStore for MockStore {
        fn backend(&self) -> &'static str {
            "mock"
        }

        async fn insert_many(
            &self,
            collection: &str,
            documents: Vec<Document>,
        ) -> Result<BatchInsertResult, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(error) = &self.batch_error {
                return Err(error.clone());
            }

            let attempted = documents.len();
            let failures: Vec<InsertFailure> = documents
                .into_iter()
                .enumerate()
                .filter(|(_, d)| matches!(d.get_str("oldId"), Ok("bad")))
                .map(|(index, document)| InsertFailure {
                    index,
                    document,
                    reason: "E11000 duplicate key".to_string(),
                })
                .collect();

            Ok(BatchInsertResult {
                collection: collection.to_string(),
                attempted,
                succeeded: attempted - failures.len(),
                failures,
            })
        }

        async fn shutdown(&self) {}
    }

    #[tokio::test]
    async fn test_partial_failure_is_reported() {
        let store = Arc::new(MockStore::new());
        let loader = CollectionLoader::new(store.clone());

        let outcome = loader
            .load(
                "users",
                vec![doc! { "oldId": "1" }, doc! { "oldId": "bad" }, doc! { "oldId": "3" }],
            )
            .await
            .unwrap();

        assert_eq!(outcome.attempted(), 3);
        assert_eq!(outcome.succeeded(), 2);
        assert_eq!(outcome.failed(), 1);
        assert!(outcome.error().is_none());
    }

    #[tokio::test]
    async fn test_empty_batch_skips_the_store() {
        let store = Arc::new(MockStore::new());
        let loader = CollectionLoader::new(store.clone());

        let outcome = loader.load("carts", Vec::new()).await.unwrap();

        assert_eq!(outcome.attempted(), 0);
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_insert_error_counts_as_nothing_written() {
        let store = Arc::new(MockStore::failing(StoreError::insert("document too large")));
        let loader = CollectionLoader::new(store);

        let outcome = loader
            .load("products", vec![doc! { "oldId": "1" }, doc! { "oldId": "2" }])
            .await
            .unwrap();

        assert_eq!(outcome.attempted(), 2);
        assert_eq!(outcome.succeeded(), 0);
        assert_eq!(outcome.failed(), 2);
        assert!(matches!(outcome.error(), Some(StoreError::InsertError(_))));
    }

    #[tokio::test]
    async fn test_connection_error_is_fatal() {
        let store = Arc::new(MockStore::failing(StoreError::connection("connection reset")));
        let loader = CollectionLoader::with_config(store, LoaderConfig { failure_log_limit: 1 });

        let result = loader.load("orders", vec![doc! { "oldId": "1" }]).await;

        assert!(matches!(
            result,
            Err(ImportError::StoreError(StoreError::ConnectionError(_)))
        ));
    }
}
