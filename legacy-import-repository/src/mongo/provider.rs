//! MongoDB document store implementation.
//!
//! This module provides the concrete implementation of `DocumentStore` and
//! `StoreConnector` using the official MongoDB Rust driver.

use std::sync::Arc;

use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::{ClientOptions, InsertManyOptions};
use mongodb::{Client, Database};
use tracing::{debug, info, warn};

use crate::config::{StoreConfig, APP_NAME};
use crate::errors::StoreError;
use crate::interfaces::{DocumentStore, StoreConnector};
use crate::types::{BatchInsertResult, InsertFailure};

/// MongoDB-backed document store.
///
/// # Example
///
/// ```ignore
/// use legacy_import_repository::{MongoDocumentStore, StoreConfig};
///
/// let config = StoreConfig::new("mongodb://localhost:27017", "grocery_store");
/// let store = MongoDocumentStore::connect(&config).await?;
/// let result = store.insert_many("countries", documents).await?;
/// println!("{} of {} written", result.succeeded, result.attempted);
/// ```
pub struct MongoDocumentStore {
    client: Client,
    database: Database,
}

impl MongoDocumentStore {
    /// Connect to MongoDB and verify the deployment answers a `ping`.
    ///
    /// # Arguments
    ///
    /// * `config` - Connection string and target database
    ///
    /// # Returns
    ///
    /// * `Ok(MongoDocumentStore)` - A connected store
    /// * `Err(StoreError)` - If the connection string is invalid or the
    ///   server cannot be reached
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        if config.database.trim().is_empty() {
            return Err(StoreError::configuration("database name is empty"));
        }

        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| StoreError::configuration(e.to_string()))?;
        options.app_name = Some(APP_NAME.to_string());

        let client =
            Client::with_options(options).map_err(|e| StoreError::configuration(e.to_string()))?;
        let database = client.database(&config.database);

        database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        info!(
            uri = %config.redacted_uri(),
            database = %config.database,
            "Connected to MongoDB"
        );

        Ok(Self { client, database })
    }

    /// Split a failed `insert_many` into per-document failures.
    ///
    /// An unordered insert that hits write errors still writes every other
    /// document; the driver reports the rejected ones by batch index.
    fn partial_result(
        collection: &str,
        documents: Vec<Document>,
        err: MongoError,
    ) -> Result<BatchInsertResult, StoreError> {
        let attempted = documents.len();
        let write_errors = match *err.kind {
            ErrorKind::BulkWrite(ref failure) => match failure.write_errors {
                Some(ref write_errors) => write_errors
                    .iter()
                    .map(|write_error| (write_error.index, write_error.message.clone()))
                    .collect::<Vec<_>>(),
                None => {
                    // Only a write concern error: the documents were written
                    // but durability was not confirmed.
                    warn!(
                        collection = %collection,
                        error = %err,
                        "Bulk insert reported a write concern error"
                    );
                    Vec::new()
                }
            },
            _ => return Err(classify_error(&err)),
        };

        let mut slots: Vec<Option<Document>> = documents.into_iter().map(Some).collect();
        let failures: Vec<InsertFailure> = write_errors
            .into_iter()
            .map(|(index, reason)| InsertFailure {
                index,
                document: slots.get_mut(index).and_then(Option::take).unwrap_or_default(),
                reason,
            })
            .collect();

        Ok(BatchInsertResult {
            collection: collection.to_string(),
            attempted,
            succeeded: attempted.saturating_sub(failures.len()),
            failures,
        })
    }
}

/// Map a driver error onto the store error taxonomy.
fn classify_error(err: &MongoError) -> StoreError {
    match *err.kind {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::Authentication { .. }
        | ErrorKind::DnsResolve { .. } => StoreError::connection(err.to_string()),
        ErrorKind::InvalidArgument { .. } => StoreError::configuration(err.to_string()),
        ErrorKind::BsonSerialization(_) => StoreError::serialization(err.to_string()),
        _ => StoreError::insert(err.to_string()),
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<BatchInsertResult, StoreError> {
        if documents.is_empty() {
            return Ok(BatchInsertResult::empty(collection));
        }

        let attempted = documents.len();
        let options = InsertManyOptions::builder().ordered(false).build();

        debug!(collection = %collection, count = attempted, "Submitting unordered bulk insert");

        let insert = self
            .database
            .collection::<Document>(collection)
            .insert_many(&documents, options)
            .await;

        match insert {
            Ok(result) => Ok(BatchInsertResult {
                collection: collection.to_string(),
                attempted,
                succeeded: result.inserted_ids.len(),
                failures: Vec::new(),
            }),
            Err(err) => Self::partial_result(collection, documents, err),
        }
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        info!(database = %self.database.name(), "MongoDB connection released");
    }
}

/// Connector producing [`MongoDocumentStore`] instances.
pub struct MongoConnector {
    config: StoreConfig,
}

impl MongoConnector {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl StoreConnector for MongoConnector {
    fn target(&self) -> String {
        format!("{} (database {})", self.config.redacted_uri(), self.config.database)
    }

    async fn connect(&self) -> Result<Arc<dyn DocumentStore>, StoreError> {
        let store = MongoDocumentStore::connect(&self.config).await?;
        Ok(Arc::new(store))
    }
}
