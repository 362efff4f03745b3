//! Connector trait used to acquire a document store once per run.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::interfaces::DocumentStore;

/// Opens a connection to a document store.
///
/// The import calls `connect` exactly once at the start of a run and
/// releases the returned store with [`DocumentStore::shutdown`] at the end.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    /// Human-readable description of the target, safe to log.
    fn target(&self) -> String;

    /// Connect and verify the store is reachable.
    async fn connect(&self) -> Result<Arc<dyn DocumentStore>, StoreError>;
}
