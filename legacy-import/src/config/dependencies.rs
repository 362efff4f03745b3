//! Dependency initialization and wiring for the legacy import.

use std::sync::Arc;

use legacy_import_repository::{MemoryDocumentStore, MongoConnector, StoreConnector};
use tracing::{info, warn};

use super::ImportConfig;
use crate::consumer::{SnapshotFile, SnapshotSource};
use crate::orchestrator::Orchestrator;
use crate::processor::ImportProfile;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
    /// The configuration the dependencies were built from.
    pub config: ImportConfig,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`ImportConfig::from_env`] for the variables read.
    pub fn new(profile: ImportProfile) -> Self {
        Self::from_config(ImportConfig::from_env(), profile)
    }

    /// Wire the orchestrator for an explicit configuration.
    ///
    /// Nothing connects here; the store connection is opened when the run
    /// starts so that a connection failure is reported by the run itself.
    pub fn from_config(config: ImportConfig, profile: ImportProfile) -> Self {
        let connector: Arc<dyn StoreConnector> = if config.dry_run {
            warn!("Dry run: documents are written to an in-memory store and discarded");
            Arc::new(Arc::new(MemoryDocumentStore::new()))
        } else {
            Arc::new(MongoConnector::new(config.store.clone()))
        };

        let source: Arc<dyn SnapshotSource> = Arc::new(SnapshotFile::new(&config.snapshot_path));

        info!(
            profile = %profile,
            target = %connector.target(),
            snapshot = %source.describe(),
            dry_run = config.dry_run,
            "Initializing dependencies"
        );

        let orchestrator = Orchestrator::new(connector, source, profile);

        Self {
            orchestrator,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::RunState;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_dry_run_imports_into_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        tokio::fs::write(
            &path,
            r#"[{"type":"table","name":"country","data":[{"id":"1","name":"India"}]}]"#,
        )
        .await
        .unwrap();

        let config = ImportConfig {
            snapshot_path: PathBuf::from(&path),
            dry_run: true,
            ..ImportConfig::default()
        };
        let mut deps = Dependencies::from_config(config, ImportProfile::Essential);

        let summary = deps.orchestrator.run().await.unwrap();

        assert_eq!(summary.total_inserted(), 1);
        assert_eq!(deps.orchestrator.state(), RunState::Disconnected);
    }
}
