//! Orchestrator module for the legacy import.
//!
//! Coordinates the snapshot source, the per-table processor and the loader
//! through the phases of one run.

mod state;

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use legacy_import_repository::{DocumentStore, StoreConnector};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::consumer::SnapshotSource;
use crate::errors::ImportError;
use crate::loader::CollectionLoader;
use crate::processor::{table_catalog, IdentifierRegistry, ImportProfile, Phase, TableSpec};
use crate::summary::{ImportSummary, TableReport};

pub use state::RunState;

/// Orchestrator that drives one import run.
///
/// The orchestrator:
/// - Connects to the store once and always releases it
/// - Loads the snapshot
/// - Imports each phase's tables in order, feeding the identifier registry
/// - Reports a summary ranked by inserted documents
pub struct Orchestrator {
    connector: Arc<dyn StoreConnector>,
    source: Arc<dyn SnapshotSource>,
    profile: ImportProfile,
    loader_config: crate::loader::LoaderConfig,
    state: RunState,
    history: Vec<RunState>,
}

impl Orchestrator {
    /// Create a new orchestrator for the given store and snapshot.
    pub fn new(
        connector: Arc<dyn StoreConnector>,
        source: Arc<dyn SnapshotSource>,
        profile: ImportProfile,
    ) -> Self {
        Self {
            connector,
            source,
            profile,
            loader_config: crate::loader::LoaderConfig::default(),
            state: RunState::NotStarted,
            history: vec![RunState::NotStarted],
        }
    }

    /// Create a new orchestrator with custom loader configuration.
    pub fn with_loader_config(
        connector: Arc<dyn StoreConnector>,
        source: Arc<dyn SnapshotSource>,
        profile: ImportProfile,
        loader_config: crate::loader::LoaderConfig,
    ) -> Self {
        Self {
            loader_config,
            ..Self::new(connector, source, profile)
        }
    }

    pub fn profile(&self) -> ImportProfile {
        self.profile
    }

    /// The current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Every state the orchestrator has been in, oldest first.
    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    fn transition(&mut self, next: RunState) {
        debug!(from = %self.state, to = %next, "Run state changed");
        self.state = next;
        self.history.push(next);
    }

    /// Run the import with a fresh identifier registry.
    pub async fn run(&mut self) -> Result<ImportSummary, ImportError> {
        let mut registry = IdentifierRegistry::new();
        self.run_with_registry(&mut registry).await
    }

    /// Run the import, registering surrogate ids in `registry`.
    ///
    /// Fatal errors (unreadable snapshot, lost store connection) end the run
    /// early. Tables already written stay written. The store connection is
    /// released on every path once it was opened.
    pub async fn run_with_registry(
        &mut self,
        registry: &mut IdentifierRegistry,
    ) -> Result<ImportSummary, ImportError> {
        let run_id = Uuid::new_v4();
        self.execute(registry, run_id).await
    }

    #[instrument(skip(self, registry), fields(profile = %self.profile))]
    async fn execute(
        &mut self,
        registry: &mut IdentifierRegistry,
        run_id: Uuid,
    ) -> Result<ImportSummary, ImportError> {
        let started = Instant::now();
        info!(snapshot = %self.source.describe(), "Starting legacy import");

        self.transition(RunState::ConnectingToStore);
        info!(target = %self.connector.target(), "Connecting to document store");
        let store = match self.connector.connect().await {
            Ok(store) => store,
            Err(e) => {
                error!(error = %e, "Failed to connect to document store");
                return Err(e.into());
            }
        };
        info!(backend = store.backend(), "Document store connected");

        let outcome = self.import(&store, registry, run_id, started).await;

        store.shutdown().await;
        self.transition(RunState::Disconnected);
        info!("Document store connection released");

        outcome
    }

    async fn import(
        &mut self,
        store: &Arc<dyn DocumentStore>,
        registry: &mut IdentifierRegistry,
        run_id: Uuid,
        started: Instant,
    ) -> Result<ImportSummary, ImportError> {
        self.transition(RunState::LoadingSnapshot);
        let snapshot = self.source.load().await?;

        let catalog = table_catalog();
        let unrecognized: Vec<String> = snapshot
            .table_names()
            .filter(|name| !catalog.iter().any(|spec| spec.legacy_table == *name))
            .map(str::to_string)
            .collect();
        for name in &unrecognized {
            warn!(table = %name, "No transform for legacy table");
        }

        let loader = CollectionLoader::with_config(store.clone(), self.loader_config.clone());
        let mut reports = Vec::new();

        for phase in Phase::ALL {
            self.transition(RunState::Phase(phase));
            let specs: Vec<&TableSpec> = catalog
                .iter()
                .filter(|spec| spec.phase == phase && self.profile.includes(spec))
                .collect();
            info!(phase = %phase, tables = specs.len(), "Starting phase");

            for spec in specs {
                let Some(table) = snapshot.table(spec.legacy_table) else {
                    debug!(table = spec.legacy_table, "Table not in snapshot");
                    continue;
                };
                if table.rows.is_empty() {
                    debug!(table = spec.legacy_table, "Table is empty");
                    continue;
                }

                info!(
                    table = spec.legacy_table,
                    collection = spec.collection,
                    rows = table.rows.len(),
                    "Importing table"
                );

                let transformed = spec.process(&table.rows, registry, Utc::now());
                let attempted = transformed.documents.len();
                let outcome = match loader.load(spec.collection, transformed.documents).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!(
                            table = spec.legacy_table,
                            tables_completed = reports.len(),
                            "Aborting remaining phases"
                        );
                        return Err(e);
                    }
                };

                let report = TableReport {
                    legacy_table: spec.legacy_table.to_string(),
                    collection: spec.collection.to_string(),
                    phase,
                    source_rows: transformed.source_rows,
                    skipped: transformed.skipped,
                    rejected: transformed.rejected.len(),
                    attempted,
                    inserted: outcome.succeeded(),
                    failed: outcome.failed(),
                    dangling: transformed.dangling,
                    error: outcome.error().map(|e| e.to_string()),
                };

                info!(
                    collection = %report.collection,
                    inserted = report.inserted,
                    attempted = report.attempted,
                    skipped = report.skipped,
                    "Imported {} of {} rows into {}",
                    report.inserted,
                    report.source_rows,
                    report.collection
                );
                reports.push(report);
            }
        }

        let summary = ImportSummary {
            run_id,
            profile: self.profile,
            tables: reports,
            unrecognized,
            elapsed: started.elapsed(),
        };

        info!(
            run_id = %summary.run_id,
            total_inserted = summary.total_inserted(),
            total_failed = summary.total_failed(),
            "Import summary\n{}",
            summary
        );
        self.transition(RunState::SummaryReported);

        Ok(summary)
    }
}
