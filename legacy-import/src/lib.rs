//! # Legacy Import
//!
//! One-shot import of the legacy grocery store's relational snapshot into
//! MongoDB collections.
//!
//! ## Architecture
//!
//! The import follows the Consumer-Processor-Loader pattern:
//!
//! 1. **Consumer**: Reads the JSON table export
//! 2. **Processor**: Remaps identifiers and transforms rows into documents
//! 3. **Loader**: Bulk inserts each table's documents
//! 4. **Orchestrator**: Runs the tables phase by phase and reports a summary
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`consumer`]: Snapshot sources
//! - [`processor`]: Identifier registry, coercion and table transforms
//! - [`loader`]: Writes documents into the store
//! - [`orchestrator`]: Coordinates a run
//! - [`summary`]: Per-table accounting
//! - [`errors`]: Error types for the import

pub mod app;
pub mod config;
pub mod consumer;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;
pub mod summary;
pub mod telemetry;

pub use config::{Dependencies, ImportConfig, LogFormat};
pub use errors::{ImportError, ProcessorError};
pub use orchestrator::{Orchestrator, RunState};
pub use processor::{IdentifierRegistry, ImportProfile, Phase};
pub use summary::{ImportSummary, TableReport};
