//! Consumer module for the legacy import.
//!
//! Reads the legacy JSON snapshot the run imports from.

mod snapshot;

pub use snapshot::{LegacyRow, LegacySnapshot, SnapshotFile, SnapshotSource, TableDescriptor};
