//! Legacy snapshot model and readers.
//!
//! A snapshot is a phpMyAdmin-style JSON export: an array of descriptors,
//! of which only `{ "type": "table", "name": ..., "data": [...] }` entries
//! carry rows. Header and database descriptors are ignored.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::errors::ImportError;

/// One flat row of a legacy table.
///
/// Field names are the lower-case legacy column names; values are loosely
/// typed and are coerced by the processor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyRow {
    fields: Map<String, Value>,
}

impl LegacyRow {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a row from a JSON value. Returns `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// The raw fields, in export order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// A named legacy table and its rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDescriptor {
    pub name: String,
    pub rows: Vec<LegacyRow>,
}

/// The whole legacy export, immutable for the duration of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacySnapshot {
    tables: Vec<TableDescriptor>,
}

#[derive(Debug, Deserialize)]
struct RawDescriptor {
    #[serde(rename = "type")]
    kind: Option<String>,
    name: Option<String>,
    #[serde(default)]
    data: Option<Vec<Value>>,
}

impl LegacySnapshot {
    /// Build a snapshot from tables, applying the same duplicate rule as
    /// parsing: the first non-empty table with a given name wins.
    pub fn from_tables(tables: impl IntoIterator<Item = TableDescriptor>) -> Self {
        let mut snapshot = Self::default();
        for table in tables {
            snapshot.push(table);
        }
        snapshot
    }

    /// Parse a snapshot from the text of a JSON export.
    pub fn from_json_str(json: &str) -> Result<Self, ImportError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| ImportError::snapshot_parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Parse a snapshot from an already decoded JSON export.
    pub fn from_value(value: Value) -> Result<Self, ImportError> {
        let Value::Array(entries) = value else {
            return Err(ImportError::snapshot_parse(
                "expected a JSON array of table descriptors",
            ));
        };

        let mut snapshot = Self::default();
        for (position, entry) in entries.into_iter().enumerate() {
            let descriptor: RawDescriptor = match serde_json::from_value(entry) {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    warn!(position = position, error = %e, "Ignoring malformed descriptor");
                    continue;
                }
            };

            if descriptor.kind.as_deref() != Some("table") {
                continue;
            }
            let Some(name) = descriptor.name else {
                warn!(position = position, "Ignoring table descriptor without a name");
                continue;
            };

            let data = descriptor.data.unwrap_or_default();
            let total = data.len();
            let rows: Vec<LegacyRow> = data.into_iter().filter_map(LegacyRow::from_value).collect();
            if rows.len() < total {
                warn!(
                    table = %name,
                    dropped = total - rows.len(),
                    "Dropped rows that are not JSON objects"
                );
            }

            snapshot.push(TableDescriptor { name, rows });
        }

        Ok(snapshot)
    }

    fn push(&mut self, table: TableDescriptor) {
        match self.tables.iter_mut().find(|t| t.name == table.name) {
            Some(existing) if existing.rows.is_empty() && !table.rows.is_empty() => {
                debug!(table = %table.name, "Replacing empty table with later duplicate");
                *existing = table;
            }
            Some(_) => {
                debug!(table = %table.name, "Ignoring duplicate table descriptor");
            }
            None => self.tables.push(table),
        }
    }

    /// Look up a table by its exact legacy name.
    pub fn table(&self, name: &str) -> Option<&TableDescriptor> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// All tables in export order.
    pub fn tables(&self) -> &[TableDescriptor] {
        &self.tables
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    /// Total number of rows across every table.
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(|t| t.rows.len()).sum()
    }
}

/// Source of the legacy snapshot for a run.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Human-readable description, used in logs.
    fn describe(&self) -> String;

    /// Load the snapshot. Any error is fatal to the run.
    async fn load(&self) -> Result<LegacySnapshot, ImportError>;
}

/// Snapshot read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotSource for SnapshotFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<LegacySnapshot, ImportError> {
        let json = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ImportError::snapshot_read(format!("{}: {}", self.path.display(), e))
        })?;

        let snapshot = LegacySnapshot::from_json_str(&json).map_err(|e| match e {
            ImportError::SnapshotParseError(msg) => {
                ImportError::snapshot_parse(format!("{}: {}", self.path.display(), msg))
            }
            other => other,
        })?;

        info!(
            path = %self.path.display(),
            tables = snapshot.tables().len(),
            rows = snapshot.row_count(),
            "Loaded legacy snapshot"
        );

        Ok(snapshot)
    }
}

#[async_trait]
impl SnapshotSource for LegacySnapshot {
    fn describe(&self) -> String {
        format!("in-memory snapshot ({} tables)", self.tables.len())
    }

    async fn load(&self) -> Result<LegacySnapshot, ImportError> {
        Ok(self.clone())
    }
}
