//! Turns the rows of one legacy table into insertable documents.

use bson::Document;
use chrono::{DateTime, Utc};
use legacy_import_shared::{CollectionRecord, ImportedDocument, SurrogateId};
use tracing::{debug, instrument, warn};

use super::context::TransformContext;
use super::registry::{normalize_legacy_id, IdentifierRegistry};
use crate::consumer::LegacyRow;
use crate::errors::ProcessorError;

/// A typed mapping from legacy rows to one output collection.
pub trait LegacyTable {
    /// The record written for each accepted row.
    type Record: CollectionRecord;

    /// Map one row. `None` skips the row.
    ///
    /// Transforms are pure: foreign keys are resolved through `context`
    /// and scalars are coerced, never rejected.
    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Self::Record>;
}

/// Documents produced from one legacy table, with per-row accounting.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransformedTable {
    pub documents: Vec<Document>,
    /// Rows present in the snapshot.
    pub source_rows: usize,
    /// Rows the transform judged unusable.
    pub skipped: usize,
    /// Rows that could not be encoded.
    pub rejected: Vec<ProcessorError>,
    /// References to parent rows that were never imported.
    pub dangling: usize,
}

impl TransformedTable {
    fn with_capacity(source_rows: usize) -> Self {
        Self {
            documents: Vec::with_capacity(source_rows),
            source_rows,
            ..Self::default()
        }
    }
}

/// Transform every row of `legacy_table` with `T`.
///
/// Every non-sentinel legacy id in `rows` is registered before the first
/// transform runs: a parent row that exists in the source data stays a link
/// target even when its own transform skips it. Rows whose legacy id is a
/// sentinel get a fresh unregistered id and a null `oldId`.
#[instrument(skip(rows, registry, now), fields(rows = rows.len()))]
pub fn transform_table<T: LegacyTable>(
    legacy_table: &str,
    rows: &[LegacyRow],
    registry: &mut IdentifierRegistry,
    now: DateTime<Utc>,
) -> TransformedTable {
    let mut table = TransformedTable::with_capacity(rows.len());

    for row in rows {
        if let Some(key) = normalize_legacy_id(row.id()) {
            registry.assign_key(legacy_table, key, SurrogateId::new);
        }
    }

    for (index, row) in rows.iter().enumerate() {
        let context = TransformContext::new(registry, now);
        let Some(record) = T::transform(row, &context) else {
            table.skipped += 1;
            continue;
        };

        match encode(legacy_table, index, row, record, registry) {
            Ok(document) => {
                table.dangling += context.dangling();
                table.documents.push(document);
            }
            Err(e) => {
                warn!(error = %e, "Rejected row");
                table.rejected.push(e);
            }
        }
    }

    debug!(
        documents = table.documents.len(),
        skipped = table.skipped,
        rejected = table.rejected.len(),
        dangling = table.dangling,
        "Transformed table"
    );

    table
}

fn encode<R: CollectionRecord>(
    legacy_table: &str,
    index: usize,
    row: &LegacyRow,
    record: R,
    registry: &IdentifierRegistry,
) -> Result<Document, ProcessorError> {
    let key = normalize_legacy_id(row.id());
    let id = key
        .as_deref()
        .and_then(|key| registry.resolve_key(legacy_table, key))
        .unwrap_or_else(SurrogateId::new);

    ImportedDocument::new(id, key, record)
        .to_document()
        .map_err(|e| ProcessorError::serialization(legacy_table, index, e.to_string()))
}

/// Copy rows verbatim, without surrogate ids or `oldId`.
#[instrument(skip(rows), fields(rows = rows.len()))]
pub fn pass_through(legacy_table: &str, rows: &[LegacyRow]) -> TransformedTable {
    let mut table = TransformedTable::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        match bson::to_document(row.fields()) {
            Ok(document) => table.documents.push(document),
            Err(e) => {
                let e = ProcessorError::serialization(legacy_table, index, e.to_string());
                warn!(error = %e, "Rejected row");
                table.rejected.push(e);
            }
        }
    }

    table
}
