//! Per-row context handed to table transforms.

use std::cell::Cell;

use chrono::{DateTime, Utc};
use legacy_import_shared::SurrogateId;
use serde_json::Value;

use super::coerce::{coerce_date_at, coerce_optional_date, coerce_text, to_bson_date};
use super::registry::{IdentifierRegistry, Resolution};

/// A resolved foreign key together with the raw legacy key it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Surrogate id of the parent row, `None` for sentinels and for parents
    /// that were never imported.
    pub id: Option<SurrogateId>,
    /// The legacy key as trimmed text, `None` only when missing or empty.
    pub legacy: Option<String>,
}

impl Link {
    pub fn is_resolved(&self) -> bool {
        self.id.is_some()
    }
}

/// Read-only view of the registry plus the run clock.
///
/// Counts dangling references: usable foreign keys whose parent row was
/// never registered.
pub struct TransformContext<'a> {
    registry: &'a IdentifierRegistry,
    now: DateTime<Utc>,
    dangling: Cell<usize>,
}

impl<'a> TransformContext<'a> {
    pub fn new(registry: &'a IdentifierRegistry, now: DateTime<Utc>) -> Self {
        Self {
            registry,
            now,
            dangling: Cell::new(0),
        }
    }

    /// Resolve a foreign key into legacy table `table`.
    pub fn link(&self, table: &str, value: Option<&Value>) -> Link {
        let id = match self.registry.lookup(table, value) {
            Resolution::Resolved(id) => Some(id),
            Resolution::Unseen => {
                self.dangling.set(self.dangling.get() + 1);
                None
            }
            Resolution::Absent => None,
        };

        Link {
            id,
            legacy: coerce_text(value),
        }
    }

    /// A timestamp, with zero or missing dates replaced by the run clock.
    pub fn date(&self, value: Option<&Value>) -> bson::DateTime {
        to_bson_date(coerce_date_at(value, self.now))
    }

    /// A timestamp that stays `None` when zero or missing.
    pub fn optional_date(&self, value: Option<&Value>) -> Option<bson::DateTime> {
        coerce_optional_date(value).map(to_bson_date)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Dangling references seen so far.
    pub fn dangling(&self) -> usize {
        self.dangling.get()
    }
}
