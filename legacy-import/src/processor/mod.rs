//! Processor module for the legacy import.
//!
//! Turns legacy rows into typed documents: identifier remapping, scalar
//! coercion and one transform per recognized table.

pub mod coerce;
mod context;
mod registry;
mod row;
mod table_catalog;
mod table_processor;
pub mod tables;

pub use coerce::{
    coerce_bool, coerce_date, coerce_date_at, coerce_float, coerce_int, coerce_optional_date,
    coerce_optional_float, coerce_optional_int, coerce_text,
};
pub use context::{Link, TransformContext};
pub use registry::{normalize_legacy_id, IdentifierRegistry, Resolution};
pub use table_catalog::{table_catalog, ImportProfile, Phase, TableKind, TableSpec, TransformFn};
pub use table_processor::{pass_through, transform_table, LegacyTable, TransformedTable};
