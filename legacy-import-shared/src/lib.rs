//! # Legacy Import Shared
//!
//! This crate defines the document records written by the legacy import
//! pipeline. Every record is the business payload of one output collection;
//! the surrogate `_id` and the `oldId` trace field are added by
//! [`ImportedDocument`] when the record is written.

pub mod types;

pub use types::envelope::{CollectionRecord, ImportedDocument};

/// Surrogate identifier assigned to every imported record.
///
/// A 12-byte MongoDB object id replacing the legacy integer primary key.
pub type SurrogateId = bson::oid::ObjectId;
