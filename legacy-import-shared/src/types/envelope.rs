//! Envelope shared by every imported document.

use serde::Serialize;

use crate::SurrogateId;

/// A typed record stored in a named output collection.
pub trait CollectionRecord: Serialize {
    /// The output collection this record is written to.
    const COLLECTION: &'static str;
}

/// An imported record together with its identity fields.
///
/// Serializes as a flat document: `_id`, `oldId`, then the record's own
/// fields.
///
/// # Example
///
/// ```
/// use legacy_import_shared::{ImportedDocument, SurrogateId};
/// use legacy_import_shared::types::Variant;
///
/// let variant = Variant {
///     name: "Weight".to_string(),
///     status: 1,
///     created_at: bson::DateTime::now(),
/// };
/// let document = ImportedDocument::new(SurrogateId::new(), Some("4".to_string()), variant);
/// assert_eq!(document.old_id.as_deref(), Some("4"));
/// ```
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImportedDocument<T> {
    #[serde(rename = "_id")]
    pub id: SurrogateId,
    /// Legacy primary key, kept for traceability. `None` when the legacy row
    /// had no usable id.
    #[serde(rename = "oldId")]
    pub old_id: Option<String>,
    #[serde(flatten)]
    pub record: T,
}

impl<T: Serialize> ImportedDocument<T> {
    pub fn new(id: SurrogateId, old_id: Option<String>, record: T) -> Self {
        Self { id, old_id, record }
    }

    /// Convert into a BSON document ready for insertion.
    pub fn to_document(&self) -> Result<bson::Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Country, Province};

    #[test]
    fn test_envelope_flattens_record_fields() {
        let country = Country {
            name: "India".to_string(),
            code: Some("IN".to_string()),
            phone_code: None,
            status: 1,
            created_at: bson::DateTime::from_millis(0),
            updated_at: bson::DateTime::from_millis(0),
        };
        let id = SurrogateId::new();
        let document = ImportedDocument::new(id, Some("7".to_string()), country)
            .to_document()
            .unwrap();

        assert_eq!(document.get_object_id("_id").unwrap(), id);
        assert_eq!(document.get_str("oldId").unwrap(), "7");
        assert_eq!(document.get_str("name").unwrap(), "India");
        assert_eq!(document.get_str("code").unwrap(), "IN");
        assert!(document.get("record").is_none());
    }

    #[test]
    fn test_absent_relation_serializes_as_null() {
        let province = Province {
            name: "Delhi".to_string(),
            country: None,
            old_country_id: Some("0".to_string()),
            status: 1,
            created_at: bson::DateTime::from_millis(0),
            updated_at: bson::DateTime::from_millis(0),
        };
        let document = ImportedDocument::new(SurrogateId::new(), None, province)
            .to_document()
            .unwrap();

        assert_eq!(document.get("country"), Some(&bson::Bson::Null));
        assert_eq!(document.get("oldId"), Some(&bson::Bson::Null));
        assert_eq!(document.get_str("oldCountryId").unwrap(), "0");
    }
}
