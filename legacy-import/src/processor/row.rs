//! Typed accessors over legacy rows.

use serde_json::Value;

use super::coerce::{
    coerce_bool, coerce_float, coerce_int, coerce_optional_float, coerce_optional_int, coerce_text,
};
use crate::consumer::LegacyRow;

impl LegacyRow {
    /// Raw value of a field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields().get(field)
    }

    /// The first of `fields` holding a non-null value.
    ///
    /// Legacy exports are not consistent about column names, so some
    /// attributes are read from a list of aliases.
    pub fn pick(&self, fields: &[&str]) -> Option<&Value> {
        fields
            .iter()
            .filter_map(|field| self.get(field))
            .find(|value| !value.is_null())
    }

    /// The legacy primary key.
    pub fn id(&self) -> Option<&Value> {
        self.get("id")
    }

    pub fn text(&self, field: &str) -> Option<String> {
        coerce_text(self.get(field))
    }

    pub fn float(&self, field: &str, default: f64) -> f64 {
        coerce_float(self.get(field), default)
    }

    pub fn optional_float(&self, field: &str) -> Option<f64> {
        coerce_optional_float(self.get(field))
    }

    pub fn int(&self, field: &str, default: i64) -> i64 {
        coerce_int(self.get(field), default)
    }

    pub fn optional_int(&self, field: &str) -> Option<i64> {
        coerce_optional_int(self.get(field))
    }

    pub fn flag(&self, field: &str, default: bool) -> bool {
        coerce_bool(self.get(field), default)
    }
}
