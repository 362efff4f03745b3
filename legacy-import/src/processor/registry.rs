//! Identifier registry mapping legacy primary keys to surrogate ids.

use std::collections::HashMap;

use legacy_import_shared::SurrogateId;
use serde_json::Value;

/// Outcome of looking a legacy key up in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The key is a sentinel (`""`, `"0"`, null or missing): no relation.
    Absent,
    /// A usable key that no imported row has registered.
    Unseen,
    /// The surrogate id registered for the key.
    Resolved(SurrogateId),
}

/// Normalize a legacy id to the text used as registry key.
///
/// Returns `None` for the sentinels `""`, `"0"`, null and missing values, and
/// for arrays and objects. Strings are trimmed, integral numbers print
/// without a fraction (`7`, `7.0` and `"7"` are the same key) and booleans
/// print as `true` / `false`.
///
/// # Example
///
/// ```
/// use legacy_import::processor::normalize_legacy_id;
/// use serde_json::json;
///
/// assert_eq!(normalize_legacy_id(Some(&json!(7.0))).as_deref(), Some("7"));
/// assert_eq!(normalize_legacy_id(Some(&json!(" 42 "))).as_deref(), Some("42"));
/// assert_eq!(normalize_legacy_id(Some(&json!("0"))), None);
/// assert_eq!(normalize_legacy_id(None), None);
/// ```
pub fn normalize_legacy_id(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => number_key(n),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };

    if text.is_empty() || text == "0" {
        None
    } else {
        Some(text)
    }
}

pub(crate) fn number_key(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Memoizing factory of surrogate ids, one per `(legacy table, legacy id)`.
///
/// Created empty for each run and only ever grows. Nothing is persisted, so
/// two runs over the same snapshot assign different ids.
#[derive(Debug, Default)]
pub struct IdentifierRegistry {
    tables: HashMap<String, HashMap<String, SurrogateId>>,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the surrogate id for `legacy_id` in `table`, generating and
    /// registering one on first use.
    ///
    /// Sentinel ids never produce an id and return `None`.
    pub fn assign(&mut self, table: &str, legacy_id: Option<&Value>) -> Option<SurrogateId> {
        let key = normalize_legacy_id(legacy_id)?;
        Some(self.assign_key(table, key, SurrogateId::new))
    }

    /// Register `key` with the id produced by `generate` unless it is already
    /// registered; returns the registered id either way.
    pub(crate) fn assign_key(
        &mut self,
        table: &str,
        key: String,
        generate: impl FnOnce() -> SurrogateId,
    ) -> SurrogateId {
        *self
            .tables
            .entry(table.to_string())
            .or_default()
            .entry(key)
            .or_insert_with(generate)
    }

    /// The registered id for `legacy_id` in `table`.
    ///
    /// Sentinels and ids no row registered both resolve to `None`.
    pub fn resolve(&self, table: &str, legacy_id: Option<&Value>) -> Option<SurrogateId> {
        match self.lookup(table, legacy_id) {
            Resolution::Resolved(id) => Some(id),
            Resolution::Absent | Resolution::Unseen => None,
        }
    }

    /// Like [`resolve`](Self::resolve), but tells sentinels apart from keys
    /// that were never registered.
    pub fn lookup(&self, table: &str, legacy_id: Option<&Value>) -> Resolution {
        match normalize_legacy_id(legacy_id) {
            None => Resolution::Absent,
            Some(key) => match self.resolve_key(table, &key) {
                Some(id) => Resolution::Resolved(id),
                None => Resolution::Unseen,
            },
        }
    }

    pub(crate) fn resolve_key(&self, table: &str, key: &str) -> Option<SurrogateId> {
        self.tables.get(table)?.get(key).copied()
    }

    /// Number of registered ids across all tables.
    pub fn len(&self) -> usize {
        self.tables.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of registered ids for one table.
    pub fn table_len(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, HashMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assign_is_memoized() {
        let mut registry = IdentifierRegistry::new();
        let first = registry.assign("country", Some(&json!("7"))).unwrap();
        let second = registry.assign("country", Some(&json!("7"))).unwrap();

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("country", Some(&json!("7"))), Some(first));
    }

    #[test]
    fn test_equivalent_keys_share_an_id() {
        let mut registry = IdentifierRegistry::new();
        let id = registry.assign("user", Some(&json!(12))).unwrap();

        assert_eq!(registry.resolve("user", Some(&json!("12"))), Some(id));
        assert_eq!(registry.resolve("user", Some(&json!(" 12 "))), Some(id));
        assert_eq!(registry.resolve("user", Some(&json!(12.0))), Some(id));
    }

    #[test]
    fn test_tables_are_separate_namespaces() {
        let mut registry = IdentifierRegistry::new();
        let country = registry.assign("country", Some(&json!("1"))).unwrap();
        let city = registry.assign("city", Some(&json!("1"))).unwrap();

        assert_ne!(country, city);
        assert_eq!(registry.table_len("country"), 1);
        assert_eq!(registry.table_len("province"), 0);
    }

    #[test]
    fn test_sentinels_never_produce_ids() {
        let mut registry = IdentifierRegistry::new();
        let sentinels = [json!(""), json!("0"), json!("  "), json!(0), json!(null)];

        for sentinel in &sentinels {
            assert_eq!(registry.assign("orders", Some(sentinel)), None);
            assert_eq!(registry.lookup("orders", Some(sentinel)), Resolution::Absent);
        }
        assert_eq!(registry.assign("orders", None), None);
        assert_eq!(registry.lookup("orders", None), Resolution::Absent);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unseen_is_distinct_from_absent() {
        let mut registry = IdentifierRegistry::new();
        registry.assign("product", Some(&json!("5")));

        assert_eq!(registry.lookup("product", Some(&json!("6"))), Resolution::Unseen);
        assert_eq!(registry.resolve("product", Some(&json!("6"))), None);
        assert!(matches!(
            registry.lookup("product", Some(&json!("5"))),
            Resolution::Resolved(_)
        ));
    }

    #[test]
    fn test_structured_values_are_absent() {
        let registry = IdentifierRegistry::new();
        assert_eq!(registry.lookup("user", Some(&json!([1]))), Resolution::Absent);
        assert_eq!(registry.lookup("user", Some(&json!({ "id": 1 }))), Resolution::Absent);
    }

    #[test]
    fn test_fractional_and_boolean_keys() {
        assert_eq!(normalize_legacy_id(Some(&json!(2.5))).as_deref(), Some("2.5"));
        assert_eq!(normalize_legacy_id(Some(&json!(true))).as_deref(), Some("true"));
        assert_eq!(normalize_legacy_id(Some(&json!("007"))).as_deref(), Some("007"));
    }

    #[test]
    fn test_fresh_registries_assign_different_ids() {
        let mut first = IdentifierRegistry::new();
        let mut second = IdentifierRegistry::new();

        assert_ne!(
            first.assign("country", Some(&json!("7"))),
            second.assign("country", Some(&json!("7")))
        );
    }
}
