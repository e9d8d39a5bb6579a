//! Contextual key-value fields carried by a logger
//!
//! Keys are kept sorted so the serialized `context.data` object is
//! deterministic. Values are arbitrary JSON (strings, numbers, booleans,
//! nested objects and arrays).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::btree_map::{self, BTreeMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields {
    entries: BTreeMap<String, Value>,
}

impl Fields {
    /// Create an empty field set
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add a field (builder style)
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Add a field, replacing any previous value for the key
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Merge `other` into `self`; keys from `other` win on collision.
    pub fn merge(&mut self, other: &Fields) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Return a fresh copy of `self` with `other` merged on top.
    ///
    /// The result owns its storage, so later changes to either side are
    /// invisible to the other.
    #[must_use]
    pub fn merged(&self, other: &Fields) -> Fields {
        let mut out = self.clone();
        out.merge(other);
        out
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Fields
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        fields.extend(iter);
        fields
    }
}

impl<K, V> Extend<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.entries.insert(key.into(), value.into());
        }
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_creation() {
        let fields = Fields::new();
        assert!(fields.is_empty());
        assert_eq!(fields.len(), 0);
    }

    #[test]
    fn test_fields_with_mixed_values() {
        let fields = Fields::new()
            .with_field("user_id", 123)
            .with_field("username", "john_doe")
            .with_field("active", true)
            .with_field("tags", json!(["a", "b"]));

        assert_eq!(fields.len(), 4);
        assert_eq!(fields.get("user_id"), Some(&json!(123)));
        assert_eq!(fields.get("tags"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_merge_other_wins() {
        let mut base = Fields::from([("key", "old"), ("keep", "yes")]);
        base.merge(&Fields::from([("key", "new")]));

        assert_eq!(base.get("key"), Some(&json!("new")));
        assert_eq!(base.get("keep"), Some(&json!("yes")));
    }

    #[test]
    fn test_merged_leaves_receiver_untouched() {
        let base = Fields::from([("a", 1)]);
        let mut derived = base.merged(&Fields::from([("b", 2)]));
        derived.insert("a", 99);

        assert_eq!(base.len(), 1);
        assert_eq!(base.get("a"), Some(&json!(1)));
        assert_eq!(derived.get("a"), Some(&json!(99)));
        assert_eq!(derived.get("b"), Some(&json!(2)));
    }

    #[test]
    fn test_serializes_sorted_object() {
        let fields = Fields::from([("key", "value"), ("function", "handler")]);
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"function":"handler","key":"value"}"#);
    }
}
