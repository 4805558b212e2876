//! Ordered flat key/value set holding one or more encoded descriptors.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Flat string map shared by every descriptor of one build.
///
/// Insertion order is kept so the persisted file reads in the order the
/// artifacts were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptorSet {
    entries: IndexMap<String, String>,
}

impl DescriptorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Merge another set into this one; its values win on key collisions.
    pub fn merge(&mut self, other: DescriptorSet) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DescriptorSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = DescriptorSet::new();
        set.extend(iter);
        set
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for DescriptorSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let set: DescriptorSet = [("z", "1"), ("a", "2"), ("m", "3")].into_iter().collect();
        let keys: Vec<_> = set.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_merge_overwrites_in_place() {
        let mut left: DescriptorSet = [("a", "1"), ("b", "2")].into_iter().collect();
        let right: DescriptorSet = [("c", "3"), ("a", "9")].into_iter().collect();
        left.merge(right);

        assert_eq!(left.len(), 3);
        assert_eq!(left.get("a"), Some("9"));
        let keys: Vec<_> = left.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let set: DescriptorSet = [("artifact.id", "g:a:jar:1")].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"artifact.id":"g:a:jar:1"}"#);
    }
}
