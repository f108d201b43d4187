//! Document metadata (the `Key: value` block at the top of a source file)

use serde::Serialize;

/// Ordered mapping of lowercased metadata keys to their values.
///
/// Keys keep the order in which they first appeared in the source. A key may
/// carry several values (continuation lines or repeated keys).
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Metadata {
    fields: Vec<(String, Vec<String>)>,
}

impl Metadata {
    /// Create an empty metadata map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `key`, creating the key if needed
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        let key = key.as_ref().to_lowercase();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.fields.push((key, vec![value])),
        }
    }

    /// Append a value to the most recently inserted key
    pub fn extend_last(&mut self, value: impl Into<String>) -> bool {
        match self.fields.last_mut() {
            Some((_, values)) => {
                values.push(value.into());
                true
            }
            None => false,
        }
    }

    /// All values stored under `key`
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// First value stored under `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(|s| s.as_str())
    }

    /// Remove `key` and return its values
    pub fn take(&mut self, key: &str) -> Option<Vec<String>> {
        let pos = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(pos).1)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate over `(key, values)` pairs in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
