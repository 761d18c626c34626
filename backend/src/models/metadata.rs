//! Ordered dataset metadata
//!
//! Metadata travels with a dataset so the student's file records which lab,
//! ID and inputs produced it. Keys keep their first insertion position;
//! inserting an existing key replaces its value in place.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Ordered key/value pairs describing a generated dataset
///
/// # Example
/// ```
/// use cek_labs_core::models::Metadata;
///
/// let mut meta = Metadata::new();
/// meta.insert("Laboratory", "Crystal Violet Lab");
/// meta.insert("Student ID", 123456);
/// meta.insert("Laboratory", "Crystal Violet");
///
/// assert_eq!(meta.get("Laboratory"), Some("Crystal Violet"));
/// assert_eq!(meta.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as comment lines, `# Key = value`, one per entry
    pub fn to_comment_lines(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("# {} = {}\n", key, value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut meta = Metadata::new();
        meta.insert("B", 1);
        meta.insert("A", 2);
        meta.insert("B", 3);

        let keys: Vec<&str> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["B", "A"]);
        assert_eq!(meta.get("B"), Some("3"));
    }

    #[test]
    fn test_comment_lines() {
        let mut meta = Metadata::new();
        meta.insert("Sample", "benzoic");
        assert_eq!(meta.to_comment_lines(), "# Sample = benzoic\n");
    }
}
