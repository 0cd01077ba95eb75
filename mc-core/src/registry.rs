//! Dataset column registry
//!
//! Holds the column names of the most recently uploaded dataset. Each upload
//! replaces the whole list; nothing is deduplicated or validated.

use serde::{Deserialize, Serialize};

/// Column names of the current dataset, in upload order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetColumnRegistry {
    columns: Vec<String>,
}

impl DatasetColumnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Replace the registry with a new upload
    pub fn set(&mut self, columns: Vec<String>) {
        self.columns = columns;
    }

    pub fn get(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_set_replaces_in_order() {
        let mut registry = DatasetColumnRegistry::new();
        registry.set(cols(&["a", "b", "c"]));
        assert_eq!(registry.get(), cols(&["a", "b", "c"]).as_slice());

        registry.set(cols(&["z"]));
        assert_eq!(registry.get(), cols(&["z"]).as_slice());
        assert!(!registry.contains("a"));
    }

    #[test]
    fn test_duplicates_and_empty_pass_through() {
        let mut registry = DatasetColumnRegistry::from_columns(cols(&["x", "x"]));
        assert_eq!(registry.len(), 2);

        registry.set(Vec::new());
        assert!(registry.is_empty());
    }
}
