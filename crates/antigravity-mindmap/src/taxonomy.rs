//! Mock taxonomy mapping query phrases to a category path and branches.

use serde::{Deserialize, Serialize};

use crate::error::{MindMapError, MindMapResult};

/// Branches used when no taxonomy entry matches.
pub const DEFAULT_BRANCHES: [&str; 3] = ["Overview", "Links", "Pros & Cons"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    /// Lowercase phrase looked for inside the query
    pub key: String,
    /// Category chain, root first; never empty
    pub path: Vec<String>,
    /// Leaves hung off the last path label
    pub branches: Vec<String>,
}

/// Ordered list of entries; the first matching key wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    entries: Vec<TaxonomyEntry>,
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Taxonomy {
    /// An empty taxonomy: every query falls back to the default shape.
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// The built-in demo taxonomy.
    pub fn builtin() -> Self {
        let entry = |key: &str, path: &[&str], branches: &[&str]| TaxonomyEntry {
            key: key.to_string(),
            path: labels(path),
            branches: labels(branches),
        };

        Self {
            entries: vec![
                entry(
                    "dog food",
                    &["Pets", "Dogs", "Food"],
                    &["Dry", "Wet", "Raw", "Grain-free", "Puppy", "Senior"],
                ),
                entry(
                    "cat litter",
                    &["Pets", "Cats", "Litter"],
                    &["Clumping", "Silica", "Corn-based"],
                ),
                entry(
                    "best laptop",
                    &["Tech", "Laptops", "Buying"],
                    &["Windows", "Mac", "Gaming"],
                ),
            ],
        }
    }

    /// Appends an entry. Keys are lowercased so lookups stay case-insensitive.
    pub fn with_entry(
        mut self,
        key: impl Into<String>,
        path: Vec<String>,
        branches: Vec<String>,
    ) -> MindMapResult<Self> {
        let key = key.into().trim().to_lowercase();
        if key.is_empty() {
            return Err(MindMapError::EmptyKey);
        }
        if path.is_empty() {
            return Err(MindMapError::EmptyPath(key));
        }
        self.entries.push(TaxonomyEntry {
            key,
            path,
            branches,
        });
        Ok(self)
    }

    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    /// First entry whose key occurs in the trimmed, lowercased query.
    pub fn lookup(&self, query: &str) -> Option<&TaxonomyEntry> {
        let q = query.trim().to_lowercase();
        self.entries.iter().find(|e| q.contains(e.key.as_str()))
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_substring_and_case_insensitive() {
        let taxonomy = Taxonomy::builtin();
        let entry = taxonomy.lookup("  Cheap DOG FOOD near me ").unwrap();
        assert_eq!(entry.path, vec!["Pets", "Dogs", "Food"]);
        assert!(taxonomy.lookup("hamster wheel").is_none());
    }

    #[test]
    fn test_lookup_takes_first_entry_in_order() {
        let taxonomy = Taxonomy::builtin();
        let entry = taxonomy.lookup("best laptop for dog food reviews").unwrap();
        assert_eq!(entry.key, "dog food");
    }

    #[test]
    fn test_with_entry_rejects_empty_path() {
        let err = Taxonomy::empty()
            .with_entry("garden", vec![], vec!["Tools".into()])
            .unwrap_err();
        assert_eq!(err, MindMapError::EmptyPath("garden".into()));
    }

    #[test]
    fn test_with_entry_rejects_blank_key() {
        for key in ["", "   "] {
            let err = Taxonomy::empty()
                .with_entry(key, vec!["Home".into()], vec![])
                .unwrap_err();
            assert_eq!(err, MindMapError::EmptyKey);
        }
    }

    #[test]
    fn test_with_entry_normalises_key() {
        let taxonomy = Taxonomy::empty()
            .with_entry(" Radiator ", vec!["Home".into(), "Heating".into()], vec![])
            .unwrap();
        assert!(taxonomy.lookup("leaking radiator").is_some());
    }
}
