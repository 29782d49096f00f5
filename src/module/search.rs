//! Keyword search over registry metadata
//!
//! Linear, case-insensitive substring matching against module keys and
//! descriptions. Results follow registry iteration order, which is sorted
//! ascending by key for reproducible output.

use crate::module::registry::ModuleRegistry;

/// Search index over a registry snapshot
pub struct SearchIndex<'a> {
    registry: &'a ModuleRegistry,
}

impl<'a> SearchIndex<'a> {
    pub fn new(registry: &'a ModuleRegistry) -> Self {
        Self { registry }
    }

    /// All (key, description) pairs whose key or description contains
    /// `keyword`, ignoring case
    ///
    /// The empty keyword is a substring of everything, so it returns every
    /// registered entry; that is the defined behavior, not an edge case.
    pub fn search(&self, keyword: &str) -> Vec<(String, String)> {
        let keyword = keyword.to_lowercase();
        self.registry
            .entries()
            .filter(|(key, meta)| {
                key.to_lowercase().contains(&keyword)
                    || meta.description.to_lowercase().contains(&keyword)
            })
            .map(|(key, meta)| (key.clone(), meta.description.clone()))
            .collect()
    }
}
