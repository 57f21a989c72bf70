//! Inventory differencing: pure set subtraction over path sets.

use std::collections::BTreeSet;

use stray_catalog::CatalogFile;

/// Filters applied to the inventory before orphan detection.
///
/// Both lists are exclusions: a path is dropped when it ends with one of the
/// extension suffixes, or when it contains one of the filter substrings.
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    pub exclude_extensions: Vec<String>,
    pub path_filters: Vec<String>,
}

impl InventoryFilter {
    pub fn keeps(&self, path: &str) -> bool {
        if self
            .exclude_extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
        {
            return false;
        }
        if self
            .path_filters
            .iter()
            .any(|filter| path.contains(filter.as_str()))
        {
            return false;
        }
        true
    }
}

/// Paths eligible to be reported as orphans, after filtering.
pub fn inventory_paths(files: &[CatalogFile], filter: &InventoryFilter) -> BTreeSet<String> {
    files
        .iter()
        .filter(|f| filter.keeps(&f.path))
        .map(|f| f.path.clone())
        .collect()
}

/// Every inventory path, unfiltered. Dangling-reference detection runs
/// against this so a filtered-out file still counts as existing.
pub fn all_paths(files: &[CatalogFile]) -> BTreeSet<String> {
    files.iter().map(|f| f.path.clone()).collect()
}

/// Inventory files nothing accounts for: not a navigation file, not excused
/// by the allow-list, not referenced from any scanned source.
pub fn orphans(
    inventory: &BTreeSet<String>,
    nav: &BTreeSet<String>,
    allowed: &BTreeSet<String>,
    references: &BTreeSet<String>,
) -> BTreeSet<String> {
    inventory
        .iter()
        .filter(|path| {
            !nav.contains(path.as_str())
                && !allowed.contains(path.as_str())
                && !references.contains(path.as_str())
        })
        .cloned()
        .collect()
}

/// References that resolve to no inventory file.
pub fn dangling(references: &BTreeSet<String>, inventory: &BTreeSet<String>) -> BTreeSet<String> {
    references.difference(inventory).cloned().collect()
}
