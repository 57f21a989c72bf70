//! Family coordinate to directory mapping.

use std::collections::BTreeMap;

/// Maps family coordinates to the directory segment used in catalog paths.
///
/// Covers the macro keywords (`include` and `xref` resolve into `pages`,
/// `image` into `images`) and the coordinates reachable through `$`
/// shorthand (`partial`, `example`, `attachment`). The map is owned by the
/// caller and passed down explicitly, so runs with different family sets can
/// coexist without touching shared state.
#[derive(Debug, Clone)]
pub struct FamilyMap {
    directories: BTreeMap<String, String>,
}

impl FamilyMap {
    /// Create a map with the standard family entries.
    pub fn new() -> Self {
        let mut map = Self {
            directories: BTreeMap::new(),
        };
        map.insert("image", "images");
        map.insert("include", "pages");
        map.insert("xref", "pages");
        map.insert("partial", "partials");
        map.insert("example", "examples");
        map.insert("attachment", "attachments");
        map
    }

    /// Add or replace a family entry.
    pub fn insert(&mut self, family: &str, directory: &str) {
        self.directories
            .insert(family.to_string(), directory.to_string());
    }

    /// Look up the directory segment for a family coordinate.
    pub fn directory(&self, family: &str) -> Option<&str> {
        self.directories.get(family).map(String::as_str)
    }
}

impl Default for FamilyMap {
    fn default() -> Self {
        Self::new()
    }
}
