//! Core catalog types shared across the audit pipeline.

use serde::Serialize;

/// A component/version pair, the unit the audit iterates over.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ComponentVersion {
    pub name: String,
    pub version: String,
}

impl ComponentVersion {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Human-readable identifier, `name@version` or just `name` for
    /// unversioned components.
    pub fn label(&self) -> String {
        if self.version.is_empty() {
            self.name.clone()
        } else {
            format!("{}@{}", self.name, self.version)
        }
    }
}

/// Content family a catalog file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Page,
    Partial,
    Navigation,
    Image,
    Attachment,
    Example,
}

impl Family {
    /// Classify a file by the family directory it sits under. Navigation
    /// files live outside the family directories and are assigned directly
    /// from the component descriptor.
    pub fn from_directory(dir: &str) -> Option<Self> {
        match dir {
            "pages" => Some(Self::Page),
            "partials" => Some(Self::Partial),
            "images" => Some(Self::Image),
            "attachments" => Some(Self::Attachment),
            "examples" => Some(Self::Example),
            _ => None,
        }
    }

    /// The family directory this family's files live under, `None` for
    /// navigation files, which sit at the module root.
    pub fn directory(self) -> Option<&'static str> {
        match self {
            Self::Page => Some("pages"),
            Self::Partial => Some("partials"),
            Self::Image => Some("images"),
            Self::Attachment => Some("attachments"),
            Self::Example => Some("examples"),
            Self::Navigation => None,
        }
    }
}

/// One file in a component/version's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogFile {
    pub component: String,
    pub version: String,
    pub family: Family,
    pub module: String,
    /// Path relative to the component root, using the catalog's separator.
    pub path: String,
}

/// A scannable file with its text loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub contents: String,
}

/// Path separator a catalog declares for every path it hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Slash,
    Backslash,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Self::Slash => '/',
            Self::Backslash => '\\',
        }
    }

    /// True when `path` carries the opposite separator, which would make
    /// reference comparison silently miss.
    pub fn conflicts_with(self, path: &str) -> bool {
        match self {
            Self::Slash => path.contains('\\'),
            Self::Backslash => path.contains('/'),
        }
    }
}

/// Extract the module name from a catalog path such as
/// `modules/install/pages/intro.adoc`. Paths outside a `modules/` tree
/// (navigation files at the component root) belong to `ROOT`.
pub fn module_from_path(path: &str, sep: char) -> &str {
    let mut segments = path.split(sep);
    if segments.next() == Some("modules") {
        if let Some(module) = segments.next() {
            if !module.is_empty() {
                return module;
            }
        }
    }
    "ROOT"
}

/// Source of truth the audit runs against.
///
/// Every path handed out uses the catalog's declared [`Separator`]; slices
/// for an unknown component/version are empty.
pub trait ContentCatalog: Send + Sync {
    fn separator(&self) -> Separator;

    /// All component/version pairs, in sorted order.
    fn component_versions(&self) -> Vec<ComponentVersion>;

    fn inventory(&self, cv: &ComponentVersion) -> &[CatalogFile];

    fn pages(&self, cv: &ComponentVersion) -> &[SourceFile];

    fn partials(&self, cv: &ComponentVersion) -> &[SourceFile];

    fn nav_files(&self, cv: &ComponentVersion) -> &[SourceFile];
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn labels_versioned_and_unversioned_components() {
        assert_eq!(ComponentVersion::new("server", "5.3").label(), "server@5.3");
        assert_eq!(ComponentVersion::new("server", "").label(), "server");
    }

    #[test]
    fn classifies_family_directories() {
        assert_eq!(Family::from_directory("pages"), Some(Family::Page));
        assert_eq!(Family::from_directory("partials"), Some(Family::Partial));
        assert_eq!(Family::from_directory("images"), Some(Family::Image));
        assert_eq!(Family::from_directory("attachments"), Some(Family::Attachment));
        assert_eq!(Family::from_directory("examples"), Some(Family::Example));
        assert_eq!(Family::from_directory("scratch"), None);
    }

    #[test]
    fn family_directory_inverts_classification() {
        for dir in ["pages", "partials", "images", "attachments", "examples"] {
            let family = Family::from_directory(dir).unwrap();
            assert_eq!(family.directory(), Some(dir));
        }
        assert_eq!(Family::Navigation.directory(), None);
    }

    #[test]
    fn extracts_module_from_catalog_paths() {
        assert_eq!(module_from_path("modules/install/pages/a.adoc", '/'), "install");
        assert_eq!(module_from_path("modules/ROOT/images/logo.png", '/'), "ROOT");
        assert_eq!(module_from_path("nav.adoc", '/'), "ROOT");
        assert_eq!(module_from_path(r"modules\install\pages\a.adoc", '\\'), "install");
    }

    #[test]
    fn detects_separator_conflicts() {
        assert!(Separator::Slash.conflicts_with(r"modules\ROOT\pages\a.adoc"));
        assert!(!Separator::Slash.conflicts_with("modules/ROOT/pages/a.adoc"));
        assert!(Separator::Backslash.conflicts_with("modules/ROOT/pages/a.adoc"));
    }
}
