//! Directory-tree catalog loader.
//!
//! Discovers Antora-style components by their `antora.yml` descriptors,
//! inventories every file under their `modules/` trees, and eagerly loads
//! the text of scannable sources (pages, partials, navigation files).

use std::fs;
use std::path::Path;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::model::{
    module_from_path, CatalogFile, ComponentVersion, ContentCatalog, Family, Separator,
    SourceFile,
};

/// Errors fatal to catalog loading. Everything recoverable (an unreadable
/// file, a malformed descriptor) is logged and skipped instead.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Content root {0} does not exist or is not a directory")]
    RootNotFound(String),
}

/// Component descriptor, the relevant subset of `antora.yml`.
#[derive(Debug, Deserialize)]
struct Descriptor {
    name: String,
    #[serde(default, deserialize_with = "version_string")]
    version: String,
    #[serde(default)]
    nav: Vec<String>,
}

/// Accept `version: 5.3` (a YAML number) and `version: ~` alongside plain
/// strings, since descriptors in the wild use all three.
fn version_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Null => Ok(String::new()),
        _ => Err(serde::de::Error::custom("version must be a string or number")),
    }
}

#[derive(Debug)]
struct LoadedComponent {
    cv: ComponentVersion,
    inventory: Vec<CatalogFile>,
    pages: Vec<SourceFile>,
    partials: Vec<SourceFile>,
    nav_files: Vec<SourceFile>,
}

/// A [`ContentCatalog`] loaded from an on-disk content root.
///
/// All paths are component-root-relative with `/` separators regardless of
/// platform.
#[derive(Debug)]
pub struct DirCatalog {
    components: Vec<LoadedComponent>,
}

impl DirCatalog {
    /// Walk `root` for `antora.yml` descriptors and load every component
    /// found. Components whose descriptor cannot be read or parsed are
    /// logged and skipped; only a missing root is fatal.
    pub fn load(root: &Path) -> Result<Self, CatalogError> {
        if !root.is_dir() {
            return Err(CatalogError::RootNotFound(root.display().to_string()));
        }

        let mut components: Vec<LoadedComponent> = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() || entry.file_name() != "antora.yml" {
                continue;
            }

            let path = entry.path();
            let text = match fs::read_to_string(path) {
                Ok(t) => t,
                Err(err) => {
                    tracing::warn!("Skipping unreadable descriptor {}: {}", path.display(), err);
                    continue;
                }
            };

            let descriptor: Descriptor = match serde_yaml::from_str(&text) {
                Ok(d) => d,
                Err(err) => {
                    tracing::warn!("Skipping malformed descriptor {}: {}", path.display(), err);
                    continue;
                }
            };

            let component_dir = match path.parent() {
                Some(dir) => dir,
                None => continue,
            };

            let component = load_component(component_dir, descriptor);
            if components.iter().any(|c| c.cv == component.cv) {
                tracing::warn!("Skipping duplicate component/version {}", component.cv.label());
                continue;
            }
            components.push(component);
        }

        if components.is_empty() {
            tracing::warn!("No antora.yml descriptors found under {}", root.display());
        }

        components.sort_by(|a, b| a.cv.cmp(&b.cv));
        Ok(Self { components })
    }

    fn find(&self, cv: &ComponentVersion) -> Option<&LoadedComponent> {
        self.components.iter().find(|c| &c.cv == cv)
    }
}

fn load_component(dir: &Path, descriptor: Descriptor) -> LoadedComponent {
    let cv = ComponentVersion::new(descriptor.name, descriptor.version);
    let mut inventory: Vec<CatalogFile> = Vec::new();
    let mut pages: Vec<SourceFile> = Vec::new();
    let mut partials: Vec<SourceFile> = Vec::new();
    let mut nav_files: Vec<SourceFile> = Vec::new();

    for entry in WalkDir::new(dir.join("modules"))
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        let catalog_path = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        // modules/<module>/<family-dir>/<rest>; anything shallower or under
        // an unrecognized directory is not content.
        let segments: Vec<&str> = catalog_path.split('/').collect();
        if segments.len() < 4 {
            continue;
        }
        let family = match Family::from_directory(segments[2]) {
            Some(f) => f,
            None => continue,
        };
        let module = segments[1].to_string();

        inventory.push(CatalogFile {
            component: cv.name.clone(),
            version: cv.version.clone(),
            family,
            module,
            path: catalog_path.clone(),
        });

        let is_adoc = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            == "adoc";
        if !is_adoc || !matches!(family, Family::Page | Family::Partial) {
            continue;
        }

        match fs::read_to_string(entry.path()) {
            Ok(contents) => {
                let source = SourceFile {
                    path: catalog_path,
                    contents,
                };
                match family {
                    Family::Page => pages.push(source),
                    _ => partials.push(source),
                }
            }
            Err(err) => {
                tracing::warn!("Skipping unreadable source {}: {}", entry.path().display(), err);
            }
        }
    }

    for nav in &descriptor.nav {
        match fs::read_to_string(dir.join(nav)) {
            Ok(contents) => {
                if !inventory.iter().any(|f| f.path == *nav) {
                    inventory.push(CatalogFile {
                        component: cv.name.clone(),
                        version: cv.version.clone(),
                        family: Family::Navigation,
                        module: module_from_path(nav, '/').to_string(),
                        path: nav.clone(),
                    });
                }
                nav_files.push(SourceFile {
                    path: nav.clone(),
                    contents,
                });
            }
            Err(err) => {
                tracing::warn!(
                    "Navigation file {} listed for {} is missing: {}",
                    nav,
                    cv.label(),
                    err
                );
            }
        }
    }

    inventory.sort_by(|a, b| a.path.cmp(&b.path));
    pages.sort_by(|a, b| a.path.cmp(&b.path));
    partials.sort_by(|a, b| a.path.cmp(&b.path));
    nav_files.sort_by(|a, b| a.path.cmp(&b.path));

    tracing::debug!(
        "Loaded {} with {} inventory file(s), {} page(s), {} partial(s)",
        cv.label(),
        inventory.len(),
        pages.len(),
        partials.len()
    );

    LoadedComponent {
        cv,
        inventory,
        pages,
        partials,
        nav_files,
    }
}

impl ContentCatalog for DirCatalog {
    fn separator(&self) -> Separator {
        Separator::Slash
    }

    fn component_versions(&self) -> Vec<ComponentVersion> {
        self.components.iter().map(|c| c.cv.clone()).collect()
    }

    fn inventory(&self, cv: &ComponentVersion) -> &[CatalogFile] {
        match self.find(cv) {
            Some(c) => &c.inventory,
            None => &[],
        }
    }

    fn pages(&self, cv: &ComponentVersion) -> &[SourceFile] {
        match self.find(cv) {
            Some(c) => &c.pages,
            None => &[],
        }
    }

    fn partials(&self, cv: &ComponentVersion) -> &[SourceFile] {
        match self.find(cv) {
            Some(c) => &c.partials,
            None => &[],
        }
    }

    fn nav_files(&self, cv: &ComponentVersion) -> &[SourceFile] {
        match self.find(cv) {
            Some(c) => &c.nav_files,
            None => &[],
        }
    }
}
