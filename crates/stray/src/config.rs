//! Configuration file loading (stray.toml).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use stray_adoc::FamilyMap;

/// Configuration file structure (stray.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    /// Extra family coordinates, `family = "directory"`.
    #[serde(default)]
    pub families: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_root")]
    pub root: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AuditConfig {
    #[serde(default)]
    pub print_available: bool,
    #[serde(default)]
    pub stop_after_find: bool,
    /// Path to a newline-delimited false-positives file.
    #[serde(default)]
    pub false_positives: Option<String>,
    #[serde(default)]
    pub exclude_extensions: Vec<String>,
    #[serde(default)]
    pub path_filters: Vec<String>,
    #[serde(default)]
    pub exclude_components: Vec<String>,
    #[serde(default)]
    pub dangling: bool,
}

fn default_root() -> String {
    "docs".to_string()
}

impl ConfigFile {
    /// Standard family map plus any `[families]` additions.
    pub fn family_map(&self) -> FamilyMap {
        let mut families = FamilyMap::new();
        for (family, directory) in &self.families {
            families.insert(family, directory);
        }
        families
    }
}

/// Load configuration from the given path if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}
