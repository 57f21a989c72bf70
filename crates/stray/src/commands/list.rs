//! Catalog listing command.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use stray_catalog::{ContentCatalog, DirCatalog};

use crate::config;

/// Print one line per component/version with per-family file counts.
pub fn run(root: Option<PathBuf>, config_path: &Path) -> Result<()> {
    let config = config::load(config_path)?;
    let root = root.unwrap_or_else(|| PathBuf::from(&config.site.root));
    let catalog = DirCatalog::load(&root)
        .with_context(|| format!("Failed to load content catalog from {}", root.display()))?;

    for cv in catalog.component_versions() {
        let inventory = catalog.inventory(&cv);

        let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
        for file in inventory {
            *counts.entry(file.family.directory().unwrap_or("nav")).or_default() += 1;
        }
        let detail: Vec<String> = counts
            .iter()
            .map(|(family, count)| format!("{} {}", count, family))
            .collect();

        if detail.is_empty() {
            println!("{}: 0 file(s)", cv.label());
        } else {
            println!(
                "{}: {} file(s) ({})",
                cv.label(),
                inventory.len(),
                detail.join(", ")
            );
        }
    }

    Ok(())
}
