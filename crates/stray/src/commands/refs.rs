//! Reference dump command, for inspecting what the audit will match
//! against.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use stray_audit::collect_references;
use stray_catalog::{ContentCatalog, DirCatalog};

use crate::config;

/// Print every canonical reference per component/version, sorted.
pub fn run(root: Option<PathBuf>, config_path: &Path) -> Result<()> {
    let config = config::load(config_path)?;
    let root = root.unwrap_or_else(|| PathBuf::from(&config.site.root));
    let catalog = DirCatalog::load(&root)
        .with_context(|| format!("Failed to load content catalog from {}", root.display()))?;

    let families = config.family_map();
    let sep = catalog.separator().as_char();

    for cv in catalog.component_versions() {
        println!("{}:", cv.label());
        let references = collect_references(
            catalog.pages(&cv),
            catalog.partials(&cv),
            catalog.nav_files(&cv),
            sep,
            &families,
        );
        match references {
            Ok(references) => {
                for reference in &references {
                    println!("  {}", reference);
                }
            }
            Err(err) => {
                tracing::error!("Reference collection for {} failed: {}", cv.label(), err);
            }
        }
        println!();
    }

    Ok(())
}
