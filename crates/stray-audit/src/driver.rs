//! Audit driver: runs the pipeline for every component/version.

use std::collections::BTreeSet;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use stray_adoc::{FamilyMap, NormalizeError};
use stray_catalog::{ComponentVersion, ContentCatalog, Separator};

use crate::collector::collect_references;
use crate::diff::{self, InventoryFilter};

/// Knobs for a single audit run.
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    /// Log every component/version that will be audited before starting,
    /// to catch extraneous components inflating the results.
    pub print_available: bool,
    /// Ask the caller to halt its surrounding process once the audit
    /// completes. Carried through to [`AuditSummary::halt`].
    pub stop_after_find: bool,
    /// Canonical paths excused from orphan reporting.
    pub false_positives: BTreeSet<String>,
    /// Inventory exclusions applied before orphan detection.
    pub filter: InventoryFilter,
    /// Component names to leave out entirely.
    pub exclude_components: Vec<String>,
    /// Also report references that resolve to no inventory file.
    pub dangling: bool,
}

/// A failure auditing one component/version. The run records it on that
/// component's report and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error("Inventory path {path} does not use the declared '{sep}' separator")]
    MixedSeparator { path: String, sep: char },
}

/// Audit outcome for one component/version.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentReport {
    pub component: String,
    pub version: String,
    pub orphans: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dangling: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentReport {
    /// Display label, `name@version` or the bare name when unversioned.
    pub fn label(&self) -> String {
        if self.version.is_empty() {
            self.component.clone()
        } else {
            format!("{}@{}", self.component, self.version)
        }
    }
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct AuditSummary {
    pub reports: Vec<ComponentReport>,
    /// True when the caller asked to halt after this step.
    pub halt: bool,
    pub duration_ms: u64,
}

impl AuditSummary {
    /// True when anything actionable turned up: orphans, dangling
    /// references, or a component that failed to audit.
    pub fn has_findings(&self) -> bool {
        self.reports.iter().any(|r| {
            !r.orphans.is_empty()
                || r.dangling.as_ref().map_or(false, |d| !d.is_empty())
                || r.error.is_some()
        })
    }
}

/// Audit every component/version in the catalog.
///
/// Components are processed in parallel and independently: a failure in one
/// is recorded on its report without aborting the others. Report order
/// follows the catalog's component/version order.
pub fn run_audit(
    catalog: &dyn ContentCatalog,
    families: &FamilyMap,
    options: &AuditOptions,
) -> AuditSummary {
    let started = Instant::now();
    let sep = catalog.separator();

    let targets: Vec<ComponentVersion> = catalog
        .component_versions()
        .into_iter()
        .filter(|cv| !options.exclude_components.contains(&cv.name))
        .collect();

    if options.print_available {
        for cv in &targets {
            tracing::info!("Will audit {}", cv.label());
        }
    }

    let reports: Vec<ComponentReport> = targets
        .par_iter()
        .map(|cv| {
            tracing::debug!("Auditing {}", cv.label());
            match audit_component(catalog, cv, sep, families, options) {
                Ok(report) => report,
                Err(err) => {
                    tracing::error!("Audit of {} failed: {}", cv.label(), err);
                    ComponentReport {
                        component: cv.name.clone(),
                        version: cv.version.clone(),
                        orphans: Vec::new(),
                        dangling: None,
                        error: Some(err.to_string()),
                    }
                }
            }
        })
        .collect();

    AuditSummary {
        reports,
        halt: options.stop_after_find,
        duration_ms: started.elapsed().as_millis() as u64,
    }
}

fn audit_component(
    catalog: &dyn ContentCatalog,
    cv: &ComponentVersion,
    sep: Separator,
    families: &FamilyMap,
    options: &AuditOptions,
) -> Result<ComponentReport, AuditError> {
    let inventory = catalog.inventory(cv);

    for file in inventory {
        if sep.conflicts_with(&file.path) {
            return Err(AuditError::MixedSeparator {
                path: file.path.clone(),
                sep: sep.as_char(),
            });
        }
    }

    let references = collect_references(
        catalog.pages(cv),
        catalog.partials(cv),
        catalog.nav_files(cv),
        sep.as_char(),
        families,
    )?;

    let nav: BTreeSet<String> = catalog
        .nav_files(cv)
        .iter()
        .map(|f| f.path.clone())
        .collect();

    let candidates = diff::inventory_paths(inventory, &options.filter);
    let orphans: Vec<String> =
        diff::orphans(&candidates, &nav, &options.false_positives, &references)
            .into_iter()
            .collect();

    // Dangling detection runs against the unfiltered inventory: a file the
    // filter hides from orphan reporting still exists.
    let dangling = if options.dangling {
        let everything = diff::all_paths(inventory);
        Some(diff::dangling(&references, &everything).into_iter().collect())
    } else {
        None
    };

    Ok(ComponentReport {
        component: cv.name.clone(),
        version: cv.version.clone(),
        orphans,
        dangling,
        error: None,
    })
}
