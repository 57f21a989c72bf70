//! Orphaned-file audit command.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use stray_audit::{load_false_positives, run_audit, AuditOptions, InventoryFilter};
use stray_catalog::DirCatalog;

use crate::config::{self, AuditConfig};

/// Output format for the audit report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Content root to audit (defaults to the configured site root)
    pub root: Option<PathBuf>,

    /// Also report references that resolve to no catalog file
    #[arg(long)]
    pub dangling: bool,

    /// List every component/version before processing
    #[arg(long)]
    pub print_available: bool,

    /// Exit with code 2 when the audit finds anything, for CI gating
    #[arg(long)]
    pub stop_after_find: bool,

    /// Newline-delimited allow-list of known false positives
    #[arg(long, value_name = "FILE")]
    pub false_positives: Option<PathBuf>,

    /// Drop inventory files ending in this suffix, e.g. `.png` (repeatable)
    #[arg(long, value_name = "SUFFIX")]
    pub exclude_extension: Vec<String>,

    /// Drop inventory paths containing this substring (repeatable)
    #[arg(long, value_name = "SUBSTRING")]
    pub path_filter: Vec<String>,

    /// Skip a component by name (repeatable)
    #[arg(long, value_name = "NAME")]
    pub exclude_component: Vec<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Run the audit command.
pub fn run(args: AuditArgs, config_path: &Path) -> Result<ExitCode> {
    let config = config::load(config_path)?;

    let root = args
        .root
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.site.root));
    let catalog = DirCatalog::load(&root)
        .with_context(|| format!("Failed to load content catalog from {}", root.display()))?;

    let allowlist_path = args
        .false_positives
        .clone()
        .or_else(|| config.audit.false_positives.as_ref().map(PathBuf::from));
    let false_positives = match allowlist_path {
        Some(path) => load_false_positives(&path),
        None => BTreeSet::new(),
    };

    let families = config.family_map();
    let options = merge_options(&args, &config.audit, false_positives);

    let summary = run_audit(&catalog, &families, &options);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        ReportFormat::Text => stray_audit::write_text(&mut out, &summary)?,
        ReportFormat::Json => stray_audit::write_json(&mut out, &summary)?,
    }

    if summary.halt && summary.has_findings() {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

/// Combine CLI flags with config file settings; flags win for toggles and
/// extend the config's lists.
fn merge_options(
    args: &AuditArgs,
    config: &AuditConfig,
    false_positives: BTreeSet<String>,
) -> AuditOptions {
    let mut exclude_extensions = config.exclude_extensions.clone();
    exclude_extensions.extend(args.exclude_extension.iter().cloned());

    let mut path_filters = config.path_filters.clone();
    path_filters.extend(args.path_filter.iter().cloned());

    let mut exclude_components = config.exclude_components.clone();
    exclude_components.extend(args.exclude_component.iter().cloned());

    AuditOptions {
        print_available: args.print_available || config.print_available,
        stop_after_find: args.stop_after_find || config.stop_after_find,
        false_positives,
        filter: InventoryFilter {
            exclude_extensions,
            path_filters,
        },
        exclude_components,
        dangling: args.dangling || config.dangling,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn bare_args() -> AuditArgs {
        AuditArgs {
            root: None,
            dangling: false,
            print_available: false,
            stop_after_find: false,
            false_positives: None,
            exclude_extension: Vec::new(),
            path_filter: Vec::new(),
            exclude_component: Vec::new(),
            format: ReportFormat::Text,
        }
    }

    #[test]
    fn flags_extend_configured_lists() {
        let args = AuditArgs {
            exclude_extension: vec![".svg".to_string()],
            exclude_component: vec!["scratch".to_string()],
            ..bare_args()
        };
        let config = AuditConfig {
            exclude_extensions: vec![".png".to_string()],
            exclude_components: vec!["playground".to_string()],
            ..AuditConfig::default()
        };

        let options = merge_options(&args, &config, BTreeSet::new());

        assert_eq!(options.filter.exclude_extensions, vec![".png", ".svg"]);
        assert_eq!(options.exclude_components, vec!["playground", "scratch"]);
    }

    #[test]
    fn either_source_can_set_a_toggle() {
        let config = AuditConfig {
            stop_after_find: true,
            ..AuditConfig::default()
        };

        let options = merge_options(&bare_args(), &config, BTreeSet::new());
        assert!(options.stop_after_find);

        let args = AuditArgs {
            dangling: true,
            ..bare_args()
        };
        let options = merge_options(&args, &AuditConfig::default(), BTreeSet::new());
        assert!(options.dangling);
        assert!(!options.stop_after_find);
    }
}
