//! Orphaned-file audit over a [`stray_catalog::ContentCatalog`].
//!
//! The pipeline per component/version: collect every canonical reference
//! from pages, partials, and navigation files, then diff the component's
//! file inventory against it. Files nothing references, that no navigation
//! file lists, and that the allow-list does not excuse are orphans.

pub mod allowlist;
pub mod collector;
pub mod diff;
pub mod driver;
pub mod report;

pub use allowlist::{load_false_positives, parse_false_positives};
pub use collector::collect_references;
pub use diff::InventoryFilter;
pub use driver::{run_audit, AuditError, AuditOptions, AuditSummary, ComponentReport};
pub use report::{write_json, write_text};
