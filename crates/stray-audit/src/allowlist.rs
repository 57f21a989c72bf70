//! Allow-list of known false positives.
//!
//! Some files are referenced in ways the scanner cannot see, through
//! attribute indirection or from outside the content tree. Listing their
//! canonical paths in a false-positives file keeps them out of the orphan
//! report.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Parse allow-list text: one canonical path per line. Blank lines and
/// `#` comment lines are ignored, surrounding whitespace is trimmed.
pub fn parse_false_positives(text: &str) -> BTreeSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Load an allow-list file. An unreadable file is logged and treated as
/// empty so the audit still runs; it will just report more.
pub fn load_false_positives(path: &Path) -> BTreeSet<String> {
    match fs::read_to_string(path) {
        Ok(text) => parse_false_positives(&text),
        Err(err) => {
            tracing::warn!(
                "Could not read false-positives file {}: {}",
                path.display(),
                err
            );
            BTreeSet::new()
        }
    }
}
