//! Canonical reference resolution for raw macro targets.
//!
//! Turns a target as an author wrote it (`./sibling.adoc`,
//! `partial$shared/header.adoc`, `othermodule:page.adoc`) into the
//! repository-relative path the content catalog uses, or decides the target
//! cannot refer to a local file at all.

use regex::Regex;
use std::sync::LazyLock;

use crate::family::FamilyMap;
use crate::scanner::MacroKind;

/// Errors raised during target normalization.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("Unknown family '{family}' in reference from {origin}")]
    UnknownFamily { family: String, origin: String },
}

// A final path segment must carry an extension marker to denote a physical
// file; bare segments are section anchors.
static EXTENSION_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?.+].+").expect("Invalid extension marker regex"));

/// Resolve a raw macro target to a canonical catalog path.
///
/// Returns `Ok(None)` when the target cannot refer to a local file and must
/// be skipped:
/// - it contains an unresolved attribute placeholder (`{`);
/// - it contains `@`, a cross-component/version coordinate;
/// - its final segment has no extension marker (a section-only xref);
/// - it is an external `http://`/`https://` URL.
///
/// `origin` is the referencing file's own catalog path, used both to resolve
/// `./`-relative targets and to name the source in errors. `module` is the
/// origin file's module, the default landing spot for bare targets.
pub fn normalize_target(
    target: &str,
    origin: &str,
    module: &str,
    kind: MacroKind,
    sep: char,
    families: &FamilyMap,
) -> Result<Option<String>, NormalizeError> {
    if target.contains('{') {
        return Ok(None);
    }
    if target.contains('@') {
        return Ok(None);
    }
    let final_segment = target.rsplit(sep).next().unwrap_or(target);
    if !EXTENSION_MARKER_RE.is_match(final_segment) {
        return Ok(None);
    }
    let lowered = target.to_ascii_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        return Ok(None);
    }

    // Drop the in-document anchor.
    let body = match target.find('#') {
        Some(at) => &target[..at],
        None => target,
    };

    // A `./` target resolves against the origin file's directory. The origin
    // path already carries the modules/<module>/<family-dir> prefix, so the
    // result is complete once the separators are tidied.
    if body.starts_with("./") || body.starts_with(".\\") {
        let dir = origin.rfind(sep).map_or("", |at| &origin[..at]);
        let joined = tidy(&format!("{}{}", dir, &body[1..]), sep);
        if has_dot_segments(&joined, sep) {
            return Ok(None);
        }
        return Ok(Some(joined));
    }

    let body = tidy(body, sep);

    // Canonical references never carry `.` or `..` segments; targets that
    // would produce one are malformed and dropped like any other
    // unresolvable target.
    if has_dot_segments(&body, sep) {
        return Ok(None);
    }

    // A `$` coordinate names the family; without one the macro kind itself
    // is the family and the whole body is the path.
    let (family, rest) = match body.split_once('$') {
        Some((family, rest)) => (family, rest),
        None => (kind.as_str(), body.as_str()),
    };

    let resolved = if let Some((other_module, family)) = family.split_once(':') {
        // othermodule:family$path
        let dir = directory(families, family, origin)?;
        format!("{other_module}{sep}{dir}{sep}{rest}")
    } else if let Some((other_module, rest)) = rest.split_once(':') {
        // othermodule:path with the family implied by the macro kind
        let dir = directory(families, family, origin)?;
        format!("{other_module}{sep}{dir}{sep}{rest}")
    } else {
        let dir = directory(families, family, origin)?;
        format!("{module}{sep}{dir}{sep}{rest}")
    };

    Ok(Some(format!("modules{sep}{resolved}")))
}

fn directory<'a>(
    families: &'a FamilyMap,
    family: &str,
    origin: &str,
) -> Result<&'a str, NormalizeError> {
    families
        .directory(family)
        .ok_or_else(|| NormalizeError::UnknownFamily {
            family: family.to_string(),
            origin: origin.to_string(),
        })
}

fn has_dot_segments(path: &str, sep: char) -> bool {
    path.split(sep).any(|segment| segment == "." || segment == "..")
}

/// Collapse doubled separators and strip a single leading one.
fn tidy(path: &str, sep: char) -> String {
    let doubled: String = [sep, sep].iter().collect();
    let single = sep.to_string();

    let mut tidied = path.to_string();
    while tidied.contains(&doubled) {
        tidied = tidied.replace(&doubled, &single);
    }

    match tidied.strip_prefix(sep) {
        Some(stripped) => stripped.to_string(),
        None => tidied,
    }
}
