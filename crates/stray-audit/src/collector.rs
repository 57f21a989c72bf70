//! Reference collection across a component/version's scannable sources.

use std::collections::BTreeSet;

use stray_adoc::{normalize_target, scan_macros, FamilyMap, NormalizeError};
use stray_catalog::{module_from_path, SourceFile};

/// Collect the canonical form of every resolvable reference in the given
/// sources. Pure over its inputs: no I/O, and the same sources always yield
/// the same set regardless of order.
///
/// Targets the normalizer skips (attributes, external URLs, section-only
/// xrefs) contribute nothing; an unknown family aborts the whole collection
/// so a typo cannot silently turn referenced files into orphans.
pub fn collect_references(
    pages: &[SourceFile],
    partials: &[SourceFile],
    nav_files: &[SourceFile],
    sep: char,
    families: &FamilyMap,
) -> Result<BTreeSet<String>, NormalizeError> {
    let mut references = BTreeSet::new();

    for source in pages.iter().chain(partials).chain(nav_files) {
        let module = module_from_path(&source.path, sep);
        for occurrence in scan_macros(&source.contents) {
            let canonical = normalize_target(
                &occurrence.target,
                &source.path,
                module,
                occurrence.kind,
                sep,
                families,
            )?;
            if let Some(canonical) = canonical {
                references.insert(canonical);
            }
        }
    }

    Ok(references)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn source(path: &str, contents: &str) -> SourceFile {
        SourceFile {
            path: path.to_string(),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn collects_from_all_source_kinds() {
        let pages = vec![source(
            "modules/ROOT/pages/index.adoc",
            "xref:guide.adoc[Guide] and image:diagrams/arch.png[]\n",
        )];
        let partials = vec![source(
            "modules/ROOT/partials/footer.adoc",
            "include::example$config.yml[]\n",
        )];
        let nav = vec![source("modules/ROOT/nav.adoc", "* xref:install:setup.adoc[]\n")];

        let references =
            collect_references(&pages, &partials, &nav, '/', &FamilyMap::new()).unwrap();

        assert_eq!(
            references.into_iter().collect::<Vec<_>>(),
            vec![
                "modules/ROOT/examples/config.yml",
                "modules/ROOT/images/diagrams/arch.png",
                "modules/ROOT/pages/guide.adoc",
                "modules/install/pages/setup.adoc",
            ]
        );
    }

    #[test]
    fn deduplicates_repeated_references() {
        let pages = vec![
            source("modules/ROOT/pages/a.adoc", "xref:shared.adoc[]\n"),
            source("modules/ROOT/pages/b.adoc", "xref:shared.adoc[]\n"),
        ];

        let references = collect_references(&pages, &[], &[], '/', &FamilyMap::new()).unwrap();

        assert_eq!(references.len(), 1);
        assert!(references.contains("modules/ROOT/pages/shared.adoc"));
    }

    #[test]
    fn collection_is_idempotent() {
        let pages = vec![
            source(
                "modules/ROOT/pages/index.adoc",
                "xref:guide.adoc[] include::partial$shared.adoc[]\n",
            ),
            source("modules/ROOT/pages/guide.adoc", "image:flow.png[]\n"),
        ];
        let families = FamilyMap::new();

        let first = collect_references(&pages, &[], &[], '/', &families).unwrap();
        let second = collect_references(&pages, &[], &[], '/', &families).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn resolves_against_the_origin_module() {
        let pages = vec![source(
            "modules/install/pages/steps.adoc",
            "include::checklist.adoc[]\n",
        )];

        let references = collect_references(&pages, &[], &[], '/', &FamilyMap::new()).unwrap();

        assert!(references.contains("modules/install/pages/checklist.adoc"));
    }

    #[test]
    fn skips_unresolvable_targets() {
        let pages = vec![source(
            "modules/ROOT/pages/index.adoc",
            "image:{icons}/ok.png[] xref:some-section[] xref:https://example.com/doc.html[]\n",
        )];

        let references = collect_references(&pages, &[], &[], '/', &FamilyMap::new()).unwrap();

        assert!(references.is_empty());
    }

    #[test]
    fn propagates_unknown_family_errors() {
        let pages = vec![source(
            "modules/ROOT/pages/index.adoc",
            "include::snipet$header.adoc[]\n",
        )];

        let result = collect_references(&pages, &[], &[], '/', &FamilyMap::new());

        assert!(matches!(
            result,
            Err(NormalizeError::UnknownFamily { .. })
        ));
    }
}
