//! Macro occurrence scanning over raw AsciiDoc text.

use regex::Regex;
use std::sync::LazyLock;

/// Macro keywords the scanner recognizes at the top level.
///
/// The family coordinates `partial`, `example`, and `attachment` never
/// appear as keywords; they only occur inside targets via `$` shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroKind {
    Image,
    Include,
    Xref,
}

impl MacroKind {
    /// The keyword as written in source, doubling as the default family
    /// coordinate when a target carries no `$` shorthand.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Include => "include",
            Self::Xref => "xref",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "image" => Some(Self::Image),
            "include" => Some(Self::Include),
            "xref" => Some(Self::Xref),
            _ => None,
        }
    }
}

/// One macro found in a source file, target still raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroOccurrence {
    /// Which macro keyword matched
    pub kind: MacroKind,

    /// The target exactly as written, not yet normalized
    pub target: String,

    /// Line the match starts on (1-indexed)
    pub line: usize,
}

// A macro is a keyword at a line start or after a boundary character,
// followed by one or two colons and a target running up to whitespace or
// the attribute-list bracket: `image:logo.png[]`, `include::partial$x.adoc[]`,
// `xref:guide.adoc[Guide]`.
static MACRO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)(?:^|[\s"'(])(?P<kind>image|include|xref)::?(?P<target>[^\s\[\]]*)"#)
        .expect("Invalid macro regex")
});

/// Scan raw text for image/include/xref macros.
///
/// A single linear pass; occurrences come back in text order. Matches with
/// an empty target (`image:` followed by whitespace) are dropped.
pub fn scan_macros(text: &str) -> Vec<MacroOccurrence> {
    let mut occurrences = Vec::new();
    let mut line = 1;
    let mut counted_to = 0;

    for caps in MACRO_RE.captures_iter(text) {
        let keyword = match caps.name("kind") {
            Some(m) => m,
            None => continue,
        };
        let target = caps.name("target").map_or("", |m| m.as_str());
        if target.is_empty() {
            continue;
        }
        let kind = match MacroKind::from_keyword(keyword.as_str()) {
            Some(kind) => kind,
            None => continue,
        };

        line += text[counted_to..keyword.start()].matches('\n').count();
        counted_to = keyword.start();

        occurrences.push(MacroOccurrence {
            kind,
            target: target.to_string(),
            line,
        });
    }

    occurrences
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn finds_inline_and_block_macros() {
        let text = "\
= Title

See xref:guide.adoc[the guide] and image:logo.png[Logo].

include::partial$header.adoc[]
";

        let found = scan_macros(text);

        assert_eq!(found.len(), 3);
        assert_eq!(found[0].kind, MacroKind::Xref);
        assert_eq!(found[0].target, "guide.adoc");
        assert_eq!(found[1].kind, MacroKind::Image);
        assert_eq!(found[1].target, "logo.png");
        assert_eq!(found[2].kind, MacroKind::Include);
        assert_eq!(found[2].target, "partial$header.adoc");
    }

    #[test]
    fn tracks_line_numbers() {
        let text = "first line\nxref:a.adoc[]\n\nimage::b.png[]\n";

        let found = scan_macros(text);

        assert_eq!(found[0].line, 2);
        assert_eq!(found[1].line, 4);
    }

    #[test]
    fn drops_empty_targets() {
        let text = "image: not a macro, just a colon\n";

        assert!(scan_macros(text).is_empty());
    }

    #[test]
    fn ignores_keywords_inside_words() {
        let text = "the preimage:thing.png[] of a function\n";

        assert!(scan_macros(text).is_empty());
    }

    #[test]
    fn stops_target_at_bracket_and_whitespace() {
        let text = "xref:page.adoc[Some label with spaces]\ninclude::deep/nested.adoc[leveloffset=+1]\n";

        let found = scan_macros(text);

        assert_eq!(found[0].target, "page.adoc");
        assert_eq!(found[1].target, "deep/nested.adoc");
    }

    #[test]
    fn matches_after_boundary_characters() {
        let text = "(xref:parens.adoc[]) \"image:quoted.png[]\"\n";

        let found = scan_macros(text);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].target, "parens.adoc");
        assert_eq!(found[1].target, "quoted.png");
    }

    #[test]
    fn keeps_attribute_targets_raw() {
        // Unresolvable targets are the normalizer's problem, not the scanner's.
        let text = "image:{imagesdir}/logo.png[]\n";

        let found = scan_macros(text);

        assert_eq!(found[0].target, "{imagesdir}/logo.png");
    }
}
