//! Report rendering for audit results.

use std::io::{self, Write};

use crate::driver::AuditSummary;

/// Write the line-oriented text report: one section per component/version,
/// sorted paths indented under a count header, blank lines between
/// sections, a trailing run summary line.
pub fn write_text<W: Write>(out: &mut W, summary: &AuditSummary) -> io::Result<()> {
    for report in &summary.reports {
        if let Some(error) = &report.error {
            writeln!(out, "{}: audit failed", report.label())?;
            writeln!(out, "  {}", error)?;
        } else {
            if report.orphans.is_empty() {
                writeln!(out, "{}: no orphaned files", report.label())?;
            } else {
                writeln!(
                    out,
                    "{}: {} orphaned file(s)",
                    report.label(),
                    report.orphans.len()
                )?;
                for path in &report.orphans {
                    writeln!(out, "  {}", path)?;
                }
            }

            if let Some(dangling) = &report.dangling {
                if dangling.is_empty() {
                    writeln!(out, "{}: no dangling references", report.label())?;
                } else {
                    writeln!(
                        out,
                        "{}: {} dangling reference(s)",
                        report.label(),
                        dangling.len()
                    )?;
                    for path in dangling {
                        writeln!(out, "  {}", path)?;
                    }
                }
            }
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "{} component/version(s) audited in {}ms",
        summary.reports.len(),
        summary.duration_ms
    )
}

/// Write the whole summary as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, summary: &AuditSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::driver::ComponentReport;

    use super::*;

    fn render(summary: &AuditSummary) -> String {
        let mut out = Vec::new();
        write_text(&mut out, summary).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn clean_report(component: &str, version: &str) -> ComponentReport {
        ComponentReport {
            component: component.to_string(),
            version: version.to_string(),
            orphans: Vec::new(),
            dangling: None,
            error: None,
        }
    }

    #[test]
    fn renders_orphan_sections_with_counts() {
        let summary = AuditSummary {
            reports: vec![
                ComponentReport {
                    orphans: vec![
                        "modules/ROOT/images/old.png".to_string(),
                        "modules/ROOT/pages/lost.adoc".to_string(),
                    ],
                    ..clean_report("docs", "1.0")
                },
                clean_report("tools", ""),
            ],
            halt: false,
            duration_ms: 12,
        };

        let expected = "\
docs@1.0: 2 orphaned file(s)
  modules/ROOT/images/old.png
  modules/ROOT/pages/lost.adoc

tools: no orphaned files

2 component/version(s) audited in 12ms
";
        assert_eq!(render(&summary), expected);
    }

    #[test]
    fn renders_component_errors() {
        let summary = AuditSummary {
            reports: vec![ComponentReport {
                error: Some("Unknown family 'bogus' in reference from x.adoc".to_string()),
                ..clean_report("docs", "1.0")
            }],
            halt: true,
            duration_ms: 3,
        };

        let expected = "\
docs@1.0: audit failed
  Unknown family 'bogus' in reference from x.adoc

1 component/version(s) audited in 3ms
";
        assert_eq!(render(&summary), expected);
    }

    #[test]
    fn renders_dangling_sections() {
        let summary = AuditSummary {
            reports: vec![ComponentReport {
                dangling: Some(vec!["modules/ROOT/pages/missing.adoc".to_string()]),
                ..clean_report("docs", "1.0")
            }],
            halt: false,
            duration_ms: 3,
        };

        let expected = "\
docs@1.0: no orphaned files
docs@1.0: 1 dangling reference(s)
  modules/ROOT/pages/missing.adoc

1 component/version(s) audited in 3ms
";
        assert_eq!(render(&summary), expected);
    }

    #[test]
    fn json_carries_reports_and_omits_empty_options() {
        let summary = AuditSummary {
            reports: vec![clean_report("docs", "1.0")],
            halt: false,
            duration_ms: 7,
        };

        let mut out = Vec::new();
        write_json(&mut out, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["reports"][0]["component"], "docs");
        assert_eq!(value["reports"][0]["version"], "1.0");
        assert_eq!(value["halt"], false);
        assert_eq!(value["duration_ms"], 7);

        let report = value["reports"][0].as_object().unwrap();
        assert!(!report.contains_key("dangling"));
        assert!(!report.contains_key("error"));
    }
}
