//! Shared output formatting for validation reports.
//!
//! Provides JSON and plain-text formatters for `ValidationReport`.
//! Colors are applied by the binary, not here.

use std::io::Write;

use crate::report::{FileStatus, ValidationReport};

/// Write the report as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Propagates serializer and writer failures.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write the report as an uncolored text summary with skipped and failing
/// files listed.
///
/// # Errors
///
/// Propagates writer failures.
pub fn write_human(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  API ELEMENTS DOCUMENTATION VALIDATOR")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Files found:        {}", report.discovered_files)?;
    writeln!(writer, "  Files passed:       {}", report.passed_files)?;
    writeln!(writer, "  Files failed:       {}", report.failed_files)?;
    writeln!(writer, "  Files skipped:      {}", report.skipped_files)?;
    writeln!(writer, "  Elements validated: {}", report.validated_elements())?;
    writeln!(writer)?;

    let skipped: Vec<_> = report
        .files
        .iter()
        .filter(|f| f.status == FileStatus::Skipped)
        .collect();
    if !skipped.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  SKIPPED")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for file in skipped {
            writeln!(writer, "{}", file.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    if report.failed_files > 0 {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  FAILURES")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for file in report.failures() {
            writeln!(writer, "{}", file.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if report.ok {
        writeln!(
            writer,
            "\u{2713} All {} checked files passed validation",
            report.passed_files
        )?;
    } else {
        writeln!(
            writer,
            "\u{2717} {} file(s) contain examples that do not match the element schema",
            report.failed_files
        )?;
        writeln!(writer)?;
        writeln!(writer, "  To fix:")?;
        writeln!(
            writer,
            "    - Update the example at the reported line, or the schema if the example is right"
        )?;
        writeln!(
            writer,
            "    - Tag intentionally invalid snippets with something other than `json`"
        )?;
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::HarnessConfig;
    use crate::harness::DocsHarness;
    use elements_schema::ElementSchema;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn report_for(files: &[(&str, &str)]) -> ValidationReport {
        let tmp = TempDir::new().unwrap();
        let docs = tmp.path().join("docs");
        fs::create_dir(&docs).unwrap();
        for (name, content) in files {
            fs::write(docs.join(name), content).unwrap();
        }
        let schema = ElementSchema::from_value(json!({
            "properties": {"element": {"type": "string"}}
        }))
        .unwrap();
        DocsHarness::with_schema(HarnessConfig::default().with_root(tmp.path()), schema)
            .run()
            .unwrap()
    }

    #[test]
    fn test_write_human_ok() {
        let report = report_for(&[("a.md", "```json\n{\"element\": \"string\"}\n```\n")]);
        let mut buf = Vec::new();
        write_human(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Elements validated: 1"), "got: {text}");
        assert!(text.contains("All 1 checked files passed validation"));
        assert!(!text.contains("FAILURES"));
    }

    #[test]
    fn test_write_human_failures_and_skips() {
        let report = report_for(&[
            ("bad.md", "```json\n{\"element\": 1}\n```\n"),
            ("migration.md", "```json\n{\"element\": 1}\n```\n"),
        ]);
        let mut buf = Vec::new();
        write_human(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("SKIPPED"), "got: {text}");
        assert!(text.contains("migration.md: skipped"));
        assert!(text.contains("FAILURES"));
        assert!(text.contains("bad.md:1:1: element does not match schema"));
    }

    #[test]
    fn test_write_json_contract() {
        let report = report_for(&[("bad.md", "```json\n{\"element\": 1}\n```\n")]);
        let mut buf = Vec::new();
        write_json(&report, &mut buf).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(json["ok"], false);
        assert_eq!(json["failed_files"], 1);
        let file = &json["files"][0];
        assert_eq!(file["status"], "failed");
        assert_eq!(file["failure"]["line"], 1);
        assert_eq!(file["failure"]["column"], 1);
        assert_eq!(file["failure"]["violations"][0]["instance_path"], "/element");
        assert!(file.get("skip_reason").is_none());
    }
}
