//! Surefire XML rendering of decoded outcomes.
//!
//! The consumer is a CI tool that reads Maven Surefire reports, so the
//! field mapping is fixed: `classname` = procedure name, `name` = test
//! name, failure `type` = assertion type, failure `message` = result
//! message with literal quotes stripped before XML escaping.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;
use utplsq_core::{DescriptionRecord, RunAggregator, STATUS_SUCCESS};

/// Escape the five XML-significant characters.
pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Remove literal quote characters. Applied to failure messages before
/// escaping to keep them readable in report viewers.
pub fn strip_quotes(input: &str) -> String {
    input.replace('"', "")
}

/// Render one `<testcase>` element. Any non-success status carries a
/// nested `<failure>` element.
pub fn render_test_case(status: &str, record: &DescriptionRecord) -> String {
    let mut xml = format!(
        "\n   <testcase classname=\"{}\" name=\"{}\" time=\"{}\">",
        escape_xml(&record.procedure_name),
        escape_xml(&record.test_name),
        escape_xml(&record.duration),
    );
    if status != STATUS_SUCCESS {
        xml.push_str(&format!(
            "\n       <failure type=\"{}\" message=\"{}\"/>\n   ",
            escape_xml(&record.assertion_type),
            escape_xml(&strip_quotes(&record.result_message)),
        ));
    }
    xml.push_str("</testcase>");
    xml
}

/// Wrap an aggregator's rendered body in the `<testsuite>` envelope.
///
/// utPLSQL provides no per-test timing, so the suite carries the single
/// wall-clock duration measured by the caller.
pub fn render_suite(aggregator: &RunAggregator, suite_name: &str, duration_ms: u64) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>");
    xml.push_str(&format!(
        "\n<testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" skipped=\"0\" errors=\"0\" time=\"{}msec\">",
        escape_xml(suite_name),
        aggregator.tests_run(),
        aggregator.failures(),
        duration_ms,
    ));
    xml.push_str(aggregator.body());
    xml.push_str("\n</testsuite>");
    xml
}

/// Report file name for a suite or package run.
pub fn report_file_name(suite_name: &str) -> String {
    format!("utplsql-{suite_name}-report.xml")
}

/// A rendered report plus its content digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportArtifact {
    /// File name the report is written under.
    pub file_name: String,

    /// Complete rendered XML document.
    pub xml: String,

    /// Hex-encoded SHA-256 of the XML.
    pub digest: String,
}

impl ReportArtifact {
    pub fn new(suite_name: &str, xml: String) -> Self {
        let digest = compute_digest(&xml);
        Self {
            file_name: report_file_name(suite_name),
            xml,
            digest,
        }
    }

    /// Write the report into an existing directory and return the full
    /// path. The directory is not created; managing it belongs to the
    /// caller.
    pub fn write_to(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.xml)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        debug!(file = %path.display(), digest = %self.digest, "wrote surefire report");
        Ok(path)
    }
}

/// Digest of rendered report content.
fn compute_digest(xml: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(xml.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_record() -> DescriptionRecord {
        DescriptionRecord::new(
            "MYBOOKS_PKG.UT_6_DEL".to_string(),
            "ut_del-1".to_string(),
            "EQQUERYVALUE".to_string(),
            "Query \"select 1\" returned value \"0\" & stopped".to_string(),
        )
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml("a < b & c > \"d\" 'e'"),
            "a &lt; b &amp; c &gt; &quot;d&quot; &apos;e&apos;"
        );
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("got \"0\" not \"1\""), "got 0 not 1");
    }

    #[test]
    fn test_passing_case_has_no_failure_element() {
        let record = DescriptionRecord::new(
            "betwnstr.UT_BETWNSTR_PROC".to_string(),
            "zero start".to_string(),
            "EQ".to_string(),
            "".to_string(),
        );
        let xml = render_test_case("SUCCESS", &record);
        assert!(xml.contains("classname=\"betwnstr.UT_BETWNSTR_PROC\""));
        assert!(xml.contains("name=\"zero start\""));
        assert!(xml.contains("time=\"0\""));
        assert!(!xml.contains("<failure"));
    }

    #[test]
    fn test_failing_case_strips_quotes_then_escapes() {
        let xml = render_test_case("FAILURE", &failing_record());
        assert!(xml.contains("<failure type=\"EQQUERYVALUE\""));
        // Quotes removed first, then the ampersand escaped.
        assert!(xml.contains("message=\"Query select 1 returned value 0 &amp; stopped\""));
    }

    #[test]
    fn test_unknown_status_renders_failure_element() {
        let xml = render_test_case("ERROR", &failing_record());
        assert!(xml.contains("<failure"));
    }

    #[test]
    fn test_suite_envelope_counts_and_duration() {
        let mut agg = RunAggregator::new();
        let ok = DescriptionRecord::new(
            "pkg.UT_A".to_string(),
            "a".to_string(),
            "EQ".to_string(),
            "".to_string(),
        );
        agg.record("SUCCESS", &ok);
        agg.push_body(&render_test_case("SUCCESS", &ok));
        agg.record("FAILURE", &failing_record());
        agg.push_body(&render_test_case("FAILURE", &failing_record()));

        let xml = render_suite(&agg, "MYBOOKS", 840);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>"));
        assert!(xml.contains(
            "<testsuite name=\"MYBOOKS\" tests=\"2\" failures=\"1\" skipped=\"0\" errors=\"0\" time=\"840msec\">"
        ));
        assert!(xml.ends_with("\n</testsuite>"));
        assert_eq!(xml.matches("<testcase").count(), 2);
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name("MYBOOKS"), "utplsql-MYBOOKS-report.xml");
    }

    #[test]
    fn test_artifact_digest_tracks_content() {
        let a = ReportArtifact::new("PKG", "<testsuite/>".to_string());
        let b = ReportArtifact::new("PKG", "<testsuite/>".to_string());
        let c = ReportArtifact::new("PKG", "<testsuite></testsuite>".to_string());
        assert_eq!(a.digest, b.digest);
        assert_ne!(a.digest, c.digest);
        assert_eq!(a.file_name, "utplsql-PKG-report.xml");
    }
}
