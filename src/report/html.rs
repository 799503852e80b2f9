// src/report/html.rs
// =============================================================================
// The downloadable HTML report.
//
// Layout:
//   <h2>Broken Link Report for ORIGIN</h2>
//   totals paragraph (total / working / broken)
//   <ul> with one <li> per link: [OK] or [BROKEN] label, the link, its status
//   code ("ERR" when there was none) and its note
//
// The file name embeds the crawled host and the generation time:
//   broken_link_report_example_com_20261017_203015.html
// =============================================================================

use super::aggregate::Summary;
use crate::crawl::LinkRecord;
use crate::error::CrawlError;
use chrono::{DateTime, Local};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fs;
use std::path::{Path, PathBuf};

// Renders the report document
pub fn render_html(summary: &Summary) -> String {
    let mut html = String::from("<html><head><title>Broken Link Report</title></head><body>");

    html.push_str(&format!(
        "<h2>Broken Link Report for {}</h2>",
        encode_text(&summary.origin)
    ));
    html.push_str(&format!(
        "<p><b>Total links checked:</b> {}<br><b>Working links:</b> {}<br><b>Broken links:</b> {}</p><ul>",
        summary.total, summary.working, summary.broken
    ));

    for record in &summary.links {
        html.push_str(&render_item(record));
    }

    html.push_str("</ul></body></html>");
    html
}

// One <li> of the link list
fn render_item(record: &LinkRecord) -> String {
    let (color, label) = if record.reachable {
        ("green", "OK")
    } else {
        ("red", "BROKEN")
    };
    format!(
        "<li><span style=\"color:{};font-weight:bold;\">[{}]</span> <a href=\"{}\">{}</a> (Status: {}) {}</li>",
        color,
        label,
        encode_double_quoted_attribute(&record.url),
        encode_text(&record.url),
        record.status_label(),
        encode_text(&record.note)
    )
}

// File name for a report about `host` generated at `at`
pub fn report_filename(host: &str, at: DateTime<Local>) -> String {
    // ':' (from host:port) is not allowed in file names everywhere
    let domain = host.replace(['.', ':'], "_");
    format!(
        "broken_link_report_{}_{}.html",
        domain,
        at.format("%Y%m%d_%H%M%S")
    )
}

// Writes the report into `dir` and returns the file path
pub fn write_html_report(summary: &Summary, dir: &Path) -> Result<PathBuf, CrawlError> {
    let path = dir.join(report_filename(&summary.host, Local::now()));
    fs::write(&path, render_html(summary)).map_err(|source| CrawlError::Report {
        path: path.clone(),
        source,
    })?;
    tracing::info!("Wrote HTML report to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn summary() -> Summary {
        Summary {
            origin: "https://example.com/".to_string(),
            host: "example.com".to_string(),
            total: 2,
            working: 1,
            broken: 1,
            links: vec![
                LinkRecord {
                    url: "https://example.com/about".to_string(),
                    status: Some(200),
                    reachable: true,
                    note: String::new(),
                },
                LinkRecord {
                    url: "https://example.com/search?q=a&b=<c>".to_string(),
                    status: None,
                    reachable: false,
                    note: "PAGE ERROR".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_report_lists_counts_and_links() {
        let html = render_html(&summary());
        assert!(html.contains("<h2>Broken Link Report for https://example.com/</h2>"));
        assert!(html.contains("<b>Total links checked:</b> 2"));
        assert!(html.contains("<b>Working links:</b> 1"));
        assert!(html.contains("<b>Broken links:</b> 1"));
        assert!(html.contains("[OK]</span> <a href=\"https://example.com/about\">"));
        assert!(html.contains("(Status: 200)"));
        assert!(html.contains("[BROKEN]"));
        assert!(html.contains("(Status: ERR) PAGE ERROR"));
        assert_eq!(html.matches("<li>").count(), 2);
    }

    #[test]
    fn test_empty_report_is_complete_document() {
        let empty = Summary {
            total: 0,
            working: 0,
            broken: 0,
            links: Vec::new(),
            ..summary()
        };
        let html = render_html(&empty);
        assert!(html.starts_with("<html><head><title>Broken Link Report</title></head><body>"));
        assert!(html.contains("<b>Total links checked:</b> 0"));
        assert!(html.ends_with("<ul></ul></body></html>"));
    }

    #[test]
    fn test_report_escapes_urls() {
        let html = render_html(&summary());
        assert!(html.contains("q=a&amp;b=&lt;c&gt;"));
        assert!(!html.contains("<c>"));
    }

    #[test]
    fn test_report_filename() {
        let at = Local.with_ymd_and_hms(2026, 10, 17, 20, 30, 15).unwrap();
        assert_eq!(
            report_filename("example.com", at),
            "broken_link_report_example_com_20261017_203015.html"
        );
        assert_eq!(
            report_filename("127.0.0.1:8080", at),
            "broken_link_report_127_0_0_1_8080_20261017_203015.html"
        );
    }

    #[test]
    fn test_write_report_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_html_report(&summary(), dir.path()).unwrap();

        assert!(path.starts_with(dir.path()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("broken_link_report_example_com_"));
        assert!(name.ends_with(".html"));
        assert_eq!(fs::read_to_string(&path).unwrap(), render_html(&summary()));
    }

    #[test]
    fn test_write_report_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = write_html_report(&summary(), &missing).unwrap_err();
        assert!(matches!(err, CrawlError::Report { .. }));
    }
}
