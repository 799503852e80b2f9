// src/report/mod.rs
// =============================================================================
// Post-processing of a finished crawl.
//
// Submodules:
// - aggregate: deduplicate the raw records and count working/broken links
// - html: render and write the HTML report file
//
// The crawl engine only produces raw records; everything that decides how the
// results look lives here (and in main.rs for terminal output).
// =============================================================================

mod aggregate;
mod html;

pub use aggregate::{aggregate, dedupe, Summary};
pub use html::{render_html, report_filename, write_html_report};
