// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things). The parsed arguments are
// turned into a CrawlConfig for the library.
// =============================================================================

use broken_link_checker::CrawlConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "broken-link-checker",
    version,
    about = "Crawl a website and report broken links",
    long_about = "broken-link-checker fetches a page, checks every link, image, script and stylesheet \
                  it references, and follows links on the same host up to a maximum depth. \
                  External links are checked but never crawled."
)]
pub struct Cli {
    /// Website URL to start from (e.g., https://example.com)
    pub url: String,

    /// Maximum crawl depth
    ///
    /// 0 = only the starting page
    /// 1 = starting page + pages it links to on the same host
    /// 2 = ...and the pages those link to, etc.
    #[arg(short, long, default_value_t = 1)]
    pub depth: usize,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Also write an HTML report into this directory
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Only check http:// and https:// references (skip mailto:, tel:, ...)
    #[arg(long)]
    pub http_only: bool,

    /// How many links of a page are checked at the same time
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=256))]
    pub concurrency: u16,

    /// Check each distinct URL only once, even if many pages link to it
    #[arg(long)]
    pub dedupe_checks: bool,

    /// Timeout in seconds for checking a single link
    #[arg(long, default_value_t = 5)]
    pub check_timeout: u64,

    /// Timeout in seconds for fetching a page
    #[arg(long, default_value_t = 10)]
    pub page_timeout: u64,

    /// Do not print each link as it is checked, and list only broken links in the table
    #[arg(short, long)]
    pub quiet: bool,

    /// Log crawl activity (same as RUST_LOG=info)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            max_depth: self.depth,
            check_timeout: Duration::from_secs(self.check_timeout),
            page_timeout: Duration::from_secs(self.page_timeout),
            http_only: self.http_only,
            check_concurrency: usize::from(self.concurrency),
            dedupe_checks: self.dedupe_checks,
            ..CrawlConfig::default()
        }
    }
}
