//! Crawl a website and report which of its links are broken.
//!
//! Starting from a seed URL the crawler fetches pages depth first, extracts
//! every `<a href>`, `<img src>`, `<script src>` and `<link href>` reference,
//! probes each one with a HEAD request, and descends into links on the same
//! host until the configured depth is reached. External links are checked but
//! never crawled. Every failure ends up as a broken link in the results rather
//! than as an error.
//!
//! # Usage
//!
//! ```rust,no_run
//! use broken_link_checker::{crawl_site, CrawlConfig, LinkRecord};
//!
//! # async fn example() -> Result<(), broken_link_checker::CrawlError> {
//! let config = CrawlConfig { max_depth: 2, ..CrawlConfig::default() };
//! let summary = crawl_site("https://example.com", config, &mut |record: &LinkRecord| {
//!     println!("{} -> {}", record.url, record.status_label());
//! })
//! .await?;
//! println!("{} of {} links are broken", summary.broken, summary.total);
//! # Ok(())
//! # }
//! ```
pub mod checker;
pub mod config;
pub mod crawl;
pub mod error;
pub mod report;

pub use config::CrawlConfig;
pub use crawl::{crawl_site, CancelHandle, CrawlOrigin, CrawlRun, Crawler, LinkRecord, Progress};
pub use error::CrawlError;
pub use report::Summary;
