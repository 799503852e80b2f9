// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first crawling starting from a seed URL
// - Every discovered link is checked; only same-host links are crawled further
// - Configurable depth limit (0 = only the seed page)
// - A visited set so no page is fetched twice and link cycles terminate
// - Live progress callbacks and cooperative cancellation
//
// Submodules:
// - engine: the traversal itself (Crawler)
// - scope: internal vs external links
// - record: the per-link outcome (LinkRecord)
// - progress: the callback interface for live reporting
// =============================================================================

mod engine;
mod progress;
mod record;
mod scope;

pub use engine::{crawl_site, CancelHandle, CrawlRun, CrawlStats, Crawler};
pub use progress::{NoProgress, Progress};
pub use record::LinkRecord;
pub use scope::{is_internal, network_location, reference_location, CrawlOrigin};
