// src/report/aggregate.rs
// =============================================================================
// Turns the raw record log of a crawl into the final result set.
//
// The same URL can be recorded several times (checked from several pages, or
// checked as a link and then failed as a page). The final set keeps one entry
// per URL: the values of its LAST record, at the position of its FIRST record.
// =============================================================================

use crate::crawl::{CrawlOrigin, LinkRecord};
use serde::Serialize;
use std::collections::HashMap;

// Deduplicated results of one crawl plus counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// The seed URL the crawl started from
    pub origin: String,
    /// Network location of the seed, used to scope the crawl
    pub host: String,
    pub total: usize,
    pub working: usize,
    pub broken: usize,
    pub links: Vec<LinkRecord>,
}

impl Summary {
    pub fn has_broken(&self) -> bool {
        self.broken > 0
    }

    pub fn broken_links(&self) -> impl Iterator<Item = &LinkRecord> {
        self.links.iter().filter(|r| !r.reachable)
    }
}

// Collapses repeated URLs, last record wins, first-seen order kept
pub fn dedupe(records: &[LinkRecord]) -> Vec<LinkRecord> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut unique: Vec<LinkRecord> = Vec::new();

    for record in records {
        match position.get(record.url.as_str()) {
            Some(&index) => unique[index] = record.clone(),
            None => {
                position.insert(record.url.as_str(), unique.len());
                unique.push(record.clone());
            }
        }
    }

    unique
}

// Deduplicates `records` and counts working and broken links
pub fn aggregate(origin: &CrawlOrigin, records: &[LinkRecord]) -> Summary {
    let links = dedupe(records);
    let total = links.len();
    let broken = links.iter().filter(|r| !r.reachable).count();

    Summary {
        origin: origin.seed.to_string(),
        host: origin.host.clone(),
        total,
        working: total - broken,
        broken,
        links,
    }
}
