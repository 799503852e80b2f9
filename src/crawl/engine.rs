// src/crawl/engine.rs
// =============================================================================
// The crawl engine: depth-first traversal from a seed URL.
//
// How it works:
// 1. Fetch the seed page (depth 0) and extract its links
// 2. Check every link that is not already a visited page, in page order
// 3. Right after checking an internal link, descend into it (depth + 1):
//    fetch it, extract its links, and finish that whole subtree before
//    checking the next link of the parent page
// 4. A page is fetched only if its depth is <= max_depth and it has never
//    been fetched before in this run (the visited set)
//
// Instead of recursing, the engine keeps an explicit stack of frames, one per
// page being worked on. Each frame holds the page's remaining links. The top
// frame is the page we are currently in; popping it returns to the parent
// exactly where a recursive call would have returned.
//
// Nothing inside a run returns an error: failed page fetches and failed probes
// become LinkRecords, and the run always completes (or stops when cancelled).
// =============================================================================

use super::progress::Progress;
use super::record::LinkRecord;
use super::scope::{is_internal, CrawlOrigin};
use crate::checker::{self, LinkCheck, PageLink};
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::report::{self, Summary};
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

// A link waiting to be checked, possibly already probed ahead of time
#[derive(Debug)]
struct PendingLink {
    link: PageLink,
    precheck: Option<LinkCheck>,
}

// One page on the traversal stack
#[derive(Debug)]
struct Frame {
    links: std::vec::IntoIter<PendingLink>,
    depth: usize,
}

// Stops a running crawl from another task
//
// Cheap to clone; every clone controls the same crawl.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// What the engine did during one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub pages_failed: usize,
    /// Probes actually sent over the network
    pub links_checked: usize,
    pub cancelled: bool,
    pub duration: Duration,
}

// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct CrawlRun {
    pub origin: CrawlOrigin,
    /// Raw records in the order they were produced, duplicates included
    pub records: Vec<LinkRecord>,
    /// Every URL that was fetched (or attempted) as a page
    pub visited: HashSet<String>,
    pub stats: CrawlStats,
}

impl CrawlRun {
    // Deduplicated records plus counts
    pub fn summarize(&self) -> Summary {
        report::aggregate(&self.origin, &self.records)
    }
}

pub struct Crawler {
    client: Client,
    config: CrawlConfig,
    origin: CrawlOrigin,
    visited: HashSet<String>,
    records: Vec<LinkRecord>,
    // Probe results by URL, only filled when config.dedupe_checks is set
    probed: HashMap<String, LinkCheck>,
    cancel: CancelHandle,
    stats: CrawlStats,
}

impl Crawler {
    pub fn new(origin: CrawlOrigin, config: CrawlConfig) -> Result<Self, CrawlError> {
        let client = checker::build_client(&config)?;
        Ok(Self::with_client(client, origin, config))
    }

    // Uses an existing HTTP client (connection pool, proxies, ...)
    pub fn with_client(client: Client, origin: CrawlOrigin, config: CrawlConfig) -> Self {
        Self {
            client,
            config,
            origin,
            visited: HashSet::new(),
            records: Vec::new(),
            probed: HashMap::new(),
            cancel: CancelHandle::default(),
            stats: CrawlStats::default(),
        }
    }

    pub fn origin(&self) -> &CrawlOrigin {
        &self.origin
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    // Rough number of links on the seed page, for sizing a progress bar
    //
    // Best effort: any failure gives 1 and has no effect on the crawl itself.
    pub async fn estimate_links(&self) -> usize {
        let seed = &self.origin.seed;
        match checker::fetch_page(&self.client, seed, self.config.page_timeout).await {
            Ok(html) => self.page_links(&html, seed, &self.origin.host).len().max(1),
            Err(e) => {
                tracing::debug!("Link estimate for {} failed: {}", seed, e);
                1
            }
        }
    }

    // Runs the crawl to completion
    pub async fn run<P>(mut self, progress: &mut P) -> CrawlRun
    where
        P: Progress + ?Sized,
    {
        let started = Instant::now();
        tracing::info!(
            "Starting crawl of {} (host '{}', max depth {})",
            self.origin.seed,
            self.origin.host,
            self.config.max_depth
        );

        let mut stack: Vec<Frame> = Vec::new();
        let seed = self.origin.seed.clone();
        let seed_location = self.origin.host.clone();
        if let Some(frame) = self.enter_page(seed, &seed_location, 0, progress).await {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            if self.cancel.is_cancelled() {
                break;
            }

            let Some(pending) = frame.links.next() else {
                stack.pop();
                continue;
            };
            let depth = frame.depth;
            let PageLink { url, location } = pending.link;

            // Pages already fetched (or in progress up the stack) are not checked again
            if self.visited.contains(url.as_str()) {
                continue;
            }

            let check = match pending.precheck {
                Some(check) => check,
                None => self.check(&url).await,
            };
            let record = LinkRecord::checked(&url, check);
            progress.link_checked(&record);
            self.records.push(record);

            if is_internal(&location, &self.origin.host) {
                if let Some(child) = self.enter_page(url, &location, depth + 1, progress).await {
                    stack.push(child);
                }
            }
        }

        self.stats.cancelled = self.cancel.is_cancelled();
        self.stats.duration = started.elapsed();
        tracing::info!(
            "Crawl of {} finished: {} page(s) fetched, {} failed, {} link(s) checked in {:.2}s{}",
            self.origin.seed,
            self.stats.pages_fetched,
            self.stats.pages_failed,
            self.stats.links_checked,
            self.stats.duration.as_secs_f64(),
            if self.stats.cancelled { " (cancelled)" } else { "" }
        );

        CrawlRun {
            origin: self.origin,
            records: self.records,
            visited: self.visited,
            stats: self.stats,
        }
    }

    // Fetches a page and turns it into a frame of links to check
    //
    // `location` is the page's network location as written in the link that
    // led here; relative links on the page inherit it.
    //
    // Returns None when the page is out of depth, already visited, failed to
    // load, or the crawl was cancelled.
    async fn enter_page<P>(
        &mut self,
        url: Url,
        location: &str,
        depth: usize,
        progress: &mut P,
    ) -> Option<Frame>
    where
        P: Progress + ?Sized,
    {
        if depth > self.config.max_depth || self.visited.contains(url.as_str()) {
            return None;
        }
        if self.cancel.is_cancelled() {
            return None;
        }

        // Marked before the fetch so nothing below can re-enter this page
        self.visited.insert(url.to_string());

        tracing::info!("Crawling [depth {}]: {}", depth, url);
        let html = match checker::fetch_page(&self.client, &url, self.config.page_timeout).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Failed to fetch page {}: {}", url, e);
                self.stats.pages_failed += 1;
                let record = LinkRecord::page_error(&url);
                progress.page_failed(&record);
                self.records.push(record);
                return None;
            }
        };
        self.stats.pages_fetched += 1;

        let links = self.page_links(&html, &url, location);
        let pending = self.precheck(links).await;
        Some(Frame {
            links: pending.into_iter(),
            depth,
        })
    }

    fn page_links(&self, html: &str, url: &Url, location: &str) -> Vec<PageLink> {
        let mut links = checker::extract_page_links(html, url, location);
        if self.config.http_only {
            links.retain(|link| checker::is_checkable_link(&link.url));
        }
        links
    }

    // Probes a page's links up front when concurrent checking is enabled
    //
    // Links that are already visited pages are left alone. Links that become
    // visited while an earlier sibling's subtree is crawled are still skipped
    // by the main loop; their early probe is simply discarded.
    async fn precheck(&mut self, links: Vec<PageLink>) -> Vec<PendingLink> {
        if self.config.check_concurrency <= 1 {
            return links
                .into_iter()
                .map(|link| PendingLink {
                    link,
                    precheck: None,
                })
                .collect();
        }

        let mut batch = Vec::new();
        let mut seen = HashSet::new();
        for url in links.iter().map(|link| &link.url) {
            if self.visited.contains(url.as_str()) || self.cached(url).is_some() {
                continue;
            }
            if seen.insert(url.as_str()) {
                batch.push(url.clone());
            }
        }

        let checks = checker::check_links(
            &self.client,
            &batch,
            self.config.check_timeout,
            self.config.check_concurrency,
        )
        .await;
        self.stats.links_checked += batch.len();

        let mut prechecked: HashMap<String, LinkCheck> = batch
            .into_iter()
            .map(|url| url.to_string())
            .zip(checks)
            .collect();
        if self.config.dedupe_checks {
            self.probed
                .extend(prechecked.iter().map(|(url, check)| (url.clone(), *check)));
        }

        links
            .into_iter()
            .map(|link| {
                let precheck = prechecked.remove(link.url.as_str());
                PendingLink { link, precheck }
            })
            .collect()
    }

    // Probes one link, reusing an earlier probe when dedupe_checks is set
    async fn check(&mut self, url: &Url) -> LinkCheck {
        if let Some(check) = self.cached(url) {
            tracing::debug!("Reusing earlier probe of {}", url);
            return check;
        }

        let check = checker::check_link(&self.client, url, self.config.check_timeout).await;
        self.stats.links_checked += 1;
        if self.config.dedupe_checks {
            self.probed.insert(url.to_string(), check);
        }
        check
    }

    fn cached(&self, url: &Url) -> Option<LinkCheck> {
        if !self.config.dedupe_checks {
            return None;
        }
        self.probed.get(url.as_str()).copied()
    }
}

// Parses `seed`, crawls it, and aggregates the results
//
// The only error is an unusable seed URL or HTTP client; everything that goes
// wrong during the crawl is reported as broken links.
pub async fn crawl_site<P>(seed: &str, config: CrawlConfig, progress: &mut P) -> Result<Summary, CrawlError>
where
    P: Progress + ?Sized,
{
    let origin = CrawlOrigin::parse(seed)?;
    let crawler = Crawler::new(origin, config)?;
    let run = crawler.run(progress).await;
    Ok(run.summarize())
}
