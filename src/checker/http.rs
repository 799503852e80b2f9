// src/checker/http.rs
// =============================================================================
// This module talks HTTP: it probes links and fetches pages.
//
// Key functionality:
// - HEAD probes (lightweight, no body download) with a short timeout
// - Redirects are followed by the client, so the status we see is the final one
// - A probe never fails: every error becomes "no status, unreachable"
// - Full GET page fetches for pages whose links we want to extract
// - Optional concurrent probing of a batch of links, results kept in order
// =============================================================================

use crate::config::CrawlConfig;
use crate::error::{CrawlError, FetchError, ProbeError};
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffered()
use reqwest::Client;
use std::error::Error as _;
use std::time::Duration;
use url::Url;

// Outcome of probing a single link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkCheck {
    /// Final HTTP status code, absent when no response arrived
    pub status: Option<u16>,
    /// True iff a response arrived with a status below 400
    pub reachable: bool,
}

impl LinkCheck {
    // Classifies a received status code
    pub fn from_status(status: u16) -> Self {
        Self {
            status: Some(status),
            reachable: status < 400,
        }
    }

    // The outcome for "no response at all"
    pub fn unreachable() -> Self {
        Self {
            status: None,
            reachable: false,
        }
    }
}

// Builds the HTTP client shared by every probe and page fetch of a crawl
//
// Timeouts are set per request (probes and page fetches use different ones),
// so the client itself has none.
pub fn build_client(config: &CrawlConfig) -> Result<Client, CrawlError> {
    let client = Client::builder()
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .build()?;
    Ok(client)
}

// Probes a single link
//
// Issues exactly one HEAD request. There is no retry and no GET fallback.
//
// Returns: LinkCheck with the final status, or LinkCheck::unreachable() when
// the request failed for any reason (timeout, DNS, refused connection, TLS,
// redirect loop, unsupported scheme...)
pub async fn check_link(client: &Client, url: &Url, timeout: Duration) -> LinkCheck {
    match probe(client, url, timeout).await {
        Ok(status) => {
            let check = LinkCheck::from_status(status);
            tracing::debug!("Probed {}: HTTP {}", url, status);
            check
        }
        Err(e) => {
            tracing::debug!("Probe of {} failed: {}", url, e);
            LinkCheck::unreachable()
        }
    }
}

async fn probe(client: &Client, url: &Url, timeout: Duration) -> Result<u16, ProbeError> {
    let response = client
        .head(url.clone())
        .timeout(timeout)
        .send()
        .await
        .map_err(categorize_error)?;
    Ok(response.status().as_u16())
}

// Probes a batch of links, up to `concurrency` at once
//
// Results come back in the same order as `urls` (ordered buffering), so the
// caller can pair them up with zip.
pub async fn check_links(
    client: &Client,
    urls: &[Url],
    timeout: Duration,
    concurrency: usize,
) -> Vec<LinkCheck> {
    stream::iter(urls.iter().map(|url| check_link(client, url, timeout)))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

// Fetches a page and returns its body
//
// A 4xx or 5xx status (after redirects) is a failure. Anything below 400 that
// is left once redirects are done (a 300 without Location, a 204) still
// counts as a page, possibly an empty one.
pub async fn fetch_page(client: &Client, url: &Url, timeout: Duration) -> Result<String, FetchError> {
    let response = client
        .get(url.clone())
        .timeout(timeout)
        .send()
        .await
        .map_err(FetchError::Request)?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(FetchError::Status(status.as_u16()));
    }

    response.text().await.map_err(FetchError::Body)
}

// Categorizes a reqwest error
//
// reqwest errors can happen for many reasons; the interesting detail (for
// example "dns error") is often a few levels down the source chain, so we
// flatten the chain into one lowercase string before looking at it.
fn categorize_error(error: reqwest::Error) -> ProbeError {
    let chain = error_chain(&error);

    if error.is_timeout() {
        ProbeError::Timeout
    } else if error.is_redirect() {
        ProbeError::TooManyRedirects
    } else if chain.contains("dns") {
        ProbeError::Dns
    } else if chain.contains("certificate") || chain.contains("tls") {
        ProbeError::Tls
    } else if error.is_connect() {
        ProbeError::Connect
    } else {
        ProbeError::Other(error.to_string())
    }
}

fn error_chain(error: &reqwest::Error) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain.to_lowercase()
}
