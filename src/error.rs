// src/error.rs
// =============================================================================
// Error types for the library.
//
// Only CrawlError ever reaches a caller. FetchError and ProbeError describe why
// a page fetch or a link probe failed; the crawl engine logs them and turns
// them into a LinkRecord instead of returning them.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

// Errors that stop the caller before (or after) a crawl, never during one
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to write report to {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// Why a page could not be fetched for link extraction
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("failed to read body: {0}")]
    Body(#[source] reqwest::Error),
}

// Why a link probe got no usable response
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("request timed out")]
    Timeout,

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("could not resolve hostname")]
    Dns,

    #[error("connection failed")]
    Connect,

    #[error("TLS certificate error")]
    Tls,

    #[error("{0}")]
    Other(String),
}
