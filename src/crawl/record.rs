// src/crawl/record.rs
// =============================================================================
// One checked link's outcome.
//
// A crawl appends a LinkRecord every time it checks a link, so the same URL can
// show up several times (once per referencing page) until the report module
// deduplicates the list.
// =============================================================================

use crate::checker::LinkCheck;
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    /// The URL that was checked (or fetched, for page errors)
    pub url: String,
    /// HTTP status code, absent when no response was received
    pub status: Option<u16>,
    /// Whether the link counts as working
    pub reachable: bool,
    /// Extra context; "PAGE ERROR" when a page could not be fetched
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
}

impl LinkRecord {
    pub const PAGE_ERROR: &'static str = "PAGE ERROR";

    // Record for a link that went through the HEAD probe
    pub fn checked(url: &Url, check: LinkCheck) -> Self {
        Self {
            url: url.to_string(),
            status: check.status,
            reachable: check.reachable,
            note: String::new(),
        }
    }

    // Record for a page that could not be fetched
    pub fn page_error(url: &Url) -> Self {
        Self {
            url: url.to_string(),
            status: None,
            reachable: false,
            note: Self::PAGE_ERROR.to_string(),
        }
    }

    pub fn is_page_error(&self) -> bool {
        self.note == Self::PAGE_ERROR
    }

    // "200", "404", or "ERR" when there was no response
    pub fn status_label(&self) -> String {
        match self.status {
            Some(code) => code.to_string(),
            None => "ERR".to_string(),
        }
    }
}
