// src/checker/html.rs
// =============================================================================
// This module extracts link references from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser), so broken markup still
//   produces a usable tree instead of an error
//
// We also use the `url` crate to resolve relative references against the page
// URL, following RFC 3986 (relative paths, "//host/x", "?q", "#frag", "../up").
//
// Referencing attributes we look at:
//   <a href>  <img src>  <script src>  <link href>
// =============================================================================

use crate::crawl::{network_location, reference_location};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

// Every element/attribute pair that references another resource
const REFERENCE_SELECTOR: &str = "a[href], img[src], script[src], link[href]";

// A resolved reference together with the network location it was written
// with. Scope decisions use `location`; `url` is what gets checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub url: Url,
    pub location: String,
}

// Extracts every referenced URL from an HTML page
//
// Parameters:
//   html: the page content
//   base: the URL the page was fetched from (for resolving relative links)
//
// Returns: absolute URLs, each at most once, in document order
//
// Example:
//   html = "<a href='/docs'>Docs</a><img src='logo.png'>"
//   base = "https://example.com/guide/"
//   result = ["https://example.com/docs", "https://example.com/guide/logo.png"]
pub fn extract_links(html: &str, base: &Url) -> Vec<Url> {
    let mut seen = HashSet::new();
    extract_page_links(html, base, network_location(base.as_str()))
        .into_iter()
        .filter(|link| seen.insert(link.url.as_str().to_string()))
        .map(|link| link.url)
        .collect()
}

// Same as `extract_links`, but keeps the raw network location of each
// reference. `base_location` is the page's own location as it was written.
//
// Two references resolving to the same URL are both kept when they spell the
// host differently ("/page" and "http://EXAMPLE.com/page").
pub fn extract_page_links(html: &str, base: &Url, base_location: &str) -> Vec<PageLink> {
    let mut links = Vec::new();
    if html.is_empty() {
        return links;
    }

    let document = Html::parse_document(html);

    // The selector is a constant, so parsing can only fail on a programmer error
    let selector = Selector::parse(REFERENCE_SELECTOR).expect("reference selector is valid");

    let mut seen = HashSet::new();
    for element in document.select(&selector) {
        let attr = match element.value().name() {
            "img" | "script" => "src",
            _ => "href",
        };

        let Some(reference) = element.value().attr(attr) else {
            continue;
        };

        // Empty references carry no target
        if reference.is_empty() {
            continue;
        }

        match resolve_url(base, reference) {
            Some(url) => {
                let location = reference_location(reference, base, base_location).to_string();
                if seen.insert((url.as_str().to_string(), location.clone())) {
                    links.push(PageLink { url, location });
                }
            }
            None => {
                tracing::debug!("Skipping unresolvable reference '{}' on {}", reference, base);
            }
        }
    }

    tracing::debug!("Extracted {} link(s) from {}", links.len(), base);
    links
}

// Resolves a possibly-relative reference to an absolute URL
//
// Url::join handles both cases: an absolute reference replaces the base, a
// relative one is merged with it.
//
// Examples:
//   base = "https://example.com/page"
//   "/docs"              -> Some("https://example.com/docs")
//   "//cdn.test/app.js"  -> Some("https://cdn.test/app.js")
//   "#top"               -> Some("https://example.com/page#top")
//   "http://[::1"        -> None (malformed)
fn resolve_url(base: &Url, reference: &str) -> Option<Url> {
    base.join(reference).ok()
}

// Checks if a URL uses a scheme we can probe over HTTP
//
// Used when the crawl is configured with `http_only`; it drops
// mailto:, tel:, javascript:, data: and similar references.
pub fn is_checkable_link(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
