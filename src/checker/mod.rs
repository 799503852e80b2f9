// src/checker/mod.rs
// =============================================================================
// This module contains the leaf operations of a crawl.
//
// Submodules:
// - html: Extracts link references from HTML pages
// - http: Probes links (HEAD) and fetches pages (GET)
//
// Neither submodule knows about depth or the visited set; that is the
// crawl engine's job (see src/crawl/).
// =============================================================================

mod html;
mod http;

pub use html::{extract_links, extract_page_links, is_checkable_link, PageLink};
pub use http::{build_client, check_link, check_links, fetch_page, LinkCheck};
