// src/crawl/scope.rs
// =============================================================================
// Decides which links the crawler may recurse into.
//
// Scope only gates recursion: internal and external links are both checked,
// but only internal ones are fetched as pages.
//
// "Host" here is the network location of a URL exactly as it was written:
// the authority between "//" and the path, port and letter case included.
// Url normalizes hosts (lowercase, default port dropped), so the location is
// taken from the raw text instead. Comparison is exact; "EXAMPLE.com",
// "example.com:443" and "www.example.com" are all different hosts from
// "example.com".
// =============================================================================

use crate::error::CrawlError;
use url::Url;

// Where a crawl starts. Fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOrigin {
    pub seed: Url,
    pub host: String,
}

impl CrawlOrigin {
    // Builds an origin from an already parsed URL. The host then comes from
    // the normalized form; use `parse` to keep the user's spelling.
    pub fn new(seed: Url) -> Self {
        let host = network_location(seed.as_str()).to_string();
        Self { seed, host }
    }

    // Parses the seed URL given by the user
    pub fn parse(seed: &str) -> Result<Self, CrawlError> {
        let url = Url::parse(seed).map_err(|source| CrawlError::InvalidUrl {
            url: seed.to_string(),
            source,
        })?;
        let host = network_location(seed).to_string();
        Ok(Self { seed: url, host })
    }
}

// Returns the raw "host" or "host:port" part of a URL string; empty when it
// has no "//" authority
//
// Examples:
//   https://example.com/a        -> "example.com"
//   http://127.0.0.1:8080/       -> "127.0.0.1:8080"
//   https://Example.com:443/     -> "Example.com:443"
//   //cdn.test/app.js            -> "cdn.test"
//   mailto:someone@example.com   -> ""
//   /docs                        -> ""
pub fn network_location(raw: &str) -> &str {
    let raw = raw.trim();
    let rest = match split_scheme(raw) {
        Some((_, rest)) => rest,
        None => raw,
    };
    match rest.strip_prefix("//") {
        Some(authority) => {
            let end = authority.find(['/', '?', '#']).unwrap_or(authority.len());
            &authority[..end]
        }
        None => "",
    }
}

// Splits "scheme:rest" when the text starts with a valid scheme
fn split_scheme(raw: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = raw.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some((scheme, rest))
}

// Network location of `reference` once resolved against a page whose URL is
// `base` and whose own raw location is `base_location`
//
// A reference that names an authority keeps it verbatim. One without an
// authority inherits the page's location when it is relative (or repeats the
// page's http(s) scheme), and has none otherwise (mailto:, tel:, ...).
pub fn reference_location<'a>(reference: &'a str, base: &Url, base_location: &'a str) -> &'a str {
    let reference = reference.trim();
    if reference.starts_with("//") {
        return network_location(reference);
    }
    match split_scheme(reference) {
        Some((_, rest)) if rest.starts_with("//") => network_location(reference),
        Some((scheme, _)) => {
            let web_page = matches!(base.scheme(), "http" | "https");
            if web_page && scheme.eq_ignore_ascii_case(base.scheme()) {
                base_location
            } else {
                ""
            }
        }
        None => base_location,
    }
}

// True when the crawler may recurse into a link whose raw network location
// is `location`
//
// A link without a host counts as internal, the same way a relative reference
// would point back at the page's own host.
pub fn is_internal(location: &str, origin_host: &str) -> bool {
    location.is_empty() || location == origin_host
}
