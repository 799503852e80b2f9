// src/config.rs
// =============================================================================
// Crawl settings.
//
// CrawlConfig is a plain struct with sensible defaults. The CLI builds one from
// its flags (see cli.rs); library users can start from Default and override
// individual fields with struct update syntax:
//
//   let config = CrawlConfig { max_depth: 2, ..CrawlConfig::default() };
// =============================================================================

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Deepest page level that is fetched. 0 = only the seed page.
    pub max_depth: usize,
    /// Timeout for a single HEAD probe of a link
    pub check_timeout: Duration,
    /// Timeout for fetching a page whose links get extracted
    pub page_timeout: Duration,
    /// Redirects followed before a probe is given up
    pub max_redirects: usize,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Drop extracted references that are not http:// or https://
    pub http_only: bool,
    /// How many links of one page are probed at the same time
    pub check_concurrency: usize,
    /// Probe each distinct URL at most once per crawl
    pub dedupe_checks: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            check_timeout: Duration::from_secs(5),
            page_timeout: Duration::from_secs(10),
            max_redirects: 10,
            user_agent: format!("broken-link-checker/{}", env!("CARGO_PKG_VERSION")),
            http_only: false,
            check_concurrency: 1,
            dedupe_checks: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let config = CrawlConfig::default();
        assert_eq!(config.check_timeout, Duration::from_secs(5));
        assert_eq!(config.page_timeout, Duration::from_secs(10));
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.check_concurrency, 1);
        assert!(!config.dedupe_checks);
    }
}
