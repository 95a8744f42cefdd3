// src/crawl/config.rs
// =============================================================================
// Settings for one crawl run.
//
// There is no config file: main.rs builds this from the command line. The
// Default value is the unbounded crawl (no page, depth or time ceilings, no
// request timeout) with exact-host scoping and inline email search.
// =============================================================================

use super::normalize::LinkResolution;
use super::scope::ScopeMode;
use crate::extract::EmailMatch;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct CrawlConfig {
    /// Bare domain, e.g. "example.com" (no scheme, no "www.")
    pub domain: String,
    pub scope: ScopeMode,
    pub email_match: EmailMatch,
    pub links: LinkResolution,
    /// Stop after this many page fetches have been attempted
    pub max_pages: Option<usize>,
    /// Don't follow links more than this many hops from the seed (seed = 0)
    pub max_depth: Option<usize>,
    /// Per-request timeout for page fetches and content-type probes
    pub request_timeout: Option<Duration>,
    /// Wall-clock ceiling for the whole crawl
    pub time_limit: Option<Duration>,
}

impl CrawlConfig {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }
}
