// src/crawl/crawler.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. The seed (normalized domain) starts out in the frontier
// 2. Pop the most recent URL and fetch it (status codes ignored)
// 3. For each link on the page: normalize it, and if it's in scope and not
//    seen before, probe its content type. Only HTML pages are queued.
// 4. Print every email on the page that hasn't been printed before
// 5. Repeat until the frontier is empty (or a configured ceiling is hit)
//
// One request is in flight at a time. A page that fails to load is logged and
// skipped; only a failure to write our own output ends the run early.
// =============================================================================

use super::config::CrawlConfig;
use super::fetch::{is_html, Fetcher};
use super::frontier::{Frontier, FrontierEntry};
use super::normalize::{normalize_url, resolve_link};
use super::scope::ScopeFilter;
use crate::error::{CrawlError, FailureKind};
use crate::extract::{parse_page, EmailLog};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::{debug, info, warn};

/// Why the crawl loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    #[default]
    FrontierExhausted,
    PageLimit,
    TimeLimit,
}

/// Counters collected during a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlStats {
    pub pages_attempted: usize,
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub links_probed: usize,
    pub probes_failed: usize,
    pub non_html_skipped: usize,
    pub pages_enqueued: usize,
    pub urls_discovered: usize,
    pub emails_found: usize,
    /// Failed page fetches and content-type checks, by cause
    pub failures: BTreeMap<FailureKind, usize>,
    pub stop_reason: StopReason,
}

/// Everything a finished run produced, for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub domain: String,
    pub emails: Vec<String>,
    pub stats: CrawlStats,
}

/// Owns all crawl state for one run.
///
/// `W` receives the email lines as they are found.
pub struct Crawler<W> {
    config: CrawlConfig,
    fetcher: Fetcher,
    scope: ScopeFilter,
    frontier: Frontier,
    emails: EmailLog<W>,
    stats: CrawlStats,
    // Links on the last allowed page were dropped because of max_pages
    links_dropped_at_limit: bool,
}

impl<W: Write> Crawler<W> {
    pub fn new(config: CrawlConfig, out: W) -> Result<Self, CrawlError> {
        let fetcher = Fetcher::new(config.request_timeout)?;
        let scope = ScopeFilter::new(&config.domain, config.scope);
        let frontier = Frontier::with_seed(normalize_url(&config.domain));

        Ok(Self {
            config,
            fetcher,
            scope,
            frontier,
            emails: EmailLog::new(out),
            stats: CrawlStats::default(),
            links_dropped_at_limit: false,
        })
    }

    /// Runs the crawl to completion, honouring the configured time limit.
    pub async fn crawl(&mut self) -> Result<(), CrawlError> {
        let result = match self.config.time_limit {
            None => self.run().await,
            Some(limit) => {
                let outcome = tokio::time::timeout(limit, self.run()).await;
                match outcome {
                    Ok(result) => result,
                    Err(_) => {
                        warn!(limit_secs = limit.as_secs_f64(), "time limit reached, stopping crawl");
                        self.stats.stop_reason = StopReason::TimeLimit;
                        Ok(())
                    }
                }
            }
        };

        let stats = self.stats();
        info!(
            attempted = stats.pages_attempted,
            fetched = stats.pages_fetched,
            failed = stats.pages_failed,
            emails = stats.emails_found,
            stop_reason = ?stats.stop_reason,
            "crawl finished"
        );

        result
    }

    async fn run(&mut self) -> Result<(), CrawlError> {
        loop {
            if let Some(max_pages) = self.config.max_pages {
                let limited = !self.frontier.is_empty() || self.links_dropped_at_limit;
                if self.stats.pages_attempted >= max_pages && limited {
                    info!(max_pages, remaining = self.frontier.len(), "page limit reached");
                    self.stats.stop_reason = StopReason::PageLimit;
                    return Ok(());
                }
            }

            let Some(entry) = self.frontier.dequeue() else {
                self.stats.stop_reason = StopReason::FrontierExhausted;
                return Ok(());
            };

            self.process_page(entry).await?;
        }
    }

    async fn process_page(&mut self, entry: FrontierEntry) -> Result<(), CrawlError> {
        self.stats.pages_attempted += 1;
        info!(url = %entry.url, depth = entry.depth, "crawling");

        let body = match self.fetcher.fetch_page(&entry.url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %entry.url, kind = %e.kind, error = %e.source, "skipping page");
                self.stats.pages_failed += 1;
                self.count_failure(e.kind);
                return Ok(());
            }
        };
        self.stats.pages_fetched += 1;

        let page = parse_page(&body, self.config.email_match);

        let child_depth = entry.depth + 1;
        let pages_left = self
            .config
            .max_pages
            .map_or(true, |max| self.stats.pages_attempted < max);

        if !pages_left {
            // Nothing found here could ever be fetched, so don't check its type
            debug!(url = %entry.url, "page limit reached, not following links");
            self.links_dropped_at_limit |= !page.links.is_empty();
        } else if self.config.max_depth.map_or(true, |max| child_depth <= max) {
            for href in &page.links {
                self.consider_link(href, &entry.url, child_depth).await;
            }
        } else {
            debug!(url = %entry.url, "depth limit reached, not following links");
        }

        for email in &page.emails {
            self.emails.record(email)?;
        }

        Ok(())
    }

    // Probes an in-scope, unseen link and queues it if it's an HTML page.
    async fn consider_link(&mut self, href: &str, page_url: &str, depth: usize) {
        let Some(url) = resolve_link(href, page_url, self.config.links) else {
            return;
        };

        if !self.scope.contains(&url) || self.frontier.is_visited(&url) {
            return;
        }

        self.stats.links_probed += 1;
        match self.fetcher.probe_content_type(&url).await {
            Ok(content_type) if is_html(content_type.as_deref()) => {
                if self.frontier.enqueue(url, depth) {
                    self.stats.pages_enqueued += 1;
                }
            }
            Ok(content_type) => {
                debug!(%url, content_type = content_type.as_deref().unwrap_or("none"), "not HTML, skipping");
                self.stats.non_html_skipped += 1;
            }
            Err(e) => {
                warn!(%url, kind = %e.kind, "content-type probe failed");
                self.stats.probes_failed += 1;
                self.count_failure(e.kind);
            }
        }
    }

    fn count_failure(&mut self, kind: FailureKind) {
        *self.stats.failures.entry(kind).or_insert(0) += 1;
    }

    pub fn stats(&self) -> CrawlStats {
        CrawlStats {
            urls_discovered: self.frontier.visited_count(),
            emails_found: self.emails.len(),
            ..self.stats.clone()
        }
    }

    pub fn report(&self) -> CrawlReport {
        CrawlReport {
            domain: self.scope.domain().to_string(),
            emails: self.emails.emails().to_vec(),
            stats: self.stats(),
        }
    }
}
