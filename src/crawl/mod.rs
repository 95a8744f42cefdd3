// src/crawl/mod.rs
// =============================================================================
// This module handles crawling a single domain.
//
// Features:
// - Depth-first crawling starting from the domain's root page
// - Only follows links on the target domain (or its www. alias)
// - Only queues links whose content type is text/html
// - Optional page, depth and time ceilings
//
// Submodules:
// - normalize: raw href -> absolute URL
// - scope: is this URL on the target domain?
// - frontier: the LIFO work queue plus the set of URLs already queued
// - fetch: page fetches and content-type probes
// - crawler: the loop tying it all together
// =============================================================================

mod config;
mod crawler;
mod fetch;
mod frontier;
mod normalize;
mod scope;

pub use config::CrawlConfig;
pub use crawler::{CrawlReport, Crawler};
pub use normalize::LinkResolution;
pub use scope::ScopeMode;
