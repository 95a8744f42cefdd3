// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// There are two kinds of failure:
// - CrawlError: something that ends the whole run (we can't build the HTTP
//   client, or stdout went away)
// - FetchError: a single URL failed. The crawler logs it, counts it and moves
//   on to the next page in the frontier.
//
// Rust concepts:
// - thiserror: derive macro that writes the Display/Error impls for us
// - #[source]: keeps the underlying reqwest error for `{:#}` style reports
// =============================================================================

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors that abort the whole crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Why a single request failed.
///
/// Mirrors the categories a user actually cares about when a page is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Timeout,
    Dns,
    Connect,
    Tls,
    TooManyRedirects,
    Body,
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FailureKind::Timeout => "request timed out",
            FailureKind::Dns => "could not resolve hostname",
            FailureKind::Connect => "connection failed",
            FailureKind::Tls => "TLS error",
            FailureKind::TooManyRedirects => "too many redirects",
            FailureKind::Body => "failed to read response body",
            FailureKind::Other => "request failed",
        };
        f.write_str(text)
    }
}

/// A request for one URL failed. Recoverable: the crawler skips the URL.
#[derive(Debug, Error)]
#[error("{kind} while fetching {url}")]
pub struct FetchError {
    pub url: String,
    pub kind: FailureKind,
    #[source]
    pub source: reqwest::Error,
}

impl FetchError {
    pub fn new(url: &str, source: reqwest::Error) -> Self {
        Self {
            url: url.to_string(),
            kind: categorize(&source),
            source,
        }
    }
}

// Sorts a reqwest error into a FailureKind.
//
// reqwest doesn't expose DNS or TLS failures as separate predicates, so for
// those we look at the rendered error chain.
fn categorize(error: &reqwest::Error) -> FailureKind {
    let chain = error_chain(error).to_lowercase();

    if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_redirect() {
        FailureKind::TooManyRedirects
    } else if error.is_connect() {
        if chain.contains("dns") || chain.contains("resolve") {
            FailureKind::Dns
        } else if chain.contains("certificate") || chain.contains("tls") {
            FailureKind::Tls
        } else {
            FailureKind::Connect
        }
    } else if error.is_body() || error.is_decode() {
        FailureKind::Body
    } else if chain.contains("certificate") || chain.contains("ssl") {
        FailureKind::Tls
    } else {
        FailureKind::Other
    }
}

fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut current = error.source();
    while let Some(cause) = current {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        current = cause.source();
    }
    text
}
