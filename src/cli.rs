// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The only required input is the domain to scrape. It's declared as a list of
// positional values rather than a single required one so that "no domain" and
// "too many domains" reach our own usage message instead of clap's error.
//
// Everything else is an optional ceiling or a switch back to the older, more
// permissive matching rules.
// =============================================================================

use crate::crawl::{CrawlConfig, LinkResolution, ScopeMode};
use crate::extract::EmailMatch;
use clap::{ArgAction, Parser};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "email-scraper",
    version = "0.1.0",
    about = "Crawl a domain and print every email address found on its pages",
    long_about = "email-scraper starts at the root page of a domain, follows every link that stays \
                  on that domain (or its www. alias), and prints each email address the first time \
                  it appears."
)]
pub struct Cli {
    /// Domain to scrape, without scheme or www. (e.g. example.com)
    #[arg(value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// Stop after fetching this many pages
    #[arg(long, value_name = "N")]
    pub max_pages: Option<usize>,

    /// Don't follow links more than N hops from the root page
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Per-request timeout in seconds (default: wait forever)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Stop the whole crawl after this many seconds
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<u64>,

    /// Match the domain as a plain URL prefix (also accepts e.g. example.com.evil.org)
    #[arg(long)]
    pub prefix_scope: bool,

    /// Only count elements whose entire text is an email address
    #[arg(long)]
    pub whole_element: bool,

    /// Resolve relative links against the page they appear on
    #[arg(long)]
    pub resolve_relative: bool,

    /// Print a JSON report at the end instead of streaming addresses
    #[arg(long)]
    pub json: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The domain to crawl, if exactly one was given.
    pub fn domain(&self) -> Option<&str> {
        match self.domains.as_slice() {
            [domain] => Some(domain.as_str()),
            _ => None,
        }
    }

    pub fn crawl_config(&self, domain: &str) -> CrawlConfig {
        CrawlConfig {
            scope: if self.prefix_scope {
                ScopeMode::Prefix
            } else {
                ScopeMode::Host
            },
            email_match: if self.whole_element {
                EmailMatch::WholeElement
            } else {
                EmailMatch::Inline
            },
            links: if self.resolve_relative {
                LinkResolution::Relative
            } else {
                LinkResolution::Literal
            },
            max_pages: self.max_pages,
            max_depth: self.max_depth,
            request_timeout: self.timeout.map(Duration::from_secs),
            time_limit: self.time_limit.map(Duration::from_secs),
            ..CrawlConfig::new(domain)
        }
    }

    /// Default log filter when RUST_LOG isn't set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "email_scraper=warn",
            1 => "email_scraper=info",
            _ => "email_scraper=debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("email-scraper").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_single_domain() {
        let cli = parse(&["example.com"]);
        assert_eq!(cli.domain(), Some("example.com"));
    }

    #[test]
    fn test_zero_or_many_domains_parse_but_are_rejected() {
        assert_eq!(parse(&[]).domain(), None);
        assert_eq!(parse(&["a.com", "b.com"]).domain(), None);
    }

    #[test]
    fn test_defaults_are_unbounded() {
        let cli = parse(&["example.com"]);
        let config = cli.crawl_config("example.com");
        assert_eq!(config.scope, ScopeMode::Host);
        assert_eq!(config.email_match, EmailMatch::Inline);
        assert_eq!(config.links, LinkResolution::Literal);
        assert!(config.max_pages.is_none());
        assert!(config.max_depth.is_none());
        assert!(config.request_timeout.is_none());
        assert!(config.time_limit.is_none());
    }

    #[test]
    fn test_flags_map_to_config() {
        let cli = parse(&[
            "example.com",
            "--max-pages",
            "10",
            "--max-depth",
            "2",
            "--timeout",
            "5",
            "--time-limit",
            "60",
            "--prefix-scope",
            "--whole-element",
            "--resolve-relative",
        ]);
        let config = cli.crawl_config("example.com");
        assert_eq!(config.max_pages, Some(10));
        assert_eq!(config.max_depth, Some(2));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.time_limit, Some(Duration::from_secs(60)));
        assert_eq!(config.scope, ScopeMode::Prefix);
        assert_eq!(config.email_match, EmailMatch::WholeElement);
        assert_eq!(config.links, LinkResolution::Relative);
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(parse(&["x.com"]).log_filter(), "email_scraper=warn");
        assert_eq!(parse(&["-v", "x.com"]).log_filter(), "email_scraper=info");
        assert_eq!(parse(&["-vvv", "x.com"]).log_filter(), "email_scraper=debug");
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why Vec<String> for the domain?
//    - A required positional would make clap exit with its own error when the
//      domain is missing
//    - We want the friendly "Please enter a domain!" message and a normal exit
//
// 2. What is ArgAction::Count?
//    - Counts how many times a flag appears: -v = 1, -vv = 2
// -----------------------------------------------------------------------------
