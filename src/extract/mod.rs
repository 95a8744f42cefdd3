// src/extract/mod.rs
// =============================================================================
// This module turns a fetched HTML page into the two things the crawler
// cares about: outbound links and email addresses.
//
// Submodules:
// - html: parses the page with `scraper` and walks its links and text
// - emails: the email pattern and the deduplicating email log
// =============================================================================

mod emails;
mod html;

pub use emails::{EmailLog, EmailMatch};
pub use html::parse_page;
