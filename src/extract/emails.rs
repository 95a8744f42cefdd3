// src/extract/emails.rs
// =============================================================================
// Finding email addresses in page text, and remembering which ones we've
// already printed.
//
// Pattern: a local part made of word characters, dots, hyphens and plus
// signs, then '@', then dot-separated host labels where the last label has at
// least two letters.
//
// Two matching strategies:
// - Inline (default): search anywhere in the page text, so
//   "Contact: jane@example.com" yields "jane@example.com"
// - WholeElement: an element only counts if its entire text is an email
//   address. Misses emails embedded in sentences; kept for compatibility.
// =============================================================================

use regex::Regex;
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::LazyLock;

/// Printed once, right before the first email of the run.
pub const HEADER: &str = "Found these email addresses: ";

const LOCAL_PART: &str = r"[_A-Za-z0-9+-]+(?:\.[_A-Za-z0-9+-]+)*";
const HOST_PART: &str = r"[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}";

static INLINE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{}@{}\b", LOCAL_PART, HOST_PART)).expect("hardcoded regex pattern is valid")
});

static WHOLE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{}@{}$", LOCAL_PART, HOST_PART)).expect("hardcoded regex pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailMatch {
    #[default]
    Inline,
    WholeElement,
}

/// All email addresses appearing anywhere in `text`, in order of appearance.
pub fn find_emails(text: &str) -> Vec<String> {
    INLINE_EMAIL
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// True if the whole of `text` is one email address.
pub fn is_email(text: &str) -> bool {
    WHOLE_EMAIL.is_match(text)
}

/// Insertion-ordered set of emails that also prints each new one.
///
/// The writer is stdout in normal runs, `io::sink()` in JSON mode and a
/// `Vec<u8>` in tests.
#[derive(Debug)]
pub struct EmailLog<W> {
    seen: HashSet<String>,
    ordered: Vec<String>,
    out: W,
}

impl<W: Write> EmailLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            seen: HashSet::new(),
            ordered: Vec::new(),
            out,
        }
    }

    /// Records `email`, printing it if it's new. Returns whether it was new.
    pub fn record(&mut self, email: &str) -> io::Result<bool> {
        if self.seen.contains(email) {
            return Ok(false);
        }

        if self.ordered.is_empty() {
            writeln!(self.out, "{}", HEADER)?;
        }
        writeln!(self.out, "{}", email)?;
        self.out.flush()?;

        self.seen.insert(email.to_string());
        self.ordered.push(email.to_string());
        Ok(true)
    }

    /// Emails in the order they were first seen.
    pub fn emails(&self) -> &[String] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[cfg(test)]
    pub fn writer(&self) -> &W {
        &self.out
    }
}
