// src/extract/html.rs
// =============================================================================
// This module pulls what the crawler needs out of one HTML page:
// - the raw href of every <a href="..."> in document order
// - every email address in the page's text
//
// The parsed document (scraper::Html) is dropped before this returns. It's not
// Send, so keeping it out of the crawler's async code means the crawl future
// never has to hold it across an .await.
// =============================================================================

use super::emails::{find_emails, is_email, EmailMatch};
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("hardcoded selector is valid"));

static ALL_ELEMENTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("*").expect("hardcoded selector is valid"));

// Text inside these is never rendered.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

// Elements that break the text flow. Everything else is inline.
const BLOCK_ELEMENTS: [&str; 41] = [
    "address", "article", "aside", "blockquote", "body", "br", "caption", "dd", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "head", "header", "hr", "li", "main", "nav", "ol", "option", "p", "pre", "section",
    "table", "tbody", "td", "tfoot", "th", "thead", "title", "tr",
];

/// Links and emails found on one page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// Raw href values, unnormalized, in document order.
    pub links: Vec<String>,
    /// Email matches in document order. May contain repeats.
    pub emails: Vec<String>,
}

/// Parses `html` and extracts links and emails from it.
pub fn parse_page(html: &str, mode: EmailMatch) -> PageContent {
    let document = Html::parse_document(html);

    let links = document
        .select(&LINK_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect();

    let emails = match mode {
        EmailMatch::Inline => find_emails(&rendered_text(&document)),
        EmailMatch::WholeElement => whole_element_emails(&document),
    };

    PageContent { links, emails }
}

// Text of the whole document, as a browser would lay it out.
fn rendered_text(document: &Html) -> String {
    element_text(document.root_element())
}

// Every element whose whole (whitespace-collapsed) text is an email address.
// Nested elements like <p><a>x@y.com</a></p> both match with the same text;
// the email log dedups them.
fn whole_element_emails(document: &Html) -> Vec<String> {
    document
        .select(&ALL_ELEMENTS)
        .filter(|element| !HIDDEN_ELEMENTS.contains(&element.value().name()))
        .map(element_text)
        .filter(|text| is_email(text))
        .collect()
}

/// Visible text of `element` with whitespace collapsed.
///
/// Text inside inline elements is joined directly, so
/// `jane@<b>example.com</b>` reads "jane@example.com". Block elements and
/// `<br>` start a new word, so neighbouring paragraphs never glue together.
fn element_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    push_text(element, &mut text);
    text.trim_end().to_string()
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(fragment) => {
                for c in fragment.chars() {
                    if c.is_whitespace() {
                        push_separator(out);
                    } else {
                        out.push(c);
                    }
                }
            }
            Node::Element(el) => {
                let name = el.name();
                if HIDDEN_ELEMENTS.contains(&name) {
                    continue;
                }
                let block = BLOCK_ELEMENTS.contains(&name);
                if block {
                    push_separator(out);
                }
                if let Some(child) = ElementRef::wrap(child) {
                    push_text(child, out);
                }
                if block {
                    push_separator(out);
                }
            }
            _ => {}
        }
    }
}

// One space between words, none at the start.
fn push_separator(out: &mut String) {
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
}
