// src/crawl/normalize.rs
// =============================================================================
// Turns raw href values (and the domain typed on the command line) into
// absolute URLs we can hand to reqwest.
//
// The literal normalizer is deliberately simple:
// 1. Strip every leading '/'
// 2. If the string has no "http://" or "https://" in it, prefix "http://"
//
// Nothing else is rewritten: no trailing slash handling, no fragment or query
// stripping, no percent-decoding. That means "/about" becomes "http://about",
// which the scope filter then rejects. Use `--resolve-relative` to resolve
// links against the page URL instead.
// =============================================================================

use url::Url;

/// How hrefs found on a page are turned into absolute URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkResolution {
    /// Literal string normalization, see [`normalize_url`].
    #[default]
    Literal,
    /// RFC 3986 resolution against the URL of the page the link was found on.
    Relative,
}

/// Normalizes a raw string into a scheme-qualified URL. Never fails.
///
/// Examples:
///   "example.com"               -> "http://example.com"
///   "//cdn.example.com/a.js"    -> "http://cdn.example.com/a.js"
///   "https://www.example.com/x" -> "https://www.example.com/x"
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim_start_matches('/');

    // "http://www." and "https://www." are covered by the shorter prefixes
    if trimmed.contains("http://") || trimmed.contains("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// Resolves an href found on `page_url` into an absolute URL.
///
/// Returns None for hrefs that can never point at a crawlable page:
/// fragment-only anchors and non-HTTP schemes (mailto:, tel:, javascript:,
/// data:). Relative resolution also returns None when the join fails or lands
/// on a non-HTTP scheme.
pub fn resolve_link(href: &str, page_url: &str, resolution: LinkResolution) -> Option<String> {
    let href = href.trim();

    if is_skippable(href) {
        return None;
    }

    match resolution {
        LinkResolution::Literal => Some(normalize_url(href)),
        LinkResolution::Relative => {
            let base = Url::parse(page_url).ok()?;
            let joined = base.join(href).ok()?;
            match joined.scheme() {
                "http" | "https" => Some(joined.to_string()),
                _ => None,
            }
        }
    }
}

// Skip anchors and special protocols
fn is_skippable(href: &str) -> bool {
    const SCHEMES: [&str; 4] = ["mailto:", "tel:", "javascript:", "data:"];

    href.is_empty()
        || href.starts_with('#')
        || SCHEMES
            .iter()
            .any(|scheme| {
                href.get(..scheme.len())
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
            })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_domain_gets_http_scheme() {
        assert_eq!(normalize_url("example.com"), "http://example.com");
    }

    #[test]
    fn test_leading_slashes_are_stripped() {
        assert_eq!(normalize_url("/about"), "http://about");
        assert_eq!(normalize_url("///deep/path"), "http://deep/path");
        assert_eq!(normalize_url("//cdn.example.com/a.js"), "http://cdn.example.com/a.js");
    }

    #[test]
    fn test_absolute_urls_are_untouched() {
        for url in [
            "http://example.com/x?y=1#z",
            "https://example.com/",
            "https://www.example.com/contact",
            "http://www.example.com",
        ] {
            assert_eq!(normalize_url(url), url);
        }
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for raw in ["example.com", "/about", "//x.org/y", "https://a.b/c", "", "about.html"] {
            let once = normalize_url(raw);
            assert_eq!(normalize_url(&once), once, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_empty_input_is_best_effort() {
        assert_eq!(normalize_url(""), "http://");
    }

    #[test]
    fn test_literal_resolution_skips_special_schemes() {
        let page = "http://example.com/";
        assert_eq!(resolve_link("mailto:jane@example.com", page, LinkResolution::Literal), None);
        assert_eq!(resolve_link("JavaScript:void(0)", page, LinkResolution::Literal), None);
        assert_eq!(resolve_link("#top", page, LinkResolution::Literal), None);
        assert_eq!(
            resolve_link("/about", page, LinkResolution::Literal),
            Some("http://about".to_string())
        );
    }

    #[test]
    fn test_relative_resolution_joins_page_url() {
        let page = "http://example.com/docs/index.html";
        assert_eq!(
            resolve_link("/about", page, LinkResolution::Relative),
            Some("http://example.com/about".to_string())
        );
        assert_eq!(
            resolve_link("guide.html", page, LinkResolution::Relative),
            Some("http://example.com/docs/guide.html".to_string())
        );
        assert_eq!(resolve_link("ftp://example.com/f", page, LinkResolution::Relative), None);
    }
}
