// src/crawl/scope.rs
// =============================================================================
// Decides whether a normalized URL belongs to the domain we are scraping.
//
// Two rules are available:
// - Host (default): parse the URL and compare the host exactly against
//   "<domain>" or "www.<domain>"
// - Prefix (legacy): plain string prefix test against the four
//   http/https x bare/www combinations. This also accepts super-strings such
//   as "http://example.com.evil.org/", so it is opt-in only.
// =============================================================================

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeMode {
    #[default]
    Host,
    Prefix,
}

/// Scope check bound to one target domain for the whole run.
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    domain: String,
    mode: ScopeMode,
    prefixes: [String; 4],
}

impl ScopeFilter {
    pub fn new(domain: &str, mode: ScopeMode) -> Self {
        let prefixes = [
            format!("http://www.{}", domain),
            format!("https://www.{}", domain),
            format!("http://{}", domain),
            format!("https://{}", domain),
        ];

        Self {
            domain: domain.to_string(),
            mode,
            prefixes,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns true if `url` may be crawled.
    pub fn contains(&self, url: &str) -> bool {
        match self.mode {
            ScopeMode::Prefix => self.prefixes.iter().any(|prefix| url.starts_with(prefix.as_str())),
            ScopeMode::Host => self.host_matches(url),
        }
    }

    fn host_matches(&self, url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(url) => url,
            Err(_) => return false,
        };

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return false;
        }

        let host = match parsed.host_str() {
            Some(host) => host,
            None => return false,
        };

        // Url::port() is None for the scheme's default port, so
        // "example.com" matches both http://example.com and http://example.com:80
        let authority = match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let authority = authority.as_str();
        authority.eq_ignore_ascii_case(&self.domain)
            || authority
                .strip_prefix("www.")
                .is_some_and(|rest| rest.eq_ignore_ascii_case(&self.domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_scope_variants(domain: &str) -> Vec<String> {
        vec![
            format!("http://{}/x", domain),
            format!("http://www.{}/x", domain),
            format!("https://{}/x", domain),
            format!("https://www.{}/x", domain),
        ]
    }

    #[test]
    fn test_all_four_variants_in_scope_for_both_modes() {
        for mode in [ScopeMode::Host, ScopeMode::Prefix] {
            let scope = ScopeFilter::new("example.com", mode);
            for url in in_scope_variants("example.com") {
                assert!(scope.contains(&url), "{:?} rejected {}", mode, url);
            }
            assert!(!scope.contains("http://notexample.org/x"));
            assert!(!scope.contains("http://other.org/x"));
        }
    }

    #[test]
    fn test_prefix_mode_accepts_super_strings() {
        let scope = ScopeFilter::new("example.com", ScopeMode::Prefix);
        assert!(scope.contains("http://example.com.evil.org/"));
        assert!(scope.contains("http://example.comfake/"));
    }

    #[test]
    fn test_host_mode_rejects_super_strings() {
        let scope = ScopeFilter::new("example.com", ScopeMode::Host);
        assert!(!scope.contains("http://example.com.evil.org/"));
        assert!(!scope.contains("http://example.comfake/"));
        assert!(!scope.contains("http://mail.example.com/"));
    }

    #[test]
    fn test_host_mode_is_case_insensitive_and_ignores_path() {
        let scope = ScopeFilter::new("Example.com", ScopeMode::Host);
        assert!(scope.contains("HTTP://WWW.EXAMPLE.COM/Deep/Path?q=1#frag"));
    }

    #[test]
    fn test_host_mode_with_port() {
        let scope = ScopeFilter::new("127.0.0.1:8080", ScopeMode::Host);
        assert!(scope.contains("http://127.0.0.1:8080/page"));
        assert!(!scope.contains("http://127.0.0.1:9090/page"));
        assert!(!scope.contains("http://127.0.0.1/page"));
    }

    #[test]
    fn test_normalized_relative_link_is_out_of_scope() {
        for mode in [ScopeMode::Host, ScopeMode::Prefix] {
            let scope = ScopeFilter::new("example.com", mode);
            assert!(!scope.contains("http://about"));
        }
    }
}
