// src/crawl/frontier.rs
// =============================================================================
// The crawl work queue.
//
// - `stack`: URLs waiting to be fetched. It's a Vec used as a stack, so the
//   most recently discovered page is fetched next (depth-first order).
// - `visited`: every URL ever enqueued, seed included. A URL goes on the
//   stack at most once for the whole run.
//
// Every URL on the stack is also in `visited`; the reverse is not true once
// a page has been popped.
// =============================================================================

use std::collections::HashSet;

/// A URL waiting to be fetched, with its distance from the seed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    pub depth: usize,
}

#[derive(Debug, Default)]
pub struct Frontier {
    stack: Vec<FrontierEntry>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding just the seed URL at depth 0.
    pub fn with_seed(url: String) -> Self {
        let mut frontier = Self::new();
        frontier.enqueue(url, 0);
        frontier
    }

    /// Pushes `url` unless it has been enqueued before.
    ///
    /// Returns true if the URL was new.
    pub fn enqueue(&mut self, url: String, depth: usize) -> bool {
        if self.visited.contains(&url) {
            return false;
        }
        self.visited.insert(url.clone());
        self.stack.push(FrontierEntry { url, depth });
        true
    }

    /// Pops the most recently enqueued URL.
    pub fn dequeue(&mut self) -> Option<FrontierEntry> {
        self.stack.pop()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_visited_and_queued() {
        let frontier = Frontier::with_seed("http://example.com".to_string());
        assert!(frontier.is_visited("http://example.com"));
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.visited_count(), 1);
    }

    #[test]
    fn test_duplicate_enqueue_is_noop() {
        let mut frontier = Frontier::new();
        assert!(frontier.enqueue("http://a".to_string(), 0));
        assert!(!frontier.enqueue("http://a".to_string(), 3));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_dequeue_is_lifo() {
        let mut frontier = Frontier::new();
        frontier.enqueue("http://a".to_string(), 0);
        frontier.enqueue("http://b".to_string(), 1);
        frontier.enqueue("http://c".to_string(), 1);

        let order: Vec<_> = std::iter::from_fn(|| frontier.dequeue())
            .map(|entry| entry.url)
            .collect();
        assert_eq!(order, vec!["http://c", "http://b", "http://a"]);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_each_url_dequeued_at_most_once() {
        let mut frontier = Frontier::new();
        let urls = ["http://a", "http://b", "http://a", "http://c", "http://b", "http://a"];

        let mut seen = Vec::new();
        for (i, url) in urls.iter().enumerate() {
            frontier.enqueue(url.to_string(), 0);
            // Interleave pops with pushes: a popped URL must never come back
            if i % 2 == 1 {
                if let Some(entry) = frontier.dequeue() {
                    seen.push(entry.url);
                }
            }
        }
        while let Some(entry) = frontier.dequeue() {
            seen.push(entry.url);
        }

        let mut unique = seen.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(seen.len(), unique.len());
        assert_eq!(unique, vec!["http://a", "http://b", "http://c"]);
    }

    #[test]
    fn test_depth_is_kept() {
        let mut frontier = Frontier::new();
        frontier.enqueue("http://a".to_string(), 4);
        assert_eq!(
            frontier.dequeue(),
            Some(FrontierEntry { url: "http://a".to_string(), depth: 4 })
        );
    }
}
