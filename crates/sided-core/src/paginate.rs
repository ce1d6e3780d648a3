//! Filtering and pagination for lists shown page by page

use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Page cursor over a list of known length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page_size: usize,
    pub current_page: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 0,
        }
    }

    /// Number of pages; an empty list still has one (empty) page
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size.max(1)).max(1)
    }

    /// Keep `current_page` within `[0, total_pages - 1]`
    pub fn clamp(&mut self, len: usize) {
        self.current_page = self.current_page.min(self.total_pages(len) - 1);
    }

    pub fn next_page(&mut self, len: usize) -> bool {
        let before = self.current_page;
        self.current_page += 1;
        self.clamp(len);
        self.current_page != before
    }

    pub fn prev_page(&mut self) -> bool {
        if self.current_page == 0 {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn goto_page(&mut self, page: usize, len: usize) {
        self.current_page = page;
        self.clamp(len);
    }

    /// Move to the page containing `index`
    pub fn show_index(&mut self, index: usize, len: usize) {
        self.goto_page(index / self.page_size.max(1), len);
    }

    /// Index range of the current page
    pub fn page_range(&self, len: usize) -> Range<usize> {
        let page = self.current_page.min(self.total_pages(len) - 1);
        let start = (page * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        start..end
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    Substring(String),
}

/// Case-insensitive text filter. Queries that are not valid regexes match
/// as plain substrings.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    query: String,
    matcher: Option<Matcher>,
}

impl ListFilter {
    pub fn new(query: &str) -> Self {
        let mut filter = Self::default();
        filter.set_query(query);
        filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_active(&self) -> bool {
        self.matcher.is_some()
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.matcher = if query.is_empty() {
            None
        } else {
            match RegexBuilder::new(query).case_insensitive(true).build() {
                Ok(re) => Some(Matcher::Regex(re)),
                Err(_) => Some(Matcher::Substring(query.to_lowercase())),
            }
        };
    }

    pub fn reset(&mut self) {
        self.set_query("");
    }

    pub fn matches(&self, text: &str) -> bool {
        match &self.matcher {
            None => true,
            Some(Matcher::Regex(re)) => re.is_match(text),
            Some(Matcher::Substring(needle)) => text.to_lowercase().contains(needle),
        }
    }

    /// Indices of the items whose text matches
    pub fn apply<T, F>(&self, items: &[T], text: F) -> Vec<usize>
    where
        F: Fn(&T) -> &str,
    {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches(text(item)))
            .map(|(idx, _)| idx)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        let pager = Pager::new(10);
        assert_eq!(pager.total_pages(0), 1);
        assert_eq!(pager.total_pages(10), 1);
        assert_eq!(pager.total_pages(11), 2);
        assert_eq!(Pager::new(0).page_size, 1);
    }

    #[test]
    fn test_page_clamped() {
        let mut pager = Pager::new(10);
        pager.goto_page(7, 25);
        assert_eq!(pager.current_page, 2);
        assert!(!pager.next_page(25));
        assert_eq!(pager.page_range(25), 20..25);

        // List shrank underneath the pager
        pager.clamp(5);
        assert_eq!(pager.current_page, 0);
        assert_eq!(pager.page_range(5), 0..5);
        assert!(!pager.prev_page());
    }

    #[test]
    fn test_show_index() {
        let mut pager = Pager::new(4);
        pager.show_index(9, 12);
        assert_eq!(pager.current_page, 2);
        assert_eq!(pager.page_range(12), 8..12);
    }

    #[test]
    fn test_filter_and_reset() {
        let items = vec!["interface Gi0/1", "ntp server 10.0.0.1", "Interface Gi0/2"];
        let mut filter = ListFilter::new("^interface");
        let hits = filter.apply(&items, |s| *s);
        assert_eq!(hits, vec![0, 2]);
        assert!(hits.len() <= items.len());

        filter.reset();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&items, |s| *s), vec![0, 1, 2]);
    }

    #[test]
    fn test_invalid_regex_falls_back_to_substring() {
        let items = vec!["ip route 0.0.0.0 (default", "hostname r1"];
        let filter = ListFilter::new("(DEFAULT");
        assert_eq!(filter.apply(&items, |s| *s), vec![0]);
    }
}
