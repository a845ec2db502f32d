//! Page-selector windowing and "showing X–Y of Z" bounds.
//!
//! Everything here is pure: no I/O, no error cases. Out-of-range inputs are
//! clamped.

use std::fmt;

/// One entry of a page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageItem {
    /// A 1-based page number.
    Page(u32),
    /// Elided range of pages.
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::Ellipsis => f.write_str("…"),
        }
    }
}

/// Ordered page-selector entries.
///
/// Never holds two consecutive ellipses. When there are more pages than the
/// window holds, the first and last page are always present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageWindow(Vec<PageItem>);

impl PageWindow {
    #[must_use]
    pub fn items(&self) -> &[PageItem] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Page numbers only, in order.
    pub fn pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().filter_map(|item| match item {
            PageItem::Page(n) => Some(*n),
            PageItem::Ellipsis => None,
        })
    }
}

impl IntoIterator for PageWindow {
    type Item = PageItem;
    type IntoIter = std::vec::IntoIter<PageItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PageWindow {
    type Item = &'a PageItem;
    type IntoIter = std::slice::Iter<'a, PageItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Compute the page buttons to render around `current_page`.
///
/// `current_page` is clamped to `1..=max(total_pages, 1)` and `window_size`
/// to at least 1. With one page or none the window is empty.
#[must_use]
pub fn compute_window(current_page: u32, total_pages: u32, window_size: u32) -> PageWindow {
    if total_pages <= 1 {
        return PageWindow::default();
    }

    let window_size = window_size.max(1);
    let current = current_page.clamp(1, total_pages);
    let half = window_size / 2;

    let mut start = current.saturating_sub(half).max(1);
    let end = total_pages.min(start.saturating_add(window_size - 1));
    if end - start + 1 < window_size {
        start = end.saturating_sub(window_size - 1).max(1);
    }

    let mut items = Vec::with_capacity(window_size.min(total_pages) as usize + 4);

    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }

    items.extend((start..=end).map(PageItem::Page));

    if end < total_pages {
        if end < total_pages - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total_pages));
    }

    PageWindow(items)
}

/// 1-based inclusive bounds of the items shown on a page. `0..0` when the
/// page is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowingRange {
    pub from: u64,
    pub to: u64,
}

/// Compute the "showing X–Y" bounds for the current page.
#[must_use]
pub fn compute_showing_range(
    current_page: u32,
    per_page: u32,
    total_items: u64,
    items_in_current_page: u64,
) -> ShowingRange {
    if items_in_current_page == 0 {
        return ShowingRange::default();
    }

    let from = u64::from(current_page.max(1) - 1) * u64::from(per_page) + 1;
    let to = from.saturating_add(items_in_current_page - 1).min(total_items);
    ShowingRange { from, to }
}

/// Number of pages needed for `total_items` at `per_page` items each.
#[must_use]
pub fn total_pages(total_items: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    u32::try_from(total_items.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
}

/// Navigation state of a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub window_size: u32,
}

impl Pagination {
    /// Default number of numbered buttons around the current page.
    pub const DEFAULT_WINDOW: u32 = 5;

    #[must_use]
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self { current_page, total_pages, window_size: Self::DEFAULT_WINDOW }
    }

    #[must_use]
    pub const fn with_window(mut self, window_size: u32) -> Self {
        self.window_size = window_size;
        self
    }

    #[must_use]
    pub fn window(&self) -> PageWindow {
        compute_window(self.current_page, self.total_pages, self.window_size)
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1 && self.total_pages > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Previous page number, if there is one.
    #[must_use]
    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.current_page.min(self.total_pages) - 1)
    }

    /// Next page number, if there is one.
    #[must_use]
    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current_page.max(1) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use PageItem::{Ellipsis, Page};

    #[test]
    fn test_window_first_page() {
        let window = compute_window(1, 10, 5);
        assert_eq!(
            window.items(),
            &[Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_window_middle_page() {
        let window = compute_window(6, 10, 3);
        assert_eq!(
            window.items(),
            &[Page(1), Ellipsis, Page(5), Page(6), Page(7), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_window_last_page_pulls_start_back() {
        let window = compute_window(10, 10, 5);
        assert_eq!(
            window.items(),
            &[Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_window_no_ellipsis_next_to_edges() {
        assert_eq!(
            compute_window(3, 10, 3).items(),
            &[Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
        assert_eq!(
            compute_window(8, 10, 3).items(),
            &[Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_window_fits_all_pages() {
        assert_eq!(compute_window(2, 4, 5).items(), &[Page(1), Page(2), Page(3), Page(4)]);
    }

    #[test]
    fn test_window_degenerate() {
        assert!(compute_window(1, 0, 5).is_empty());
        assert!(compute_window(1, 1, 5).is_empty());
        assert!(compute_window(9, 1, 3).is_empty());
    }

    #[test]
    fn test_window_clamps_inputs() {
        assert_eq!(compute_window(0, 10, 5), compute_window(1, 10, 5));
        assert_eq!(compute_window(99, 10, 5), compute_window(10, 10, 5));
        assert_eq!(compute_window(4, 10, 0).items(), &[Page(1), Ellipsis, Page(4), Ellipsis, Page(10)]);
    }

    #[test]
    fn test_window_display() {
        assert_eq!(compute_window(6, 10, 3).to_string(), "1 … 5 6 7 … 10");
    }

    #[test]
    fn test_showing_range() {
        assert_eq!(compute_showing_range(3, 12, 30, 6), ShowingRange { from: 25, to: 30 });
        assert_eq!(compute_showing_range(1, 12, 30, 12), ShowingRange { from: 1, to: 12 });
        assert_eq!(compute_showing_range(2, 12, 30, 0), ShowingRange { from: 0, to: 0 });
    }

    #[test]
    fn test_showing_range_clamped_to_total() {
        assert_eq!(compute_showing_range(2, 10, 15, 10), ShowingRange { from: 11, to: 15 });
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 25), 0);
        assert_eq!(total_pages(25, 25), 1);
        assert_eq!(total_pages(26, 25), 2);
        assert_eq!(total_pages(100, 0), 0);
    }

    #[test]
    fn test_pagination_navigation() {
        let first = Pagination::new(1, 3);
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Some(2));

        let last = Pagination::new(3, 3);
        assert_eq!(last.previous(), Some(2));
        assert_eq!(last.next(), None);

        let single = Pagination::new(1, 1);
        assert!(!single.has_previous());
        assert!(!single.has_next());
        assert!(single.window().is_empty());
    }
}
