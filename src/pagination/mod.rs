//! # Pagination Windowing
//!
//! Display-only windowing over an already loaded sequence. Nothing here talks to
//! the network: the full collection is fetched once and [`window`] derives the
//! visible slice, the "showing X to Y of Z" range and the page links.
//!
//! ## Page Links
//!
//! Up to five pages are listed in full. Beyond that the sequence collapses with
//! ellipses around the current page:
//!
//! ```text
//! current ≤ 3          1 2 3 4 … N
//! current ≥ N - 2      1 … N-3 N-2 N-1 N
//! otherwise            1 … c-1 c c+1 … N
//! ```

use std::fmt;

/// Rows shown per page by the list controller.
pub const PAGE_SIZE: usize = 10;

/// Pages listed in full before the sequence collapses.
const MAX_VISIBLE_PAGES: usize = 5;

/// One entry of the page navigation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// A selectable page number (1-based).
    Page(usize),
    /// A non-interactive gap marker.
    Ellipsis,
}

impl PageLink {
    pub fn page(&self) -> Option<usize> {
        match self {
            PageLink::Page(n) => Some(*n),
            PageLink::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLink::Page(n) => write!(f, "{n}"),
            PageLink::Ellipsis => f.write_str("..."),
        }
    }
}

/// Number of pages needed for `count` items.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamps a requested page into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Page navigation sequence for `current_page` out of `total_pages`.
///
/// This is the raw sequence; [`PageWindow::links`] hides it entirely when there
/// is only one page.
pub fn page_numbers(current_page: usize, total_pages: usize) -> Vec<PageLink> {
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageLink::Page).collect();
    }

    let mut links = Vec::with_capacity(7);
    if current_page <= 3 {
        links.extend((1..=4).map(PageLink::Page));
        links.push(PageLink::Ellipsis);
        links.push(PageLink::Page(total_pages));
    } else if current_page >= total_pages - 2 {
        links.push(PageLink::Page(1));
        links.push(PageLink::Ellipsis);
        links.extend((total_pages - 3..=total_pages).map(PageLink::Page));
    } else {
        links.push(PageLink::Page(1));
        links.push(PageLink::Ellipsis);
        links.extend((current_page - 1..=current_page + 1).map(PageLink::Page));
        links.push(PageLink::Ellipsis);
        links.push(PageLink::Page(total_pages));
    }
    links
}

/// The visible portion of a sequence plus everything needed to render its
/// navigation controls.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow<'a, T> {
    pub items: &'a [T],
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> PageWindow<'_, T> {
    /// 1-based inclusive `(first, last)` positions of the visible items, or
    /// `None` when nothing is visible.
    pub fn display_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.current_page - 1) * self.page_size + 1;
        let last = (self.current_page * self.page_size).min(self.total_items);
        Some((first, last))
    }

    /// `"Showing X to Y of Z entries"`, or `None` for an empty collection.
    pub fn summary(&self) -> Option<String> {
        self.display_range().map(|(first, last)| {
            format!("Showing {first} to {last} of {} entries", self.total_items)
        })
    }

    /// Navigation links; empty when there is at most one page.
    pub fn links(&self) -> Vec<PageLink> {
        if self.total_pages <= 1 {
            return Vec::new();
        }
        page_numbers(self.current_page, self.total_pages)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Derives the visible page of `items`.
///
/// `current_page` is clamped into `[1, max(total_pages, 1)]` before slicing, so
/// a page left over from a larger collection shows the last page instead of
/// nothing.
pub fn window<T>(items: &[T], page_size: usize, current_page: usize) -> PageWindow<'_, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let current_page = clamp_page(current_page, total_pages);

    let start = ((current_page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    PageWindow {
        items: &items[start..end],
        current_page,
        total_pages,
        total_items,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn numbered(count: usize) -> Vec<usize> {
        (1..=count).collect()
    }

    #[test]
    fn second_page_of_twenty_three() {
        let items = numbered(23);
        let page = window(&items, PAGE_SIZE, 2);

        assert_eq!(page.items, &items[10..20]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(
            page.summary().as_deref(),
            Some("Showing 11 to 20 of 23 entries")
        );
        assert_eq!(
            page.links(),
            vec![PageLink::Page(1), PageLink::Page(2), PageLink::Page(3)]
        );
    }

    #[test]
    fn last_partial_page_range() {
        let items = numbered(23);
        let page = window(&items, PAGE_SIZE, 3);
        assert_eq!(page.items, &[21, 22, 23]);
        assert_eq!(page.display_range(), Some((21, 23)));
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn empty_collection_has_no_range_or_links() {
        let items: Vec<usize> = Vec::new();
        let page = window(&items, PAGE_SIZE, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.display_range(), None);
        assert!(page.links().is_empty());
    }

    #[test]
    fn single_page_renders_no_navigation() {
        let items = numbered(10);
        let page = window(&items, PAGE_SIZE, 1);
        assert_eq!(page.items.len(), 10);
        assert!(page.links().is_empty());
    }

    #[test]
    fn page_past_the_end_is_clamped() {
        let items = numbered(20);
        let page = window(&items, PAGE_SIZE, 3);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items, &items[10..20]);
    }

    #[test]
    fn slices_are_contiguous_and_bounded() {
        for count in 0..=45 {
            let items = numbered(count);
            let pages = total_pages(count, PAGE_SIZE);
            for current in 1..=pages.max(1) {
                let page = window(&items, PAGE_SIZE, current);
                assert!(page.items.len() <= PAGE_SIZE);
                if let Some(first) = page.items.first() {
                    let offset = first - 1;
                    assert_eq!(page.items, &items[offset..offset + page.items.len()]);
                    assert_eq!(offset, (current - 1) * PAGE_SIZE);
                }
            }
        }
    }

    #[rstest]
    #[case::three_pages(1, 3, vec![PageLink::Page(1), PageLink::Page(2), PageLink::Page(3)])]
    #[case::five_pages(5, 5, (1..=5).map(PageLink::Page).collect())]
    #[case::near_start(3, 10, vec![
        PageLink::Page(1), PageLink::Page(2), PageLink::Page(3), PageLink::Page(4),
        PageLink::Ellipsis, PageLink::Page(10),
    ])]
    #[case::near_end(8, 10, vec![
        PageLink::Page(1), PageLink::Ellipsis,
        PageLink::Page(7), PageLink::Page(8), PageLink::Page(9), PageLink::Page(10),
    ])]
    #[case::middle(5, 10, vec![
        PageLink::Page(1), PageLink::Ellipsis,
        PageLink::Page(4), PageLink::Page(5), PageLink::Page(6),
        PageLink::Ellipsis, PageLink::Page(10),
    ])]
    #[case::six_pages_page_four(4, 6, vec![
        PageLink::Page(1), PageLink::Ellipsis,
        PageLink::Page(3), PageLink::Page(4), PageLink::Page(5), PageLink::Page(6),
    ])]
    fn page_number_sequences(
        #[case] current: usize,
        #[case] total: usize,
        #[case] expected: Vec<PageLink>,
    ) {
        assert_eq!(page_numbers(current, total), expected);
    }

    #[test]
    fn long_sequences_start_at_one_and_end_at_total() {
        for total in 6..=30 {
            for current in 1..=total {
                let links = page_numbers(current, total);
                assert_eq!(links, page_numbers(current, total));
                assert_eq!(links.first(), Some(&PageLink::Page(1)));
                assert_eq!(links.last(), Some(&PageLink::Page(total)));
            }
        }
    }

    #[test]
    fn ellipsis_is_not_selectable() {
        assert_eq!(PageLink::Ellipsis.page(), None);
        assert_eq!(PageLink::Page(4).page(), Some(4));
        assert_eq!(PageLink::Ellipsis.to_string(), "...");
    }
}
