//! # Pagination
//!
//! Page slicing for admin listings. Kept out of the registry: the registry
//! answers "which codes", this module answers "which twenty of them".

use serde::{Deserialize, Serialize};

/// Default page size.
pub const DEFAULT_PER_PAGE: usize = 20;

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: usize = 100;

/// Default number of page buttons in a pager window.
pub const DEFAULT_WINDOW: usize = 5;

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number, after clamping.
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    /// Always at least 1, even for an empty listing.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Up to `width` consecutive page numbers around the current page.
    ///
    /// The window slides so it stays inside `1..=total_pages`.
    #[must_use]
    pub fn window(&self, width: usize) -> Vec<usize> {
        let width = width.clamp(1, self.total_pages);
        let half = width / 2;
        let start = self
            .page
            .saturating_sub(half)
            .clamp(1, self.total_pages + 1 - width);
        (start..start + width).collect()
    }

    /// Index of the first item on this page (1-based), 0 if empty.
    #[must_use]
    pub fn first_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    /// Convert every item, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Slice `items` into the requested page.
///
/// `per_page` of 0 means the default and is capped at [`MAX_PER_PAGE`].
/// `page` is clamped into `1..=total_pages`.
pub fn paginate<T>(items: impl IntoIterator<Item = T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = match per_page {
        0 => DEFAULT_PER_PAGE,
        n => n.min(MAX_PER_PAGE),
    };

    let all: Vec<T> = items.into_iter().collect();
    let total_items = all.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let items = all
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_of_one_hundred() {
        let page = paginate(1..=100, 1, 20);
        assert_eq!(page.items, (1..=20).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.first_item(), 1);
    }

    #[test]
    fn last_partial_page() {
        let page = paginate(1..=99, 5, 20);
        assert_eq!(page.items, (81..=99).collect::<Vec<_>>());
        assert_eq!(page.first_item(), 81);
    }

    #[test]
    fn out_of_range_page_clamps() {
        assert_eq!(paginate(1..=30, 0, 20).page, 1);
        assert_eq!(paginate(1..=30, 9, 20).page, 2);
    }

    #[test]
    fn zero_per_page_uses_default_and_large_is_capped() {
        assert_eq!(paginate(1..=300, 1, 0).per_page, DEFAULT_PER_PAGE);
        assert_eq!(paginate(1..=300, 1, 10_000).per_page, MAX_PER_PAGE);
    }

    #[test]
    fn empty_listing_has_one_page() {
        let page = paginate(Vec::<u8>::new(), 3, 20);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.first_item(), 0);
    }

    #[test]
    fn window_slides_within_bounds() {
        assert_eq!(paginate(1..=200, 1, 20).window(5), vec![1, 2, 3, 4, 5]);
        assert_eq!(paginate(1..=200, 6, 20).window(5), vec![4, 5, 6, 7, 8]);
        assert_eq!(paginate(1..=200, 10, 20).window(5), vec![6, 7, 8, 9, 10]);
        assert_eq!(paginate(1..=40, 2, 20).window(5), vec![1, 2]);
    }
}
