//! Slice an ordered sequence into pages.

use serde::Serialize;

/// One page of results plus the totals needed to render "N of M".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page index that was requested
    pub page: usize,
    pub page_size: usize,
    /// Number of matching records across all pages
    pub total: usize,
}

impl<T> Page<T> {
    /// ceil(total / page_size); zero when there is nothing to show.
    pub fn page_count(&self) -> usize {
        page_count(self.total, self.page_size)
    }

    /// Index of the first item on this page, for "from–to of total" labels.
    pub fn first_index(&self) -> usize {
        (self.page * self.page_size).min(self.total)
    }
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Items `[page * page_size, page * page_size + page_size)` clamped to the
/// input. Out-of-range pages are empty, not errors.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let total = items.len();
    let start = page.saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    Page {
        items: items[start..end].to_vec(),
        page,
        page_size,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_last_page() {
        let items: Vec<u32> = (0..12).collect();

        let first = paginate(&items, 0, 5);
        assert_eq!(first.items, vec![0, 1, 2, 3, 4]);
        assert_eq!(first.total, 12);
        assert_eq!(first.page_count(), 3);

        let last = paginate(&items, 2, 5);
        assert_eq!(last.items, vec![10, 11]);
        assert_eq!(last.first_index(), 10);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let items: Vec<u32> = (0..3).collect();
        let page = paginate(&items, 7, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.page_count(), 1);
    }

    #[test]
    fn test_empty_input() {
        let page = paginate::<u32>(&[], 0, 25);
        assert!(page.items.is_empty());
        assert_eq!(page.page_count(), 0);
    }

    #[test]
    fn test_zero_page_size_yields_nothing() {
        let page = paginate(&[1, 2, 3], 0, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.page_count(), 0);
    }
}
