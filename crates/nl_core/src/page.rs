pub const ARTICLES_PER_PAGE: usize = 9;

/// Slice of `items` shown on the 1-based `page`.
///
/// Pages past the end yield an empty slice; page 0 is treated as page 1.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

pub fn total_pages(count: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    count.div_ceil(per_page)
}

/// Pulls `page` back into `1..=total`, or 1 when there are no pages at all.
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, total.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_items_make_three_pages() {
        let items: Vec<usize> = (0..20).collect();
        assert_eq!(total_pages(items.len(), ARTICLES_PER_PAGE), 3);
        assert_eq!(paginate(&items, 1, ARTICLES_PER_PAGE).len(), 9);
        assert_eq!(paginate(&items, 2, ARTICLES_PER_PAGE).len(), 9);
        assert_eq!(paginate(&items, 3, ARTICLES_PER_PAGE), &[18, 19]);
        assert!(paginate(&items, 4, ARTICLES_PER_PAGE).is_empty());
    }

    #[test]
    fn test_empty_collection_has_no_pages() {
        let items: Vec<usize> = Vec::new();
        assert_eq!(total_pages(0, ARTICLES_PER_PAGE), 0);
        assert!(paginate(&items, 1, ARTICLES_PER_PAGE).is_empty());
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(7, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(5, 0), 1);
    }
}
