/// Splits `items` into consecutive, non-overlapping chunks of at most
/// `page_size` elements, the last chunk taking whatever remains. Ported from
/// `paginator.h`'s `IteratorRange`/`Paginator` template, expressed here as a
/// lazy iterator over slices instead of an eagerly materialized container.
pub fn paginate<T>(items: &[T], page_size: usize) -> impl Iterator<Item = &[T]> {
    items.chunks(page_size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_full_pages_with_a_partial_last_page() {
        let items: Vec<i32> = (0..7).collect();
        let pages: Vec<&[i32]> = paginate(&items, 3).collect();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0], &[0, 1, 2]);
        assert_eq!(pages[1], &[3, 4, 5]);
        assert_eq!(pages[2], &[6]);
    }

    #[test]
    fn exact_multiple_yields_no_partial_page() {
        let items: Vec<i32> = (0..6).collect();
        let pages: Vec<&[i32]> = paginate(&items, 3).collect();
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn empty_slice_yields_no_pages() {
        let items: Vec<i32> = Vec::new();
        assert_eq!(paginate(&items, 3).count(), 0);
    }
}
