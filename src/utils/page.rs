/// Fixed-size pagination over an already loaded list
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub current_page: usize,
    pub total_pages: usize,
}

impl<'a, T> Page<'a, T> {
    /// Slice `all` into pages of `per_page` and select 1-based page `page`.
    /// Returns `None` when the page does not exist; an empty list has a single empty page.
    pub fn of(all: &'a [T], per_page: usize, page: usize) -> Option<Self> {
        let per_page = per_page.max(1);
        let total_pages = ((all.len() + per_page - 1) / per_page).max(1);

        if page == 0 || page > total_pages {
            return None;
        }

        let start = (page - 1) * per_page;
        let end = (start + per_page).min(all.len());

        Some(Page {
            items: &all[start..end],
            current_page: page,
            total_pages,
        })
    }

    pub fn is_first(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last(&self) -> bool {
        self.current_page == self.total_pages
    }

    /// Offset of the first item on this page within the full list
    pub fn offset(&self, per_page: usize) -> usize {
        (self.current_page - 1) * per_page.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages() {
        let items: Vec<u32> = (1..=25).collect();

        let first = Page::of(&items, 10, 1).unwrap();
        assert_eq!(first.items, &items[..10]);
        assert_eq!(first.total_pages, 3);
        assert!(first.is_first());

        let last = Page::of(&items, 10, 3).unwrap();
        assert_eq!(last.items, &[21, 22, 23, 24, 25]);
        assert!(last.is_last());
        assert_eq!(last.offset(10), 20);

        assert!(Page::of(&items, 10, 4).is_none());
        assert!(Page::of(&items, 10, 0).is_none());
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let items: Vec<u32> = Vec::new();
        let page = Page::of(&items, 10, 1).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }
}
