//! Fixed-size paging over the sorted rows.
//!
//! The pager only owns the page index. The visible window is derived on
//! every read, so reading twice without a [`Pager::set_page`] in between
//! always yields the same slice.

/// Rows shown per page.
pub const PAGE_SIZE: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    index: i64,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

/// The slice of rows for the current page plus navigation flags.
#[derive(Debug, PartialEq)]
pub struct Window<'a, T> {
    pub items: &'a [T],
    pub index: i64,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl Pager {
    /// A zero page size is bumped to one row.
    pub fn new(page_size: usize) -> Self {
        Self {
            index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn index(&self) -> i64 {
        self.index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Moves to page `index` unconditionally. Out-of-range pages produce an
    /// empty window rather than an error.
    pub fn set_page(&mut self, index: i64) {
        self.index = index;
    }

    pub fn window<'a, T>(&self, rows: &'a [T]) -> Window<'a, T> {
        let size = self.page_size as i128;
        let first = i128::from(self.index) * size;
        let last = first + size;
        let len = rows.len() as i128;

        let items = if first < 0 || first >= len {
            &rows[..0]
        } else {
            // first < len, so both bounds fit in usize
            let end = last.min(len) as usize;
            &rows[first as usize..end]
        };

        Window {
            items,
            index: self.index,
            can_go_previous: self.index > 0,
            can_go_next: last < len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn first_page_of_many() {
        let rows = rows(120);
        let pager = Pager::default();
        let window = pager.window(&rows);
        assert_eq!(window.items.len(), 50);
        assert_eq!(window.items[0], 0);
        assert!(!window.can_go_previous);
        assert!(window.can_go_next);
    }

    #[test]
    fn last_page_is_partial() {
        let rows = rows(120);
        let mut pager = Pager::default();
        pager.set_page(2);
        let window = pager.window(&rows);
        assert_eq!(window.items.len(), 20);
        assert_eq!(window.items[0], 100);
        assert!(window.can_go_previous);
        assert!(!window.can_go_next);
    }

    #[test]
    fn past_the_end_is_empty() {
        let rows = rows(120);
        let mut pager = Pager::default();
        pager.set_page(3);
        let window = pager.window(&rows);
        assert!(window.items.is_empty());
        assert!(window.can_go_previous);
        assert!(!window.can_go_next);
    }

    #[test]
    fn exact_multiple_has_no_next() {
        let rows = rows(100);
        let mut pager = Pager::default();
        pager.set_page(1);
        let window = pager.window(&rows);
        assert_eq!(window.items.len(), 50);
        assert!(!window.can_go_next);
    }

    #[test]
    fn negative_page_is_empty() {
        let rows = rows(120);
        let mut pager = Pager::default();
        pager.set_page(-2);
        let window = pager.window(&rows);
        assert!(window.items.is_empty());
        assert!(!window.can_go_previous);
        assert_eq!(window.index, -2);
    }

    #[test]
    fn reading_twice_is_stable() {
        let rows = rows(75);
        let mut pager = Pager::new(25);
        pager.set_page(1);
        assert_eq!(pager.window(&rows), pager.window(&rows));
    }

    #[test]
    fn empty_rows() {
        let rows: Vec<usize> = Vec::new();
        let window = Pager::default().window(&rows);
        assert!(window.items.is_empty());
        assert!(!window.can_go_next);
    }
}
