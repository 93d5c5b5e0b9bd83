//! Paginated listing

use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;
/// Highest page number; keeps the offset within `i64`
pub const MAX_PAGE: i64 = i64::MAX / MAX_PER_PAGE;

/// Normalized page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub per_page: i64,
}

impl PageWindow {
    /// Clamp raw query values: 1 <= page <= MAX_PAGE, 1 <= per_page <= 100
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Total matching rows across all pages
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, window: PageWindow) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            (total + window.per_page - 1) / window.per_page
        };
        Self {
            data,
            total,
            page: window.page,
            per_page: window.per_page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_clamps() {
        let w = PageWindow::new(None, None);
        assert_eq!((w.page, w.per_page, w.offset()), (1, 20, 0));

        let w = PageWindow::new(Some(0), Some(1000));
        assert_eq!((w.page, w.per_page), (1, 100));

        let w = PageWindow::new(Some(3), Some(10));
        assert_eq!(w.offset(), 20);

        let w = PageWindow::new(Some(i64::MAX), Some(MAX_PER_PAGE));
        assert_eq!(w.page, MAX_PAGE);
        assert!(w.offset() > 0);
    }

    #[test]
    fn test_page_total_pages() {
        let w = PageWindow::new(Some(2), Some(10));
        let page = Page::new(vec![1, 2, 3], 23, w);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);

        let empty: Page<i32> = Page::new(vec![], 0, w);
        assert_eq!(empty.total_pages, 1);
    }
}
