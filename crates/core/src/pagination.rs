//! Page arithmetic for offset-paginated listings

/// Number of pages needed for `total` items, `per_page` at a time.
///
/// `per_page == 0` is treated as a single page.
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(per_page));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Current position in a listing (1-based page)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page, starting at 1
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl Pagination {
    /// Start at page 1
    pub fn new(per_page: u32) -> Self {
        Self { page: 1, per_page }
    }

    /// Offset of the first item on the current page
    pub fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Page count given the listing total, or 1 before any response
    pub fn page_count(&self, total: Option<u64>) -> u32 {
        total.map_or(1, |total| total_pages(total, self.per_page))
    }

    /// Move to `page` if it lies within `1..=page_count`. Returns whether it moved.
    pub fn go_to(&mut self, page: u32, page_count: u32) -> bool {
        if page >= 1 && page <= page_count {
            self.page = page;
            true
        } else {
            false
        }
    }

    /// Back to the first page
    pub fn reset(&mut self) {
        self.page = 1;
    }
}
