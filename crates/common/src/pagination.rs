//! Pagination envelope shared by every listing operation.

use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Hard upper bound on page size, regardless of entity defaults.
pub const MAX_PAGE_SIZE: u64 = 100;

/// A validated page/limit pair. Pages are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Requested page, starting at 1.
    pub page: u64,
    /// Rows per page.
    pub limit: u64,
}

impl PageRequest {
    /// Build a page request, rejecting malformed input before it can reach
    /// the store. Zero pages, zero limits and limits above [`MAX_PAGE_SIZE`]
    /// are invalid rather than silently clamped.
    pub fn new(page: u64, limit: u64) -> AppResult<Self> {
        if page == 0 {
            return Err(AppError::InvalidFilter("page must be >= 1".to_string()));
        }
        if limit == 0 {
            return Err(AppError::InvalidFilter("limit must be >= 1".to_string()));
        }
        if limit > MAX_PAGE_SIZE {
            return Err(AppError::InvalidFilter(format!(
                "limit must be <= {MAX_PAGE_SIZE}"
            )));
        }
        Ok(Self { page, limit })
    }

    /// Row offset of the first row on this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

/// The uniform wrapped-list result shape produced by every listing
/// operation: rows plus total-count-derived navigation flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Rows on this page. Never longer than the requested limit.
    pub data: Vec<T>,
    /// Total matching rows, before pagination.
    pub count: u64,
    /// The requested page (1-indexed).
    pub current_page: u64,
    /// `ceil(count / limit)`; zero when nothing matched.
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_prev_page: bool,
}

impl<T> Page<T> {
    /// Wrap rows in the envelope. Pure computation: a page past the end is
    /// an empty page with consistent flags, not an error.
    #[must_use]
    pub fn new(data: Vec<T>, count: u64, request: PageRequest) -> Self {
        let total_pages = count.div_ceil(request.limit);

        Self {
            data,
            count,
            current_page: request.page,
            total_pages,
            has_next_page: request.page < total_pages,
            has_prev_page: request.page > 1,
        }
    }

    /// An empty envelope for the given request.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Map the row type, keeping the envelope intact.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            count: self.count,
            current_page: self.current_page,
            total_pages: self.total_pages,
            has_next_page: self.has_next_page,
            has_prev_page: self.has_prev_page,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_page() {
        assert!(matches!(
            PageRequest::new(0, 10),
            Err(AppError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_rejects_zero_limit() {
        assert!(matches!(
            PageRequest::new(1, 0),
            Err(AppError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_limit() {
        assert!(matches!(
            PageRequest::new(1, MAX_PAGE_SIZE + 1),
            Err(AppError::InvalidFilter(_))
        ));
        assert!(PageRequest::new(1, MAX_PAGE_SIZE).is_ok());
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 10).unwrap().offset(), 0);
        assert_eq!(PageRequest::new(3, 10).unwrap().offset(), 20);
        assert_eq!(PageRequest::new(2, 12).unwrap().offset(), 12);
    }

    #[test]
    fn test_envelope_last_partial_page() {
        // count=25, limit=10, page=3: 5 rows, no next, has prev
        let req = PageRequest::new(3, 10).unwrap();
        let page = Page::new(vec![1, 2, 3, 4, 5], 25, req);

        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next_page);
        assert!(page.has_prev_page);
        assert!(page.data.len() <= 10);
    }

    #[test]
    fn test_envelope_middle_page() {
        let req = PageRequest::new(2, 10).unwrap();
        let page = Page::new(vec![0; 10], 25, req);

        assert_eq!(page.total_pages, 3);
        assert!(page.has_next_page);
        assert!(page.has_prev_page);
    }

    #[test]
    fn test_envelope_empty_result() {
        let req = PageRequest::new(1, 10).unwrap();
        let page: Page<u8> = Page::new(vec![], 0, req);

        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next_page);
        assert!(!page.has_prev_page);
    }

    #[test]
    fn test_envelope_page_past_the_end() {
        // Not an error: empty data, flags computed consistently.
        let req = PageRequest::new(5, 10).unwrap();
        let page: Page<u8> = Page::new(vec![], 25, req);

        assert!(page.data.is_empty());
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next_page);
        assert!(page.has_prev_page);
    }

    #[test]
    fn test_envelope_exact_multiple() {
        let req = PageRequest::new(2, 10).unwrap();
        let page = Page::new(vec![0; 10], 20, req);

        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_map_preserves_envelope() {
        let req = PageRequest::new(2, 2).unwrap();
        let page = Page::new(vec![1, 2], 5, req).map(|n| n * 10);

        assert_eq!(page.data, vec![10, 20]);
        assert_eq!(page.count, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next_page);
    }
}
