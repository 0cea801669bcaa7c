//! Page-number pagination for list endpoints.
//!
//! Clients pass `?page=` and `?page_size=`; responses are wrapped in a
//! [`Page`] envelope carrying the total row count.

use serde::{Deserialize, Serialize};

/// Default page size when the client does not specify one.
const DEFAULT_PAGE_SIZE: i64 = 10;
/// Upper bound a client can request.
const MAX_PAGE_SIZE: i64 = 100;

/// Pagination query parameters.
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageParams {
    /// The 1-based page number, clamped to at least 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// The effective page size, clamped to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// SQL offset for the effective page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

/// A page of results with the total count across all pages.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

impl<T> Page<T> {
    /// Wrap a page of items with its request parameters and total count.
    #[must_use]
    pub fn new(items: Vec<T>, params: &PageParams, total: i64) -> Self {
        Self {
            items,
            page: params.page(),
            page_size: params.limit(),
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_clamping() {
        let params = PageParams {
            page: Some(0),
            page_size: Some(10_000),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), MAX_PAGE_SIZE);

        let params = PageParams {
            page: Some(-5),
            page_size: Some(0),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_offset() {
        let params = PageParams {
            page: Some(3),
            page_size: Some(25),
        };
        assert_eq!(params.offset(), 50);
    }
}
