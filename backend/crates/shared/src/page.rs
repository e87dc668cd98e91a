//! Skip/limit pagination
//!
//! Callers send a 1-based `page` and a `size`; stores consume `skip()` and
//! `limit()`. Out-of-range input is clamped instead of rejected.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    size: u32,
}

impl Pagination {
    pub fn new(page: Option<u32>, size: Option<u32>, max_size: u32) -> Self {
        let page = page.unwrap_or(1).max(1);
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, max_size.max(1));
        Self { page, size }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of documents to skip
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None, MAX_PAGE_SIZE)
    }
}

/// One page of results plus the unpaginated total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page(),
            size: pagination.size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Pagination::default();
        assert_eq!(p.page(), 1);
        assert_eq!(p.size(), DEFAULT_PAGE_SIZE);
        assert_eq!(p.skip(), 0);
    }

    #[test]
    fn test_skip_and_limit() {
        let p = Pagination::new(Some(3), Some(20), MAX_PAGE_SIZE);
        assert_eq!(p.skip(), 40);
        assert_eq!(p.limit(), 20);
    }

    #[test]
    fn test_clamping() {
        let p = Pagination::new(Some(0), Some(500), MAX_PAGE_SIZE);
        assert_eq!(p.page(), 1);
        assert_eq!(p.size(), MAX_PAGE_SIZE);

        let p = Pagination::new(None, Some(0), MAX_PAGE_SIZE);
        assert_eq!(p.size(), 1);
    }
}
