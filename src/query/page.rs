//! Pagination stage.

use serde::Serialize;

use super::QueryError;

pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_MAX_LIMIT: usize = 100;

/// An offset/limit window. `limit` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    offset: usize,
    limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Page {
    pub fn new(offset: usize, limit: usize) -> Result<Self, QueryError> {
        Self::bounded(offset, limit, usize::MAX)
    }

    /// Build a page whose limit must lie in `1..=max_limit`.
    pub fn bounded(offset: usize, limit: usize, max_limit: usize) -> Result<Self, QueryError> {
        if limit == 0 {
            return Err(QueryError::ZeroLimit);
        }
        if limit > max_limit {
            return Err(QueryError::LimitTooLarge {
                limit,
                max: max_limit,
            });
        }
        Ok(Self { offset, limit })
    }

    /// A page that covers any collection in one slice.
    pub fn everything() -> Self {
        Self {
            offset: 0,
            limit: usize::MAX,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Take `[offset, offset + limit)` clipped to the input. An offset past
    /// the end yields an empty vector.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.offset).take(self.limit).collect()
    }

    pub fn pagination(&self, total: usize) -> Pagination {
        Pagination {
            limit: self.limit,
            offset: self.offset,
            total,
            total_pages: total_pages(total, self.limit),
            current_page: (self.offset / self.limit).saturating_add(1),
        }
    }
}

/// `ceil(total / limit)`, and 1 for an empty collection.
fn total_pages(total: usize, limit: usize) -> usize {
    if total == 0 {
        1
    } else {
        total.div_ceil(limit)
    }
}

/// Page metadata returned alongside every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
    pub total: usize,
    pub total_pages: usize,
    pub current_page: usize,
}
