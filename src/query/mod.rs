//! Collection query pipeline: filter → sort → paginate.
//!
//! Every list endpoint builds a [`Query`] from its validated request and runs
//! it over a snapshot of its collection. The pipeline never touches the
//! store and keeps no state between runs.
//!
//! ```ignore
//! let result = Query::new(Page::new(0, 10)?)
//!     .filter(Filter::eq("status", "published"))
//!     .sort(Sort::desc("publishedAt"))
//!     .run(articles);
//! assert!(result.count() <= 10);
//! ```

pub mod filter;
pub mod page;
pub mod sort;
pub mod value;

use thiserror::Error;

pub use filter::{Filter, Predicate};
pub use page::{Page, Pagination, DEFAULT_LIMIT, DEFAULT_MAX_LIMIT};
pub use sort::{Sort, SortOrder};
pub use value::{parse_date, FieldValue, Record};

/// Invalid query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("limit must be at least 1")]
    ZeroLimit,
    #[error("limit {limit} exceeds the maximum of {max}")]
    LimitTooLarge { limit: usize, max: usize },
}

/// A filter/sort/page request against one collection.
#[derive(Debug, Clone, Default)]
pub struct Query {
    filters: Vec<Filter>,
    sort: Option<Sort>,
    page: Page,
}

impl Query {
    pub fn new(page: Page) -> Self {
        Self {
            filters: Vec::new(),
            sort: None,
            page,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add a filter only when a value was supplied.
    pub fn filter_opt<V>(self, value: Option<V>, make: impl FnOnce(V) -> Filter) -> Self {
        match value {
            Some(v) => self.filter(make(v)),
            None => self,
        }
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Run the pipeline over a collection snapshot.
    pub fn run<R: Record>(&self, records: Vec<R>) -> QueryResult<R> {
        let mut matched = filter::apply(records, &self.filters);
        if let Some(sort) = &self.sort {
            sort::apply(&mut matched, sort);
        }
        let total = matched.len();
        QueryResult {
            items: self.page.slice(matched),
            pagination: self.page.pagination(total),
        }
    }
}

/// One page of results plus its metadata.
#[derive(Debug, Clone)]
pub struct QueryResult<R> {
    pub items: Vec<R>,
    pub pagination: Pagination,
}

impl<R> QueryResult<R> {
    /// Number of records on this page.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Number of records that matched the filters, across all pages.
    pub fn total(&self) -> usize {
        self.pagination.total
    }

    pub fn map<T>(self, f: impl FnMut(R) -> T) -> QueryResult<T> {
        QueryResult {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
