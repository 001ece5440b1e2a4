//! Search query values
//!
//! A [`SearchQuery`] is built once per crawl and never mutated afterwards;
//! the driver threads it through every page request unchanged.

use crate::config;
use crate::types::{Order, SearchStatus, Sort};
use std::time::Duration;

/// Immutable description of one marketplace search
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Keyword to search for
    pub keyword: String,
    /// Keywords to exclude from results
    pub exclude_keyword: String,
    /// Sort key
    pub sort: Sort,
    /// Sort direction
    pub order: Order,
    /// Listing status filter
    pub status: SearchStatus,
    /// Category ids to restrict to (empty = all)
    pub category_ids: Vec<u32>,
    /// Minimum price, 0 = unbounded
    pub price_min: u64,
    /// Maximum price, 0 = unbounded
    pub price_max: u64,
    /// Item condition ids to restrict to (empty = all)
    pub condition_ids: Vec<u32>,
    /// Records per page; the endpoint caps this at 120
    pub page_size: u32,
    /// Stop after this many pages even if more remain
    pub page_limit: u32,
    /// Base courtesy/retry interval
    pub interval: Duration,
}

impl SearchQuery {
    /// Start building a query for `keyword`
    pub fn builder(keyword: impl Into<String>) -> SearchQueryBuilder {
        SearchQueryBuilder::new(keyword.into())
    }
}

/// Builder for [`SearchQuery`]
#[derive(Debug)]
pub struct SearchQueryBuilder {
    query: SearchQuery,
}

impl SearchQueryBuilder {
    fn new(keyword: String) -> Self {
        Self {
            query: SearchQuery {
                keyword,
                exclude_keyword: String::new(),
                sort: Sort::default(),
                order: Order::default(),
                status: SearchStatus::default(),
                category_ids: Vec::new(),
                price_min: 0,
                price_max: 0,
                condition_ids: Vec::new(),
                page_size: config::PAGE_SIZE,
                page_limit: config::DEFAULT_PAGE_LIMIT,
                interval: config::DEFAULT_INTERVAL,
            },
        }
    }

    /// Set keywords to exclude
    #[must_use]
    pub fn exclude_keyword(mut self, keywords: impl Into<String>) -> Self {
        self.query.exclude_keyword = keywords.into();
        self
    }

    /// Set the sort key
    #[must_use]
    pub fn sort(mut self, sort: Sort) -> Self {
        self.query.sort = sort;
        self
    }

    /// Set the sort direction
    #[must_use]
    pub fn order(mut self, order: Order) -> Self {
        self.query.order = order;
        self
    }

    /// Set the listing status filter
    #[must_use]
    pub fn status(mut self, status: SearchStatus) -> Self {
        self.query.status = status;
        self
    }

    /// Restrict to the given category ids
    #[must_use]
    pub fn category_ids(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.query.category_ids = ids.into_iter().collect();
        self
    }

    /// Set the minimum price (0 = unbounded)
    #[must_use]
    pub fn price_min(mut self, price: u64) -> Self {
        self.query.price_min = price;
        self
    }

    /// Set the maximum price (0 = unbounded)
    #[must_use]
    pub fn price_max(mut self, price: u64) -> Self {
        self.query.price_max = price;
        self
    }

    /// Restrict to the given item condition ids
    #[must_use]
    pub fn condition_ids(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.query.condition_ids = ids.into_iter().collect();
        self
    }

    /// Stop after this many pages
    #[must_use]
    pub fn page_limit(mut self, limit: u32) -> Self {
        self.query.page_limit = limit;
        self
    }

    /// Set the base courtesy/retry interval
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.query.interval = interval;
        self
    }

    /// Build the query
    pub fn build(self) -> SearchQuery {
        self.query
    }
}
