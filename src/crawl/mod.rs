//! Pagination driver
//!
//! Walks a search to completion page by page: feed the continuation token
//! forward, accumulate listings, pace requests with a courtesy pause, and
//! absorb transient failures through the backoff controller. Execution is
//! strictly sequential; the only suspension points are the courtesy pause
//! after a successful page and the backoff sleep after a failed one.
//!
//! The continuation token advances only after a successful fetch. A failed
//! fetch changes nothing but the retry delay.

use crate::auth::TokenSigner;
use crate::backoff::ExponentialBackoff;
use crate::config;
use crate::error::Result;
use crate::fetch::FetchExecutor;
use crate::http::SearchTransport;
use crate::parse::Listing;
use crate::query::SearchQuery;
use tokio::time::sleep;
use tracing::{info, warn};


/// Synthesize the token addressing `page`
///
/// Only page 0's token is ever synthesized; every later token is an opaque
/// server value echoed back verbatim.
pub fn page_token(page: u32) -> String {
    format!("v1:{page}")
}

/// Mutable crawl position, owned exclusively by the driver
#[derive(Debug, Clone)]
pub struct PageState {
    /// Continuation token for the next fetch
    pub token: String,
    /// Pages fetched so far (retries of a page do not count)
    pub pages: u32,
}

impl PageState {
    /// Position at the start of a crawl
    pub fn new() -> Self {
        Self {
            token: page_token(0),
            pages: 0,
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a finished crawl
///
/// An aborted crawl discards partial progress: either the whole search
/// made it or none of it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    /// False when the crawl gave up after exhausting its retry budget
    pub success: bool,
    /// Accumulated listings, in server order
    pub listings: Vec<Listing>,
}

impl CrawlResult {
    fn completed(listings: Vec<Listing>) -> Self {
        Self {
            success: true,
            listings,
        }
    }

    fn aborted() -> Self {
        Self {
            success: false,
            listings: Vec::new(),
        }
    }
}

/// Drives a search to completion
pub struct Crawler<S, T> {
    executor: FetchExecutor<S, T>,
}

impl<S: TokenSigner, T: SearchTransport> Crawler<S, T> {
    /// Create a crawler for the default search endpoint
    pub fn new(signer: S, transport: T) -> Self {
        Self {
            executor: FetchExecutor::new(signer, transport),
        }
    }

    /// Point the crawler at a different search endpoint
    #[must_use]
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.executor = self.executor.with_search_url(url);
        self
    }

    /// Fetch every page the query matches
    ///
    /// Retryable fetch errors are absorbed here: the crawl sleeps for the
    /// controller's current delay and tries the same page again, with the
    /// delay doubling each time. Once the doubled delay reaches the 600s
    /// ceiling the crawl aborts with `success == false` and no listings.
    /// Malformed responses and signing failures are fatal and propagate as
    /// `Err` without a retry.
    pub async fn run(&self, query: &SearchQuery) -> Result<CrawlResult> {
        let mut backoff = ExponentialBackoff::new(query.interval, config::BACKOFF_CEILING);
        let mut state = PageState::new();
        let mut listings: Vec<Listing> = Vec::new();

        loop {
            state.pages += 1;
            info!(keyword = %query.keyword, page = state.pages, "fetching page");

            // Retry the same page until it succeeds or the budget runs out.
            let page = loop {
                match self.executor.fetch_page(query, &state.token).await {
                    Ok(page) => break page,
                    Err(e) if e.is_retryable() => {
                        let step = backoff.on_failure();
                        warn!(error = %e, delay = ?step.sleep, "fetch failed, backing off");
                        sleep(step.sleep).await;
                        if step.exhausted {
                            warn!(
                                keyword = %query.keyword,
                                pages = state.pages - 1,
                                "retry delay ceiling reached, aborting crawl"
                            );
                            return Ok(CrawlResult::aborted());
                        }
                    }
                    Err(e) => return Err(e),
                }
            };

            backoff.on_success();
            listings.extend(page.listings);

            let Some(token) = page.next_token else {
                info!(pages = state.pages, listings = listings.len(), "crawl complete");
                return Ok(CrawlResult::completed(listings));
            };
            state.token = token;

            if state.pages > query.page_limit {
                info!(
                    pages = state.pages,
                    listings = listings.len(),
                    "page ceiling reached"
                );
                return Ok(CrawlResult::completed(listings));
            }

            // Courtesy pause between pages; independent of retry backoff
            // and always the current base interval.
            sleep(backoff.current()).await;
        }
    }
}
