//! # mercari-search
//!
//! Resilient crawler for the Mercari marketplace search API. Walks a
//! search to completion page by page, surviving rate limiting, timeouts,
//! and transient server failures with exponential backoff.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use mercari_search::{Crawler, DpopSigner, HttpTransport, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> mercari_search::Result<()> {
//!     let signer = DpopSigner::from_ec_pem(&std::fs::read("signing-key.pem")?)?;
//!     let crawler = Crawler::new(signer, HttpTransport::new());
//!
//!     let query = SearchQuery::builder("フィルムカメラ").page_limit(5).build();
//!     let result = crawler.run(&query).await?;
//!     for listing in result.listings {
//!         println!("¥{} {}", listing.price, listing.url);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Crawler (pagination driver)
//!   ├── FetchExecutor ─── TokenSigner     (one proof per request)
//!   │         └────────── SearchTransport (one POST per page)
//!   ├── ExponentialBackoff               (retry pacing, 600s ceiling)
//!   └── parse                            (page JSON → listings + token)
//! ```
//!
//! The continuation token only ever advances after a successful fetch, and
//! the retry delay resets to the base interval after every success; a
//! failed crawl returns nothing rather than a truncated result.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Request signing
pub mod auth;

/// Retry backoff controller
pub mod backoff;

/// Command-line interface
pub mod cli;

/// Process-wide crawler constants
pub mod config;

/// Pagination driver
pub mod crawl;

/// Error types
pub mod error;

/// Single-page fetch execution
pub mod fetch;

/// HTTP transport seam
pub mod http;

/// YAML query files
pub mod loader;

/// Search page parsing
pub mod parse;

/// Search query values
pub mod query;

/// Common types
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use auth::{DpopSigner, StaticSigner, TokenSigner};
pub use backoff::{BackoffStep, ExponentialBackoff};
pub use crawl::{page_token, CrawlResult, Crawler, PageState};
pub use fetch::FetchExecutor;
pub use http::{HttpTransport, SearchTransport};
pub use loader::{load_query, load_query_from_str};
pub use parse::{parse_page, Listing, ParsedPage};
pub use query::{SearchQuery, SearchQueryBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
