//! Process-wide crawler constants
//!
//! Endpoint addresses, identifier patterns, and protocol defaults. All of
//! it is immutable and initialized once; nothing here changes at runtime.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

/// Search endpoint
pub const SEARCH_URL: &str = "https://api.mercari.jp/v2/entities:search";

/// Product page root for consumer-marketplace listings
pub const ITEM_URL_ROOT: &str = "https://jp.mercari.com/item/";

/// Product page root for shop listings
pub const SHOP_ITEM_URL_ROOT: &str = "https://jp.mercari.com/shops/product/";

/// Records requested per page; the endpoint serves at most this many
pub const PAGE_SIZE: u32 = 120;

/// Default ceiling on pages fetched per crawl
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Default courtesy pause between pages, also the base retry interval
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// A retry delay that reaches this ceiling aborts the crawl
pub const BACKOFF_CEILING: Duration = Duration::from_secs(600);

/// Datasets the web frontend queries against; sent verbatim
pub const DEFAULT_DATASETS: [&str; 2] = ["DATASET_TYPE_MERCARI", "DATASET_TYPE_BEYOND"];

/// Index routing value hardcoded in the web frontend; sent verbatim
pub const INDEX_ROUTING: &str = "INDEX_ROUTING_UNSPECIFIED";

/// Prefix for the generated user and search-session ids, so the operator
/// can identify this client in their logs
pub const BOT_ID_PREFIX: &str = "MERCARI_BOT_";

/// Consumer-marketplace listing id: one lowercase letter, eleven digits
pub static ITEM_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][0-9]{11}$").expect("valid item id pattern"));

/// Shop listing id: 22 alphanumeric characters
pub static SHOP_ITEM_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{22}$").expect("valid shop item id pattern"));
