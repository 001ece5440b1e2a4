//! YAML query files
//!
//! A query file captures everything the `search` subcommand takes as
//! flags, so recurring searches can live in version control:
//!
//! ```yaml
//! keyword: フィルムカメラ
//! exclude_keyword: ジャンク
//! sort: price
//! order: asc
//! price_max: 30000
//! page_limit: 5
//! ```

use crate::config;
use crate::error::{Error, Result};
use crate::query::SearchQuery;
use crate::types::{Order, SearchStatus, Sort};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// On-disk query document
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QueryFile {
    keyword: String,
    #[serde(default)]
    exclude_keyword: String,
    #[serde(default)]
    sort: Sort,
    #[serde(default)]
    order: Order,
    #[serde(default)]
    status: SearchStatus,
    #[serde(default)]
    category_ids: Vec<u32>,
    #[serde(default)]
    price_min: u64,
    #[serde(default)]
    price_max: u64,
    #[serde(default)]
    condition_ids: Vec<u32>,
    #[serde(default = "default_page_limit")]
    page_limit: u32,
    #[serde(default = "default_interval_secs")]
    interval_secs: u64,
}

fn default_page_limit() -> u32 {
    config::DEFAULT_PAGE_LIMIT
}

fn default_interval_secs() -> u64 {
    config::DEFAULT_INTERVAL.as_secs()
}

/// Load a search query from a YAML file
pub fn load_query(path: impl AsRef<Path>) -> Result<SearchQuery> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("cannot read query file {}: {e}", path.display())))?;
    load_query_from_str(&contents)
}

/// Load a search query from YAML text
pub fn load_query_from_str(yaml: &str) -> Result<SearchQuery> {
    let file: QueryFile = serde_yaml::from_str(yaml)?;
    if file.keyword.is_empty() {
        return Err(Error::config("query file needs a non-empty keyword"));
    }

    Ok(SearchQuery::builder(file.keyword)
        .exclude_keyword(file.exclude_keyword)
        .sort(file.sort)
        .order(file.order)
        .status(file.status)
        .category_ids(file.category_ids)
        .price_min(file.price_min)
        .price_max(file.price_max)
        .condition_ids(file.condition_ids)
        .page_limit(file.page_limit)
        .interval(Duration::from_secs(file.interval_secs))
        .build())
}
