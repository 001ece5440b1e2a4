//! Single-page fetch execution
//!
//! Builds the signed page request, hands it to the transport, and
//! classifies the outcome: any non-success status is a retryable fetch
//! error for the backoff controller, a success is handed to the parser.

use crate::auth::TokenSigner;
use crate::config;
use crate::error::{Error, Result};
use crate::http::SearchTransport;
use crate::parse::{self, ParsedPage};
use crate::query::SearchQuery;
use crate::types::{Order, SearchStatus, Sort};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;


/// Wire body for one page request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageRequest<'a> {
    user_id: &'a str,
    page_size: u32,
    page_token: &'a str,
    search_session_id: &'a str,
    index_routing: &'a str,
    search_condition: SearchCondition<'a>,
    default_datasets: &'a [&'a str],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchCondition<'a> {
    keyword: &'a str,
    exclude_keyword: &'a str,
    sort: Sort,
    order: Order,
    status: [SearchStatus; 1],
    category_id: &'a [u32],
    price_min: u64,
    price_max: u64,
    item_condition_id: &'a [u32],
}

/// Issues one signed page request per call
///
/// User and session ids are generated once per executor, so one crawl is
/// one session from the server's point of view.
pub struct FetchExecutor<S, T> {
    signer: S,
    transport: T,
    search_url: String,
    user_id: String,
    session_id: String,
}

impl<S: TokenSigner, T: SearchTransport> FetchExecutor<S, T> {
    /// Create an executor for the default search endpoint
    pub fn new(signer: S, transport: T) -> Self {
        Self {
            signer,
            transport,
            search_url: config::SEARCH_URL.to_string(),
            user_id: format!("{}{}", config::BOT_ID_PREFIX, Uuid::new_v4()),
            session_id: format!("{}{}", config::BOT_ID_PREFIX, Uuid::new_v4()),
        }
    }

    /// Point the executor at a different search endpoint
    #[must_use]
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    /// The endpoint this executor posts to
    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Fetch and parse one page
    ///
    /// Non-success statuses and transport failures surface as retryable
    /// errors; a malformed body does not.
    pub async fn fetch_page(&self, query: &SearchQuery, token: &str) -> Result<ParsedPage> {
        let proof = self.signer.sign("POST", &self.search_url, &self.session_id)?;
        let headers = self.headers(proof);
        let body = serde_json::to_value(self.page_request(query, token))?;

        debug!(token, "issuing page request");
        let (status, response) = self.transport.post(&self.search_url, &headers, &body).await?;

        if !(200..300).contains(&status) {
            return Err(Error::HttpStatus {
                status,
                body: response.as_str().unwrap_or_default().to_string(),
            });
        }

        parse::parse_page(&response)
    }

    fn page_request<'a>(&'a self, query: &'a SearchQuery, token: &'a str) -> PageRequest<'a> {
        PageRequest {
            user_id: &self.user_id,
            page_size: query.page_size,
            page_token: token,
            search_session_id: &self.session_id,
            index_routing: config::INDEX_ROUTING,
            search_condition: SearchCondition {
                keyword: &query.keyword,
                exclude_keyword: &query.exclude_keyword,
                sort: query.sort,
                order: query.order,
                status: [query.status],
                category_id: &query.category_ids,
                price_min: query.price_min,
                price_max: query.price_max,
                item_condition_id: &query.condition_ids,
            },
            default_datasets: &config::DEFAULT_DATASETS[..],
        }
    }

    fn headers(&self, proof: String) -> HashMap<String, String> {
        HashMap::from([
            ("DPOP".to_string(), proof),
            ("X-Platform".to_string(), "web".to_string()),
            ("Accept".to_string(), "*/*".to_string()),
            ("Accept-Encoding".to_string(), "deflate, gzip".to_string()),
            (
                "Content-Type".to_string(),
                "application/json; charset=utf-8".to_string(),
            ),
            (
                "User-Agent".to_string(),
                format!("{}/{}", crate::NAME, crate::VERSION),
            ),
        ])
    }
}
