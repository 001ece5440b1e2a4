//! Search page parsing
//!
//! Turns one decoded page body into typed listings plus the continuation
//! token. Pure and stateless; the driver owns everything that mutates.

use crate::config;
use crate::error::{Error, Result};
use crate::types::{ItemStatus, JsonValue, OptionStringExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(test)]
mod tests;

/// One marketplace listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    /// Listing identifier
    pub id: String,
    /// Canonical product page URL, derived from the identifier shape
    pub url: String,
    /// First thumbnail URL
    pub thumbnail: String,
    /// Display name
    pub name: String,
    /// Price in yen
    pub price: u64,
    /// Raw listing status as reported by the server
    pub status: ItemStatus,
    /// True unless the listing has sold out
    pub available: bool,
}

/// A parsed page: listings plus the continuation token, when one exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// Listings in server order
    pub listings: Vec<Listing>,
    /// Token for the next page; `None` means the crawl is complete
    pub next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<RawListing>,
    #[serde(default)]
    meta: PageMeta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageMeta {
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawListing {
    id: String,
    name: String,
    price: u64,
    status: ItemStatus,
    #[serde(default)]
    thumbnails: Vec<String>,
}

/// Convert one decoded page body into listings and a continuation token
///
/// An empty item sequence is the normal end-of-results signal: no listings
/// and no next page, whatever the metadata block says.
pub fn parse_page(body: &JsonValue) -> Result<ParsedPage> {
    let response = SearchResponse::deserialize(body)
        .map_err(|e| Error::decode(format!("malformed search response: {e}")))?;

    if response.items.is_empty() {
        return Ok(ParsedPage {
            listings: Vec::new(),
            next_token: None,
        });
    }

    let listings = response
        .items
        .into_iter()
        .map(Listing::from_raw)
        .collect::<Result<Vec<_>>>()?;

    Ok(ParsedPage {
        listings,
        next_token: response.meta.next_page_token.none_if_empty(),
    })
}

/// Canonical product page URL for a listing identifier
///
/// Consumer-marketplace ids route to the item path; shop ids, and any
/// identifier of unrecognized shape, route to the shop product path.
pub fn product_url(id: &str) -> String {
    if config::ITEM_ID.is_match(id) {
        return format!("{}{id}", config::ITEM_URL_ROOT);
    }
    if !config::SHOP_ITEM_ID.is_match(id) {
        debug!(id, "identifier matches no known pattern, assuming shop product");
    }
    format!("{}{id}", config::SHOP_ITEM_URL_ROOT)
}

impl Listing {
    fn from_raw(raw: RawListing) -> Result<Self> {
        let thumbnail = raw
            .thumbnails
            .into_iter()
            .next()
            .ok_or_else(|| Error::decode(format!("listing {} has no thumbnail", raw.id)))?;

        Ok(Self {
            url: product_url(&raw.id),
            available: raw.status.is_available(),
            id: raw.id,
            thumbnail,
            name: raw.name,
            price: raw.price,
            status: raw.status,
        })
    }
}
