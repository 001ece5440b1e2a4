//! Common types used throughout the crawler
//!
//! The wire enums mirror the search API's string constants exactly; the
//! serde renames are the on-the-wire values. Aliases give YAML query files
//! and humans something friendlier to type.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Search Parameters
// ============================================================================

/// Sort key for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum Sort {
    #[serde(rename = "SORT_DEFAULT", alias = "default")]
    Default,
    #[default]
    #[serde(rename = "SORT_CREATED_TIME", alias = "created_time")]
    CreatedTime,
    #[serde(rename = "SORT_NUM_LIKES", alias = "num_likes")]
    NumLikes,
    #[serde(rename = "SORT_SCORE", alias = "score")]
    Score,
    #[serde(rename = "SORT_PRICE", alias = "price")]
    Price,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum Order {
    #[default]
    #[serde(rename = "ORDER_DESC", alias = "desc")]
    Desc,
    #[serde(rename = "ORDER_ASC", alias = "asc")]
    Asc,
}

/// Listing status filter applied to a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum SearchStatus {
    #[serde(rename = "STATUS_DEFAULT", alias = "default")]
    Default,
    #[default]
    #[serde(rename = "STATUS_ON_SALE", alias = "on_sale")]
    OnSale,
    #[serde(rename = "STATUS_SOLD_OUT", alias = "sold_out")]
    SoldOut,
    #[serde(rename = "STATUS_TRADING", alias = "trading")]
    Trading,
}

// ============================================================================
// Listing Status
// ============================================================================

/// Raw status reported for a single listing
///
/// Statuses the server may add later deserialize as `Unspecified` instead
/// of failing the whole page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    #[serde(rename = "ITEM_STATUS_ON_SALE")]
    OnSale,
    #[serde(rename = "ITEM_STATUS_TRADING")]
    Trading,
    #[serde(rename = "ITEM_STATUS_SOLD_OUT")]
    SoldOut,
    #[serde(rename = "ITEM_STATUS_STOP")]
    Stop,
    #[serde(rename = "ITEM_STATUS_CANCEL")]
    Cancel,
    #[serde(rename = "ITEM_STATUS_ADMIN_CANCEL")]
    AdminCancel,
    #[serde(other, rename = "ITEM_STATUS_UNSPECIFIED")]
    Unspecified,
}

impl ItemStatus {
    /// A listing counts as still available unless it has sold out
    pub fn is_available(self) -> bool {
        !matches!(self, Self::SoldOut)
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_wire_values() {
        let json = serde_json::to_string(&Sort::CreatedTime).unwrap();
        assert_eq!(json, "\"SORT_CREATED_TIME\"");

        let sort: Sort = serde_json::from_str("\"SORT_PRICE\"").unwrap();
        assert_eq!(sort, Sort::Price);
    }

    #[test]
    fn test_sort_accepts_friendly_alias() {
        let sort: Sort = serde_json::from_str("\"created_time\"").unwrap();
        assert_eq!(sort, Sort::CreatedTime);

        let order: Order = serde_json::from_str("\"asc\"").unwrap();
        assert_eq!(order, Order::Asc);
    }

    #[test]
    fn test_defaults_match_search_defaults() {
        assert_eq!(Sort::default(), Sort::CreatedTime);
        assert_eq!(Order::default(), Order::Desc);
        assert_eq!(SearchStatus::default(), SearchStatus::OnSale);
    }

    #[test]
    fn test_item_status_availability() {
        assert!(ItemStatus::OnSale.is_available());
        assert!(ItemStatus::Trading.is_available());
        assert!(!ItemStatus::SoldOut.is_available());
    }

    #[test]
    fn test_unknown_item_status_falls_back() {
        let status: ItemStatus = serde_json::from_str("\"ITEM_STATUS_SOMETHING_NEW\"").unwrap();
        assert_eq!(status, ItemStatus::Unspecified);
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("tok".to_string()).none_if_empty(),
            Some("tok".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!("tok".to_string().none_if_empty(), Some("tok".to_string()));
        assert_eq!(String::new().none_if_empty(), None);
    }
}
