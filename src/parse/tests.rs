//! Tests for page parsing

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn raw_item(id: &str) -> JsonValue {
    json!({
        "id": id,
        "name": "Nikon FE2",
        "price": 24800,
        "status": "ITEM_STATUS_ON_SALE",
        "thumbnails": ["https://static.mercdn.net/item/detail/orig/photos/1.jpg"]
    })
}

#[test]
fn test_empty_items_mean_end_of_results() {
    // The metadata token is ignored once the item sequence is empty.
    let body = json!({"items": [], "meta": {"nextPageToken": "v1:99"}});
    let page = parse_page(&body).unwrap();

    assert!(page.listings.is_empty());
    assert_eq!(page.next_token, None);
}

#[test]
fn test_maps_records_and_token() {
    let body = json!({
        "items": [raw_item("m12345678901")],
        "meta": {"nextPageToken": "srv:opaque-token"}
    });
    let page = parse_page(&body).unwrap();

    assert_eq!(page.next_token, Some("srv:opaque-token".to_string()));
    assert_eq!(
        page.listings,
        vec![Listing {
            id: "m12345678901".to_string(),
            url: "https://jp.mercari.com/item/m12345678901".to_string(),
            thumbnail: "https://static.mercdn.net/item/detail/orig/photos/1.jpg".to_string(),
            name: "Nikon FE2".to_string(),
            price: 24800,
            status: ItemStatus::OnSale,
            available: true,
        }]
    );
}

#[test]
fn test_blank_token_means_no_next_page() {
    let body = json!({
        "items": [raw_item("m12345678901")],
        "meta": {"nextPageToken": ""}
    });
    let page = parse_page(&body).unwrap();

    assert_eq!(page.listings.len(), 1);
    assert_eq!(page.next_token, None);
}

#[test]
fn test_missing_meta_means_no_next_page() {
    let body = json!({"items": [raw_item("m12345678901")]});
    let page = parse_page(&body).unwrap();

    assert_eq!(page.next_token, None);
}

#[test]
fn test_sold_out_listing_is_unavailable() {
    let mut item = raw_item("m12345678901");
    item["status"] = json!("ITEM_STATUS_SOLD_OUT");
    let body = json!({"items": [item], "meta": {"nextPageToken": ""}});

    let page = parse_page(&body).unwrap();
    assert_eq!(page.listings[0].status, ItemStatus::SoldOut);
    assert!(!page.listings[0].available);
}

#[test]
fn test_unknown_status_is_still_available() {
    let mut item = raw_item("m12345678901");
    item["status"] = json!("ITEM_STATUS_SOMETHING_NEW");
    let body = json!({"items": [item]});

    let page = parse_page(&body).unwrap();
    assert_eq!(page.listings[0].status, ItemStatus::Unspecified);
    assert!(page.listings[0].available);
}

#[test]
fn test_listing_without_thumbnail_is_malformed() {
    let mut item = raw_item("m12345678901");
    item["thumbnails"] = json!([]);
    let body = json!({"items": [item]});

    let err = parse_page(&body).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(!err.is_retryable());
}

#[test]
fn test_missing_items_field_is_malformed() {
    let err = parse_page(&json!({"meta": {"nextPageToken": "x"}})).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_non_object_body_is_malformed() {
    let err = parse_page(&json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test_case("m12345678901", "https://jp.mercari.com/item/m12345678901"; "item id")]
#[test_case(
    "2byGkyYtMKTRZ6AiZWSgv8",
    "https://jp.mercari.com/shops/product/2byGkyYtMKTRZ6AiZWSgv8";
    "shop id"
)]
#[test_case(
    "M12345678901",
    "https://jp.mercari.com/shops/product/M12345678901";
    "uppercase first letter is not an item id"
)]
#[test_case(
    "odd-shape",
    "https://jp.mercari.com/shops/product/odd-shape";
    "unrecognized shape falls back to shop path"
)]
fn test_product_url(id: &str, expected: &str) {
    assert_eq!(product_url(id), expected);
}
