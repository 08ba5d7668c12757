use serde_json::Value;
use tracing::debug;

use crate::{ApiClient, ApiRequest, Result};

const WISHLIST_ENDPOINT: &str = "/Wishlist";

pub async fn get_wishlist(api: &ApiClient) -> Result<Value> {
    api.fetch(ApiRequest::get(WISHLIST_ENDPOINT)).await
}

pub async fn add_to_wishlist(api: &ApiClient, product_id: i64) -> Result<()> {
    api.execute(ApiRequest::post(format!(
        "{WISHLIST_ENDPOINT}/items/{product_id}"
    )))
    .await
}

pub async fn remove_from_wishlist(api: &ApiClient, product_id: i64) -> Result<()> {
    api.execute(ApiRequest::delete(format!(
        "{WISHLIST_ENDPOINT}/items/{product_id}"
    )))
    .await
}

/// Membership check used on product pages. Anonymous visitors get `false`
/// instead of an unauthorized error.
pub async fn is_in_wishlist(api: &ApiClient, product_id: i64) -> Result<bool> {
    match api
        .fetch(ApiRequest::get(format!("{WISHLIST_ENDPOINT}/check/{product_id}")))
        .await
    {
        Err(error) if error.is_unauthorized() => {
            debug!(product_id, "Wishlist check unauthorized, treating as not listed");
            Ok(false)
        }
        result => result,
    }
}

pub async fn clear_wishlist(api: &ApiClient) -> Result<()> {
    api.execute(ApiRequest::delete(WISHLIST_ENDPOINT)).await
}

pub async fn move_to_cart(api: &ApiClient) -> Result<()> {
    api.execute(ApiRequest::post(format!("{WISHLIST_ENDPOINT}/move-to-cart")))
        .await
}

pub async fn get_wishlist_count(api: &ApiClient) -> Result<u32> {
    api.fetch(ApiRequest::get(format!("{WISHLIST_ENDPOINT}/count")))
        .await
}
