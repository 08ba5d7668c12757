use shared::{AddToCartRequest, ApplyCouponRequest, Cart, Order, UpdateCartItemRequest};
use tracing::info;

use crate::{ApiClient, ApiRequest, Result};

const CART_ENDPOINT: &str = "/Cart";

pub async fn get_cart(api: &ApiClient) -> Result<Cart> {
    api.fetch(ApiRequest::get(CART_ENDPOINT)).await
}

pub async fn add_to_cart(api: &ApiClient, product_id: i64, quantity: i32) -> Result<Cart> {
    let request = AddToCartRequest {
        product_id,
        quantity,
    };
    api.fetch(ApiRequest::post(format!("{CART_ENDPOINT}/items")).json(&request)?)
        .await
}

pub async fn update_cart_item(api: &ApiClient, item_id: i64, quantity: i32) -> Result<Cart> {
    let request = UpdateCartItemRequest { quantity };
    api.fetch(ApiRequest::put(format!("{CART_ENDPOINT}/items/{item_id}")).json(&request)?)
        .await
}

pub async fn remove_from_cart(api: &ApiClient, item_id: i64) -> Result<Cart> {
    api.fetch(ApiRequest::delete(format!("{CART_ENDPOINT}/items/{item_id}")))
        .await
}

pub async fn clear_cart(api: &ApiClient) -> Result<Cart> {
    api.fetch(ApiRequest::delete(CART_ENDPOINT)).await
}

pub async fn apply_coupon(api: &ApiClient, code: &str) -> Result<()> {
    let request = ApplyCouponRequest {
        code: code.to_owned(),
    };
    api.execute(ApiRequest::post(format!("{CART_ENDPOINT}/apply-coupon")).json(&request)?)
        .await
}

pub async fn remove_coupon(api: &ApiClient) -> Result<()> {
    api.execute(ApiRequest::delete(format!("{CART_ENDPOINT}/remove-coupon")))
        .await
}

/// Turns the current cart into an order.
pub async fn checkout(api: &ApiClient) -> Result<Order> {
    let order: Order = api
        .fetch(ApiRequest::post(format!("{CART_ENDPOINT}/checkout")))
        .await?;
    info!(order_id = order.id, total = %order.total_price, "Api checkout");
    Ok(order)
}
