use serde_json::Value;
use shared::{
    CreateOrderRequest, Order, OrderItemRequest, OrderStatus, PlaceOrderRequest,
    UpdateOrderStatusRequest,
};

use crate::{ApiClient, ApiRequest, Result};

const ORDERS_ENDPOINT: &str = "/Orders";

/// Every order in the store. Admin only.
pub async fn get_all_orders(api: &ApiClient) -> Result<Vec<Order>> {
    api.fetch(ApiRequest::get(ORDERS_ENDPOINT)).await
}

pub async fn get_my_orders(api: &ApiClient) -> Result<Vec<Order>> {
    api.fetch(ApiRequest::get(format!("{ORDERS_ENDPOINT}/my-orders")))
        .await
}

pub async fn get_order(api: &ApiClient, id: i64) -> Result<Order> {
    api.fetch(ApiRequest::get(format!("{ORDERS_ENDPOINT}/{id}")))
        .await
}

pub async fn create_order(api: &ApiClient, request: &CreateOrderRequest) -> Result<Value> {
    api.fetch(ApiRequest::post(format!("{ORDERS_ENDPOINT}/create")).json(request)?)
        .await
}

pub async fn place_order(
    api: &ApiClient,
    user_id: i64,
    items: Vec<OrderItemRequest>,
) -> Result<Order> {
    let request = PlaceOrderRequest { user_id, items };
    api.fetch(ApiRequest::post(format!("{ORDERS_ENDPOINT}/place")).json(&request)?)
        .await
}

pub async fn update_order_status(api: &ApiClient, id: i64, status: OrderStatus) -> Result<Order> {
    let request = UpdateOrderStatusRequest { status };
    api.fetch(ApiRequest::put(format!("{ORDERS_ENDPOINT}/{id}/status")).json(&request)?)
        .await
}

pub async fn cancel_order(api: &ApiClient, id: i64) -> Result<()> {
    api.execute(ApiRequest::delete(format!("{ORDERS_ENDPOINT}/{id}/cancel")))
        .await
}

pub async fn delete_order(api: &ApiClient, id: i64) -> Result<()> {
    api.execute(ApiRequest::delete(format!("{ORDERS_ENDPOINT}/{id}")))
        .await
}

pub async fn get_pending_orders(api: &ApiClient) -> Result<Value> {
    api.fetch(ApiRequest::get(format!("{ORDERS_ENDPOINT}/pending")))
        .await
}
