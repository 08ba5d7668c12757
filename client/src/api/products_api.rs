use shared::{
    NewProduct, Product, ProductSearchParams, ProductUpdate, StockChangeRequest,
    StockUpdateRequest,
};
use tracing::debug;

use crate::{ApiClient, ApiRequest, Result};

const PRODUCTS_ENDPOINT: &str = "/Products";

pub async fn get_products(api: &ApiClient, params: &ProductSearchParams) -> Result<Vec<Product>> {
    let products: Vec<Product> = api
        .fetch(ApiRequest::get(PRODUCTS_ENDPOINT).query(params)?)
        .await?;
    debug!(count = products.len(), ?params, "Api list products");
    Ok(products)
}

pub async fn get_product(api: &ApiClient, id: i64) -> Result<Product> {
    api.fetch(ApiRequest::get(format!("{PRODUCTS_ENDPOINT}/{id}")))
        .await
}

/// Whether `quantity` copies can currently be ordered.
pub async fn check_availability(api: &ApiClient, id: i64, quantity: i32) -> Result<bool> {
    api.fetch(
        ApiRequest::get(format!("{PRODUCTS_ENDPOINT}/{id}/availability"))
            .query_pair("quantity", quantity),
    )
    .await
}

pub async fn create_product(api: &ApiClient, product: &NewProduct) -> Result<Product> {
    api.fetch(ApiRequest::post(PRODUCTS_ENDPOINT).json(product)?)
        .await
}

pub async fn update_product(api: &ApiClient, id: i64, update: &ProductUpdate) -> Result<()> {
    api.execute(ApiRequest::put(format!("{PRODUCTS_ENDPOINT}/{id}")).json(update)?)
        .await
}

pub async fn delete_product(api: &ApiClient, id: i64) -> Result<()> {
    api.execute(ApiRequest::delete(format!("{PRODUCTS_ENDPOINT}/{id}")))
        .await
}

pub async fn update_stock(api: &ApiClient, id: i64, quantity: i32) -> Result<()> {
    let request = StockUpdateRequest { quantity };
    api.execute(ApiRequest::put(format!("{PRODUCTS_ENDPOINT}/{id}/stock")).json(&request)?)
        .await
}

pub async fn increase_stock(api: &ApiClient, id: i64, amount: i32) -> Result<()> {
    let request = StockChangeRequest { amount };
    api.execute(
        ApiRequest::post(format!("{PRODUCTS_ENDPOINT}/{id}/stock/increase")).json(&request)?,
    )
    .await
}

pub async fn decrease_stock(api: &ApiClient, id: i64, amount: i32) -> Result<()> {
    let request = StockChangeRequest { amount };
    api.execute(
        ApiRequest::post(format!("{PRODUCTS_ENDPOINT}/{id}/stock/decrease")).json(&request)?,
    )
    .await
}
