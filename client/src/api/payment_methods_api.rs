use shared::{AddPaymentMethodRequest, PaymentMethod, PaymentMethodsResponse};

use crate::{ApiClient, ApiRequest, Result};

const PAYMENT_METHODS_ENDPOINT: &str = "/payment-methods";

pub async fn get_payment_methods(api: &ApiClient) -> Result<Vec<PaymentMethod>> {
    let response: PaymentMethodsResponse = api
        .fetch(ApiRequest::get(PAYMENT_METHODS_ENDPOINT))
        .await?;
    Ok(response.value)
}

pub async fn get_payment_method(api: &ApiClient, id: i64) -> Result<PaymentMethod> {
    api.fetch(ApiRequest::get(format!("{PAYMENT_METHODS_ENDPOINT}/{id}")))
        .await
}

pub async fn add_payment_method(api: &ApiClient, request: &AddPaymentMethodRequest) -> Result<()> {
    api.execute(ApiRequest::post(PAYMENT_METHODS_ENDPOINT).json(request)?)
        .await
}

pub async fn update_payment_method(
    api: &ApiClient,
    id: i64,
    request: &AddPaymentMethodRequest,
) -> Result<()> {
    api.execute(ApiRequest::put(format!("{PAYMENT_METHODS_ENDPOINT}/{id}")).json(request)?)
        .await
}

pub async fn delete_payment_method(api: &ApiClient, id: i64) -> Result<()> {
    api.execute(ApiRequest::delete(format!("{PAYMENT_METHODS_ENDPOINT}/{id}")))
        .await
}

pub async fn set_default_payment_method(api: &ApiClient, id: i64) -> Result<()> {
    api.execute(ApiRequest::put(format!(
        "{PAYMENT_METHODS_ENDPOINT}/{id}/set-default"
    )))
    .await
}
