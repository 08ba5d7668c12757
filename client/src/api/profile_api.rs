use serde_json::Value;
use shared::{AddAddressRequest, ChangePasswordRequest, UpdateProfileRequest};

use crate::{ApiClient, ApiRequest, Result};

const PROFILE_ENDPOINT: &str = "/users/profile";

pub async fn get_profile(api: &ApiClient) -> Result<Value> {
    api.fetch(ApiRequest::get(PROFILE_ENDPOINT)).await
}

pub async fn update_profile(api: &ApiClient, request: &UpdateProfileRequest) -> Result<()> {
    api.execute(ApiRequest::put(PROFILE_ENDPOINT).json(request)?)
        .await
}

pub async fn change_password(api: &ApiClient, request: &ChangePasswordRequest) -> Result<()> {
    api.execute(ApiRequest::put(format!("{PROFILE_ENDPOINT}/change-password")).json(request)?)
        .await
}

pub async fn add_address(api: &ApiClient, request: &AddAddressRequest) -> Result<()> {
    api.execute(ApiRequest::post(format!("{PROFILE_ENDPOINT}/addresses")).json(request)?)
        .await
}

pub async fn update_address(api: &ApiClient, id: i64, request: &AddAddressRequest) -> Result<()> {
    api.execute(ApiRequest::put(format!("{PROFILE_ENDPOINT}/addresses/{id}")).json(request)?)
        .await
}

pub async fn delete_address(api: &ApiClient, id: i64) -> Result<()> {
    api.execute(ApiRequest::delete(format!("{PROFILE_ENDPOINT}/addresses/{id}")))
        .await
}

pub async fn set_default_address(api: &ApiClient, id: i64) -> Result<()> {
    api.execute(ApiRequest::put(format!(
        "{PROFILE_ENDPOINT}/addresses/{id}/set-default"
    )))
    .await
}
