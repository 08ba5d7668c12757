use serde_json::Value;
use shared::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserInfo};
use tracing::{info, warn};

use crate::{ApiClient, ApiRequest, Result, UserSession};

/// Creates the account. The backend issues no token here, so the session is
/// left as it was; callers sign in afterwards.
pub async fn register(api: &ApiClient, request: &RegisterRequest) -> Result<RegisterResponse> {
    let response: RegisterResponse = api
        .fetch(ApiRequest::post("/Users/register").json(request)?)
        .await?;
    info!(username = %request.username, user_id = response.user.id, "Api register");
    Ok(response)
}

/// Signs in and, when the backend returns a token, stores token and user exactly as received.
pub async fn login(api: &ApiClient, request: &LoginRequest) -> Result<LoginResponse> {
    let response: LoginResponse = api
        .fetch(ApiRequest::post("/Users/login").json(request)?)
        .await?;
    match response.token.as_deref() {
        Some(token) if !token.is_empty() => {
            api.set_session(&UserSession::new(token, response.user.clone()))?;
        }
        _ => warn!(username = %request.username, "Login response carried no token"),
    }
    Ok(response)
}

/// Tells the backend to end the session, then clears the local session no
/// matter how that call went. The call's own error is still returned.
pub async fn logout(api: &ApiClient) -> Result<()> {
    let result = api.execute(ApiRequest::post("/Users/logout")).await;
    api.clear_session()?;
    if let Err(error) = &result {
        warn!(%error, "Logout call failed, local session cleared anyway");
    }
    result
}

pub fn current_user(api: &ApiClient) -> Result<Option<UserInfo>> {
    Ok(api.session()?.user)
}

pub fn is_authenticated(api: &ApiClient) -> Result<bool> {
    api.is_authenticated()
}

pub async fn get_session(api: &ApiClient) -> Result<Value> {
    api.fetch(ApiRequest::get("/Session")).await
}
