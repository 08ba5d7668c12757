#![allow(dead_code)]

use std::sync::Arc;

use client::{ApiClient, ClientConfig, MemorySessionStore, SessionStore, UserSession};
use shared::UserInfo;
use url::Url;
use wiremock::MockServer;

pub fn reader() -> UserInfo {
    UserInfo {
        id: 7,
        username: Some("reader".to_owned()),
        email: Some("reader@example.com".to_owned()),
        first_name: Some("Ada".to_owned()),
        last_name: Some("Reader".to_owned()),
        phone_number: None,
        role: Some("Customer".to_owned()),
        created_at: "2024-05-01T10:00:00.1234567".to_owned(),
    }
}

pub fn reader_json() -> serde_json::Value {
    serde_json::json!({
        "id": 7,
        "username": "reader",
        "email": "reader@example.com",
        "firstName": "Ada",
        "lastName": "Reader",
        "phoneNumber": null,
        "role": "Customer",
        "createdAt": "2024-05-01T10:00:00.1234567"
    })
}

pub fn signed_in(token: &str) -> UserSession {
    UserSession::new(token, reader())
}

/// Client pointed at `{mock}/api` with an in-memory session.
pub fn client_for(
    server: &MockServer,
    session: UserSession,
) -> anyhow::Result<(ApiClient, Arc<MemorySessionStore>)> {
    let api_base = Url::parse(&format!("{}/api", server.uri()))?;
    client_with_config(ClientConfig::new(api_base), session)
}

pub fn client_with_config(
    config: ClientConfig,
    session: UserSession,
) -> anyhow::Result<(ApiClient, Arc<MemorySessionStore>)> {
    let store = Arc::new(MemorySessionStore::new(session));
    let shared_store: Arc<dyn SessionStore> = store.clone();
    let api = ApiClient::new(config, shared_store)?;
    Ok((api, store))
}

/// An address nothing listens on.
pub fn unreachable_base() -> anyhow::Result<Url> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(Url::parse(&format!("http://127.0.0.1:{port}/api"))?)
}
