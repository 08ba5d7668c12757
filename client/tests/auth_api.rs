mod common;

use client::api::{auth_api, cart_api};
use client::{ClientConfig, SessionEvent, SessionStore, UserSession};
use common::{client_for, client_with_config, reader, reader_json, signed_in, unreachable_base};
use secrecy::SecretString;
use serde_json::json;
use shared::{LoginRequest, RegisterRequest};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> LoginRequest {
    LoginRequest {
        username: "reader".to_owned(),
        password: SecretString::from("correct horse".to_owned()),
    }
}

#[tokio::test]
async fn test_login_persists_token_and_user_as_given() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Users/login"))
        .and(body_json(json!({ "username": "reader", "password": "correct horse" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "token": "eyJhbGciOi.payload.sig",
            "user": reader_json()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, store) = client_for(&server, UserSession::default())?;
    let mut events = api.subscribe();

    let response = auth_api::login(&api, &credentials()).await?;

    assert_eq!(response.token.as_deref(), Some("eyJhbGciOi.payload.sig"));
    let session = store.load()?;
    assert_eq!(session.token.as_deref(), Some("eyJhbGciOi.payload.sig"));
    assert_eq!(session.user, Some(reader()));
    assert!(auth_api::is_authenticated(&api)?);
    assert_eq!(auth_api::current_user(&api)?, Some(reader()));
    assert_eq!(events.try_recv()?, SessionEvent::SignedIn { user: reader() });
    Ok(())
}

#[tokio::test]
async fn test_requests_after_login_carry_the_token() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": null,
            "token": "fresh-token",
            "user": reader_json()
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/Cart"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "userId": 7,
            "items": [],
            "appliedCouponCode": null,
            "subtotal": 0,
            "discountAmount": 0,
            "totalPrice": 0,
            "totalItems": 0,
            "lastUpdated": "2024-05-01T10:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = client_for(&server, UserSession::default())?;
    auth_api::login(&api, &credentials()).await?;
    let cart = cart_api::get_cart(&api).await?;

    assert_eq!(cart.user_id, 7);
    assert!(cart.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_login_without_token_leaves_session_empty() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Account locked",
            "token": null,
            "user": reader_json()
        })))
        .mount(&server)
        .await;

    let (api, store) = client_for(&server, UserSession::default())?;
    let response = auth_api::login(&api, &credentials()).await?;

    assert_eq!(response.message.as_deref(), Some("Account locked"));
    assert_eq!(store.load()?, UserSession::default());
    Ok(())
}

#[tokio::test]
async fn test_failed_login_is_returned_to_the_caller() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Users/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let (api, store) = client_for(&server, UserSession::default())?;
    let error = auth_api::login(&api, &credentials()).await.unwrap_err();

    assert!(error.is_unauthorized());
    assert_eq!(error.server_message(), Some("Invalid credentials"));
    assert_eq!(store.load()?, UserSession::default());
    Ok(())
}

#[tokio::test]
async fn test_failed_login_ends_an_existing_session() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Users/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (api, store) = client_for(&server, signed_in("old"))?;
    let mut events = api.subscribe();

    let error = auth_api::login(&api, &credentials()).await.unwrap_err();

    assert!(error.is_unauthorized());
    assert_eq!(store.load()?, UserSession::default());
    assert_eq!(
        events.try_recv()?,
        SessionEvent::Expired {
            path: "/Users/login".to_owned(),
            redirect_to: "/login".to_owned(),
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_logout_clears_session_on_success() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Users/logout"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (api, store) = client_for(&server, signed_in("token"))?;
    let mut events = api.subscribe();

    auth_api::logout(&api).await?;

    assert_eq!(store.load()?, UserSession::default());
    assert_eq!(events.try_recv()?, SessionEvent::SignedOut);
    Ok(())
}

#[tokio::test]
async fn test_logout_clears_session_when_backend_fails() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Users/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (api, store) = client_for(&server, signed_in("token"))?;
    let error = auth_api::logout(&api).await.unwrap_err();

    assert_eq!(error.status().map(|status| status.as_u16()), Some(500));
    assert!(store.load()?.token.is_none());
    assert!(store.load()?.user.is_none());
    Ok(())
}

#[tokio::test]
async fn test_logout_clears_session_when_backend_is_unreachable() -> anyhow::Result<()> {
    let (api, store) =
        client_with_config(ClientConfig::new(unreachable_base()?), signed_in("token"))?;

    let error = auth_api::logout(&api).await.unwrap_err();

    assert!(error.is_network());
    assert_eq!(store.load()?, UserSession::default());
    Ok(())
}

#[tokio::test]
async fn test_register_does_not_sign_in() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Users/register"))
        .and(body_json(json!({
            "username": "reader",
            "password": "s3cret!",
            "email": "reader@example.com",
            "firstName": "Ada",
            "lastName": null,
            "phoneNumber": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "User registered successfully",
            "user": reader_json()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, store) = client_for(&server, UserSession::default())?;
    let request = RegisterRequest {
        username: "reader".to_owned(),
        password: SecretString::from("s3cret!".to_owned()),
        email: "reader@example.com".to_owned(),
        first_name: Some("Ada".to_owned()),
        last_name: None,
        phone_number: None,
    };

    let response = auth_api::register(&api, &request).await?;

    assert_eq!(response.user, reader());
    assert!(!store.load()?.logged());
    Ok(())
}
