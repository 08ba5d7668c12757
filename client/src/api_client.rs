use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::session_store::SessionStore;
use crate::user_session::{SessionEvent, UserSession};

/// Endpoints that serve anonymous and signed-in users alike. A 401 from one
/// of these is handed back to the caller without touching the session.
pub const DEFAULT_ANONYMOUS_TOLERANT_PREFIXES: [&str; 3] = ["/Products", "/Reviews", "/Wishlist"];
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";

const SESSION_EVENTS_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Every request path is appended to this base, e.g. `https://shop.example.com/api`.
    pub api_base: Url,
    pub login_route: String,
    pub anonymous_tolerant_prefixes: Vec<String>,
}

impl ClientConfig {
    pub fn new(api_base: Url) -> Self {
        Self {
            api_base,
            login_route: DEFAULT_LOGIN_ROUTE.to_owned(),
            anonymous_tolerant_prefixes: DEFAULT_ANONYMOUS_TOLERANT_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
        }
    }

    pub fn with_login_route(mut self, login_route: impl Into<String>) -> Self {
        self.login_route = login_route.into();
        self
    }

    pub fn with_anonymous_tolerant_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.anonymous_tolerant_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Case-sensitive prefix match against the request path, query excluded.
    pub fn tolerates_anonymous(&self, path: &str) -> bool {
        self.anonymous_tolerant_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        Self {
            method,
            path,
            body: None,
            query: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Flattens a serializable struct into query parameters. `None` fields are dropped.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self> {
        if let Value::Object(fields) = serde_json::to_value(query)? {
            for (key, value) in fields {
                match value {
                    Value::Null => {}
                    Value::String(text) => self.query.push((key, text)),
                    other => self.query.push((key, other.to_string())),
                }
            }
        }
        Ok(self)
    }

    pub fn query_pair(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

struct Inner {
    http: reqwest::Client,
    config: ClientConfig,
    store: Arc<dyn SessionStore>,
    events: broadcast::Sender<SessionEvent>,
}

/// Shared request-issuing facility for every service wrapper.
///
/// Cloning is cheap; clones share the HTTP connection pool, the session store
/// and the event channel.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .user_agent(concat!("storefront-client/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(Error::Network)?;
        Ok(Self::with_http_client(config, store, http))
    }

    pub fn with_http_client(
        config: ClientConfig,
        store: Arc<dyn SessionStore>,
        http: reqwest::Client,
    ) -> Self {
        let (events, _) = broadcast::channel(SESSION_EVENTS_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                http,
                config,
                store,
                events,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub fn session(&self) -> Result<UserSession> {
        Ok(self.inner.store.load()?)
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.session()?.logged())
    }

    pub fn set_session(&self, session: &UserSession) -> Result<()> {
        self.inner.store.save(session)?;
        if let Some(user) = &session.user {
            info!(user_id = user.id, username = ?user.username, "User signed in");
            self.publish(SessionEvent::SignedIn { user: user.clone() });
        }
        Ok(())
    }

    pub fn clear_session(&self) -> Result<()> {
        self.inner.store.clear()?;
        info!("User signed out");
        self.publish(SessionEvent::SignedOut);
        Ok(())
    }

    /// Sends one request to the backend.
    ///
    /// Attaches the bearer token when the session has one. A 401 from an
    /// endpoint outside the anonymous-tolerant list clears the session and
    /// publishes [`SessionEvent::Expired`] before the error is returned.
    pub async fn issue(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(&request)?;
        let session = self.inner.store.load()?;

        let mut builder = self.inner.http.request(request.method.clone(), url);
        if let Some(bearer) = session.bearer() {
            builder = builder.header(AUTHORIZATION, bearer);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(
            method = %request.method,
            path = %request.path,
            authenticated = session.logged(),
            "Api request"
        );
        let response = builder.send().await.map_err(|error| {
            warn!(method = %request.method, path = %request.path, %error, "Api request failed to reach the backend");
            Error::Network(error)
        })?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(error) if !status.is_success() => {
                debug!(path = %request.path, %status, %error, "Error response body unreadable");
                String::new()
            }
            Err(error) => return Err(Error::Network(error)),
        };
        if status.is_success() {
            debug!(path = %request.path, %status, "Api response");
            return Ok(ApiResponse { status, body });
        }

        debug!(path = %request.path, %status, body = %body, "Api error response");
        if status == StatusCode::UNAUTHORIZED {
            self.on_unauthorized(&request.path)?;
        }
        Err(Error::http(status, &body))
    }

    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.issue(request).await?.json()
    }

    pub async fn execute(&self, request: ApiRequest) -> Result<()> {
        self.issue(request).await.map(|_| ())
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let base = self.inner.config.api_base.as_str().trim_end_matches('/');
        let mut url =
            Url::parse(&format!("{base}{}", request.path)).map_err(|source| Error::InvalidPath {
                path: request.path.clone(),
                source,
            })?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }

    fn on_unauthorized(&self, path: &str) -> Result<()> {
        if self.inner.config.tolerates_anonymous(path) {
            debug!(path, "Unauthorized on anonymous-tolerant endpoint, keeping session");
            return Ok(());
        }

        warn!(path, "Protected endpoint rejected the session, signing out");
        self.inner.store.clear()?;
        self.publish(SessionEvent::Expired {
            path: path.to_owned(),
            redirect_to: self.inner.config.login_route.clone(),
        });
        Ok(())
    }

    fn publish(&self, event: SessionEvent) {
        if self.inner.events.send(event).is_err() {
            debug!("No session listeners subscribed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> ClientConfig {
        ClientConfig::new(Url::parse("http://localhost:5000/api").unwrap())
    }

    #[test]
    fn test_default_anonymous_tolerant_prefixes() {
        let config = config();
        assert!(config.tolerates_anonymous("/Products"));
        assert!(config.tolerates_anonymous("/Products/12/availability"));
        assert!(config.tolerates_anonymous("/Reviews"));
        assert!(config.tolerates_anonymous("/Wishlist/check/3"));

        assert!(!config.tolerates_anonymous("/users/profile"));
        assert!(!config.tolerates_anonymous("/Cart"));
        assert!(!config.tolerates_anonymous("/Orders/my-orders"));
        // prefixes match case-sensitively
        assert!(!config.tolerates_anonymous("/products/12/my-review"));
    }

    #[test]
    fn test_custom_prefixes_replace_defaults() {
        let config = config().with_anonymous_tolerant_prefixes(["/Catalog"]);
        assert!(config.tolerates_anonymous("/Catalog/1"));
        assert!(!config.tolerates_anonymous("/Products"));
    }

    #[test]
    fn test_request_query_drops_nulls() {
        let request = ApiRequest::get("/Products")
            .query(&json!({
                "searchTerm": "dune",
                "genre": null,
                "maxPrice": 20.5,
                "verifiedOnly": true
            }))
            .unwrap();

        assert!(request.query.contains(&("searchTerm".to_owned(), "dune".to_owned())));
        assert!(request.query.contains(&("maxPrice".to_owned(), "20.5".to_owned())));
        assert!(request.query.contains(&("verifiedOnly".to_owned(), "true".to_owned())));
        assert!(!request.query.iter().any(|(key, _)| key == "genre"));
    }

    #[test]
    fn test_request_path_gets_leading_slash() {
        assert_eq!(ApiRequest::get("Cart").path, "/Cart");
        assert_eq!(ApiRequest::delete("/Cart").path, "/Cart");
    }

    #[test]
    fn test_url_appends_path_and_query_to_base() {
        let client = ApiClient::with_http_client(
            ClientConfig::new(Url::parse("http://localhost:5000/api/").unwrap()),
            Arc::new(crate::MemorySessionStore::default()),
            reqwest::Client::new(),
        );
        let url = client
            .url_for(&ApiRequest::get("/Products/7/availability").query_pair("quantity", 2))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/Products/7/availability?quantity=2"
        );
    }
}
