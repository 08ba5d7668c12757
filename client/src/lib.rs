//! Client side of the bookstore REST backend.
//!
//! [`ApiClient`] is the single request-issuing facility. It attaches the
//! session's bearer token to outgoing requests and signs the user out when a
//! protected endpoint answers `401 Unauthorized`. The per-resource wrappers in
//! [`api`] are thin functions on top of it.

pub mod api;
pub mod api_client;
pub mod error;
pub mod session_store;
pub mod user_session;

pub use api_client::{
    ApiClient, ApiRequest, ApiResponse, ClientConfig, DEFAULT_ANONYMOUS_TOLERANT_PREFIXES,
    DEFAULT_LOGIN_ROUTE,
};
pub use error::{Error, Result};
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore, StoreError};
pub use user_session::{SessionEvent, UserSession};

pub use reqwest::StatusCode;
