use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde_json::Value;

use crate::session_store::StoreError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No response reached the client.
    #[error("network_error: {0}")]
    Network(#[source] reqwest::Error),
    /// The backend answered with a non-2xx status.
    #[error("http_error: status={status}")]
    Http {
        status: StatusCode,
        body: Option<Value>,
    },
    /// A body could not be encoded, or a 2xx body did not match the expected shape.
    #[error("invalid_json_body")]
    Json(#[from] serde_json::Error),
    #[error("session_store_error")]
    SessionStore(#[from] StoreError),
    #[error("invalid_request_path: {path}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },
}

impl Error {
    pub(crate) fn http(status: StatusCode, raw_body: &str) -> Self {
        let body = if raw_body.trim().is_empty() {
            None
        } else {
            Some(
                serde_json::from_str(raw_body)
                    .unwrap_or_else(|_| Value::String(raw_body.to_owned())),
            )
        };
        Self::Http { status, body }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            Error::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    /// Field messages from a `{"errors": {"Field": ["message"]}}` body.
    pub fn validation_errors(&self) -> Option<BTreeMap<String, Vec<String>>> {
        let errors = self.body()?.get("errors")?.as_object()?;
        let mut fields = BTreeMap::new();
        for (field, messages) in errors {
            let messages = match messages {
                Value::Array(items) => items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_owned))
                    .collect(),
                Value::String(message) => vec![message.clone()],
                _ => continue,
            };
            fields.insert(field.clone(), messages);
        }
        Some(fields)
    }

    /// The `message` (or `title`) the backend attached to the error, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self.body()? {
            Value::String(text) => Some(text.as_str()),
            body => body
                .get("message")
                .or_else(|| body.get("title"))
                .and_then(Value::as_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_keeps_json_body() {
        let error = Error::http(
            StatusCode::BAD_REQUEST,
            r#"{"title":"One or more validation errors occurred.","errors":{"Email":["The Email field is required."],"Password":["Too short","Needs a digit"]}}"#,
        );
        assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            error.server_message(),
            Some("One or more validation errors occurred.")
        );

        let fields = error.validation_errors().unwrap();
        assert_eq!(fields["Email"], vec!["The Email field is required."]);
        assert_eq!(fields["Password"].len(), 2);
    }

    #[test]
    fn test_http_error_with_plain_text_and_empty_bodies() {
        let error = Error::http(StatusCode::CONFLICT, "Product is out of stock");
        assert_eq!(error.server_message(), Some("Product is out of stock"));
        assert!(error.validation_errors().is_none());

        let error = Error::http(StatusCode::UNAUTHORIZED, "");
        assert!(error.body().is_none());
        assert!(error.is_unauthorized());
        assert!(!error.is_not_found());
    }
}
