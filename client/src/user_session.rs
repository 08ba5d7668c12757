use serde::{Deserialize, Serialize};
use shared::UserInfo;

/// Client-held proof of authentication plus the cached profile snapshot.
///
/// The two fields live and die together: login writes both, logout and a
/// forced sign-out clear both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserSession {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
}

impl UserSession {
    pub fn new(token: impl Into<String>, user: UserInfo) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    pub fn logged(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    pub fn bearer(&self) -> Option<String> {
        self.token
            .as_deref()
            .filter(|token| !token.is_empty())
            .map(|token| format!("Bearer {token}"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn { user: UserInfo },
    SignedOut,
    /// A protected endpoint rejected the session; the host should navigate to `redirect_to`.
    Expired { path: String, redirect_to: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            id: 1,
            username: Some("reader".to_owned()),
            email: Some("reader@example.com".to_owned()),
            first_name: None,
            last_name: None,
            phone_number: None,
            role: Some("Customer".to_owned()),
            created_at: "2024-05-01T10:00:00".to_owned(),
        }
    }

    #[test]
    fn test_logged_requires_non_empty_token() {
        assert!(!UserSession::default().logged());
        assert!(UserSession::new("abc", user()).logged());

        let blank = UserSession {
            token: Some(String::new()),
            user: Some(user()),
        };
        assert!(!blank.logged());
        assert_eq!(blank.bearer(), None);
    }

    #[test]
    fn test_bearer_header_value() {
        let session = UserSession::new("abc.def", user());
        assert_eq!(session.bearer().as_deref(), Some("Bearer abc.def"));
    }
}
