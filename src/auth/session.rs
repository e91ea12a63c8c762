use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// The authenticated context produced by a successful login.
///
/// Tokens are nullable: an absent access token means the session is
/// unauthenticated. A non-null access token is only ever produced by a
/// successful login or a successful refresh; nothing else fabricates tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl AuthSession {
    pub fn new(user: User, access_token: String, refresh_token: String) -> Self {
        Self {
            user,
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
        }
    }

    /// True when an access token is present.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Copy of this session with both tokens replaced and the user kept.
    pub fn with_tokens(&self, access_token: &str, refresh_token: &str) -> Self {
        Self {
            user: self.user.clone(),
            access_token: Some(access_token.to_string()),
            refresh_token: Some(refresh_token.to_string()),
        }
    }
}

/// On-disk envelope around the session. `saved_at` records when the record
/// was last written, for diagnostics only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub session: AuthSession,
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(session: AuthSession) -> Self {
        Self {
            session,
            saved_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> AuthSession {
        AuthSession::new(
            User {
                id: Some(1),
                username: Some("emilys".to_string()),
                ..User::default()
            },
            "A1".to_string(),
            "R1".to_string(),
        )
    }

    #[test]
    fn test_session_round_trips_through_json() {
        let session = sample_session();
        let json = serde_json::to_string(&session).expect("serialize");
        let parsed: AuthSession = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, session);
    }

    #[test]
    fn test_with_tokens_preserves_user() {
        let session = sample_session();
        let updated = session.with_tokens("A2", "R2");
        assert_eq!(updated.user, session.user);
        assert_eq!(updated.access_token.as_deref(), Some("A2"));
        assert_eq!(updated.refresh_token.as_deref(), Some("R2"));
    }

    #[test]
    fn test_is_authenticated() {
        assert!(sample_session().is_authenticated());
        assert!(!AuthSession::default().is_authenticated());

        let blank = AuthSession {
            access_token: Some(String::new()),
            ..AuthSession::default()
        };
        assert!(!blank.is_authenticated());
    }
}
