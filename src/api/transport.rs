//! Non-intercepted transport for the authentication endpoints.
//!
//! Login and refresh calls must never pass through the authenticating
//! interceptor: a refresh that triggered another refresh would recurse
//! forever. `AuthTransport` therefore owns its own bare `reqwest::Client`
//! and is handed to the interceptor as the refresh path.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::AuthSession;
use crate::models::UserDto;

use super::ApiError;

/// Login endpoint path, relative to the base URL
pub(crate) const LOGIN_ENDPOINT: &str = "auth/login";

/// Refresh endpoint path, relative to the base URL
pub(crate) const REFRESH_ENDPOINT: &str = "auth/refresh";

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    expires_in_mins: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenRequest<'a> {
    refresh_token: &'a str,
    expires_in_mins: u32,
}

/// New token pair returned by a successful refresh.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Client for the login and refresh endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct AuthTransport {
    client: reqwest::Client,
    base_url: String,
    token_ttl_mins: u32,
}

impl AuthTransport {
    pub fn new(base_url: &str, token_ttl_mins: u32) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build auth transport client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token_ttl_mins,
        })
    }

    /// Exchange credentials for an authenticated session.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        let url = format!("{}/{}", self.base_url, LOGIN_ENDPOINT);
        let body = LoginRequest {
            username,
            password,
            expires_in_mins: self.token_ttl_mins,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to send login request")?;

        let response = Self::check_response(response).await?;
        let dto: UserDto = response
            .json()
            .await
            .context("Failed to parse login response")?;

        debug!(username, "Login succeeded");
        Ok(AuthSession {
            user: dto.to_user(),
            access_token: dto.access_token,
            refresh_token: dto.refresh_token,
        })
    }

    /// Exchange a refresh token for a new token pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let url = format!("{}/{}", self.base_url, REFRESH_ENDPOINT);
        let body = RefreshTokenRequest {
            refresh_token,
            expires_in_mins: self.token_ttl_mins,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to send refresh request")?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .context("Failed to parse refresh response")
    }

    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_bodies_use_wire_field_names() {
        let login = serde_json::to_value(LoginRequest {
            username: "emilys",
            password: "emilyspass",
            expires_in_mins: 30,
        })
        .expect("serialize login request");
        assert_eq!(login["username"], "emilys");
        assert_eq!(login["expiresInMins"], 30);

        let refresh = serde_json::to_value(RefreshTokenRequest {
            refresh_token: "R1",
            expires_in_mins: 30,
        })
        .expect("serialize refresh request");
        assert_eq!(refresh["refreshToken"], "R1");
    }

    #[test]
    fn test_parse_token_pair() {
        let pair: TokenPair =
            serde_json::from_str(r#"{"accessToken":"A2","refreshToken":"R2"}"#)
                .expect("parse token pair");
        assert_eq!(pair.access_token, "A2");
        assert_eq!(pair.refresh_token, "R2");
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let transport = AuthTransport::new("https://dummyjson.com/", 30).expect("build transport");
        assert_eq!(transport.base_url, "https://dummyjson.com");
    }
}
