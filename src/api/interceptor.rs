//! Authenticating request interceptor with silent token refresh.
//!
//! Every request issued through the shared API client passes through
//! [`AuthInterceptor::execute`], which attaches the current access token,
//! watches for 401 responses, and resolves them with a single coordinated
//! refresh-and-retry cycle. Refresh traffic itself goes through the
//! non-intercepted [`AuthTransport`].

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use reqwest::header::{self, HeaderValue};
use reqwest::{Client, Request, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::auth::SessionStore;

use super::transport::{AuthTransport, REFRESH_ENDPOINT};

/// Body of the synthesized response returned when authentication cannot be
/// recovered.
const UNAUTHORIZED_BODY: &str = "Authentication failed";

/// A fully buffered HTTP response.
///
/// Responses are buffered so the interceptor can fabricate a 401 that is
/// indistinguishable at the status level from a server-issued one; callers
/// handle both through the same path.
#[derive(Debug)]
pub struct HttpResponse {
    status: StatusCode,
    body: String,
}

impl HttpResponse {
    fn new(status: StatusCode, body: String) -> Self {
        Self { status, body }
    }

    /// Synthesized unauthorized response surfaced on unrecoverable auth
    /// failure.
    fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY.to_string())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).context("Failed to parse response body")
    }
}

/// Decorates outbound requests with bearer authentication and performs
/// mutex-synchronized token refresh on 401 responses.
///
/// At most one refresh network call is in flight process-wide: the first
/// caller through the lock refreshes, every other waiter observes the updated
/// token on the double-check read and simply retries. Auth failures never
/// surface as errors - the caller always gets a response back. Network-level
/// failures on the original request or the retry propagate unchanged.
pub struct AuthInterceptor {
    client: Client,
    store: Arc<SessionStore>,
    transport: AuthTransport,
    refresh_lock: Mutex<()>,
}

impl AuthInterceptor {
    pub fn new(client: Client, store: Arc<SessionStore>, transport: AuthTransport) -> Self {
        Self {
            client,
            store,
            transport,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Execute `request` with bearer authentication and silent refresh.
    ///
    /// The caller's request is never mutated; each attempt sends a
    /// header-augmented clone.
    pub async fn execute(&self, request: Request) -> Result<HttpResponse> {
        // The refresh endpoint must never be intercepted, or a refresh could
        // trigger another refresh.
        if request.url().path().contains(REFRESH_ENDPOINT) {
            let bare = clone_request(&request)?;
            return self.send(bare).await;
        }

        let access_token = self.store.access_token();
        let attempt = self.authorized_clone(&request, access_token.as_deref())?;
        let response = self.send(attempt).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!(path = request.url().path(), "Request unauthorized, entering refresh");
        self.refresh_and_retry(&request, access_token.as_deref())
            .await
    }

    /// Refresh protocol, executed under the process-wide lock.
    ///
    /// `stale_token` is the token the failed attempt was sent with; comparing
    /// it against the store after acquiring the lock detects a refresh that
    /// completed while this caller waited.
    async fn refresh_and_retry(
        &self,
        request: &Request,
        stale_token: Option<&str>,
    ) -> Result<HttpResponse> {
        let _guard = self.refresh_lock.lock().await;

        // Double-check: another caller may have refreshed while we waited on
        // the lock.
        let current_token = self.store.access_token();
        if let Some(token) = current_token.as_deref() {
            if Some(token) != stale_token {
                debug!("Token already refreshed by a concurrent caller, retrying");
                let retry = self.authorized_clone(request, Some(token))?;
                return self.send(retry).await;
            }
        }

        let Some(refresh_token) = self.store.refresh_token() else {
            warn!("No refresh token available, clearing session");
            self.store.clear()?;
            return Ok(HttpResponse::unauthorized());
        };

        match self.transport.refresh(&refresh_token).await {
            Ok(tokens) => {
                self.store
                    .update_tokens(&tokens.access_token, &tokens.refresh_token)?;
                debug!("Token refresh succeeded, retrying original request");
                let retry = self.authorized_clone(request, Some(&tokens.access_token))?;
                self.send(retry).await
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed, clearing session");
                self.store.clear()?;
                Ok(HttpResponse::unauthorized())
            }
        }
    }

    /// Clone `request` and attach `Authorization: Bearer <token>` when a
    /// token is available.
    fn authorized_clone(&self, request: &Request, token: Option<&str>) -> Result<Request> {
        let mut cloned = clone_request(request)?;
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .context("Access token is not a valid header value")?;
            cloned.headers_mut().insert(header::AUTHORIZATION, value);
        }
        Ok(cloned)
    }

    async fn send(&self, request: Request) -> Result<HttpResponse> {
        let url = request.url().clone();
        let response = self
            .client
            .execute(request)
            .await
            .with_context(|| format!("Failed to execute request to {url}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;
        Ok(HttpResponse::new(status, body))
    }
}

fn clone_request(request: &Request) -> Result<Request> {
    request
        .try_clone()
        .ok_or_else(|| anyhow!("Cannot retry a request with a streaming body"))
}
