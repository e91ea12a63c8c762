//! API client for the Plater recipe backend.
//!
//! This module provides the `ApiClient` struct for authenticating and for
//! fetching recipe and profile data. All authenticated traffic is routed
//! through the [`AuthInterceptor`]; login and refresh go through the bare
//! [`AuthTransport`].

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::{AuthSession, SessionStore};
use crate::config::Config;
use crate::models::{Recipe, RecipesResponse, User, UserDto};

use super::interceptor::{AuthInterceptor, HttpResponse};
use super::transport::AuthTransport;
use super::ApiError;

/// Authenticated profile endpoint, relative to the base URL
const ME_ENDPOINT: &str = "auth/me";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the recipe backend.
pub struct ApiClient {
    /// Builds outbound requests; shares its connection pool with the
    /// interceptor's sending client.
    client: Client,
    http: AuthInterceptor,
    auth: AuthTransport,
    store: Arc<SessionStore>,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client backed by `store` for session state.
    pub fn new(config: &Config, store: Arc<SessionStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        let base_url = config.api_base_url().trim_end_matches('/').to_string();
        let auth = AuthTransport::new(&base_url, config.token_ttl_mins)?;
        let http = AuthInterceptor::new(client.clone(), store.clone(), auth.clone());

        Ok(Self {
            client,
            http,
            auth,
            store,
            base_url,
        })
    }

    // ===== Session Operations =====

    /// Authenticate with the backend and persist the resulting session.
    /// The session is durable before this returns.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        let session = self.auth.login(username, password).await?;
        self.store.save(&session).context("Failed to persist session")?;
        Ok(session)
    }

    /// Clear the persisted session.
    pub fn logout(&self) -> Result<()> {
        debug!("Logging out, clearing session");
        self.store.clear()
    }

    /// Snapshot of the persisted session, if any.
    pub fn session(&self) -> Option<AuthSession> {
        self.store.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    // ===== Data Fetching Methods =====

    /// Fetch the profile of the authenticated user.
    pub async fn fetch_current_user(&self) -> Result<User> {
        let url = format!("{}/{}", self.base_url, ME_ENDPOINT);
        let dto: UserDto = self.get_json(&url, &[]).await?;
        Ok(dto.to_user())
    }

    /// Fetch a page of recipes.
    pub async fn fetch_recipes(&self, limit: Option<u32>, skip: Option<u32>) -> Result<Vec<Recipe>> {
        let url = format!("{}/recipes", self.base_url);
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(skip) = skip {
            query.push(("skip", skip.to_string()));
        }

        let response: RecipesResponse = self.get_json(&url, &query).await?;
        Ok(response.to_recipes())
    }

    /// Fetch a single recipe by id.
    pub async fn fetch_recipe(&self, id: i64) -> Result<Recipe> {
        let url = format!("{}/recipes/{}", self.base_url, id);
        let dto: crate::models::RecipeDto = self.get_json(&url, &[]).await?;
        Ok(dto.to_recipe())
    }

    /// Search recipes by free-text query.
    pub async fn search_recipes(&self, query: &str) -> Result<Vec<Recipe>> {
        let url = format!("{}/recipes/search", self.base_url);
        let response: RecipesResponse = self
            .get_json(&url, &[("q", query.to_string())])
            .await?;
        Ok(response.to_recipes())
    }

    /// Fetch recipes for a meal type (breakfast, lunch, dinner, snack).
    pub async fn fetch_recipes_by_meal_type(
        &self,
        meal_type: &str,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<Vec<Recipe>> {
        let url = format!("{}/recipes/meal-type/{}", self.base_url, meal_type);
        let response: RecipesResponse = self.get_json(&url, &sort_query(sort_by, order)).await?;
        Ok(response.to_recipes())
    }

    /// Fetch recipes carrying a tag.
    pub async fn fetch_recipes_by_tag(
        &self,
        tag: &str,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<Vec<Recipe>> {
        let url = format!("{}/recipes/tag/{}", self.base_url, tag);
        let response: RecipesResponse = self.get_json(&url, &sort_query(sort_by, order)).await?;
        Ok(response.to_recipes())
    }

    // ===== Helpers =====

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let request = self
            .client
            .get(url)
            .query(query)
            .build()
            .with_context(|| format!("Failed to build GET request for {url}"))?;

        let response = self.http.execute(request).await?;
        let response = Self::check_response(response)?;
        response
            .json()
            .with_context(|| format!("Failed to parse JSON response from {url}"))
    }

    /// Map non-success statuses to the error taxonomy. Synthesized and real
    /// 401s land on the same `Unauthorized` path here.
    fn check_response(response: HttpResponse) -> Result<HttpResponse> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_status(response.status(), response.text()).into())
        }
    }
}

fn sort_query(sort_by: Option<&str>, order: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(sort_by) = sort_by {
        query.push(("sortBy", sort_by.to_string()));
    }
    if let Some(order) = order {
        query.push(("order", order.to_string()));
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_query_includes_only_present_params() {
        assert!(sort_query(None, None).is_empty());

        let q = sort_query(Some("rating"), None);
        assert_eq!(q, vec![("sortBy", "rating".to_string())]);

        let q = sort_query(Some("rating"), Some("desc"));
        assert_eq!(
            q,
            vec![
                ("sortBy", "rating".to_string()),
                ("order", "desc".to_string())
            ]
        );
    }
}
