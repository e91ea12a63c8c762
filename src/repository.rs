//! Use-case boundary between the API client and UI consumers.
//!
//! Repositories translate `Result` values from the client into [`Resource`]
//! states with user-facing messages. Nothing below this layer uses
//! `Resource`; the interceptor and client work with plain results.

use std::sync::Arc;

use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::auth::AuthSession;
use crate::models::{Recipe, Resource, User};

/// Turn an operation error into a user-facing message plus cause chain.
fn error_resource<T>(err: anyhow::Error, fallback: &str) -> Resource<T> {
    let message = match err.downcast_ref::<ApiError>() {
        Some(ApiError::InvalidCredentials) => "Invalid credentials".to_string(),
        Some(ApiError::Unauthorized) => "Unauthorized. Please login again.".to_string(),
        Some(ApiError::AccessDenied(_)) => "Access forbidden".to_string(),
        Some(api_err) => api_err.to_string(),
        None => fallback.to_string(),
    };
    Resource::error(message, Some(format!("{err:#}")))
}

/// Recipe data operations for the UI.
pub struct RecipeRepository {
    client: Arc<ApiClient>,
}

impl RecipeRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn recipes(&self, limit: Option<u32>, skip: Option<u32>) -> Resource<Vec<Recipe>> {
        match self.client.fetch_recipes(limit, skip).await {
            Ok(recipes) => {
                debug!(count = recipes.len(), "Fetched recipes");
                Resource::success("Recipes fetched successfully", recipes)
            }
            Err(e) => error_resource(e, "Failed to fetch recipes"),
        }
    }

    pub async fn recipes_by_meal_type(
        &self,
        meal_type: &str,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Resource<Vec<Recipe>> {
        match self
            .client
            .fetch_recipes_by_meal_type(meal_type, sort_by, order)
            .await
        {
            Ok(recipes) => Resource::success("Recipes fetched successfully", recipes),
            Err(e) => error_resource(e, "Failed to fetch recipes"),
        }
    }

    pub async fn recipes_by_tag(
        &self,
        tag: &str,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Resource<Vec<Recipe>> {
        match self.client.fetch_recipes_by_tag(tag, sort_by, order).await {
            Ok(recipes) => Resource::success("Recipes fetched successfully", recipes),
            Err(e) => error_resource(e, "Failed to fetch recipes"),
        }
    }

    pub async fn search(&self, query: &str) -> Resource<Vec<Recipe>> {
        match self.client.search_recipes(query).await {
            Ok(recipes) => Resource::success("Recipes fetched successfully", recipes),
            Err(e) => error_resource(e, "Failed to search recipes"),
        }
    }
}

/// Session and profile operations for the UI.
pub struct UserRepository {
    client: Arc<ApiClient>,
}

impl UserRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn login(&self, username: &str, password: &str) -> Resource<AuthSession> {
        match self.client.login(username, password).await {
            Ok(session) => Resource::success("Login successful", session),
            Err(e) => error_resource(e, "Login failed"),
        }
    }

    /// Forced or user-initiated logout; the presentation layer observes the
    /// absent session and routes to the login screen.
    pub fn logout(&self) -> Resource<()> {
        match self.client.logout() {
            Ok(()) => Resource::success("Logged out", ()),
            Err(e) => error_resource(e, "Logout failed"),
        }
    }

    pub async fn current_user(&self) -> Resource<User> {
        match self.client.fetch_current_user().await {
            Ok(user) => Resource::success("User fetched successfully", user),
            Err(e) => error_resource(e, "Failed to fetch user"),
        }
    }
}
