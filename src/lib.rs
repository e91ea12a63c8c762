//! Plater core - the data and session layer of the Plater recipe app.
//!
//! The crate centers on an authenticated HTTP session: requests issued
//! through [`api::ApiClient`] pass through an interceptor that attaches the
//! current bearer token, detects expired sessions, and silently refreshes
//! the token pair with single-flight coordination before retrying. Sessions
//! persist encrypted at rest and survive restarts.
//!
//! The UI layer is expected to sit on the repositories and observe session
//! state; it is not part of this crate.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod repository;

pub use api::{ApiClient, ApiError, AuthInterceptor, AuthTransport, HttpResponse, TokenPair};
pub use auth::{AuthSession, SecretStore, SessionStore};
pub use config::Config;
pub use models::{Recipe, Resource, User};
pub use repository::{RecipeRepository, UserRepository};
