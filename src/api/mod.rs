//! REST API module for the Plater recipe backend.
//!
//! This module provides the `ApiClient` for fetching recipe and profile
//! data, the authenticating interceptor that wraps every outbound request,
//! and the non-intercepted transport used for login and token refresh.
//!
//! The backend uses JWT bearer authentication; expired sessions are
//! recovered transparently by the interceptor's single-flight refresh.

pub mod client;
pub mod error;
pub mod interceptor;
pub mod transport;

pub use client::ApiClient;
pub use error::ApiError;
pub use interceptor::{AuthInterceptor, HttpResponse};
pub use transport::{AuthTransport, TokenPair};
