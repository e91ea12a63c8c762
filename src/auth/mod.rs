//! Authentication module for managing the user session and its storage.
//!
//! This module provides:
//! - `AuthSession`: the authenticated user + token pair
//! - `SessionStore`: encrypted, atomic persistence of the session
//! - `SecretStore`: keychain-backed master secret via keyring
//!
//! Session records are encrypted at rest with ChaCha20-Poly1305 under a key
//! derived from the master secret.

pub mod credentials;
pub mod crypto;
pub mod session;
pub mod store;

pub use credentials::SecretStore;
pub use session::{AuthSession, StoredSession};
pub use store::SessionStore;
