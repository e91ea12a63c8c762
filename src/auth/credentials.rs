use anyhow::{Context, Result};
use keyring::Entry;
use rand::{distributions::Alphanumeric, Rng};

const SERVICE_NAME: &str = "plater";

/// Keychain slot holding the master secret the session cipher key is derived
/// from.
const SECRET_USER: &str = "session-key";

/// Length of the generated master secret in characters.
const SECRET_LEN: usize = 48;

/// Manages the per-install master secret in the OS keychain.
///
/// The secret never leaves the machine and is only used as input to the
/// Argon2 key derivation in [`crate::auth::crypto::SessionCipher`].
pub struct SecretStore;

impl SecretStore {
    /// Fetch the master secret, generating and storing a fresh one on first
    /// use.
    pub fn load_or_create() -> Result<String> {
        let entry = Entry::new(SERVICE_NAME, SECRET_USER)
            .context("Failed to create keyring entry")?;

        match entry.get_password() {
            Ok(secret) => Ok(secret),
            Err(keyring::Error::NoEntry) => {
                let secret = Self::generate_secret();
                entry
                    .set_password(&secret)
                    .context("Failed to store session secret in keychain")?;
                Ok(secret)
            }
            Err(e) => Err(e).context("Failed to read session secret from keychain"),
        }
    }

    /// Delete the stored master secret. Existing encrypted session files
    /// become unreadable after this.
    pub fn delete() -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, SECRET_USER)
            .context("Failed to create keyring entry")?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete session secret from keychain"),
        }
    }

    /// Check whether a master secret exists without creating one.
    pub fn exists() -> bool {
        Entry::new(SERVICE_NAME, SECRET_USER)
            .map(|entry| entry.get_password().is_ok())
            .unwrap_or(false)
    }

    fn generate_secret() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SECRET_LEN)
            .map(char::from)
            .collect()
    }
}
