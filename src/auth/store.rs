use std::path::PathBuf;
use std::sync::RwLock;

use anyhow::{Context, Result};
use rand::Rng;
use tracing::{debug, warn};

use super::crypto::SessionCipher;
use super::session::{AuthSession, StoredSession};
use super::SecretStore;
use crate::models::User;

/// Session file name in the data directory
const SESSION_FILE: &str = "session.bin";

/// Key-derivation salt file name
const SALT_FILE: &str = "session.salt";

/// Salt length in bytes
const SALT_LEN: usize = 16;

/// Durable, encrypted persistence of the [`AuthSession`].
///
/// The store is the sole owner of session state. Callers read snapshots and
/// request writes; every write re-encrypts the whole record and replaces the
/// session file atomically (write to a temp file, then rename), so a
/// concurrent reader never observes a half-applied token pair. An in-memory
/// copy behind a `RwLock` serves reads without touching disk.
pub struct SessionStore {
    path: PathBuf,
    cipher: SessionCipher,
    cached: RwLock<Option<AuthSession>>,
}

impl SessionStore {
    /// Open the store rooted at `data_dir`, deriving the cipher key from the
    /// keychain-held master secret.
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let secret = SecretStore::load_or_create()?;
        Self::open_with_secret(data_dir, &secret)
    }

    /// Open the store with an explicitly supplied master secret. Intended for
    /// headless environments and tests where no OS keychain is available.
    pub fn open_with_secret(data_dir: PathBuf, secret: &str) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;

        let salt = Self::load_or_create_salt(&data_dir)?;
        let cipher = SessionCipher::derive(secret, &salt)?;

        let store = Self {
            path: data_dir.join(SESSION_FILE),
            cipher,
            cached: RwLock::new(None),
        };
        store.load_from_disk();
        Ok(store)
    }

    /// Full snapshot of the current session, if any.
    pub fn session(&self) -> Option<AuthSession> {
        self.cached.read().expect("session lock poisoned").clone()
    }

    /// Latest persisted access token.
    pub fn access_token(&self) -> Option<String> {
        self.cached
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .and_then(|s| s.access_token.clone())
    }

    /// Latest persisted refresh token.
    pub fn refresh_token(&self) -> Option<String> {
        self.cached
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .and_then(|s| s.refresh_token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.cached
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .is_some_and(|s| s.is_authenticated())
    }

    /// Atomically overwrite the persisted session. The write is durable
    /// before this returns.
    pub fn save(&self, session: &AuthSession) -> Result<()> {
        self.persist(session)?;
        *self.cached.write().expect("session lock poisoned") = Some(session.clone());
        Ok(())
    }

    /// Replace both tokens while preserving the user profile. Used by the
    /// interceptor after a successful refresh; if no session exists the
    /// tokens are stored against an empty profile.
    pub fn update_tokens(&self, access_token: &str, refresh_token: &str) -> Result<()> {
        let updated = match self.session() {
            Some(current) => current.with_tokens(access_token, refresh_token),
            None => AuthSession::new(
                User::default(),
                access_token.to_string(),
                refresh_token.to_string(),
            ),
        };
        self.save(&updated)
    }

    /// Remove all persisted session data. Subsequent reads return `None`.
    pub fn clear(&self) -> Result<()> {
        *self.cached.write().expect("session lock poisoned") = None;
        if self.path.exists() {
            std::fs::remove_file(&self.path).context("Failed to remove session file")?;
        }
        Ok(())
    }

    fn persist(&self, session: &AuthSession) -> Result<()> {
        let record = StoredSession::new(session.clone());
        let plaintext = serde_json::to_vec(&record).context("Failed to serialize session")?;
        let payload = self.cipher.encrypt(&plaintext)?;

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, &payload)
            .with_context(|| format!("Failed to write session file {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path).context("Failed to replace session file")?;
        Ok(())
    }

    /// Populate the in-memory snapshot from disk. An unreadable or corrupt
    /// record is treated as an absent session, not a startup failure.
    fn load_from_disk(&self) {
        let payload = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) => {
                warn!(error = %e, "Failed to read session file");
                return;
            }
        };

        let session = self
            .cipher
            .decrypt(&payload)
            .and_then(|plaintext| {
                serde_json::from_slice::<StoredSession>(&plaintext)
                    .context("Failed to parse session record")
            })
            .map(|record| record.session);

        match session {
            Ok(session) => {
                debug!("Loaded persisted session");
                *self.cached.write().expect("session lock poisoned") = Some(session);
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session record");
            }
        }
    }

    fn load_or_create_salt(data_dir: &std::path::Path) -> Result<Vec<u8>> {
        let path = data_dir.join(SALT_FILE);
        if path.exists() {
            let salt = std::fs::read(&path).context("Failed to read salt file")?;
            if salt.len() == SALT_LEN {
                return Ok(salt);
            }
            warn!("Salt file has unexpected length, regenerating");
        }

        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill(&mut salt[..]);
        std::fs::write(&path, salt).context("Failed to write salt file")?;
        Ok(salt.to_vec())
    }
}
