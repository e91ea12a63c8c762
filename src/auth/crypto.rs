use anyhow::{anyhow, ensure, Result};
use argon2::Argon2;
use chacha20poly1305::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    ChaCha20Poly1305, Key, Nonce,
};

/// Nonce size for ChaCha20-Poly1305.
const NONCE_LEN: usize = 12;

/// Derived key size in bytes.
const KEY_LEN: usize = 32;

/// AEAD cipher for session records.
///
/// The key is stretched with Argon2 from the keychain-held master secret and
/// a per-install salt. Encrypted payloads are laid out as
/// `nonce || ciphertext` with a fresh random nonce per write, so the same
/// session never encrypts to the same bytes twice.
pub struct SessionCipher {
    cipher: ChaCha20Poly1305,
}

impl SessionCipher {
    /// Derive the cipher key from a master secret and salt.
    pub fn derive(secret: &str, salt: &[u8]) -> Result<Self> {
        let mut key = [0u8; KEY_LEN];
        Argon2::default()
            .hash_password_into(secret.as_bytes(), salt, &mut key)
            .map_err(|e| anyhow!("Key derivation failed: {e}"))?;

        Ok(Self {
            cipher: ChaCha20Poly1305::new(Key::from_slice(&key)),
        })
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| anyhow!("Encryption failed: {e}"))?;

        let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        payload.extend_from_slice(nonce.as_slice());
        payload.extend_from_slice(&ciphertext);
        Ok(payload)
    }

    pub fn decrypt(&self, payload: &[u8]) -> Result<Vec<u8>> {
        ensure!(payload.len() > NONCE_LEN, "Encrypted payload missing nonce");

        let (nonce, ciphertext) = payload.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| anyhow!("Decryption failed: {e}"))
    }
}
