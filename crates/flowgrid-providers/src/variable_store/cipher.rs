//! At-rest encryption for variable values
//!
//! AES-256-GCM with the key derived from the configured secret via SHA-256.
//! Wire form is `base64(nonce || ciphertext)`; the nonce is fresh per value.

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use sha2::{Digest, Sha256};

use flowgrid_domain::error::{Error, Result};

use crate::constants::AES_GCM_NONCE_SIZE;

/// Value cipher shared by a variable store instance
#[derive(Clone)]
pub(crate) struct ValueCipher {
    key: [u8; 32],
}

impl ValueCipher {
    /// Derive the cipher key from a configured secret string
    pub(crate) fn from_secret(secret: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        let key: [u8; 32] = hasher.finalize().into();
        Self { key }
    }

    /// Encrypt a plaintext value to its storage form
    pub(crate) fn encrypt(&self, plaintext: &str) -> Result<String> {
        let key = Key::<Aes256Gcm>::from_slice(&self.key);
        let cipher = Aes256Gcm::new(key);
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| Error::crypto(format!("encryption failed: {}", e)))?;

        let mut buf = Vec::with_capacity(nonce.len() + ciphertext.len());
        buf.extend_from_slice(&nonce);
        buf.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(buf))
    }

    /// Decrypt a storage-form value back to plaintext
    pub(crate) fn decrypt(&self, encoded: &str) -> Result<String> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| Error::crypto(format!("invalid stored value encoding: {}", e)))?;

        if bytes.len() <= AES_GCM_NONCE_SIZE {
            return Err(Error::crypto("stored value too short to contain a nonce"));
        }
        let (nonce, ciphertext) = bytes.split_at(AES_GCM_NONCE_SIZE);

        let key = Key::<Aes256Gcm>::from_slice(&self.key);
        let cipher = Aes256Gcm::new(key);
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| Error::crypto(format!("decryption failed: {}", e)))?;

        String::from_utf8(plaintext).map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let cipher = ValueCipher::from_secret("unit-test-secret");
        let encrypted = cipher.encrypt("sk-abc123").unwrap();
        assert_ne!(encrypted, "sk-abc123");
        assert_eq!(cipher.decrypt(&encrypted).unwrap(), "sk-abc123");
    }

    #[test]
    fn fresh_nonce_per_value() {
        let cipher = ValueCipher::from_secret("unit-test-secret");
        let a = cipher.encrypt("same").unwrap();
        let b = cipher.encrypt("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_key_fails() {
        let encrypted = ValueCipher::from_secret("key-a").encrypt("value").unwrap();
        let err = ValueCipher::from_secret("key-b").decrypt(&encrypted);
        assert!(err.is_err());
    }

    #[test]
    fn tampered_value_fails() {
        let cipher = ValueCipher::from_secret("unit-test-secret");
        let mut encrypted = cipher.encrypt("value").unwrap();
        encrypted.truncate(encrypted.len() - 4);
        assert!(cipher.decrypt(&encrypted).is_err());
    }
}
