//! Authenticated encryption of JSON values into URL-safe strings.
//!
//! Wire layout: `base64url(nonce[24] || ciphertext || tag[16])`, sealed with
//! XChaCha20-Poly1305 under `SHA-256(secret)`.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chacha20poly1305::aead::{Aead, AeadCore, KeyInit, OsRng};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use collabhub_core::error::{AppError, ErrorKind};
use collabhub_core::result::AppResult;

const NONCE_LEN: usize = 24;
const TAG_LEN: usize = 16;

/// Seals and opens JSON payloads with a key derived from a shared secret.
#[derive(Clone)]
pub struct TokenCodec {
    cipher: XChaCha20Poly1305,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Derive the sealing key from `secret`.
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self {
            cipher: XChaCha20Poly1305::new(&Key::from(key)),
        }
    }

    /// Serialize `value` to JSON and seal it.
    pub fn seal<T: Serialize>(&self, value: &T) -> AppResult<String> {
        let plaintext = serde_json::to_vec(value)?;
        let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_slice())
            .map_err(|_| AppError::crypto("Failed to seal token"))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    /// Open a sealed string and deserialize its JSON body.
    ///
    /// Every failure (bad encoding, truncation, wrong key, tampering,
    /// unexpected shape) yields the same [`ErrorKind::Crypto`] error.
    pub fn open<T: DeserializeOwned>(&self, token: &str) -> AppResult<T> {
        let rejected = || AppError::new(ErrorKind::Crypto, "Token could not be opened");

        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| rejected())?;
        if bytes.len() < NONCE_LEN + TAG_LEN {
            return Err(rejected());
        }
        let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(XNonce::from_slice(nonce), ciphertext)
            .map_err(|_| rejected())?;
        serde_json::from_slice(&plaintext).map_err(|_| rejected())
    }
}
