//! Envelopes as unpadded URL-safe base64, for cookie values and query strings.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::{CipherKey, CipherResult, Envelope};

/// Encrypts the data and returns the envelope as unpadded URL-safe base64.
///
/// # Examples
///
/// ```
/// use mvc_cipher::text;
///
/// let token = text::encrypt_to_string("user=7", b"app secret");
/// assert!(!token.contains('='));
///
/// let decrypted = text::decrypt_to_string(&token, b"app secret").unwrap();
/// assert_eq!(decrypted, "user=7");
/// ```
pub fn encrypt_to_string(data: impl AsRef<[u8]>, key: impl AsRef<[u8]>) -> String {
    CipherKey::derive(key).encrypt_to_string(data)
}

/// Decodes a base64 envelope produced by [`encrypt_to_string`] and decrypts it.
pub fn decrypt_from_str(encoded: &str, key: impl AsRef<[u8]>) -> CipherResult<Vec<u8>> {
    CipherKey::derive(key).decrypt_from_str(encoded)
}

/// Like [`decrypt_from_str`], but also requires the plaintext to be valid UTF-8.
pub fn decrypt_to_string(encoded: &str, key: impl AsRef<[u8]>) -> CipherResult<String> {
    let plaintext = decrypt_from_str(encoded, key)?;
    Ok(String::from_utf8(plaintext)?)
}

impl CipherKey {
    pub fn encrypt_to_string(&self, data: impl AsRef<[u8]>) -> String {
        URL_SAFE_NO_PAD.encode(self.encrypt(data).encode())
    }

    pub fn decrypt_from_str(&self, encoded: &str) -> CipherResult<Vec<u8>> {
        let raw = URL_SAFE_NO_PAD.decode(encoded)?;
        self.decrypt(Envelope::decode(&raw)?)
    }
}
