//! Authenticated encryption of opaque payloads such as session tokens and cookie values.
//!
//! Payloads are encrypted with AES-256-CBC under `SHA-256(secret)` and a fresh
//! random IV, then tagged with HMAC-SHA256 over `ciphertext | iv`. The result is
//! the envelope `tag (32 bytes) | ciphertext | iv (16 bytes)`.
//!
//! AES has 128-bit blocks, so the IV and the ciphertext blocks are 16 bytes.
//! Envelopes from 256-bit-block Rijndael schemes with hex tags are not readable.
//!
//! Tools:
//! - [`encrypt`] / [`decrypt`]: one-shot functions taking the caller secret.
//! - [`CipherKey`]: derive the keys once and reuse them.
//! - [`Envelope`]: parsed view of the envelope layout.
//! - [`text`]: envelopes as URL-safe base64 strings.
//!
//! Plaintexts are zero-padded and trailing zero bytes are stripped on
//! decryption, so a plaintext must not end in `0x00`. See [`keys`].
//!
//! ## Feature flags
//! - `legacy`: swaps the HMAC tag for a plain `SHA-256(secret | ciphertext | iv)` digest.
//!   The envelope layout and cipher are unchanged.

mod errors;
pub use errors::*;

pub mod envelope;
pub mod keys;
pub mod text;

pub use envelope::Envelope;
pub use keys::CipherKey;

/// Encrypts the plaintext under the secret and returns the encoded envelope.
///
/// # Panics
///
/// Panics if the operating system random number generator fails.
///
/// # Examples
///
/// ```
/// let envelope = mvc_cipher::encrypt(b"Hello, world!", b"secret key");
/// let decrypted = mvc_cipher::decrypt(&envelope, b"secret key").unwrap();
/// assert_eq!(b"Hello, world!", decrypted.as_slice());
///
/// assert!(mvc_cipher::decrypt(&envelope, b"other key").is_err());
/// ```
pub fn encrypt(plaintext: impl AsRef<[u8]>, key: impl AsRef<[u8]>) -> Vec<u8> {
    CipherKey::derive(key).encrypt(plaintext).encode()
}

/// Decrypts an encoded envelope under the secret.
///
/// Returns [`CipherError::Authentication`] if the tag does not match, which is
/// distinct from a valid envelope decrypting to an empty plaintext.
pub fn decrypt(envelope: impl AsRef<[u8]>, key: impl AsRef<[u8]>) -> CipherResult<Vec<u8>> {
    let envelope = Envelope::decode(envelope.as_ref())?;
    CipherKey::derive(key).decrypt(envelope)
}
