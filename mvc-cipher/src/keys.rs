//! Key derivation and the AES-256-CBC + HMAC-SHA256 envelope cipher.
//!
//! # Zero-byte padding
//!
//! Plaintexts are padded with zero bytes up to the block size and **all**
//! trailing zero bytes are stripped after decryption. A plaintext that itself
//! ends in `0x00` therefore does not round-trip: its trailing zeros are lost.
//! The behavior is kept so payload handling stays the same as the zero-padded
//! Rijndael scheme this cipher replaces. It does **not** make those envelopes
//! readable: they use 32-byte blocks and a hex tag. Encode binary payloads
//! (e.g. base64) before encrypting them if they may end in zero bytes.
use std::borrow::Cow;

use aes::Aes256;
use cbc::cipher::{
    block_padding::{NoPadding, ZeroPadding},
    BlockDecryptMut, BlockEncryptMut, KeyIvInit,
};
use hkdf::Hkdf;
use hmac::{
    digest::{generic_array::GenericArray, KeyInit},
    Hmac, Mac,
};
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    envelope::{BLOCK_SIZE, IV_SIZE, TAG_SIZE},
    CipherError, CipherResult, Envelope,
};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// Byte length of the AES-256 key derived from the caller secret.
pub const CIPHER_KEY_SIZE: usize = 32;

// One SHA-256 input block, so HMAC uses the derived key as is.
const MAC_KEY_SIZE: usize = 64;

const MAC_KEY_INFO: &[u8] = b"mvc-cipher.envelope.tag";

/// Key material derived from a caller secret.
///
/// The cipher key is `SHA-256(secret)`. The tag key is expanded from the same
/// secret with HKDF-SHA256 under a fixed label, so it never equals the cipher key.
///
/// This key data is zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct CipherKey {
    cipher_key: [u8; CIPHER_KEY_SIZE],
    mac_key: [u8; MAC_KEY_SIZE],
    #[cfg(feature = "legacy")]
    secret: Vec<u8>,
}

impl CipherKey {
    /// Derives the cipher and tag keys from a secret of any length.
    ///
    /// # Examples
    ///
    /// ```
    /// use mvc_cipher::CipherKey;
    ///
    /// let key = CipherKey::derive(b"a cryptographically random string");
    /// let envelope = key.encrypt("session=42");
    ///
    /// let decrypted = key.decrypt(&envelope).unwrap();
    /// assert_eq!(b"session=42", decrypted.as_slice());
    /// ```
    pub fn derive(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();

        let cipher_key: [u8; CIPHER_KEY_SIZE] = Sha256::digest(secret).into();

        let mut mac_key = [0_u8; MAC_KEY_SIZE];
        Hkdf::<Sha256>::new(None, secret)
            .expand(MAC_KEY_INFO, &mut mac_key)
            .expect("64 bytes is a valid HKDF-SHA256 output length");

        Self {
            cipher_key,
            mac_key,
            #[cfg(feature = "legacy")]
            secret: secret.to_vec(),
        }
    }

    /// Encrypts the data under a fresh random IV and tags `ciphertext | iv`.
    ///
    /// See [`crate::keys`] for the zero-byte padding caveat.
    ///
    /// # Panics
    ///
    /// Panics if the operating system random number generator fails.
    pub fn encrypt(&self, data: impl AsRef<[u8]>) -> Envelope<'static> {
        self.encrypt_generic(data.as_ref(), |key, ciphertext, iv| {
            let mut mac = key.tag_mac();
            mac.update(ciphertext);
            mac.update(iv);
            mac.finalize().into_bytes().into()
        })
    }

    /// Verifies the envelope tag and, only if it matches, decrypts the ciphertext.
    ///
    /// Trailing zero bytes are stripped from the result.
    pub fn decrypt<'a>(&self, envelope: impl Into<Envelope<'a>>) -> CipherResult<Vec<u8>> {
        let envelope: Envelope = envelope.into();

        let mut mac = self.tag_mac();
        for chunk in envelope.authenticated_data() {
            mac.update(chunk);
        }
        if mac.verify_slice(&envelope.tag).is_err() {
            log::debug!("rejecting envelope: authentication tag mismatch");
            return Err(CipherError::Authentication);
        }

        self.decrypt_verified(&envelope)
    }

    /// Encrypts the data and tags it with the plain `SHA-256(secret | ciphertext | iv)` digest.
    ///
    /// Only the tag construction differs from [`Self::encrypt`]: the layout, cipher
    /// and IV size are the same. The result cannot be read by the Rijndael-256
    /// implementation with hex tags that this crate replaces.
    ///
    /// **Use this function only when a reader expects digest tags.**
    /// For all other cases, prefer using [`Self::encrypt`].
    #[cfg(feature = "legacy")]
    pub fn encrypt_legacy(&self, data: impl AsRef<[u8]>) -> Envelope<'static> {
        self.encrypt_generic(data.as_ref(), |key, ciphertext, iv| {
            key.legacy_tag(ciphertext, iv)
        })
    }

    /// Decrypts an envelope tagged with the plain `SHA-256(secret | ciphertext | iv)` digest.
    ///
    /// Expects the same binary layout as [`Self::decrypt`], that is a raw 32-byte tag,
    /// AES blocks and a 16-byte IV. Envelopes with a 64-character hex tag and
    /// 32-byte Rijndael blocks are rejected as [`CipherError::Authentication`].
    ///
    /// **Use this function only when necessary for backwards compatibility.**
    /// For all other cases, prefer using [`Self::decrypt`].
    #[cfg(feature = "legacy")]
    pub fn decrypt_legacy<'a>(
        &self,
        envelope: impl Into<Envelope<'a>>,
    ) -> CipherResult<Vec<u8>> {
        use subtle::ConstantTimeEq;

        let envelope: Envelope = envelope.into();
        let expected = self.legacy_tag(&envelope.ciphertext, &envelope.iv);
        if !bool::from(expected.as_slice().ct_eq(&envelope.tag)) {
            log::debug!("rejecting legacy envelope: digest tag mismatch");
            return Err(CipherError::Authentication);
        }

        self.decrypt_verified(&envelope)
    }

    fn encrypt_generic<F>(&self, data: &[u8], tag_fn: F) -> Envelope<'static>
    where
        F: FnOnce(&Self, &[u8], &[u8]) -> [u8; TAG_SIZE],
    {
        if data.last() == Some(&0) {
            log::debug!("plaintext ends in zero bytes; they will be stripped on decryption");
        }

        let mut iv = [0_u8; IV_SIZE];
        rand::thread_rng().fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(&self.cipher_key.into(), &iv.into())
            .encrypt_padded_vec_mut::<ZeroPadding>(data);
        let tag = tag_fn(self, &ciphertext, &iv);

        Envelope {
            tag: Cow::Owned(tag.to_vec()),
            ciphertext: Cow::Owned(ciphertext),
            iv: Cow::Owned(iv.to_vec()),
        }
    }

    fn decrypt_verified(&self, envelope: &Envelope) -> CipherResult<Vec<u8>> {
        if envelope.ciphertext.len() % BLOCK_SIZE != 0 {
            log::debug!(
                "rejecting envelope: ciphertext of {} bytes is not block aligned",
                envelope.ciphertext.len()
            );
            return Err(CipherError::InvalidCiphertext);
        }

        let decryptor = Aes256CbcDec::new_from_slices(&self.cipher_key, &envelope.iv)
            .map_err(|_| CipherError::InvalidIvLength)?;
        let mut plaintext = decryptor
            .decrypt_padded_vec_mut::<NoPadding>(&envelope.ciphertext)
            .map_err(|_| CipherError::InvalidCiphertext)?;

        strip_zero_padding(&mut plaintext);
        Ok(plaintext)
    }

    fn tag_mac(&self) -> HmacSha256 {
        <HmacSha256 as KeyInit>::new(GenericArray::from_slice(&self.mac_key))
    }

    #[cfg(feature = "legacy")]
    fn legacy_tag(&self, ciphertext: &[u8], iv: &[u8]) -> [u8; TAG_SIZE] {
        let mut digest = Sha256::new();
        digest.update(&self.secret);
        digest.update(ciphertext);
        digest.update(iv);
        digest.finalize().into()
    }
}

fn strip_zero_padding(plaintext: &mut Vec<u8>) {
    let len = plaintext.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    plaintext.truncate(len);
}
