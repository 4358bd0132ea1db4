//! The `tag | ciphertext | iv` envelope produced by [`crate::CipherKey::encrypt`].
//!
//! The envelope carries no length fields. The tag and the initialization vector
//! have fixed sizes, so everything between them is the ciphertext.
//!
//! The cipher is AES-256: a 256-bit key with 128-bit blocks. Blocks and the IV
//! are therefore 16 bytes, not the 32 bytes of the 256-bit-block Rijndael
//! variant, and envelopes from that variant cannot be decoded here.
use std::{borrow::Cow, io::Write};

use crate::{CipherError, CipherResult};

/// Byte length of the authentication tag (HMAC-SHA256 output).
pub const TAG_SIZE: usize = 32;

/// Byte length of an AES block, which is also the initialization vector length.
pub const BLOCK_SIZE: usize = 16;

/// Byte length of the initialization vector, one AES block.
pub const IV_SIZE: usize = BLOCK_SIZE;

/// Smallest possible envelope: a tag and an IV around an empty ciphertext.
pub const MIN_ENVELOPE_SIZE: usize = TAG_SIZE + IV_SIZE;

/// A parsed ciphertext envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<'a> {
    /// Authentication tag over `ciphertext | iv`.
    pub tag: Cow<'a, [u8]>,

    /// AES-256-CBC ciphertext.
    ///
    /// Block alignment is only checked after the tag has been verified.
    pub ciphertext: Cow<'a, [u8]>,

    /// The initialization vector that was used to encrypt the data.
    pub iv: Cow<'a, [u8]>,
}

impl<'a> Envelope<'a> {
    pub fn new(tag: &'a [u8], ciphertext: &'a [u8], iv: &'a [u8]) -> CipherResult<Self> {
        Self::check_lengths(tag, iv)?;

        Ok(Self {
            tag: Cow::Borrowed(tag),
            ciphertext: Cow::Borrowed(ciphertext),
            iv: Cow::Borrowed(iv),
        })
    }

    /// Tries to decode an envelope as `tag (32 bytes) | ciphertext | iv (16 bytes)`.
    ///
    /// Only the fixed regions are checked here; the tag and the ciphertext
    /// alignment are verified on decryption.
    pub fn decode(envelope: &'a [u8]) -> CipherResult<Self> {
        if envelope.len() < MIN_ENVELOPE_SIZE {
            log::debug!(
                "rejecting envelope of {} bytes, need at least {MIN_ENVELOPE_SIZE}",
                envelope.len()
            );
            return Err(CipherError::InvalidEnvelopeLength);
        }
        let (tag, rest) = envelope.split_at(TAG_SIZE);
        let (ciphertext, iv) = rest.split_at(rest.len() - IV_SIZE);
        Self::new(tag, ciphertext, iv)
    }

    /// Encodes the envelope into a byte vector as `tag | ciphertext | iv`.
    pub fn encode(&self) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(self.len());
        encoded.extend_from_slice(&self.tag);
        encoded.extend_from_slice(&self.ciphertext);
        encoded.extend_from_slice(&self.iv);
        encoded
    }

    /// Encodes the envelope as `tag | ciphertext | iv` and writes it to the writer.
    ///
    /// Returns the number of bytes written.
    pub fn encode_and_write(&self, mut writer: impl Write) -> CipherResult<usize> {
        writer.write_all(&self.tag).map_err(CipherError::IoWrite)?;
        writer
            .write_all(&self.ciphertext)
            .map_err(CipherError::IoWrite)?;
        writer.write_all(&self.iv).map_err(CipherError::IoWrite)?;
        Ok(self.len())
    }

    /// Total encoded length in bytes.
    pub fn len(&self) -> usize {
        self.tag.len() + self.ciphertext.len() + self.iv.len()
    }

    /// Returns true if the envelope carries no ciphertext blocks.
    ///
    /// Such an envelope is still valid and decrypts to an empty plaintext.
    pub fn is_empty(&self) -> bool {
        self.ciphertext.is_empty()
    }

    /// The bytes covered by the tag: `ciphertext | iv`.
    pub(crate) fn authenticated_data(&self) -> impl Iterator<Item = &[u8]> {
        [self.ciphertext.as_ref(), self.iv.as_ref()].into_iter()
    }

    fn check_lengths(tag: &[u8], iv: &[u8]) -> CipherResult<()> {
        if tag.len() != TAG_SIZE {
            return Err(CipherError::InvalidTagLength);
        }
        if iv.len() != IV_SIZE {
            return Err(CipherError::InvalidIvLength);
        }
        Ok(())
    }
}

impl Envelope<'static> {
    pub fn new_owned(tag: Vec<u8>, ciphertext: Vec<u8>, iv: Vec<u8>) -> CipherResult<Self> {
        Self::check_lengths(&tag, &iv)?;

        Ok(Self {
            tag: Cow::Owned(tag),
            ciphertext: Cow::Owned(ciphertext),
            iv: Cow::Owned(iv),
        })
    }
}

impl<'a> From<&'a Envelope<'_>> for Envelope<'a> {
    fn from(envelope: &'a Envelope<'_>) -> Self {
        Self {
            tag: Cow::Borrowed(envelope.tag.as_ref()),
            ciphertext: Cow::Borrowed(envelope.ciphertext.as_ref()),
            iv: Cow::Borrowed(envelope.iv.as_ref()),
        }
    }
}
