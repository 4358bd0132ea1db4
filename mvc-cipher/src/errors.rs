use std::{io, string::FromUtf8Error};

use base64::DecodeError;

pub type CipherResult<T> = Result<T, CipherError>;

#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    /// The tag does not match the envelope: it was tampered with or the key is wrong.
    #[error("Envelope authentication failed")]
    Authentication,

    #[error("Envelope is too short to hold a tag and an initialization vector")]
    InvalidEnvelopeLength,

    #[error("The authentication tag has the wrong length")]
    InvalidTagLength,

    #[error("The initialization vector has the wrong length")]
    InvalidIvLength,

    #[error("Ciphertext length is not a multiple of the block size")]
    InvalidCiphertext,

    #[error("Failed decode base64 encoded envelope: {0}")]
    Base64Decode(#[from] DecodeError),

    #[error("Decrypted payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("Failed to write data to the writer: {0}")]
    IoWrite(io::Error),
}

impl CipherError {
    /// Returns true if the envelope was rejected because its tag did not verify.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, CipherError::Authentication)
    }
}
