use mvc_cipher::{
    envelope::{BLOCK_SIZE, IV_SIZE, MIN_ENVELOPE_SIZE, TAG_SIZE},
    CipherError, CipherKey, Envelope,
};

const SECRET: &[u8] = b"a cryptographically random string";

#[test]
fn encrypt_decrypt_successful() {
    let plaintext = b"Hello, world!";
    let envelope = mvc_cipher::encrypt(plaintext, SECRET);

    let decrypted =
        mvc_cipher::decrypt(&envelope, SECRET).expect("Expected no error in decrypting");
    assert_eq!(plaintext, decrypted.as_slice());
}

#[test]
fn encrypt_produces_expected_layout() {
    let plaintext = b"Hello, world!";
    let envelope = mvc_cipher::encrypt(plaintext, SECRET);

    assert_eq!(envelope.len(), TAG_SIZE + BLOCK_SIZE + IV_SIZE);
}

#[test]
fn encrypt_uses_fresh_iv() {
    let first = mvc_cipher::encrypt(b"same", SECRET);
    let second = mvc_cipher::encrypt(b"same", SECRET);

    assert_ne!(first[first.len() - IV_SIZE..], second[second.len() - IV_SIZE..]);
    assert_ne!(first, second);
}

#[test]
fn encrypt_decrypt_wrong_key() {
    let envelope = mvc_cipher::encrypt(b"Hello, world!", SECRET);

    let result = mvc_cipher::decrypt(&envelope, b"wrong key");
    assert!(
        matches!(result, Err(CipherError::Authentication)),
        "Expected decryption to fail with wrong key"
    );
}

#[test]
fn empty_plaintext_is_not_an_authentication_failure() {
    let envelope = mvc_cipher::encrypt(b"", SECRET);
    assert_eq!(envelope.len(), MIN_ENVELOPE_SIZE);

    let decrypted =
        mvc_cipher::decrypt(&envelope, SECRET).expect("Expected no error in decrypting");
    assert!(decrypted.is_empty());
}

#[test]
fn trailing_zero_bytes_are_stripped() {
    let envelope = mvc_cipher::encrypt(b"token\0\0", SECRET);

    let decrypted =
        mvc_cipher::decrypt(&envelope, SECRET).expect("Expected no error in decrypting");
    assert_eq!(decrypted, b"token");
}

#[test]
fn inner_zero_bytes_survive() {
    let plaintext = b"a\0b\0c";
    let envelope = mvc_cipher::encrypt(plaintext, SECRET);

    let decrypted =
        mvc_cipher::decrypt(&envelope, SECRET).expect("Expected no error in decrypting");
    assert_eq!(plaintext, decrypted.as_slice());
}

#[test]
fn tampered_tag_fails_authentication() {
    let mut envelope = mvc_cipher::encrypt(b"Hello, world!", SECRET);
    envelope[0] ^= 0x01;

    let result = mvc_cipher::decrypt(&envelope, SECRET);
    assert!(matches!(result, Err(CipherError::Authentication)));
}

#[test]
fn tampered_iv_fails_authentication() {
    let mut envelope = mvc_cipher::encrypt(b"Hello, world!", SECRET);
    let last = envelope.len() - 1;
    envelope[last] ^= 0x80;

    let result = mvc_cipher::decrypt(&envelope, SECRET);
    assert!(matches!(result, Err(CipherError::Authentication)));
}

#[test]
fn truncated_envelope_fails() {
    let envelope = mvc_cipher::encrypt(b"Hello, world!", SECRET);

    let result = mvc_cipher::decrypt(&envelope[..envelope.len() - 1], SECRET);
    assert!(matches!(result, Err(CipherError::Authentication)));

    let result = mvc_cipher::decrypt(&envelope[..MIN_ENVELOPE_SIZE - 1], SECRET);
    assert!(matches!(result, Err(CipherError::InvalidEnvelopeLength)));
}

#[test]
fn reused_key_decrypts_envelope_view() {
    let key = CipherKey::derive(SECRET);
    let envelope = key.encrypt(b"Hello, world!");

    let tag: &[u8] = envelope.tag.as_ref();
    let ciphertext: &[u8] = &envelope.ciphertext;
    let iv: &[u8] = &envelope.iv;
    let view =
        Envelope::new(tag, ciphertext, iv).expect("Expected no error in creating envelope view");

    let decrypted = key.decrypt(view).expect("Expected no error in decrypting");
    assert_eq!(b"Hello, world!", decrypted.as_slice());
}

#[test]
fn keyed_and_one_shot_api_interoperate() {
    let key = CipherKey::derive(SECRET);
    let encoded = key.encrypt(b"Hello, world!").encode();

    let decrypted =
        mvc_cipher::decrypt(&encoded, SECRET).expect("Expected no error in decrypting");
    assert_eq!(b"Hello, world!", decrypted.as_slice());

    let envelope = mvc_cipher::encrypt(b"again", SECRET);
    let decoded = Envelope::decode(&envelope).expect("Expected no error in decoding");
    let decrypted = key.decrypt(decoded).expect("Expected no error in decrypting");
    assert_eq!(b"again", decrypted.as_slice());
}

#[test]
fn encode_and_write_matches_encode() {
    let key = CipherKey::derive(SECRET);
    let envelope = key.encrypt(b"Hello, world!");

    let mut buffer = Vec::new();
    let written = envelope
        .encode_and_write(&mut buffer)
        .expect("Expected no error in writing");
    assert_eq!(written, buffer.len());
    assert_eq!(buffer, envelope.encode());
}

#[test]
fn long_and_empty_secrets_are_accepted() {
    for secret in [&b""[..], &[0xAB_u8; 1024][..]] {
        let envelope = mvc_cipher::encrypt(b"payload", secret);
        let decrypted =
            mvc_cipher::decrypt(&envelope, secret).expect("Expected no error in decrypting");
        assert_eq!(b"payload", decrypted.as_slice());
    }
}
