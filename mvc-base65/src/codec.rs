//! Positional base-65 encoding of `u64` identifiers.

use crate::{Base65Error, Base65Result};

/// The base-65 symbols, ordered by value.
///
/// The ordering (note `xzy`) is fixed: identifiers already handed out were
/// encoded against it.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxzyABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_~";

pub const ALPHABET_LEN: usize = 65;

/// The numeric base, equal to [`ALPHABET_LEN`].
pub const BASE: u64 = 65;

const SYMBOLS: &[u8] = ALPHABET.as_bytes();

const NOT_A_SYMBOL: u8 = u8::MAX;

/// Symbol byte to value, [`NOT_A_SYMBOL`] for bytes outside the alphabet.
const VALUES: [u8; 256] = build_values();

const _: () = assert!(SYMBOLS.len() == ALPHABET_LEN);

#[allow(clippy::cast_possible_truncation)]
const fn build_values() -> [u8; 256] {
    let mut values = [NOT_A_SYMBOL; 256];
    let mut value = 0;
    while value < SYMBOLS.len() {
        let symbol = SYMBOLS[value];
        assert!(symbol.is_ascii_graphic(), "symbols must be printable ASCII");
        assert!(
            values[symbol as usize] == NOT_A_SYMBOL,
            "symbols must be distinct"
        );
        values[symbol as usize] = value as u8;
        value += 1;
    }
    values
}

/// Encodes an identifier, most significant symbol first.
///
/// # Examples
///
/// ```
/// assert_eq!(mvc_base65::encode(0), "a");
/// assert_eq!(mvc_base65::encode(64), "~");
/// assert_eq!(mvc_base65::encode(65), "ba");
/// ```
pub fn encode(id: u64) -> String {
    let mut symbols = Vec::with_capacity(encoded_len(id));
    let mut id = id;
    while id > BASE - 1 {
        symbols.push(symbol(id % BASE));
        id /= BASE;
    }
    symbols.push(symbol(id));
    symbols.reverse();
    symbols.into_iter().map(char::from).collect()
}

/// Decodes a key produced by [`encode`].
///
/// Leading `a` symbols carry no value, so `"ab"` and `"b"` both decode to 1.
///
/// # Examples
///
/// ```
/// use mvc_base65::Base65Error;
///
/// assert_eq!(mvc_base65::decode("ba"), Ok(65));
/// assert_eq!(
///     mvc_base65::decode("b!"),
///     Err(Base65Error::InvalidSymbol { symbol: '!', position: 1 })
/// );
/// ```
pub fn decode(key: &str) -> Base65Result<u64> {
    if key.is_empty() {
        log::debug!("rejecting empty base-65 key");
        return Err(Base65Error::Empty);
    }

    key.chars()
        .enumerate()
        .try_fold(0_u64, |id, (position, symbol)| {
            let Some(value) = value_of(symbol) else {
                log::debug!("rejecting base-65 key: {symbol:?} at position {position}");
                return Err(Base65Error::InvalidSymbol { symbol, position });
            };
            id.checked_mul(BASE)
                .and_then(|id| id.checked_add(value))
                .ok_or(Base65Error::Overflow)
        })
}

/// Number of symbols [`encode`] produces for the identifier.
pub fn encoded_len(id: u64) -> usize {
    let mut len = 1;
    let mut id = id;
    while id > BASE - 1 {
        id /= BASE;
        len += 1;
    }
    len
}

#[allow(clippy::cast_possible_truncation)]
fn symbol(value: u64) -> u8 {
    SYMBOLS[value as usize]
}

fn value_of(symbol: char) -> Option<u64> {
    let byte = u8::try_from(symbol).ok()?;
    match VALUES[usize::from(byte)] {
        NOT_A_SYMBOL => None,
        value => Some(u64::from(value)),
    }
}
