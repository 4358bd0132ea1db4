//! Bijective base-65 codec turning sequential database ids into short URL keys.
//!
//! Ids are written in positional base 65 over the fixed [`ALPHABET`], most
//! significant symbol first. [`decode`] inverts [`encode`] for every `u64`.

mod codec;
mod errors;

pub use codec::{decode, encode, encoded_len, ALPHABET, ALPHABET_LEN, BASE};
pub use errors::*;
