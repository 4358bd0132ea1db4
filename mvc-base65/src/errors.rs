pub type Base65Result<T> = Result<T, Base65Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Base65Error {
    #[error("Cannot decode an empty key")]
    Empty,
    #[error("Invalid base-65 symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },
    #[error("Decoded value does not fit in 64 bits")]
    Overflow,
}
