use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A character of a text key has no single-byte form in the encoding
    /// the hash reads text as.
    #[error("character {ch:?} at index {index} is not representable in {encoding}")]
    InvalidInputEncoding {
        index: usize,
        ch: char,
        encoding: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
