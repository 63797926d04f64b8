use thiserror::Error;

/// Everything that can go wrong while building a code or moving a message
/// through it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HuffmanError {
    #[error("input is empty, there is nothing to build a code from")]
    EmptyInput,
    #[error("frequency table has no entries")]
    EmptyAlphabet,
    #[error("symbol at position {position} has no codeword")]
    UnknownSymbol { position: usize },
    /// `tree` is `None` when no tree has been built yet.
    #[error("stream was not produced by the current tree (stream {stream:?}, tree {tree:?})")]
    StaleTreeMismatch {
        stream: Option<u64>,
        tree: Option<u64>,
    },
    /// `position` is the number of bits consumed when the walk failed.
    #[error("stream ends inside a codeword after {position} bits")]
    MalformedStream { position: usize },
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit { position: usize, found: char },
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
