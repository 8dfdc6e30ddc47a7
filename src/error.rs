use std::io;

use thiserror::Error;

/// Failures at the word-source boundary.
///
/// Guess rejections (duplicates, guessing after the round is over) are not
/// errors; they are reported through the player message instead.
#[derive(Debug, Error)]
pub enum WordError {
    #[error("word is empty")]
    EmptyWord,
    #[error("word {0:?} must contain only letters a-z")]
    InvalidWord(String),
    #[error("word bank contains no usable words")]
    EmptyWordBank,
    #[error("failed to read word bank: {0}")]
    Io(#[from] io::Error),
}
