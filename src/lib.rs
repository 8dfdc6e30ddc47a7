// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::WordError;
pub use game_state::{
    DEFAULT_MAX_GUESSES, GameInterface, GameState, GuessOutcome, PLACEHOLDER, RoundStatus, Tally,
    UserAction, game_loop,
};
pub use wordbank::{
    EMBEDDED_WORDBANK, FixedWords, Word, WordBank, WordSource, load_wordbank_from_file,
    load_wordbank_from_str,
};
