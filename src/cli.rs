use clap::Parser;
use crate::debug_log;
use crate::game_state::{DEFAULT_MAX_GUESSES, GameInterface, GameState, Tally, UserAction};
use crate::wordbank::Word;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Hangman: guess the hidden word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list (defaults to the built-in list)
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Starting number of guesses per round; raised automatically for words with more distinct letters
    #[arg(short = 'g', long = "guesses", default_value_t = DEFAULT_MAX_GUESSES, value_parser = parse_guess_budget)]
    pub max_guesses: usize,

    /// Secret word for the first round; later rounds draw from the word list
    #[arg(short = 'w', long = "word", value_parser = parse_word)]
    pub word: Option<Word>,

    /// Seed for the word picker, for reproducible sessions
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Use the full-screen terminal UI instead of line prompts
    #[arg(long = "tui")]
    pub tui: bool,

    /// Write logs here instead of the default cache location
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn parse_guess_budget(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("must allow at least one guess".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_word(value: &str) -> Result<Word, String> {
    Word::parse(value).map_err(|e| e.to_string())
}

// UI Input/Output functions

/// Maps one line of player input to an action. Anything that is not a
/// command is passed through as a guess; the game decides whether it counts.
pub fn parse_command(line: &str) -> UserAction {
    let input = line.trim();
    match input.to_lowercase().as_str() {
        "exit" | "quit" => UserAction::Exit,
        "new" | "next" | "again" => UserAction::NewRound,
        _ => UserAction::Guess(input.to_string()),
    }
}

pub fn display_state<W: Write>(out: &mut W, game: &GameState) -> io::Result<()> {
    let tally = game.tally();
    writeln!(out)?;
    writeln!(
        out,
        "Wins: {} of {} rounds",
        tally.rounds_won(),
        tally.rounds_played()
    )?;
    writeln!(out, "Word:          {}", game.mask_string())?;

    let guessed = game.guessed_letters();
    if guessed.is_empty() {
        writeln!(out, "Guessed:       -")?;
    } else {
        let letters: Vec<String> = guessed.iter().map(char::to_string).collect();
        writeln!(out, "Guessed:       {}", letters.join(", "))?;
    }
    writeln!(out, "Guesses left:  {}", game.remaining_guesses())?;

    if !game.message().is_empty() {
        writeln!(out, "{}", game.message())?;
    }

    if game.status().is_over() {
        writeln!(out, "Round over. Type 'new' to play again or 'exit' to quit:")
    } else {
        writeln!(out, "Guess a letter ('new' for a new word, 'exit' to quit):")
    }
}

pub fn display_exit_message<W: Write>(out: &mut W, tally: &Tally) -> io::Result<()> {
    writeln!(
        out,
        "Thanks for playing! You won {} of {} rounds.",
        tally.rounds_won(),
        tally.rounds_played()
    )
}

/// CLI implementation of the GameInterface trait
/// Reads one line per action and writes the game view as plain text
pub struct CliInterface<R: BufRead, W: Write = io::Stdout> {
    reader: R,
    writer: W,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self::with_writer(reader, io::stdout())
    }
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn with_writer(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_state(&mut self, game: &GameState) {
        if let Err(e) = display_state(&mut self.writer, game) {
            debug_log!("display_state() - write failed: {}", e);
        }
    }

    fn read_action(&mut self) -> Option<UserAction> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            // End of input ends the session.
            Ok(0) => Some(UserAction::Exit),
            Ok(_) => Some(parse_command(&line)),
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_exit_message(&mut self, tally: &Tally) {
        if let Err(e) = display_exit_message(&mut self.writer, tally) {
            debug_log!("display_exit_message() - write failed: {}", e);
        }
    }
}
