use std::collections::HashSet;

use crate::debug_log;
use crate::error::WordError;
use crate::wordbank::{Word, WordSource};

/// Starting guess budget when none is configured.
pub const DEFAULT_MAX_GUESSES: usize = 10;
/// Shown in the mask for letters not yet guessed.
pub const PLACEHOLDER: char = '_';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Rounds finished and rounds won during this session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    rounds_played: u32,
    rounds_won: u32,
}

impl Tally {
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }

    /// Fraction of finished rounds that were won, `None` before the first one ends.
    pub fn win_rate(&self) -> Option<f64> {
        (self.rounds_played > 0).then(|| f64::from(self.rounds_won) / f64::from(self.rounds_played))
    }

    fn record(&mut self, status: RoundStatus) {
        match status {
            RoundStatus::Won => {
                self.rounds_played += 1;
                self.rounds_won += 1;
            }
            RoundStatus::Lost => self.rounds_played += 1,
            RoundStatus::InProgress => {}
        }
    }
}

/// What `submit_guess` did with its input. Purely informational.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Input was not a single letter; nothing changed.
    Ignored,
    /// The round had already ended; only the message changed.
    AlreadyFinished(RoundStatus),
    /// The letter was guessed earlier this round; only the message changed.
    AlreadyGuessed(char),
    Accepted {
        letter: char,
        hit: bool,
        status: RoundStatus,
    },
}

/// One session of the guessing game: the current round plus the running tally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    word: Word,
    letters: HashSet<char>,
    guessed: Vec<char>,
    max_guesses: usize,
    status: RoundStatus,
    tally: Tally,
    message: String,
}

impl GameState {
    /// Starts the first round with `word`.
    ///
    /// The guess budget is never smaller than the number of distinct letters in
    /// the word, so every round can be won.
    pub fn new(word: Word, configured_max_guesses: usize) -> Self {
        let letters = word.letters();
        let max_guesses = configured_max_guesses.max(letters.len());
        log::info!(
            "New game: {} letters, {} guesses allowed",
            word.len(),
            max_guesses
        );
        Self {
            word,
            letters,
            guessed: Vec::new(),
            max_guesses,
            status: RoundStatus::InProgress,
            tally: Tally::default(),
            message: String::new(),
        }
    }

    /// Starts the first round with a word drawn from `source`.
    pub fn from_source<S: WordSource + ?Sized>(
        source: &mut S,
        configured_max_guesses: usize,
    ) -> Result<Self, WordError> {
        let word = Word::parse(&source.random_word())?;
        Ok(Self::new(word, configured_max_guesses))
    }

    /// Submits one guess. Input is case-insensitive and must be exactly one
    /// ASCII letter; anything else is ignored without touching the state.
    pub fn submit_guess(&mut self, input: &str) -> GuessOutcome {
        let Some(letter) = normalize_guess(input) else {
            debug_log!("Ignoring guess input {:?}", input);
            return GuessOutcome::Ignored;
        };

        if self.status.is_over() {
            self.message = match self.status {
                RoundStatus::Won => "You've already won this round. Start a new round to play again.",
                _ => "You've already lost this round. Start a new round to play again.",
            }
            .to_string();
            return GuessOutcome::AlreadyFinished(self.status);
        }

        if self.guessed.contains(&letter) {
            self.message = format!("You've already guessed the letter \"{letter}\"!");
            return GuessOutcome::AlreadyGuessed(letter);
        }

        self.guessed.push(letter);
        let hit = self.letters.contains(&letter);
        self.status = self.evaluate();
        debug_log!(
            "Guess '{}' ({}), {} guesses left",
            letter,
            if hit { "hit" } else { "miss" },
            self.remaining_guesses()
        );

        self.message = match self.status {
            RoundStatus::InProgress => String::new(),
            RoundStatus::Won => format!("You won! The word was \"{}\".", self.word),
            RoundStatus::Lost => format!("Out of guesses. The word was \"{}\".", self.word),
        };
        if self.status.is_over() {
            self.tally.record(self.status);
            log::info!(
                "Round {:?} on \"{}\" after {} guesses; {} of {} won",
                self.status,
                self.word,
                self.guessed.len(),
                self.tally.rounds_won,
                self.tally.rounds_played
            );
        }

        GuessOutcome::Accepted {
            letter,
            hit,
            status: self.status,
        }
    }

    /// Begins a new round with a word from `source`. The guess budget only
    /// grows across rounds and the tally is kept.
    ///
    /// A word that fails validation leaves the state untouched.
    pub fn reset_round<S: WordSource + ?Sized>(&mut self, source: &mut S) -> Result<(), WordError> {
        let word = Word::parse(&source.random_word()).inspect_err(|e| {
            log::error!("Word source returned an unusable word: {e}");
        })?;
        self.letters = word.letters();
        self.word = word;
        self.max_guesses = self.max_guesses.max(self.letters.len());
        self.guessed.clear();
        self.status = RoundStatus::InProgress;
        self.message.clear();
        log::info!(
            "New round: {} letters, {} guesses allowed",
            self.word.len(),
            self.max_guesses
        );
        Ok(())
    }

    /// The word with unguessed letters replaced by [`PLACEHOLDER`].
    pub fn render_mask(&self) -> Vec<char> {
        self.word
            .as_str()
            .chars()
            .map(|c| if self.guessed.contains(&c) { c } else { PLACEHOLDER })
            .collect()
    }

    /// Mask joined with spaces for display, e.g. `c _ t`.
    pub fn mask_string(&self) -> String {
        let mask: Vec<String> = self.render_mask().iter().map(char::to_string).collect();
        mask.join(" ")
    }

    pub fn remaining_guesses(&self) -> usize {
        self.max_guesses.saturating_sub(self.guessed.len())
    }

    /// Guessed letters in the order they were submitted.
    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed
    }

    /// Guessed letters that are not in the word.
    pub fn wrong_guesses(&self) -> usize {
        self.guessed
            .iter()
            .filter(|c| !self.letters.contains(c))
            .count()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn max_guesses(&self) -> usize {
        self.max_guesses
    }

    /// The secret. Front ends should only show it once the round is over.
    pub fn word(&self) -> &Word {
        &self.word
    }

    fn evaluate(&self) -> RoundStatus {
        if self.letters.iter().all(|c| self.guessed.contains(c)) {
            RoundStatus::Won
        } else if self.guessed.len() >= self.max_guesses {
            RoundStatus::Lost
        } else {
            RoundStatus::InProgress
        }
    }
}

fn normalize_guess(input: &str) -> Option<char> {
    let mut chars = input.chars();
    let letter = chars.next()?.to_ascii_lowercase();
    if chars.next().is_some() || !letter.is_ascii_lowercase() {
        return None;
    }
    Some(letter)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    NewRound,
    Exit,
}

/// A front end the game loop can drive (line prompts or the terminal UI).
pub trait GameInterface {
    fn display_state(&mut self, game: &GameState);
    /// `None` means nothing actionable was read; the loop redisplays and asks again.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_exit_message(&mut self, tally: &Tally);
}

/// Runs rounds until the interface asks to exit, returning the session tally.
pub fn game_loop<S, I>(
    game: &mut GameState,
    source: &mut S,
    interface: &mut I,
) -> Result<Tally, WordError>
where
    S: WordSource + ?Sized,
    I: GameInterface + ?Sized,
{
    loop {
        interface.display_state(game);
        let Some(action) = interface.read_action() else {
            continue;
        };
        match action {
            UserAction::Guess(input) => {
                game.submit_guess(&input);
            }
            UserAction::NewRound => game.reset_round(source)?,
            UserAction::Exit => {
                let tally = game.tally();
                interface.display_exit_message(&tally);
                return Ok(tally);
            }
        }
    }
}
