use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::error::WordError;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// The secret word for a round: non-empty, lowercase ASCII letters only.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Word(String);

impl Word {
    /// Normalizes `raw` (trim, lowercase) and rejects anything that is not a
    /// non-empty run of ASCII letters.
    pub fn parse(raw: &str) -> Result<Self, WordError> {
        let word = raw.trim().to_ascii_lowercase();
        if word.is_empty() {
            return Err(WordError::EmptyWord);
        }
        if !word.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(WordError::InvalidWord(raw.to_string()));
        }
        Ok(Self(word))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Distinct letters of the word.
    pub fn letters(&self) -> HashSet<char> {
        self.0.chars().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(letter)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supplies the secret word for each new round.
///
/// Implementations should return lowercase alphabetic words; the game state
/// validates every value it receives and refuses anything else.
pub trait WordSource {
    fn random_word(&mut self) -> String;
}

/// Picks words uniformly at random from a fixed list.
pub struct WordBank {
    words: Vec<Word>,
    rng: StdRng,
}

impl WordBank {
    /// Builds a bank over `words`. A `seed` makes the sequence of picks
    /// reproducible; without one the generator is seeded from the OS.
    pub fn new(words: Vec<Word>, seed: Option<u64>) -> Result<Self, WordError> {
        if words.is_empty() {
            return Err(WordError::EmptyWordBank);
        }
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Ok(Self { words, rng })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordSource for WordBank {
    fn random_word(&mut self) -> String {
        // The bank is never empty, so `choose` only misses if that changes.
        self.words
            .choose(&mut self.rng)
            .map(|word| word.as_str().to_string())
            .unwrap_or_default()
    }
}

/// Hands out a scripted sequence of words, wrapping around at the end.
#[derive(Clone, Debug, Default)]
pub struct FixedWords {
    words: Vec<String>,
    next: usize,
}

impl FixedWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl WordSource for FixedWords {
    fn random_word(&mut self) -> String {
        if self.words.is_empty() {
            return String::new();
        }
        let word = self.words[self.next % self.words.len()].clone();
        self.next = (self.next + 1) % self.words.len();
        word
    }
}

fn parse_line(line: &str) -> Option<Word> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Word::parse(line).ok()
}

pub fn load_wordbank_from_str(data: &str) -> Vec<Word> {
    data.lines().filter_map(parse_line).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, WordError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = parse_line(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_parse_normalizes_case_and_whitespace() {
        let word = Word::parse("  CaT \n").unwrap();
        assert_eq!(word.as_str(), "cat");
        assert_eq!(word.len(), 3);
    }

    #[test]
    fn test_word_parse_rejects_empty() {
        assert!(matches!(Word::parse(""), Err(WordError::EmptyWord)));
        assert!(matches!(Word::parse("   "), Err(WordError::EmptyWord)));
    }

    #[test]
    fn test_word_parse_rejects_non_letters() {
        assert!(matches!(Word::parse("c4t"), Err(WordError::InvalidWord(_))));
        assert!(matches!(Word::parse("ice cream"), Err(WordError::InvalidWord(_))));
        assert!(matches!(Word::parse("café"), Err(WordError::InvalidWord(_))));
    }

    #[test]
    fn test_word_letters_are_distinct() {
        let word = Word::parse("banana").unwrap();
        let letters = word.letters();
        assert_eq!(letters.len(), 3);
        assert!(letters.contains(&'b'));
        assert!(letters.contains(&'a'));
        assert!(letters.contains(&'n'));
    }

    #[test]
    fn test_embedded_wordbank_is_usable() {
        let words = load_wordbank_from_str(EMBEDDED_WORDBANK);
        assert!(words.len() > 50);
        assert!(words.iter().all(|w| w.as_str().chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn test_load_wordbank_skips_comments_blanks_and_junk() {
        let data = "# animals\nCat\n\n  dog  \nbad word\n42\nemu\n";
        let words = load_wordbank_from_str(data);
        let words: Vec<&str> = words.iter().map(Word::as_str).collect();
        assert_eq!(words, vec!["cat", "dog", "emu"]);
    }

    #[test]
    fn test_load_wordbank_from_missing_file() {
        let result = load_wordbank_from_file("/definitely/not/a/real/wordbank.txt");
        assert!(matches!(result, Err(WordError::Io(_))));
    }

    #[test]
    fn test_wordbank_rejects_empty_list() {
        assert!(matches!(
            WordBank::new(Vec::new(), Some(1)),
            Err(WordError::EmptyWordBank)
        ));
    }

    #[test]
    fn test_wordbank_picks_from_its_list() {
        let words = load_wordbank_from_str("cat\ndog\nemu");
        let mut bank = WordBank::new(words.clone(), Some(7)).unwrap();
        for _ in 0..20 {
            let picked = bank.random_word();
            assert!(words.iter().any(|w| w.as_str() == picked));
        }
    }

    #[test]
    fn test_wordbank_seed_is_reproducible() {
        let words = load_wordbank_from_str(EMBEDDED_WORDBANK);
        let mut first = WordBank::new(words.clone(), Some(42)).unwrap();
        let mut second = WordBank::new(words, Some(42)).unwrap();
        let a: Vec<String> = (0..10).map(|_| first.random_word()).collect();
        let b: Vec<String> = (0..10).map(|_| second.random_word()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_words_cycle() {
        let mut source = FixedWords::new(["cat", "dog"]);
        assert_eq!(source.random_word(), "cat");
        assert_eq!(source.random_word(), "dog");
        assert_eq!(source.random_word(), "cat");
    }

    #[test]
    fn test_fixed_words_empty_yields_empty_string() {
        let mut source = FixedWords::default();
        assert_eq!(source.random_word(), "");
    }
}
