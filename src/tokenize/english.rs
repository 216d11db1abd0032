// English tokenization.
//
// Raw tokens come from Unicode word boundaries (UAX #29), which already keep
// "don't", "1,000" and "U.S" together and split punctuation into tokens of
// its own. On top of that: whitespace is dropped, a single period directly
// after a word is reattached so abbreviations like "Mr." survive as one
// token, runs of periods become one ellipsis token, and clitics are split off
// ("don't" -> "do" + "n't"). The period is stripped again before the
// dictionary lookup.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use regex_lite::Regex;
use tracing::info;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Result, SubscoutError};

static CLITIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)(n['’]t|['’]s|['’]re|['’]ve|['’]ll|['’]d|['’]m)$")
        .expect("clitic pattern is valid")
});

/// Dictionary used to decide whether a token is a real English word.
pub trait Lexicon: Send + Sync {
    /// Case-insensitive membership test.
    fn contains(&self, word: &str) -> bool;
}

/// A lexicon backed by a plain word list, one word per line
/// (`/usr/share/dict/words` style). Inflected forms must be listed
/// explicitly.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SubscoutError::ResourceUnavailable {
            resource: "English word list",
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let list = Self::from_words(content.lines().map(str::trim).filter(|w| !w.is_empty()));

        info!(path = %path.display(), words = list.len(), "Loaded English word list");
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Lexicon for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}

#[derive(Clone)]
pub struct EnglishTokenizer {
    lexicon: Arc<dyn Lexicon>,
}

impl EnglishTokenizer {
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Split text into raw tokens without any filtering.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        // Last pushed token is a whole word that touches the next segment
        let mut after_word = false;
        let mut segments = text.split_word_bounds().peekable();

        while let Some(segment) = segments.next() {
            if segment.chars().all(char::is_whitespace) {
                after_word = false;
                continue;
            }

            if segment == "." {
                let mut dots = 1;
                while segments.next_if_eq(&".").is_some() {
                    dots += 1;
                }
                if dots == 1 && after_word {
                    if let Some(word) = tokens.last_mut() {
                        word.push('.');
                    }
                } else {
                    tokens.push(".".repeat(dots));
                }
                after_word = false;
                continue;
            }

            match CLITIC.captures(segment) {
                Some(caps) => {
                    tokens.push(caps[1].to_string());
                    tokens.push(caps[2].to_string());
                    // "don't." ends a sentence; the period stays separate
                    after_word = false;
                }
                None => {
                    tokens.push(segment.to_string());
                    after_word = segment.chars().next_back().is_some_and(char::is_alphanumeric);
                }
            }
        }
        tokens
    }

    /// Turn a raw token into a word, or reject it.
    ///
    /// A single trailing period is removed first. A word must be longer than
    /// one character, start with an ASCII letter and be in the lexicon. Only
    /// the first character is checked for being a letter.
    pub fn accept(&self, raw: &str) -> Option<String> {
        let token = match raw.strip_suffix('.') {
            Some(stripped) if !stripped.contains('.') => stripped,
            _ => raw,
        };

        let starts_with_letter = token.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if token.chars().count() > 1 && starts_with_letter && self.lexicon.contains(token) {
            Some(token.to_lowercase())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer(words: &[&str]) -> EnglishTokenizer {
        EnglishTokenizer::new(Arc::new(WordList::from_words(words)))
    }

    #[test]
    fn split_keeps_abbreviation_period() {
        let t = tokenizer(&[]);
        assert_eq!(
            t.split("Hello, world. Mr. Smith runs!"),
            vec!["Hello", ",", "world.", "Mr.", "Smith", "runs", "!"]
        );
    }

    #[test]
    fn split_peels_ellipsis_and_quotes() {
        let t = tokenizer(&[]);
        assert_eq!(t.split("\"Wait...\""), vec!["\"", "Wait", "...", "\""]);
        assert_eq!(t.split("'cause"), vec!["'", "cause"]);
        assert_eq!(t.split("..."), vec!["..."]);
    }

    #[test]
    fn split_separates_clitics() {
        let t = tokenizer(&[]);
        assert_eq!(t.split("don't"), vec!["do", "n't"]);
        assert_eq!(t.split("It's"), vec!["It", "'s"]);
        assert_eq!(t.split("we’ll"), vec!["we", "’ll"]);
    }

    #[test]
    fn split_handles_markup_and_numbers() {
        let t = tokenizer(&[]);
        assert_eq!(
            t.split("<i>Run</i> 1,000 times"),
            vec!["<", "i", ">", "Run", "<", "/", "i", ">", "1,000", "times"]
        );
    }

    #[test]
    fn split_breaks_dashes_and_slashes() {
        let t = tokenizer(&[]);
        assert_eq!(
            t.split("well--I said and/or"),
            vec!["well", "-", "-", "I", "said", "and", "/", "or"]
        );
    }

    #[test]
    fn split_keeps_sentence_period_apart_from_clitic() {
        let t = tokenizer(&[]);
        assert_eq!(t.split("Don't."), vec!["Do", "n't", "."]);
        assert_eq!(t.split("U.S. troops"), vec!["U.S.", "troops"]);
    }

    #[test]
    fn accept_strips_single_trailing_period() {
        let t = tokenizer(&["mr", "u.s"]);
        assert_eq!(t.accept("Mr.").as_deref(), Some("mr"));
        // Two periods: nothing is stripped, "u.s." is not in the list
        assert_eq!(t.accept("U.S."), None);
    }

    #[test]
    fn accept_checks_only_first_character() {
        let t = tokenizer(&["a1", "x-ray", "9am"]);
        assert_eq!(t.accept("A1").as_deref(), Some("a1"));
        assert_eq!(t.accept("X-ray").as_deref(), Some("x-ray"));
        assert_eq!(t.accept("9am"), None);
    }

    #[test]
    fn accept_rejects_single_letters() {
        let t = tokenizer(&["a", "i"]);
        assert_eq!(t.accept("I"), None);
        assert_eq!(t.accept("a."), None);
    }

    #[test]
    fn word_list_loads_one_word_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words");
        fs::write(&path, "hello\nWorld\n\n  run  \n").unwrap();

        let list = WordList::load(&path).unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.contains("HELLO"));
        assert!(list.contains("world"));
        assert!(list.contains("run"));
        assert!(!list.contains("runs"));
    }

    #[test]
    fn missing_word_list_is_resource_error() {
        let err = WordList::load(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, SubscoutError::ResourceUnavailable { .. }));
    }
}
