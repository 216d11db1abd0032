// Tokenization — text to valid vocabulary words.
//
// Each language has its own splitter and validity rule. The variant is picked
// from the classifier's output, so callers never inspect tokenizer types.

pub mod english;
pub mod japanese;

use crate::language::Language;

pub use english::{EnglishTokenizer, Lexicon, WordList};
pub use japanese::{JapaneseTokenizer, Segmenter, VibratoSegmenter};

/// A raw unit produced by a language's splitter, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub language: Language,
    pub text: String,
}

#[derive(Clone)]
pub enum Tokenizer {
    English(EnglishTokenizer),
    Japanese(JapaneseTokenizer),
}

impl Tokenizer {
    pub fn language(&self) -> Language {
        match self {
            Tokenizer::English(_) => Language::English,
            Tokenizer::Japanese(_) => Language::Japanese,
        }
    }

    /// All raw tokens in text order, valid or not.
    pub fn raw_tokens(&self, text: &str) -> Vec<Token> {
        let language = self.language();
        let pieces = match self {
            Tokenizer::English(t) => t.split(text),
            Tokenizer::Japanese(t) => t.split(text),
        };
        pieces
            .into_iter()
            .map(|text| Token { language, text })
            .collect()
    }

    /// Normalized word for a raw token, or `None` if it is not a word.
    pub fn accept(&self, token: &Token) -> Option<String> {
        match self {
            Tokenizer::English(t) => t.accept(&token.text),
            Tokenizer::Japanese(t) => t.accept(&token.text),
        }
    }

    /// The ordered stream of valid words in `text`, duplicates included.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.raw_tokens(text)
            .iter()
            .filter_map(|token| self.accept(token))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    struct Whitespace;

    impl Segmenter for Whitespace {
        fn segment(&self, text: &str) -> Vec<String> {
            text.split_whitespace().map(str::to_string).collect()
        }
    }

    #[test]
    fn english_sentence() {
        let lexicon = WordList::from_words(["hello", "world", "mr", "smith", "runs"]);
        let tokenizer = Tokenizer::English(EnglishTokenizer::new(Arc::new(lexicon)));

        assert_eq!(
            tokenizer.tokenize("Hello world. Mr. Smith runs."),
            vec!["hello", "world", "mr", "smith", "runs"]
        );
    }

    #[test]
    fn english_drops_subrip_timing_lines() {
        let lexicon = WordList::from_words(["go", "now"]);
        let tokenizer = Tokenizer::English(EnglishTokenizer::new(Arc::new(lexicon)));
        let text = "1\n00:00:01,000 --> 00:00:02,000\nGo now!\n\n2\n00:00:03,000 --> 00:00:04,000\nGo.";

        assert_eq!(tokenizer.tokenize(text), vec!["go", "now", "go"]);
    }

    #[test]
    fn japanese_keeps_script_words_only() {
        let tokenizer = Tokenizer::Japanese(JapaneseTokenizer::new(Arc::new(Whitespace)));
        assert_eq!(tokenizer.language(), Language::Japanese);
        assert_eq!(
            tokenizer.tokenize("猫 が 好き ! 猫 OK"),
            vec!["猫", "が", "好き", "猫"]
        );
    }

    #[test]
    fn raw_tokens_carry_language() {
        let tokenizer = Tokenizer::English(EnglishTokenizer::new(Arc::new(WordList::default())));
        let tokens = tokenizer.raw_tokens("Hi!");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.language == Language::English));
        assert!(tokenizer.tokenize("Hi!").is_empty());
    }
}
