// Language classification — a script-ratio heuristic.
//
// Subtitles are either English or Japanese. Japanese text is recognised by
// the share of characters falling in the CJK span (radicals, kana and
// unified ideographs); anything under the threshold is treated as English.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Share of CJK characters above which text counts as Japanese.
pub const JAPANESE_THRESHOLD: f64 = 0.10;

/// A subtitle language. The short codes double as on-disk identifiers
/// (`known-words.en.txt`, `known-words.jp.txt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "jp")]
    Japanese,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Japanese];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Japanese => "jp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::English),
            "jp" => Ok(Language::Japanese),
            other => Err(format!("invalid language '{other}', use 'en' or 'jp'")),
        }
    }
}

fn is_cjk(c: char) -> bool {
    ('\u{2E80}'..='\u{9FFF}').contains(&c)
}

/// Fraction of characters in `text` that fall in the CJK span.
/// Returns 0.0 for empty text.
pub fn cjk_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut cjk = 0usize;
    for c in text.chars() {
        total += 1;
        if is_cjk(c) {
            cjk += 1;
        }
    }

    if total == 0 {
        return 0.0;
    }
    cjk as f64 / total as f64
}

pub fn is_japanese(text: &str) -> bool {
    cjk_ratio(text) > JAPANESE_THRESHOLD
}

/// Classify text as English or Japanese. Total: empty text is English.
pub fn detect(text: &str) -> Language {
    if is_japanese(text) {
        Language::Japanese
    } else {
        Language::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_english() {
        assert_eq!(detect(""), Language::English);
        assert_eq!(cjk_ratio(""), 0.0);
    }

    #[test]
    fn kana_counts_toward_ratio() {
        assert_eq!(detect("こんにちは"), Language::Japanese);
        assert_eq!(detect("カタカナ"), Language::Japanese);
    }

    #[test]
    fn threshold_is_strict() {
        // 1 of 10 characters is exactly 0.10, which is not above the threshold
        assert_eq!(detect("日abcdefghi"), Language::English);
        assert_eq!(detect("日本abcdefgh"), Language::Japanese);
    }

    #[test]
    fn codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>().unwrap(), lang);
        }
        assert!("fr".parse::<Language>().is_err());
    }
}
