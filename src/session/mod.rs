// Vocabulary sessions — the process → mark-learned → finalize lifecycle.
//
// A session wraps one subtitle file. `process` runs the whole pipeline
// (extract, classify, tokenize, rank, filter known words) and freezes the
// resulting items. The user then flips `learned` on some of them, and
// `finalize` merges the learned words into the known-word store and reports
// the most frequent words that are still unknown.
//
// Created ──process──▶ Processed ──finalize──▶ Finalized
//                       │    ▲
//                       └────┘ mark_learned

pub mod repo;

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::{Result, SubscoutError};
use crate::frequency::FrequencyTable;
use crate::language::{self, Language};
use crate::subtitle::{self, SubtitleKind};

pub use repo::SessionRepo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Created,
    Processed,
    Finalized,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionState::Created => "created",
            SessionState::Processed => "processed",
            SessionState::Finalized => "finalized",
        })
    }
}

/// An unknown word found while processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub word: String,
    /// Occurrences across the whole subtitle, known words included in the stream
    pub frequency: usize,
    pub learned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeSummary {
    /// Most frequent words left unlearned
    pub top_words: Vec<String>,
    pub learned_count: usize,
    pub total_count: usize,
}

/// What the caller learns right after an upload, before processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPreview {
    /// Language guess over the whole file, markup included
    pub language: Language,
    /// Declared styles; empty for flat subtitles
    pub styles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// Original file name as given by the user
    pub filename: String,
    pub subtitle_path: PathBuf,
    pub kind: SubtitleKind,
    pub created_at: DateTime<Utc>,
    state: SessionState,
    language: Option<Language>,
    style: Option<String>,
    items: Vec<VocabularyItem>,
    summary: Option<FinalizeSummary>,
}

fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

impl Session {
    /// Start a session on a subtitle file that is already on disk.
    pub fn open(path: &Path) -> Result<Self> {
        let kind = SubtitleKind::from_path(path)?;
        let created_at = Utc::now();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            id: new_session_id(),
            filename,
            subtitle_path: path.to_path_buf(),
            kind,
            created_at,
            state: SessionState::Created,
            language: None,
            style: None,
            items: Vec::new(),
            summary: None,
        })
    }

    /// Store uploaded subtitle bytes in the upload directory and start a
    /// session on the copy.
    ///
    /// Rejects unsupported extensions, oversized uploads and content that is
    /// not UTF-8 before anything is written.
    pub fn upload(config: &Config, filename: &str, bytes: &[u8]) -> Result<(Self, UploadPreview)> {
        // Keep only the final path component of a user-supplied name
        let filename = Path::new(filename)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let kind = SubtitleKind::from_path(Path::new(&filename))?;

        if bytes.len() > config.max_upload_size {
            return Err(SubscoutError::UploadTooLarge {
                size: bytes.len(),
                max: config.max_upload_size,
            });
        }

        let content = subtitle::decode(bytes, Path::new(&filename))?;
        let preview_language = language::detect(&content);

        let created_at = Utc::now();
        let id = new_session_id();
        fs::create_dir_all(&config.upload_dir)?;
        let subtitle_path = config.upload_dir.join(format!("{id}_{filename}"));
        // Never overwrite another session's upload
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&subtitle_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;

        let styles = match kind {
            SubtitleKind::Styled => subtitle::extract_styles(&subtitle_path),
            SubtitleKind::Flat => Vec::new(),
        };

        info!(
            session = %id,
            file = %filename,
            language = %preview_language,
            styles = styles.len(),
            "Subtitle uploaded"
        );

        let session = Self {
            id,
            filename,
            subtitle_path,
            kind,
            created_at,
            state: SessionState::Created,
            language: None,
            style: None,
            items: Vec::new(),
            summary: None,
        };
        Ok((
            session,
            UploadPreview {
                language: preview_language,
                styles,
            },
        ))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Detected language; `None` until processed.
    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    /// Finalize result; `None` until finalized.
    pub fn summary(&self) -> Option<&FinalizeSummary> {
        self.summary.as_ref()
    }

    fn ensure(&self, expected: SessionState, operation: &'static str) -> Result<()> {
        if self.state != expected {
            return Err(SubscoutError::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }

    /// Run the vocabulary pipeline and freeze the unknown words.
    ///
    /// Styled subtitles need a style. On any failure the session stays in
    /// `Created` with no items, so the caller can retry (e.g. with another
    /// style name).
    pub fn process(&mut self, engine: &Engine, style: Option<&str>) -> Result<&[VocabularyItem]> {
        self.ensure(SessionState::Created, "process")?;

        let extracted = subtitle::parse(&self.subtitle_path, self.kind, style)?;
        if self.kind == SubtitleKind::Styled && style.is_none() {
            return Err(SubscoutError::StyleRequired {
                available: extracted.styles,
            });
        }

        let content = extracted.lines.join("\n");
        let language = language::detect(&content);
        let tokenizer = engine.tokenizer_for(language)?;
        let table = FrequencyTable::from_tokens(tokenizer.tokenize(&content));

        let store = engine.store(language)?;
        let unknown = store.filter_unknown(&table.ranked_words())?;

        self.items = unknown
            .into_iter()
            .map(|word| VocabularyItem {
                frequency: table.count(&word),
                word,
                learned: false,
            })
            .collect();
        self.language = Some(language);
        self.style = style.map(str::to_string);
        self.state = SessionState::Processed;

        info!(
            session = %self.id,
            language = %language,
            lines = extracted.lines.len(),
            tokens = table.total(),
            distinct = table.len(),
            unknown = self.items.len(),
            "Session processed"
        );
        Ok(&self.items)
    }

    /// Mark words as learned. Unknown words are ignored; repeating a word is
    /// harmless. Returns how many items changed.
    pub fn mark_learned<S: AsRef<str>>(&mut self, words: &[S]) -> Result<usize> {
        self.ensure(SessionState::Processed, "mark words in")?;

        let wanted: HashSet<&str> = words.iter().map(|w| w.as_ref()).collect();
        let mut changed = 0;
        for item in self.items.iter_mut() {
            if !item.learned && wanted.contains(item.word.as_str()) {
                item.learned = true;
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// The `n` most frequent unlearned words; ties keep processing order.
    pub fn top_unknown(&self, n: usize) -> Vec<&VocabularyItem> {
        let mut remaining: Vec<&VocabularyItem> =
            self.items.iter().filter(|item| !item.learned).collect();
        remaining.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        remaining.truncate(n);
        remaining
    }

    /// Merge learned words into the known-word store and close the session.
    ///
    /// If the store write fails nothing is merged and the session stays
    /// `Processed`, so finalize can be retried.
    pub fn finalize(&mut self, engine: &Engine) -> Result<&FinalizeSummary> {
        self.ensure(SessionState::Processed, "finalize")?;
        let Some(language) = self.language else {
            return Err(SubscoutError::InvalidState {
                operation: "finalize",
                state: self.state,
            });
        };

        let learned: BTreeSet<String> = self
            .items
            .iter()
            .filter(|item| item.learned)
            .map(|item| item.word.clone())
            .collect();

        engine.store(language)?.save(&learned)?;

        let summary = FinalizeSummary {
            top_words: self
                .top_unknown(engine.config().top_n)
                .into_iter()
                .map(|item| item.word.clone())
                .collect(),
            learned_count: learned.len(),
            total_count: self.items.len(),
        };

        info!(
            session = %self.id,
            learned = summary.learned_count,
            total = summary.total_count,
            "Session finalized"
        );

        self.state = SessionState::Finalized;
        Ok(self.summary.insert(summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(items: &[(&str, usize)]) -> Session {
        let mut session = Session::open(Path::new("episode.srt")).unwrap();
        session.items = items
            .iter()
            .map(|(w, f)| VocabularyItem {
                word: w.to_string(),
                frequency: *f,
                learned: false,
            })
            .collect();
        session.language = Some(Language::English);
        session.state = SessionState::Processed;
        session
    }

    #[test]
    fn open_rejects_unknown_extension() {
        assert!(matches!(
            Session::open(Path::new("movie.mkv")),
            Err(SubscoutError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn mark_learned_is_idempotent() {
        let mut session = processed(&[("zebra", 5), ("gamma", 5), ("alpha", 9)]);
        assert_eq!(session.mark_learned(&["zebra", "nope"]).unwrap(), 1);
        assert_eq!(session.mark_learned(&["zebra"]).unwrap(), 0);
        assert!(session.items()[0].learned);
        assert!(!session.items()[1].learned);
    }

    #[test]
    fn mark_learned_requires_processed() {
        let mut session = Session::open(Path::new("episode.srt")).unwrap();
        let err = session.mark_learned(&["word"]).unwrap_err();
        assert!(matches!(
            err,
            SubscoutError::InvalidState {
                state: SessionState::Created,
                ..
            }
        ));
    }

    #[test]
    fn top_unknown_orders_by_frequency_then_position() {
        let mut session = processed(&[("b", 2), ("x", 3), ("c", 2), ("a", 3)]);
        session.mark_learned(&["a"]).unwrap();
        let top: Vec<&str> = session.top_unknown(2).iter().map(|i| i.word.as_str()).collect();
        assert_eq!(top, vec!["x", "b"]);
    }

    #[test]
    fn state_serializes_lowercase() {
        let json = serde_json::to_string(&SessionState::Processed).unwrap();
        assert_eq!(json, "\"processed\"");
    }
}
