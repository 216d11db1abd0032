// Known-word store — the per-language set of words the user has learned.
//
// The set only grows: there is no removal operation. Backends implement the
// narrow `load`/`save` pair; filtering and listing are built on top, so a
// backend can be swapped without touching tokenization or ranking.
//
// Implementors: TextStore (one text file per language), SqliteStore (one
// table keyed by language and word).

pub mod text;

#[cfg(feature = "sqlite")]
pub mod sqlite;

use std::collections::{BTreeSet, HashSet};
#[cfg(feature = "sqlite")]
use std::sync::{Arc, Mutex};

use crate::config::{Config, StoreBackend};
use crate::error::Result;
use crate::language::Language;

pub use text::TextStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

pub trait KnownWordStore: Send + Sync {
    fn language(&self) -> Language;

    /// The persisted set, empty if nothing has been saved yet.
    fn load(&self) -> Result<HashSet<String>>;

    /// Merge `words` into the persisted set.
    ///
    /// Empty input is a no-op. Either every word is merged or none is.
    /// Saving words that are already known leaves the logical set unchanged.
    fn save(&self, words: &BTreeSet<String>) -> Result<()>;

    /// The candidates that are not known yet, in their original order.
    fn filter_unknown(&self, candidates: &[String]) -> Result<Vec<String>> {
        let known = self.load()?;
        Ok(candidates
            .iter()
            .filter(|w| !known.contains(w.as_str()))
            .cloned()
            .collect())
    }

    /// Every known word, sorted.
    fn list_all(&self) -> Result<Vec<String>> {
        let mut words: Vec<String> = self.load()?.into_iter().collect();
        words.sort();
        Ok(words)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }
}

/// Opens stores according to the configured backend.
///
/// Text stores serialize their own writers through a lock file; SQLite
/// stores share one connection and write in transactions.
pub struct StoreRegistry {
    config: Config,
    #[cfg(feature = "sqlite")]
    sqlite: Mutex<Option<Arc<sqlite::SharedConnection>>>,
}

impl StoreRegistry {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            #[cfg(feature = "sqlite")]
            sqlite: Mutex::new(None),
        }
    }

    pub fn open(&self, language: Language) -> Result<Box<dyn KnownWordStore>> {
        match self.config.store_backend {
            StoreBackend::Text => Ok(Box::new(TextStore::new(&self.config.home_dir, language))),
            #[cfg(feature = "sqlite")]
            StoreBackend::Sqlite => {
                let mut slot = self.sqlite.lock().unwrap_or_else(|e| e.into_inner());
                let conn = match slot.as_ref() {
                    Some(conn) => conn.clone(),
                    None => {
                        let conn = Arc::new(sqlite::SharedConnection::open(&self.config.db_path)?);
                        *slot = Some(conn.clone());
                        conn
                    }
                };
                Ok(Box::new(SqliteStore::new(conn, language)))
            }
        }
    }
}
