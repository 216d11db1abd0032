// SqliteStore — rusqlite backend for the known-word store.
//
// All languages share one database and one `known_words` table. The
// (language, word) primary key makes repeated saves idempotent, and each
// save runs in a single transaction so learned words are merged all at once
// or not at all.
//
// The Connection is wrapped in a std Mutex because Connection is !Sync.
// SQLite serializes writers on its own; the mutex only guards the handle.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{params, Connection};
use tracing::info;

use super::KnownWordStore;
use crate::error::Result;
use crate::language::Language;

/// Create the known-word table if it doesn't exist yet. Idempotent.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS known_words (
            language TEXT NOT NULL,            -- 'en' or 'jp'
            word TEXT NOT NULL,
            added_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (language, word)
        );
        ",
    )?;
    Ok(())
}

/// One database connection shared by every language's store.
pub struct SharedConnection {
    conn: Mutex<Connection>,
}

impl SharedConnection {
    /// Open (or create) the database and run schema creation.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::from_connection(conn)
    }

    /// Wrap an already-opened connection (e.g. `Connection::open_in_memory`).
    pub fn from_connection(conn: Connection) -> Result<Self> {
        create_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub struct SqliteStore {
    conn: Arc<SharedConnection>,
    language: Language,
}

impl SqliteStore {
    pub fn new(conn: Arc<SharedConnection>, language: Language) -> Self {
        Self { conn, language }
    }
}

impl KnownWordStore for SqliteStore {
    fn language(&self) -> Language {
        self.language
    }

    fn load(&self) -> Result<HashSet<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT word FROM known_words WHERE language = ?1")?;
        let rows = stmt.query_map(params![self.language.code()], |row| row.get::<_, String>(0))?;

        let mut words = HashSet::new();
        for word in rows {
            words.insert(word?);
        }
        Ok(words)
    }

    fn save(&self, words: &BTreeSet<String>) -> Result<()> {
        if words.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let mut inserted = 0usize;
        {
            let mut stmt =
                tx.prepare("INSERT OR IGNORE INTO known_words (language, word) VALUES (?1, ?2)")?;
            for word in words {
                inserted += stmt.execute(params![self.language.code(), word])?;
            }
        }
        tx.commit()?;

        info!(
            language = %self.language,
            requested = words.len(),
            inserted,
            "Saved known words"
        );
        Ok(())
    }
}
