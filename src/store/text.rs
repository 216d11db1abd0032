// TextStore — flat-file backend for the known-word store.
//
// File layout: `<home>/known-words.<code>.txt`, UTF-8, one word per line.
// Duplicate lines are allowed and blank lines are ignored on read.
//
// A save rewrites the file through a temp file in the same directory and
// renames it into place, so a failed save leaves the old contents intact.
// Read, rewrite and rename all happen under an exclusive OS lock on the
// sidecar `known-words.<code>.lock`, which serializes writers across threads
// and processes. The lock file is never renamed, so every writer locks the
// same inode.

use std::collections::{BTreeSet, HashSet};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fd_lock::RwLock;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::KnownWordStore;
use crate::error::Result;
use crate::language::Language;

pub struct TextStore {
    language: Language,
    path: PathBuf,
    lock_path: PathBuf,
}

impl TextStore {
    pub fn new(dir: &Path, language: Language) -> Self {
        Self {
            language,
            path: Self::file_path(dir, language),
            lock_path: dir.join(format!("known-words.{}.lock", language.code())),
        }
    }

    pub fn file_path(dir: &Path, language: Language) -> PathBuf {
        dir.join(format!("known-words.{}.txt", language.code()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file (and its directory) if missing.
    fn touch(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&self.path)?;
        Ok(())
    }

    fn open_lock(&self) -> Result<RwLock<File>> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)?;
        Ok(RwLock::new(file))
    }
}

impl KnownWordStore for TextStore {
    fn language(&self) -> Language {
        self.language
    }

    fn load(&self) -> Result<HashSet<String>> {
        self.touch()?;
        let content = fs::read_to_string(&self.path)?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn save(&self, words: &BTreeSet<String>) -> Result<()> {
        if words.is_empty() {
            return Ok(());
        }

        self.touch()?;
        let mut lock = self.open_lock()?;
        let _guard = lock.write()?;
        debug!(path = %self.lock_path.display(), "Acquired known-word lock");

        let mut content = fs::read(&self.path)?;
        if content.last().is_some_and(|&b| b != b'\n') {
            content.push(b'\n');
        }
        for word in words {
            content.extend_from_slice(word.as_bytes());
            content.push(b'\n');
        }

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&content)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        info!(
            language = %self.language,
            added = words.len(),
            path = %self.path.display(),
            "Saved known words"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn load_creates_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = TextStore::new(dir.path(), Language::English);
        assert!(store.load().unwrap().is_empty());
        assert!(store.path().exists());
        assert!(store.path().ends_with("known-words.en.txt"));
    }

    #[test]
    fn save_appends_sorted_lines() {
        let dir = tempfile::tempdir().unwrap();
        let store = TextStore::new(dir.path(), Language::Japanese);
        store.save(&words(&["猫", "犬"])).unwrap();
        store.save(&words(&["猫"])).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "犬\n猫\n猫\n");
        assert_eq!(store.list_all().unwrap(), vec!["犬", "猫"]);
    }

    #[test]
    fn blank_lines_and_missing_newline_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let store = TextStore::new(dir.path(), Language::English);
        fs::write(store.path(), "alpha\n\n  \nbeta").unwrap();

        store.save(&words(&["gamma"])).unwrap();
        assert_eq!(store.list_all().unwrap(), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn independent_stores_on_one_home_keep_every_word() {
        let dir = tempfile::tempdir().unwrap();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let home = dir.path().to_path_buf();
                std::thread::spawn(move || {
                    let store = TextStore::new(&home, Language::English);
                    for j in 0..10 {
                        store.save(&words(&[format!("t{i}w{j}").as_str()])).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let store = TextStore::new(dir.path(), Language::English);
        assert_eq!(store.count().unwrap(), 40);
    }

    #[test]
    fn empty_save_does_not_touch_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = TextStore::new(dir.path(), Language::English);
        store.save(&BTreeSet::new()).unwrap();
        assert!(!store.path().exists());
    }
}
