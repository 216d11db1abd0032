use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Default number of unknown words reported by `finalize`.
pub const DEFAULT_TOP_N: usize = 20;

/// Default upload size limit (10 MB).
pub const DEFAULT_MAX_UPLOAD: usize = 10 * 1024 * 1024;

/// Default English word list on most Linux and macOS systems.
pub const DEFAULT_ENGLISH_DICT: &str = "/usr/share/dict/words";

/// Which known-word store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// One text file per language, one word per line (default)
    Text,
    /// A single SQLite database holding every language
    #[cfg(feature = "sqlite")]
    Sqlite,
}

/// Central configuration loaded from environment variables.
///
/// Constructed once at startup and passed to whatever needs it. The .env
/// file is loaded by the binary via dotenvy before `load` is called.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for everything subscout writes (~/.subscout)
    pub home_dir: PathBuf,
    /// Uploaded subtitle copies
    pub upload_dir: PathBuf,
    /// Session snapshots
    pub cache_dir: PathBuf,
    pub store_backend: StoreBackend,
    /// SQLite database path (only used by the sqlite backend)
    pub db_path: PathBuf,
    /// English word list used to decide what counts as a word
    pub english_dict: PathBuf,
    /// vibrato system dictionary; Japanese subtitles need this
    pub japanese_dict: Option<PathBuf>,
    /// How many unknown words `finalize` reports
    pub top_n: usize,
    pub max_upload_size: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; only Japanese processing needs an explicit
    /// SUBSCOUT_JP_DICT.
    pub fn load() -> Result<Self> {
        let home_dir = match env::var("SUBSCOUT_HOME") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::home_dir()
                .context("Cannot determine home directory; set SUBSCOUT_HOME")?
                .join(".subscout"),
        };

        let mut config = Self::with_home(&home_dir);

        config.store_backend = match env::var("SUBSCOUT_STORE").as_deref() {
            #[cfg(feature = "sqlite")]
            Ok("sqlite") => StoreBackend::Sqlite,
            Ok("text") | Err(_) => StoreBackend::Text,
            Ok(other) => anyhow::bail!(
                "Unknown SUBSCOUT_STORE value '{other}'. Use 'text'{}.",
                if cfg!(feature = "sqlite") { " or 'sqlite'" } else { "" }
            ),
        };

        if let Ok(path) = env::var("SUBSCOUT_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("SUBSCOUT_EN_DICT") {
            config.english_dict = PathBuf::from(path);
        }
        config.japanese_dict = env::var("SUBSCOUT_JP_DICT").ok().map(PathBuf::from);

        if let Ok(value) = env::var("SUBSCOUT_TOP_N") {
            config.top_n = value
                .parse()
                .with_context(|| format!("SUBSCOUT_TOP_N must be a number, got '{value}'"))?;
        }
        if let Ok(value) = env::var("SUBSCOUT_MAX_UPLOAD") {
            config.max_upload_size = value
                .parse()
                .with_context(|| format!("SUBSCOUT_MAX_UPLOAD must be a byte count, got '{value}'"))?;
        }

        Ok(config)
    }

    /// Defaults rooted at `home_dir`, without reading the environment.
    pub fn with_home(home_dir: &Path) -> Self {
        Self {
            home_dir: home_dir.to_path_buf(),
            upload_dir: home_dir.join("uploads"),
            cache_dir: home_dir.join("cache"),
            store_backend: StoreBackend::Text,
            db_path: home_dir.join("subscout.db"),
            english_dict: PathBuf::from(DEFAULT_ENGLISH_DICT),
            japanese_dict: None,
            top_n: DEFAULT_TOP_N,
            max_upload_size: DEFAULT_MAX_UPLOAD,
        }
    }

    /// Create the home, upload and cache directories. Idempotent.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.home_dir, &self.upload_dir, &self.cache_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        Ok(())
    }

    /// Check that the English word list exists.
    /// Call this before processing anything that may turn out to be English.
    pub fn require_english_dict(&self) -> Result<()> {
        if !self.english_dict.exists() {
            anyhow::bail!(
                "English word list not found at {}\n\
                 Install a word list (e.g. the `wamerican` package) or set SUBSCOUT_EN_DICT.",
                self.english_dict.display()
            );
        }
        Ok(())
    }

    /// Check that a Japanese dictionary is configured and present.
    pub fn require_japanese_dict(&self) -> Result<&Path> {
        match &self.japanese_dict {
            Some(path) if path.exists() => Ok(path),
            Some(path) => anyhow::bail!(
                "Japanese dictionary not found at {}. Check SUBSCOUT_JP_DICT.",
                path.display()
            ),
            None => anyhow::bail!(
                "SUBSCOUT_JP_DICT not set. Point it at a vibrato system dictionary \
                 (e.g. ipadic-mecab-2_7_0/system.dic.zst) to process Japanese subtitles."
            ),
        }
    }
}
