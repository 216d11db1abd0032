// System status display — known-word counts, sessions, configured resources.

use std::path::Path;

use anyhow::Result;

use crate::config::{Config, StoreBackend};
use crate::engine::Engine;
use crate::language::Language;
use crate::session::{SessionRepo, SessionState};

/// Display system status to the terminal.
pub fn show(engine: &Engine) -> Result<()> {
    let config: &Config = engine.config();

    if !config.home_dir.exists() {
        println!("Home: not initialized ({})", config.home_dir.display());
        println!("\nRun `subscout init` to set it up.");
        return Ok(());
    }
    println!("Home: {}", config.home_dir.display());

    match config.store_backend {
        StoreBackend::Text => println!("Store: text files"),
        #[cfg(feature = "sqlite")]
        StoreBackend::Sqlite => println!(
            "Store: SQLite at {} ({})",
            config.db_path.display(),
            file_size(&config.db_path)
        ),
    }

    for language in Language::ALL {
        let count = engine.store(language)?.count()?;
        println!("Known words ({language}): {count}");
    }

    println!(
        "English word list: {}",
        resource_state(&config.english_dict)
    );
    match &config.japanese_dict {
        Some(path) => println!("Japanese dictionary: {}", resource_state(path)),
        None => println!("Japanese dictionary: not configured (set SUBSCOUT_JP_DICT)"),
    }

    let sessions = SessionRepo::new(config).list()?;
    let open = sessions
        .iter()
        .filter(|s| s.state() != SessionState::Finalized)
        .count();
    println!("Sessions: {} total, {} open", sessions.len(), open);

    Ok(())
}

fn resource_state(path: &Path) -> String {
    if path.exists() {
        format!("{} ({})", path.display(), file_size(path))
    } else {
        format!("{} (missing)", path.display())
    }
}

fn file_size(path: &Path) -> String {
    std::fs::metadata(path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
