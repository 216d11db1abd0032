// Session snapshots on disk.
//
// The CLI runs one command per process, so a session has to outlive the
// process between `scan`, `learn` and `finalize`. Each session is written
// as pretty JSON to `<cache>/<id>.json`.

use std::fs;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::debug;

use super::Session;
use crate::config::Config;
use crate::error::{Result, SubscoutError};

pub struct SessionRepo {
    dir: PathBuf,
}

impl SessionRepo {
    pub fn new(config: &Config) -> Self {
        Self {
            dir: config.cache_dir.clone(),
        }
    }

    fn path_for(&self, id: &str) -> Option<PathBuf> {
        let valid = !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        valid.then(|| self.dir.join(format!("{id}.json")))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let path = self
            .path_for(&session.id)
            .ok_or_else(|| SubscoutError::SessionNotFound(session.id.clone()))?;
        fs::create_dir_all(&self.dir)?;

        let temp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(temp.as_file(), session)?;
        temp.persist(&path).map_err(|e| e.error)?;

        debug!(session = %session.id, path = %path.display(), "Session saved");
        Ok(())
    }

    pub fn load(&self, id: &str) -> Result<Session> {
        let path = self
            .path_for(id)
            .filter(|p| p.exists())
            .ok_or_else(|| SubscoutError::SessionNotFound(id.to_string()))?;
        let content = fs::read(&path)?;
        Ok(serde_json::from_slice(&content)?)
    }

    /// All saved sessions, oldest first. Unreadable snapshots are skipped.
    pub fn list(&self) -> Result<Vec<Session>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut sessions = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match fs::read(&path)
                .map_err(SubscoutError::from)
                .and_then(|bytes| Ok(serde_json::from_slice::<Session>(&bytes)?))
            {
                Ok(session) => sessions.push(session),
                Err(e) => debug!(path = %path.display(), error = %e, "Skipping unreadable session"),
            }
        }
        sessions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(sessions)
    }
}
