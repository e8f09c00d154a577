//! Durable session state.
//!
//! Three JSON files under the state directory, one per key, mirroring what
//! must survive a restart: the session list, the completed-session count,
//! and the staged overall title. Remaining time is deliberately not
//! persisted — a restart always resumes at a fresh, stopped work phase.
//!
//! Reads never fail: a missing or unparseable key independently falls back
//! to its default without touching the other two.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::session::state::{ListItem, Session};

const LIST_ITEMS_KEY: &str = "list-items.json";
const COMPLETED_SESSIONS_KEY: &str = "completed-sessions.json";
const PENDING_TITLE_KEY: &str = "pending-title.json";

/// The persisted subset of a session.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SavedState {
    pub items: Vec<ListItem>,
    pub completed_work_sessions: u32,
    pub pending_overall_title: String,
}

/// Key-value persistence rooted at a state directory.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write all three keys, overwriting prior values.
    pub fn save(&self, session: &Session) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        self.write_key(LIST_ITEMS_KEY, &session.items)?;
        self.write_key(COMPLETED_SESSIONS_KEY, &session.completed_work_sessions)?;
        self.write_key(PENDING_TITLE_KEY, &session.pending_overall_title)?;
        Ok(())
    }

    /// Read all three keys. Never fails; each corrupt or absent key falls
    /// back to its default value.
    pub fn load(&self) -> SavedState {
        SavedState {
            items: self.read_key(LIST_ITEMS_KEY),
            completed_work_sessions: self.read_key(COMPLETED_SESSIONS_KEY),
            pending_overall_title: self.read_key(PENDING_TITLE_KEY),
        }
    }

    /// Remove all persisted keys. Best-effort; missing files are fine.
    pub fn purge(&self) {
        for key in [LIST_ITEMS_KEY, COMPLETED_SESSIONS_KEY, PENDING_TITLE_KEY] {
            let _ = fs::remove_file(self.dir.join(key));
        }
    }

    fn write_key<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.dir.join(key);
        let json = serde_json::to_string(value).with_context(|| format!("serializing {key}"))?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    fn read_key<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let path = self.dir.join(key);
        let Ok(content) = fs::read_to_string(&path) else {
            return T::default();
        };
        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding unparseable state file");
                T::default()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::state::{ItemKind, Timing};
    use tempfile::TempDir;

    fn sample_session() -> Session {
        let mut session = Session::new(Timing::default());
        session.push_title("Quarterly report");
        session.push_work_entry("outline");
        session.complete_current_entry();
        session.push_work_entry("draft intro");
        session.completed_work_sessions = 1;
        session.pending_overall_title = "afternoon block".into();
        session
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        let session = sample_session();

        store.save(&session).unwrap();
        let saved = store.load();

        assert_eq!(saved.items, session.items);
        assert_eq!(saved.completed_work_sessions, 1);
        assert_eq!(saved.pending_overall_title, "afternoon block");
        assert_eq!(saved.items[0].kind, ItemKind::Title);
        assert!(saved.items[2].is_current());
    }

    #[test]
    fn empty_dir_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("nonexistent"));
        assert_eq!(store.load(), SavedState::default());
    }

    #[test]
    fn corrupt_key_falls_back_without_affecting_the_others() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        store.save(&sample_session()).unwrap();

        fs::write(dir.path().join(COMPLETED_SESSIONS_KEY), "not json{").unwrap();

        let saved = store.load();
        assert_eq!(saved.completed_work_sessions, 0);
        assert_eq!(saved.items.len(), 3);
        assert_eq!(saved.pending_overall_title, "afternoon block");
    }

    #[test]
    fn corrupt_list_falls_back_to_empty() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        store.save(&sample_session()).unwrap();

        fs::write(dir.path().join(LIST_ITEMS_KEY), "[{\"id\": true}]").unwrap();

        let saved = store.load();
        assert!(saved.items.is_empty());
        assert_eq!(saved.completed_work_sessions, 1);
    }

    #[test]
    fn purge_removes_every_key() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        store.save(&sample_session()).unwrap();

        store.purge();

        assert_eq!(store.load(), SavedState::default());
        assert!(!dir.path().join(LIST_ITEMS_KEY).exists());
        // Purging again is harmless.
        store.purge();
    }

    #[test]
    fn save_overwrites_prior_values() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().to_path_buf());
        store.save(&sample_session()).unwrap();

        let fresh = Session::new(Timing::default());
        store.save(&fresh).unwrap();

        let saved = store.load();
        assert!(saved.items.is_empty());
        assert_eq!(saved.completed_work_sessions, 0);
        assert!(saved.pending_overall_title.is_empty());
    }
}
