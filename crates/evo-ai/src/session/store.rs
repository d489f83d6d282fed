//! On-disk session save/load/list.
//!
//! A saved session is a pretty-printed JSON array of `{role, content}`
//! turns in transcript order. Loading validates that the file parses to a
//! non-empty array before the caller replaces any in-memory state.

use std::path::{Path, PathBuf};

use evo_common::PersistenceError;
use tracing::info;

use crate::Turn;

/// Directory of saved sessions, one `<name>.json` per session.
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for a session name, sanitized to alphanumerics, `_` and `-`.
    /// A name that sanitizes to nothing becomes `session`.
    pub fn session_path(&self, name: &str) -> PathBuf {
        let safe: String = name
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        let safe = if safe.is_empty() {
            "session".to_string()
        } else {
            safe
        };
        self.dir.join(format!("{safe}.json"))
    }

    /// Write the turns to `<name>.json`, atomically (tmp + rename).
    pub fn save(&self, name: &str, turns: &[Turn]) -> Result<PathBuf, PersistenceError> {
        let path = self.session_path(name);
        let json = serde_json::to_string_pretty(turns)
            .map_err(|e| PersistenceError::Io(e.to_string()))?;

        std::fs::create_dir_all(&self.dir).map_err(|e| PersistenceError::Io(e.to_string()))?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json).map_err(|e| PersistenceError::Io(e.to_string()))?;
        std::fs::rename(&tmp_path, &path).map_err(|e| PersistenceError::Io(e.to_string()))?;

        info!(path = %path.display(), "session saved");
        Ok(path)
    }

    /// Read `<name>.json` back into turns.
    ///
    /// Fails without side effects when the file is missing, is not valid
    /// JSON, is not an array of turns, or is empty; the caller's transcript
    /// stays untouched in every failure case.
    pub fn load(&self, name: &str) -> Result<Vec<Turn>, PersistenceError> {
        let path = self.session_path(name);
        if !path.exists() {
            return Err(PersistenceError::NotFound(path));
        }

        let content =
            std::fs::read_to_string(&path).map_err(|e| PersistenceError::Io(e.to_string()))?;
        let turns: Vec<Turn> = serde_json::from_str(&content)
            .map_err(|e| PersistenceError::InvalidFormat(e.to_string()))?;

        if turns.is_empty() {
            return Err(PersistenceError::InvalidFormat(
                "session file holds an empty array".into(),
            ));
        }

        info!(path = %path.display(), turns = turns.len(), "session loaded");
        Ok(turns)
    }

    /// Names of all saved sessions, without the `.json` extension.
    pub fn list(&self) -> Result<Vec<String>, PersistenceError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // No directory yet means no saved sessions.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::Io(e.to_string())),
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    path.file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                } else {
                    None
                }
            })
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_turns() -> Vec<Turn> {
        vec![
            Turn::system("You are a helpful assistant."),
            Turn::user("Hi"),
            Turn::assistant("Hello!"),
        ]
    }

    #[test]
    fn round_trip_preserves_order_and_content() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());

        let turns = sample_turns();
        store.save("work", &turns).unwrap();
        let loaded = store.load("work").unwrap();
        assert_eq!(loaded, turns);
    }

    #[test]
    fn name_is_sanitized() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());

        assert_eq!(
            store.session_path("../etc/pass wd!"),
            dir.path().join("etcpasswd.json")
        );
        assert_eq!(store.session_path("!!"), dir.path().join("session.json"));
        assert_eq!(store.session_path("my-chat_2"), dir.path().join("my-chat_2.json"));
    }

    #[test]
    fn load_missing_session_fails() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(matches!(
            store.load("nope"),
            Err(PersistenceError::NotFound(_))
        ));
    }

    #[test]
    fn load_rejects_non_array_json() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        std::fs::write(store.session_path("bad"), r#"{"role":"user"}"#).unwrap();
        assert!(matches!(
            store.load("bad"),
            Err(PersistenceError::InvalidFormat(_))
        ));
    }

    #[test]
    fn load_rejects_empty_array() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        std::fs::write(store.session_path("empty"), "[]").unwrap();
        assert!(matches!(
            store.load("empty"),
            Err(PersistenceError::InvalidFormat(_))
        ));
    }

    #[test]
    fn list_returns_sorted_names_and_tolerates_missing_dir() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("does-not-exist-yet"));
        assert!(store.list().unwrap().is_empty());

        let store = SessionStore::new(dir.path());
        store.save("beta", &sample_turns()).unwrap();
        store.save("alpha", &sample_turns()).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        assert_eq!(store.list().unwrap(), vec!["alpha", "beta"]);
    }
}
