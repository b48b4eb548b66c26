//! File-backed anonymous work.
//!
//! The snapshot lives in a single JSON file. A missing or unreadable file
//! reads as "no anonymous work".

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{AnonWorkSnapshot, AnonWorkStore};
use crate::model::ChatMessage;

#[derive(Debug, Clone)]
pub struct FileAnonWork {
    path: PathBuf,
}

impl FileAnonWork {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist work done before signing in.
    ///
    /// Only meaningful work is written: at least one message, or a file
    /// system holding more than its root entry. Returns whether anything
    /// was written.
    ///
    /// # Errors
    ///
    /// Serialization or filesystem failures.
    pub fn save(&self, messages: Vec<ChatMessage>, file_system_data: Map<String, Value>) -> io::Result<bool> {
        if messages.is_empty() && file_system_data.len() <= 1 {
            return Ok(false);
        }
        let snapshot = AnonWorkSnapshot { messages, file_system_data };
        let json = serde_json::to_vec_pretty(&snapshot)?;
        std::fs::write(&self.path, json)?;
        Ok(true)
    }
}

impl AnonWorkStore for FileAnonWork {
    fn get(&self) -> Option<AnonWorkSnapshot> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read anonymous work");
                return None;
            }
        };
        serde_json::from_slice(&bytes)
            .inspect_err(|e| tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed anonymous work"))
            .ok()
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "failed to clear anonymous work"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(dir: &tempfile::TempDir) -> FileAnonWork {
        FileAnonWork::new(dir.path().join("anon-work.json"))
    }

    fn root_only() -> Map<String, Value> {
        let mut fs = Map::new();
        fs.insert("/".into(), json!({}));
        fs
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store(&dir).get(), None);
    }

    #[test]
    fn saved_snapshot_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let anon = store(&dir);
        let messages = vec![ChatMessage::new("user", "Hello")];

        assert!(anon.save(messages.clone(), root_only()).unwrap());

        let snapshot = anon.get().unwrap();
        assert_eq!(snapshot.messages, messages);
        assert_eq!(snapshot.file_system_data, root_only());
    }

    #[test]
    fn empty_work_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let anon = store(&dir);

        assert!(!anon.save(Vec::new(), root_only()).unwrap());
        assert!(!anon.path().exists());
    }

    #[test]
    fn files_without_messages_are_saved() {
        let dir = tempfile::tempdir().unwrap();
        let anon = store(&dir);
        let mut fs = root_only();
        fs.insert("/App.jsx".into(), json!({ "type": "file", "content": "" }));

        assert!(anon.save(Vec::new(), fs).unwrap());
        assert!(anon.get().unwrap().messages.is_empty());
    }

    #[test]
    fn clear_removes_snapshot_and_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let anon = store(&dir);
        anon.save(vec![ChatMessage::new("user", "Hello")], root_only()).unwrap();

        anon.clear();
        assert_eq!(anon.get(), None);
        anon.clear();
    }

    #[test]
    fn malformed_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let anon = store(&dir);
        std::fs::write(anon.path(), b"not json").unwrap();
        assert_eq!(anon.get(), None);
    }

    #[test]
    fn structured_messages_are_read_and_kept_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let anon = store(&dir);
        let messages = json!([
            { "role": "user", "parts": [{ "type": "text", "text": "Hello" }] },
            { "role": "assistant", "content": [{ "type": "text", "text": "Hi" }] },
        ]);
        let raw = json!({ "messages": messages.clone(), "fileSystemData": { "/": {} } });
        std::fs::write(anon.path(), serde_json::to_vec(&raw).unwrap()).unwrap();

        let snapshot = anon.get().expect("snapshot should parse");
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(serde_json::to_value(&snapshot.messages).unwrap(), messages);
    }
}
