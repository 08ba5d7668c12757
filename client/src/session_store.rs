use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::user_session::UserSession;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("session file error: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("session file is not valid json: {path}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("session lock poisoned")]
    Poisoned,
}

/// Where the session lives between requests.
///
/// The only writers are sign-in, sign-out and the unauthorized-response
/// handler, so implementations only need to keep a single read or write atomic.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<UserSession, StoreError>;
    fn save(&self, session: &UserSession) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<UserSession>,
}

impl MemorySessionStore {
    pub fn new(session: UserSession) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<UserSession, StoreError> {
        let session = self.session.read().map_err(|_| StoreError::Poisoned)?;
        Ok(session.clone())
    }

    fn save(&self, session: &UserSession) -> Result<(), StoreError> {
        let mut current = self.session.write().map_err(|_| StoreError::Poisoned)?;
        *current = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.save(&UserSession::default())
    }
}

/// Durable store: a JSON document with a `token` and a `user` key.
///
/// A missing file reads as an anonymous session. Clearing removes the file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<UserSession, StoreError> {
        let _guard = self.guard.lock().map_err(|_| StoreError::Poisoned)?;
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(UserSession::default());
            }
            Err(error) => return Err(self.io_error(error)),
        };
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, session: &UserSession) -> Result<(), StoreError> {
        let _guard = self.guard.lock().map_err(|_| StoreError::Poisoned)?;
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|error| self.io_error(error))?;
        let content = serde_json::to_string_pretty(session).map_err(|source| {
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        // Owner-only staging file, renamed over the session in one step.
        let mut staging = NamedTempFile::new_in(parent).map_err(|error| self.io_error(error))?;
        staging
            .write_all(content.as_bytes())
            .map_err(|error| self.io_error(error))?;
        staging
            .persist(&self.path)
            .map_err(|error| self.io_error(error.error))?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.guard.lock().map_err(|_| StoreError::Poisoned)?;
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session removed");
                Ok(())
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(self.io_error(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::UserInfo;

    fn session() -> UserSession {
        UserSession::new(
            "token-123",
            UserInfo {
                id: 42,
                username: Some("ada".to_owned()),
                email: Some("ada@example.com".to_owned()),
                first_name: Some("Ada".to_owned()),
                last_name: Some("Lovelace".to_owned()),
                phone_number: None,
                role: Some("Customer".to_owned()),
                created_at: "2024-05-01T10:00:00.1234567".to_owned(),
            },
        )
    }

    #[test]
    fn test_memory_store_save_load_clear() {
        let store = MemorySessionStore::default();
        assert_eq!(store.load().unwrap(), UserSession::default());

        store.save(&session()).unwrap();
        assert_eq!(store.load().unwrap(), session());

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), UserSession::default());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.load().unwrap(), UserSession::default());
        store.save(&session()).unwrap();

        let reopened = FileSessionStore::new(store.path().to_path_buf());
        assert_eq!(reopened.load().unwrap(), session());

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["token"], "token-123");
        assert_eq!(raw["user"]["createdAt"], "2024-05-01T10:00:00.1234567");
    }

    #[test]
    fn test_file_store_clear_removes_both_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.save(&session()).unwrap();

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert_eq!(store.load().unwrap(), UserSession::default());

        // clearing an already anonymous session is fine
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.save(&session()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "session file mode {mode:o}");
        // only the session file is left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileSessionStore::new(path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
    }
}
