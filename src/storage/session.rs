use std::{fs, io::ErrorKind, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    models::admin::AdminState,
    storage::{SessionStorage, StorageError},
};

#[derive(Serialize, Deserialize, Default)]
struct SessionFile {
    state: AdminState,
}

/// Remembers the admin gate state between invocations.
pub struct JsonSessionFile {
    path: PathBuf,
}

impl JsonSessionFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStorage for JsonSessionFile {
    fn load_session(&self) -> Result<AdminState, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AdminState::Anonymous),
            Err(e) => {
                return Err(StorageError::LoadFailed {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let session: SessionFile =
            serde_json::from_str(&content).map_err(|e| StorageError::ParseFailed {
                path: self.path.clone(),
                source: e,
            })?;
        Ok(session.state)
    }

    fn save_session(&self, state: AdminState) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&SessionFile { state })
            .map_err(|e| StorageError::SerializeFailed { source: e })?;
        fs::write(&self.path, json).map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_session_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = JsonSessionFile::new(dir.path().join("session.json"));

        assert_eq!(sessions.load_session().unwrap(), AdminState::Anonymous);
    }

    #[test]
    fn test_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let sessions = JsonSessionFile::new(path.clone());

        sessions.save_session(AdminState::Authenticated).unwrap();
        assert_eq!(sessions.load_session().unwrap(), AdminState::Authenticated);
        assert!(fs::read_to_string(&path).unwrap().contains("\"authenticated\""));

        sessions.save_session(AdminState::Anonymous).unwrap();
        assert_eq!(sessions.load_session().unwrap(), AdminState::Anonymous);
    }

    #[test]
    fn test_garbage_session_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "authenticated").unwrap();

        let result = JsonSessionFile::new(path).load_session();

        assert!(matches!(result, Err(StorageError::ParseFailed { .. })));
    }
}
