use thiserror::Error;

use crate::{
    models::admin::{AdminGate, GateError},
    storage::{SessionStorage, StorageError},
};

/// Restores the gate from the session file. An unreadable session counts as
/// logged out.
pub fn load_gate(sessions: &impl SessionStorage) -> Result<AdminGate, StorageError> {
    match sessions.load_session() {
        Ok(state) => Ok(AdminGate::new(state)),
        Err(StorageError::ParseFailed { path, source }) => {
            tracing::warn!(path = %path.display(), error = %source, "ignoring unreadable admin session");
            Ok(AdminGate::default())
        }
        Err(e) => Err(e),
    }
}

#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct LoginParameters {
    pub attempt: String,
    pub password: String,
}

pub fn login(
    gate: &mut AdminGate,
    sessions: &impl SessionStorage,
    parameters: LoginParameters,
) -> Result<(), LoginError> {
    if let Err(e) = gate.login(&parameters.attempt, &parameters.password) {
        tracing::warn!("rejected admin login attempt");
        return Err(e.into());
    }

    sessions.save_session(gate.state())?;
    tracing::info!("admin logged in");
    Ok(())
}

pub fn logout(gate: &mut AdminGate, sessions: &impl SessionStorage) -> Result<(), StorageError> {
    gate.logout();
    sessions.save_session(gate.state())?;
    tracing::info!("admin logged out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        models::admin::AdminState,
        storage::{memory::MemoryStorage, session::JsonSessionFile},
    };

    fn attempt(value: &str) -> LoginParameters {
        LoginParameters {
            attempt: value.to_string(),
            password: String::from("admin123"),
        }
    }

    #[test]
    fn test_login_persists_session() {
        let sessions = MemoryStorage::default();
        let mut gate = load_gate(&sessions).unwrap();

        login(&mut gate, &sessions, attempt("admin123")).unwrap();

        assert!(gate.is_authenticated());
        assert_eq!(
            load_gate(&sessions).unwrap().state(),
            AdminState::Authenticated
        );
    }

    #[test]
    fn test_wrong_password_is_not_persisted() {
        let sessions = MemoryStorage::default();
        let mut gate = AdminGate::default();

        let result = login(&mut gate, &sessions, attempt("hunter2"));

        assert!(matches!(
            result,
            Err(LoginError::Gate(GateError::IncorrectPassword))
        ));
        assert_eq!(sessions.load_session().unwrap(), AdminState::Anonymous);
    }

    #[test]
    fn test_logout_persists_anonymous() {
        let sessions = MemoryStorage::default();
        let mut gate = AdminGate::default();
        login(&mut gate, &sessions, attempt("admin123")).unwrap();

        logout(&mut gate, &sessions).unwrap();

        assert!(!gate.is_authenticated());
        assert_eq!(sessions.load_session().unwrap(), AdminState::Anonymous);
    }

    #[test]
    fn test_unreadable_session_counts_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{]").unwrap();

        let gate = load_gate(&JsonSessionFile::new(path)).unwrap();

        assert_eq!(gate.state(), AdminState::Anonymous);
    }
}
