use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdminState {
    #[default]
    Anonymous,
    Authenticated,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Admin login required")]
    NotAuthenticated,
}

/// Password gate in front of every store mutation.
///
/// The check is a plain comparison against a configured value. It keeps
/// casual users from editing the board and nothing more.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminGate {
    state: AdminState,
}

impl AdminGate {
    pub fn new(state: AdminState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> AdminState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AdminState::Authenticated
    }

    /// A wrong attempt leaves the current state as it was.
    pub fn login(&mut self, attempt: &str, password: &str) -> Result<(), GateError> {
        if attempt != password {
            return Err(GateError::IncorrectPassword);
        }
        self.state = AdminState::Authenticated;
        Ok(())
    }

    pub fn logout(&mut self) {
        self.state = AdminState::Anonymous;
    }

    pub fn require(&self) -> Result<(), GateError> {
        match self.state {
            AdminState::Authenticated => Ok(()),
            AdminState::Anonymous => Err(GateError::NotAuthenticated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_password_authenticates() {
        let mut gate = AdminGate::default();
        assert_eq!(gate.require(), Err(GateError::NotAuthenticated));

        gate.login("admin123", "admin123").unwrap();

        assert_eq!(gate.state(), AdminState::Authenticated);
        assert!(gate.require().is_ok());
    }

    #[test]
    fn test_wrong_password_keeps_anonymous() {
        let mut gate = AdminGate::default();

        assert_eq!(
            gate.login("letmein", "admin123"),
            Err(GateError::IncorrectPassword)
        );
        assert_eq!(gate.state(), AdminState::Anonymous);
    }

    #[test]
    fn test_logout_reverts_to_anonymous() {
        let mut gate = AdminGate::new(AdminState::Authenticated);
        gate.logout();
        assert!(!gate.is_authenticated());

        gate.logout();
        assert_eq!(gate.state(), AdminState::Anonymous);
    }

    #[test]
    fn test_password_compare_is_exact() {
        let mut gate = AdminGate::default();
        assert!(gate.login("admin123 ", "admin123").is_err());
        assert!(gate.login("ADMIN123", "admin123").is_err());
    }
}
