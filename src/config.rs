use std::path::{Path, PathBuf};

use thiserror::Error;

pub const APP_DIR: &str = "noticeboard";
/// Name of the persisted slot holding the board
pub const STORE_FILE: &str = "community_notices_v1.json";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const ADMIN_PASSWORD_ENV: &str = "NOTICEBOARD_ADMIN_PASSWORD";
pub const STORE_PATH_ENV: &str = "NOTICEBOARD_STORE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to create data directory '{path}': {source}")]
    DataDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store_path: PathBuf,
    /// Admin session, kept beside the store so each board has its own login
    pub session_path: PathBuf,
    pub admin_password: String,
}

impl Settings {
    /// Resolves settings from the `--store` flag (which clap already merged
    /// with `NOTICEBOARD_STORE`), the environment and defaults.
    pub fn resolve(store_override: Option<PathBuf>) -> Self {
        Self::from_parts(
            store_override,
            dirs::data_local_dir(),
            std::env::var(ADMIN_PASSWORD_ENV).ok(),
        )
    }

    pub fn from_parts(
        store_override: Option<PathBuf>,
        data_dir: Option<PathBuf>,
        admin_password: Option<String>,
    ) -> Self {
        let store_path = store_override.unwrap_or_else(|| {
            data_dir
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join(STORE_FILE)
        });
        let session_path = store_path.with_extension("session.json");
        let admin_password = admin_password
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| String::from(DEFAULT_ADMIN_PASSWORD));

        Self {
            store_path,
            session_path,
            admin_password,
        }
    }

    pub fn ensure_data_dir(&self) -> Result<(), ConfigError> {
        let Some(parent) = self.store_path.parent().filter(|p| *p != Path::new("")) else {
            return Ok(());
        };
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::DataDirFailed {
            path: parent.to_path_buf(),
            source: e,
        })
    }
}
