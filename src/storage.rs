use std::path::PathBuf;

use thiserror::Error;

use crate::models::{admin::AdminState, store::NoticeStore};

pub mod json;
#[cfg(test)]
pub mod memory;
pub mod session;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to load notices from '{path}': {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON from '{path}': {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to save notices to '{path}': {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize to JSON: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create backup at '{path}': {source}")]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to cleanup old backups in '{dir}': {source}")]
    CleanupFailed {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The single persisted slot holding the whole notice collection.
pub trait Storage {
    /// `Ok(None)` when nothing has been persisted yet.
    fn load(&self) -> Result<Option<NoticeStore>, StorageError>;
    /// Replaces the slot with `store` as a whole.
    fn save(&self, store: &NoticeStore) -> Result<(), StorageError>;
}

pub trait SessionStorage {
    fn load_session(&self) -> Result<AdminState, StorageError>;
    fn save_session(&self, state: AdminState) -> Result<(), StorageError>;
}
