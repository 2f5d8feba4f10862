use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::models::store::NoticeStore;

pub const DEFAULT_EXPORT_FILE: &str = "notices.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    Stdout,
    File(PathBuf),
}

impl ExportTarget {
    /// `-` selects stdout; no path selects `notices.json` in the current directory.
    pub fn from_arg(output: Option<PathBuf>) -> Self {
        match output {
            Some(path) if path == Path::new("-") => ExportTarget::Stdout,
            Some(path) => ExportTarget::File(path),
            None => ExportTarget::File(PathBuf::from(DEFAULT_EXPORT_FILE)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize notices: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write export to '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Snapshot of the whole collection as indented JSON.
pub fn export_json(store: &NoticeStore) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(store)?;
    json.push('\n');
    Ok(json)
}

pub fn export_notices(store: &NoticeStore, target: &ExportTarget) -> Result<(), ExportError> {
    let json = export_json(store)?;

    match target {
        ExportTarget::Stdout => io::stdout()
            .lock()
            .write_all(json.as_bytes())
            .map_err(|e| ExportError::Write {
                path: PathBuf::from("<stdout>"),
                source: e,
            }),
        ExportTarget::File(path) => {
            fs::write(path, json).map_err(|e| ExportError::Write {
                path: path.clone(),
                source: e,
            })?;
            tracing::info!(path = %path.display(), notices = store.len(), "exported notices");
            Ok(())
        }
    }
}
