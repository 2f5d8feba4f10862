use jiff::Timestamp;
use thiserror::Error;

use crate::{
    models::{
        admin::{AdminGate, GateError},
        notice::{Category, Notice, NoticeId},
        store::NoticeStore,
    },
    storage::{Storage, StorageError},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter title and message.")]
    MissingTitleOrMessage,

    #[error("Invalid expiry date '{0}': {1}")]
    InvalidExpiry(String, String),
}

/// Everything about a notice that an admin can set.
#[derive(Debug, Clone, PartialEq)]
pub struct NoticeFields {
    pub category: Category,
    pub title: String,
    pub message: String,
    pub author: Option<String>,
    pub expiry: Option<Timestamp>,
}

impl NoticeFields {
    fn validated(mut self) -> Result<Self, ValidationError> {
        self.title = self.title.trim().to_string();
        self.message = self.message.trim().to_string();
        if self.title.is_empty() || self.message.is_empty() {
            return Err(ValidationError::MissingTitleOrMessage);
        }
        Ok(self)
    }
}

/// Reads the persisted board, falling back to the demo notices when nothing
/// usable is stored. The fallback is not persisted until the next mutation.
pub fn load_notices(storage: &impl Storage) -> Result<NoticeStore, StorageError> {
    let seeded = || NoticeStore::seeded(Timestamp::now(), &mut rand::thread_rng());

    match storage.load() {
        Ok(Some(store)) => {
            tracing::debug!(notices = store.len(), "loaded notice store");
            Ok(store)
        }
        Ok(None) => {
            tracing::info!("no persisted notices, starting from the demo board");
            Ok(seeded())
        }
        Err(StorageError::ParseFailed { path, source }) => {
            tracing::warn!(
                path = %path.display(),
                error = %source,
                "persisted notices are unreadable, falling back to the demo board"
            );
            Ok(seeded())
        }
        Err(e) => Err(e),
    }
}

#[derive(Debug, Error)]
pub enum CreateNoticeError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub fn create_notice(
    store: &mut NoticeStore,
    storage: &impl Storage,
    gate: &AdminGate,
    fields: NoticeFields,
) -> Result<Notice, CreateNoticeError> {
    gate.require()?;
    let fields = fields.validated()?;

    let notice = Notice {
        id: store.fresh_id(&mut rand::thread_rng()),
        category: fields.category,
        title: fields.title,
        message: fields.message,
        author: fields.author,
        date: Timestamp::now(),
        expiry: fields.expiry,
    };

    store.push_front(notice.clone());
    storage.save(store)?;

    tracing::info!(id = %notice.id, category = %notice.category, "created notice");
    Ok(notice)
}

#[derive(Debug, Error)]
pub enum UpdateNoticeError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Overwrites the editable fields of notice `id`, keeping its id and creation
/// date. Returns `Ok(None)` without touching storage when `id` is unknown.
pub fn update_notice(
    store: &mut NoticeStore,
    storage: &impl Storage,
    gate: &AdminGate,
    id: &NoticeId,
    fields: NoticeFields,
) -> Result<Option<Notice>, UpdateNoticeError> {
    gate.require()?;
    let fields = fields.validated()?;

    let Some(existing) = store.get(id) else {
        tracing::debug!(id = %id, "ignoring update of unknown notice");
        return Ok(None);
    };

    let updated = Notice {
        id: existing.id.clone(),
        date: existing.date,
        category: fields.category,
        title: fields.title,
        message: fields.message,
        author: fields.author,
        expiry: fields.expiry,
    };

    store.replace(updated.clone());
    storage.save(store)?;

    tracing::info!(id = %updated.id, "updated notice");
    Ok(Some(updated))
}

#[derive(Debug, Error)]
pub enum DeleteNoticeError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Removes notice `id`. Callers confirm with the user first.
/// Returns `Ok(None)` without touching storage when `id` is unknown.
pub fn delete_notice(
    store: &mut NoticeStore,
    storage: &impl Storage,
    gate: &AdminGate,
    id: &NoticeId,
) -> Result<Option<Notice>, DeleteNoticeError> {
    gate.require()?;

    let Some(removed) = store.remove(id) else {
        tracing::debug!(id = %id, "ignoring delete of unknown notice");
        return Ok(None);
    };
    storage.save(store)?;

    tracing::info!(id = %removed.id, "deleted notice");
    Ok(Some(removed))
}
