use jiff::{
    Timestamp,
    civil::{Date, Time},
    tz::TimeZone,
};
use thiserror::Error;

use crate::{
    models::{
        admin::{AdminGate, GateError},
        notice::{Category, Notice, NoticeId},
        store::NoticeStore,
    },
    services::notices::{
        CreateNoticeError, NoticeFields, UpdateNoticeError, ValidationError, create_notice,
        update_notice,
    },
    storage::Storage,
};

/// Author recorded when the form is submitted without one
pub const DEFAULT_FORM_AUTHOR: &str = "Admin";

/// The admin's create/edit form.
///
/// An empty `target` means the next submit creates a notice; otherwise it
/// updates the targeted one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoticeForm {
    pub target: Option<NoticeId>,
    pub category: Category,
    pub title: String,
    pub message: String,
    /// Calendar date as `YYYY-MM-DD`, empty for no expiry
    pub expiry: String,
    pub author: String,
}

#[derive(Debug, PartialEq)]
pub enum Submission {
    Created(Notice),
    Updated(Notice),
    /// The targeted notice no longer exists; nothing was changed.
    Missing(NoticeId),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Create(#[from] CreateNoticeError),

    #[error(transparent)]
    Update(#[from] UpdateNoticeError),
}

impl NoticeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the form with `notice` and targets it for update.
    pub fn edit(notice: &Notice) -> Self {
        Self {
            target: Some(notice.id.clone()),
            category: notice.category,
            title: notice.title.clone(),
            message: notice.message.clone(),
            expiry: notice.expiry.map(expiry_input).unwrap_or_default(),
            author: notice.author.clone().unwrap_or_default(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Normalizes the raw inputs. Blank title or message is caught later by
    /// the store operations.
    pub fn fields(&self) -> Result<NoticeFields, ValidationError> {
        let author = self.author.trim();
        let author = if author.is_empty() {
            DEFAULT_FORM_AUTHOR
        } else {
            author
        };

        Ok(NoticeFields {
            category: self.category,
            title: self.title.trim().to_string(),
            message: self.message.trim().to_string(),
            author: Some(author.to_string()),
            expiry: parse_expiry(&self.expiry)?,
        })
    }

    /// Creates or updates depending on the target, then clears the form.
    /// On error the form keeps its contents.
    pub fn submit(
        &mut self,
        store: &mut NoticeStore,
        storage: &impl Storage,
        gate: &AdminGate,
    ) -> Result<Submission, SubmitError> {
        gate.require()?;
        let fields = self.fields()?;

        let submission = match &self.target {
            None => Submission::Created(create_notice(store, storage, gate, fields)?),
            Some(id) => match update_notice(store, storage, gate, id, fields)? {
                Some(notice) => Submission::Updated(notice),
                None => Submission::Missing(id.clone()),
            },
        };

        self.clear();
        Ok(submission)
    }
}

/// Expiry dates are taken as midnight UTC of the given day.
fn parse_expiry(input: &str) -> Result<Option<Timestamp>, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let invalid = |e: jiff::Error| ValidationError::InvalidExpiry(input.to_string(), e.to_string());
    let date: Date = input.parse().map_err(invalid)?;
    let zoned = date
        .to_datetime(Time::midnight())
        .to_zoned(TimeZone::UTC)
        .map_err(invalid)?;

    Ok(Some(zoned.timestamp()))
}

fn expiry_input(expiry: Timestamp) -> String {
    expiry.to_zoned(TimeZone::UTC).date().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{models::admin::AdminState, storage::memory::MemoryStorage};

    fn admin() -> AdminGate {
        AdminGate::new(AdminState::Authenticated)
    }

    fn filled_form() -> NoticeForm {
        NoticeForm {
            category: Category::Event,
            title: String::from("Pool party"),
            message: String::from("Saturday at noon"),
            expiry: String::from("2030-07-01"),
            ..NoticeForm::new()
        }
    }

    #[test]
    fn test_submit_without_target_creates() {
        let mut store = NoticeStore::default();
        let storage = MemoryStorage::default();
        let mut form = filled_form();

        let submission = form.submit(&mut store, &storage, &admin()).unwrap();

        let Submission::Created(notice) = submission else {
            panic!("Expected a created notice");
        };
        assert_eq!(notice.author.as_deref(), Some(DEFAULT_FORM_AUTHOR));
        assert_eq!(
            notice.expiry,
            Some("2030-07-01T00:00:00Z".parse().unwrap())
        );
        assert_eq!(store.notices(), &[notice]);
        assert_eq!(form, NoticeForm::default());
    }

    #[test]
    fn test_submit_with_empty_title_changes_nothing() {
        let mut store = NoticeStore::seeded(Timestamp::now(), &mut rand::thread_rng());
        let before = store.clone();
        let storage = MemoryStorage::default();
        let mut form = NoticeForm {
            title: String::new(),
            ..filled_form()
        };

        let result = form.submit(&mut store, &storage, &admin());

        assert!(matches!(
            result,
            Err(SubmitError::Create(CreateNoticeError::Validation(
                ValidationError::MissingTitleOrMessage
            )))
        ));
        assert_eq!(store, before);
        assert_eq!(form.message, "Saturday at noon", "form keeps its input");
    }

    #[test]
    fn test_submit_rejects_bad_expiry() {
        let mut store = NoticeStore::default();
        let storage = MemoryStorage::default();
        let mut form = NoticeForm {
            expiry: String::from("next tuesday"),
            ..filled_form()
        };

        let result = form.submit(&mut store, &storage, &admin());

        assert!(matches!(
            result,
            Err(SubmitError::Validation(ValidationError::InvalidExpiry(..)))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_submit_requires_admin() {
        let mut store = NoticeStore::default();
        let storage = MemoryStorage::default();
        let mut form = filled_form();

        let result = form.submit(&mut store, &storage, &AdminGate::default());

        assert!(matches!(
            result,
            Err(SubmitError::Gate(GateError::NotAuthenticated))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_edit_prepopulates_every_field() {
        let notice = Notice {
            id: NoticeId::from("n-edit000"),
            category: Category::Alert,
            title: String::from("Boil water"),
            message: String::from("Until further notice"),
            author: Some(String::from("Utility")),
            date: "2025-02-01T09:00:00Z".parse().unwrap(),
            expiry: Some("2025-02-10T00:00:00Z".parse().unwrap()),
        };

        let form = NoticeForm::edit(&notice);

        assert!(form.target.is_some());
        assert_eq!(form.target, Some(notice.id.clone()));
        assert_eq!(form.category, Category::Alert);
        assert_eq!(form.title, "Boil water");
        assert_eq!(form.message, "Until further notice");
        assert_eq!(form.expiry, "2025-02-10");
        assert_eq!(form.author, "Utility");
    }

    #[test]
    fn test_editing_preserves_creation_date() {
        let mut store = NoticeStore::default();
        let storage = MemoryStorage::default();
        let Submission::Created(original) =
            filled_form().submit(&mut store, &storage, &admin()).unwrap()
        else {
            panic!("Expected a created notice");
        };

        let mut form = NoticeForm::edit(&original);
        form.title = String::from("Pool party (moved)");
        form.message = String::from("Sunday at noon");
        form.expiry.clear();

        let Submission::Updated(updated) = form.submit(&mut store, &storage, &admin()).unwrap()
        else {
            panic!("Expected an updated notice");
        };

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.date, original.date);
        assert_eq!(updated.title, "Pool party (moved)");
        assert_eq!(updated.message, "Sunday at noon");
        assert_eq!(updated.expiry, None);
        assert_eq!(store.len(), 1);
        assert!(form.target.is_none());
    }

    #[test]
    fn test_submit_for_vanished_target_reports_missing() {
        let mut store = NoticeStore::default();
        let storage = MemoryStorage::default();
        let mut form = NoticeForm {
            target: Some(NoticeId::from("n-gone000")),
            ..filled_form()
        };

        let submission = form.submit(&mut store, &storage, &admin()).unwrap();

        assert_eq!(submission, Submission::Missing(NoticeId::from("n-gone000")));
        assert!(store.is_empty());
        assert_eq!(storage.saves(), 0);
    }

    #[test]
    fn test_clear_resets_target_and_fields() {
        let mut form = NoticeForm {
            target: Some(NoticeId::from("n-x000000")),
            author: String::from("Someone"),
            ..filled_form()
        };

        form.clear();

        assert_eq!(form, NoticeForm::default());
        assert!(form.target.is_none());
    }
}
