use std::cell::{Cell, RefCell};

use crate::{
    models::{admin::AdminState, store::NoticeStore},
    storage::{SessionStorage, Storage, StorageError},
};

/// In-process storage for service tests.
#[derive(Default)]
pub struct MemoryStorage {
    slot: RefCell<Option<NoticeStore>>,
    session: Cell<AdminState>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    pub fn with_store(store: NoticeStore) -> Self {
        Self {
            slot: RefCell::new(Some(store)),
            ..Self::default()
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }

    pub fn persisted(&self) -> Option<NoticeStore> {
        self.slot.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<NoticeStore>, StorageError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, store: &NoticeStore) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = Some(store.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl SessionStorage for MemoryStorage {
    fn load_session(&self) -> Result<AdminState, StorageError> {
        Ok(self.session.get())
    }

    fn save_session(&self, state: AdminState) -> Result<(), StorageError> {
        self.session.set(state);
        Ok(())
    }
}
