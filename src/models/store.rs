use jiff::Timestamp;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::notice::{Category, Notice, NoticeId};

/// Ordered collection of notices, most recently created first.
///
/// Serialized as a bare JSON array, which is the layout of the persisted slot
/// and of exports.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct NoticeStore {
    notices: Vec<Notice>,
}

impl NoticeStore {
    pub fn new(notices: Vec<Notice>) -> Self {
        Self { notices }
    }

    /// The two demo notices a fresh board starts with.
    pub fn seeded(now: Timestamp, rng: &mut impl Rng) -> Self {
        let mut store = Self::default();

        let welcome = Notice {
            id: store.fresh_id(rng),
            category: Category::Announcement,
            title: String::from("Welcome to our Community Board"),
            message: String::from(
                "This is a demo notice. Admins can add real notices via the Admin panel.",
            ),
            author: Some(String::from("System")),
            date: now,
            expiry: None,
        };
        store.notices.push(welcome);

        let meeting = Notice {
            id: store.fresh_id(rng),
            category: Category::Event,
            title: String::from("Annual Meeting"),
            message: String::from("Community annual meeting on 25th Nov at 6 PM in the clubhouse."),
            author: Some(String::from("Committee")),
            date: now,
            expiry: None,
        };
        store.notices.push(meeting);

        store
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn get(&self, id: &NoticeId) -> Option<&Notice> {
        self.notices.iter().find(|n| &n.id == id)
    }

    pub fn contains(&self, id: &NoticeId) -> bool {
        self.get(id).is_some()
    }

    /// Generates ids until one is not taken by any notice in the collection
    pub fn fresh_id(&self, rng: &mut impl Rng) -> NoticeId {
        loop {
            let id = NoticeId::generate(rng);
            if !self.contains(&id) {
                return id;
            }
        }
    }

    pub fn push_front(&mut self, notice: Notice) {
        self.notices.insert(0, notice);
    }

    /// Swaps in `notice` at the position of the record with the same id and
    /// returns the previous record. Returns `None` and leaves the collection
    /// untouched when no record has that id.
    pub fn replace(&mut self, notice: Notice) -> Option<Notice> {
        let slot = self.notices.iter_mut().find(|n| n.id == notice.id)?;
        Some(std::mem::replace(slot, notice))
    }

    pub fn remove(&mut self, id: &NoticeId) -> Option<Notice> {
        let index = self.notices.iter().position(|n| &n.id == id)?;
        Some(self.notices.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn notice(id: &str, title: &str) -> Notice {
        Notice {
            id: NoticeId::from(id),
            category: Category::General,
            title: title.to_string(),
            message: String::from("body"),
            author: None,
            date: Timestamp::UNIX_EPOCH,
            expiry: None,
        }
    }

    #[test]
    fn test_seeded_store_has_two_distinct_notices() {
        let mut rng = StdRng::seed_from_u64(1);
        let now = Timestamp::now();
        let store = NoticeStore::seeded(now, &mut rng);

        assert_eq!(store.len(), 2);
        assert_ne!(store.notices()[0].id, store.notices()[1].id);
        assert_eq!(store.notices()[0].category, Category::Announcement);
        assert_eq!(store.notices()[1].category, Category::Event);
        assert!(store.notices().iter().all(|n| n.date == now));
    }

    #[test]
    fn test_push_front_keeps_newest_first() {
        let mut store = NoticeStore::new(vec![notice("n-old0000", "old")]);
        store.push_front(notice("n-new0000", "new"));

        assert_eq!(store.notices()[0].title, "new");
        assert_eq!(store.notices()[1].title, "old");
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut store = NoticeStore::new(vec![
            notice("n-a000000", "a"),
            notice("n-b000000", "b"),
            notice("n-c000000", "c"),
        ]);

        let previous = store.replace(notice("n-b000000", "b2"));

        assert_eq!(previous.map(|n| n.title), Some(String::from("b")));
        let titles: Vec<_> = store.notices().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b2", "c"]);
    }

    #[test]
    fn test_replace_and_remove_unknown_id_are_noops() {
        let mut store = NoticeStore::new(vec![notice("n-a000000", "a")]);
        let before = store.clone();

        assert!(store.replace(notice("n-missing", "x")).is_none());
        assert!(store.remove(&NoticeId::from("n-missing")).is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn test_fresh_id_never_collides() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut store = NoticeStore::default();

        for i in 0..500 {
            let id = store.fresh_id(&mut rng);
            assert!(!store.contains(&id));
            store.push_front(Notice {
                id,
                ..notice("placeholder", &i.to_string())
            });
        }

        let mut ids: Vec<_> = store.notices().iter().map(|n| n.id.clone()).collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids.dedup();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let store = NoticeStore::new(vec![notice("n-a000000", "a")]);
        let value = serde_json::to_value(&store).unwrap();

        assert!(value.is_array());
        assert_eq!(value[0]["title"], "a");
    }
}
