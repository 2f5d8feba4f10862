use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ID_PREFIX: &str = "n-";
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_TOKEN_LEN: usize = 7;

/// Opaque identifier of a notice, e.g. `n-k3x9q2a`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct NoticeId(String);

impl NoticeId {
    /// Draws a random short token. Uniqueness within a collection is
    /// enforced by `NoticeStore::fresh_id`.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let token: String = (0..ID_TOKEN_LEN)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        Self(format!("{ID_PREFIX}{token}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NoticeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NoticeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Announcement,
    Event,
    Alert,
    General,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Announcement,
        Category::Event,
        Category::Alert,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Announcement => "announcement",
            Category::Event => "event",
            Category::Alert => "alert",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown category '{0}' (expected one of: announcement, event, alert, general)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Notice {
    /// Identifier assigned at creation
    pub id: NoticeId,
    /// Category shown as the card badge and used by filters
    pub category: Category,
    /// Title of the notice
    pub title: String,
    /// Body of the notice
    pub message: String,
    /// Who posted it, if known
    #[serde(default)]
    pub author: Option<String>,
    /// When the notice was created. Never changes afterwards
    pub date: Timestamp,
    /// After this instant the notice is hidden from every view
    #[serde(default)]
    pub expiry: Option<Timestamp>,
}

impl Notice {
    /// A notice expiring exactly at `now` is still visible.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expiry.is_some_and(|expiry| expiry < now)
    }
}
