use std::{fmt, str::FromStr};

use jiff::{Timestamp, tz::TimeZone};

use crate::{
    escape::Surface,
    models::{
        admin::AdminGate,
        notice::{Category, Notice, NoticeId, UnknownCategory},
        store::NoticeStore,
    },
};

/// Shown for notices whose author is unknown
pub const DEFAULT_AUTHOR_LABEL: &str = "Community";
pub const EMPTY_BOARD_MESSAGE: &str = "No notices found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Category(Category),
}

impl Filter {
    pub fn matches(&self, notice: &Notice) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(category) => notice.category == *category,
        }
    }
}

impl FromStr for Filter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Filter::All);
        }
        s.parse().map(Filter::Category)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Category(category) => f.write_str(category.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affordance {
    Edit(NoticeId),
    Delete(NoticeId),
}

/// One notice ready for display. Text fields are already escaped for the
/// projector's surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeCard {
    pub id: NoticeId,
    /// The id escaped for display; `id` stays raw for binding affordances.
    pub display_id: String,
    pub title: String,
    pub author: String,
    pub badge: String,
    pub message: String,
    pub posted: String,
    pub expires: Option<String>,
    pub affordances: Vec<Affordance>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardView {
    /// Nothing matched; renderers show `EMPTY_BOARD_MESSAGE`.
    Empty,
    Cards(Vec<NoticeCard>),
}

/// Notices visible under `filter` at `now`, newest first. Notices created at
/// the same instant keep their collection order.
pub fn visible_notices<'a>(
    store: &'a NoticeStore,
    filter: Filter,
    now: Timestamp,
) -> Vec<&'a Notice> {
    let mut visible: Vec<_> = store
        .notices()
        .iter()
        .filter(|n| filter.matches(n))
        .filter(|n| !n.is_expired(now))
        .collect();
    visible.sort_by(|a, b| b.date.cmp(&a.date));
    visible
}

pub struct Projector {
    surface: Surface,
    tz: TimeZone,
}

impl Projector {
    pub fn new(surface: Surface, tz: TimeZone) -> Self {
        Self { surface, tz }
    }

    pub fn project(
        &self,
        store: &NoticeStore,
        filter: Filter,
        now: Timestamp,
        gate: &AdminGate,
    ) -> BoardView {
        let cards: Vec<_> = visible_notices(store, filter, now)
            .into_iter()
            .map(|notice| self.card(notice, gate))
            .collect();

        if cards.is_empty() {
            BoardView::Empty
        } else {
            BoardView::Cards(cards)
        }
    }

    fn card(&self, notice: &Notice, gate: &AdminGate) -> NoticeCard {
        let escape = |text: &str| self.surface.escape(text);

        let author = notice
            .author
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_AUTHOR_LABEL);

        let affordances = if gate.is_authenticated() {
            vec![
                Affordance::Edit(notice.id.clone()),
                Affordance::Delete(notice.id.clone()),
            ]
        } else {
            vec![]
        };

        NoticeCard {
            id: notice.id.clone(),
            display_id: escape(notice.id.as_str()),
            title: escape(&notice.title),
            author: escape(author),
            badge: capitalize(notice.category.as_str()),
            message: escape(&notice.message),
            posted: format_date(notice.date, &self.tz),
            expires: notice.expiry.map(|expiry| format_date(expiry, &self.tz)),
            affordances,
        }
    }
}

/// Formats like `Nov 25, 2025, 06:00 PM`
pub fn format_date(timestamp: Timestamp, tz: &TimeZone) -> String {
    timestamp
        .to_zoned(tz.clone())
        .strftime("%b %-d, %Y, %I:%M %p")
        .to_string()
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
