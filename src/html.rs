use jiff::{Timestamp, tz::TimeZone};

use crate::{
    escape::{Surface, escape_html},
    models::{admin::AdminGate, store::NoticeStore},
    projector::{Affordance, BoardView, EMPTY_BOARD_MESSAGE, Filter, NoticeCard, Projector},
};

/// Renders the notices visible under `filter` as card markup. Projection
/// happens here so every field goes through HTML escaping.
pub fn render_board(
    store: &NoticeStore,
    filter: Filter,
    now: Timestamp,
    gate: &AdminGate,
    tz: TimeZone,
) -> String {
    let view = Projector::new(Surface::Html, tz).project(store, filter, now, gate);
    render_view(&view)
}

fn render_view(view: &BoardView) -> String {
    match view {
        BoardView::Empty => format!("<div class=\"empty\">{EMPTY_BOARD_MESSAGE}</div>\n"),
        BoardView::Cards(cards) => cards.iter().map(render_card).collect(),
    }
}

fn render_card(card: &NoticeCard) -> String {
    let expires = card
        .expires
        .as_ref()
        .map(|expires| format!(" • Expires: {expires}"))
        .unwrap_or_default();

    let actions = if card.affordances.is_empty() {
        String::new()
    } else {
        let buttons: Vec<_> = card.affordances.iter().map(render_affordance).collect();
        format!(
            "    <div class=\"actions\">\n      {}\n    </div>\n",
            buttons.join("\n      ")
        )
    };

    format!(
        r#"<article class="card">
  <div class="meta">
    <div class="heading">
      <h3>{title}</h3>
      <small class="author">{author}</small>
    </div>
    <div class="badge">{badge}</div>
  </div>
  <p>{message}</p>
  <div class="card-footer">
    <small>{posted}{expires}</small>
{actions}  </div>
</article>
"#,
        title = card.title,
        author = card.author,
        badge = escape_html(&card.badge),
        message = card.message,
        posted = card.posted,
    )
}

fn render_affordance(affordance: &Affordance) -> String {
    match affordance {
        Affordance::Edit(id) => format!(
            "<button data-id=\"{}\" class=\"btn outline editBtn\">Edit</button>",
            escape_html(id.as_str())
        ),
        Affordance::Delete(id) => format!(
            "<button data-id=\"{}\" class=\"btn danger delBtn\">Delete</button>",
            escape_html(id.as_str())
        ),
    }
}
