use colored::*;

use crate::{
    models::notice::Category,
    projector::{Affordance, BoardView, EMPTY_BOARD_MESSAGE, Filter, NoticeCard},
};

/// Get the terminal width, defaulting to 80 if unavailable
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

fn colored_badge(badge: &str) -> ColoredString {
    let label = format!("[{}]", badge);
    match badge.parse::<Category>() {
        Ok(Category::Alert) => label.red(),
        Ok(Category::Event) => label.magenta(),
        Ok(Category::Announcement) => label.blue(),
        _ => label.normal(),
    }
}

/// Render the board header with the active filter and count
pub fn render_board_header(filter: Filter, count: usize, admin: bool) {
    let notice_word = if count == 1 { "notice" } else { "notices" };
    let title = match filter {
        Filter::All => String::from("NOTICE BOARD"),
        Filter::Category(category) => {
            format!("NOTICE BOARD · {}", category.as_str().to_uppercase())
        }
    };
    let mode = if admin { "  [admin]".yellow() } else { "".normal() };

    println!("\n  {} ({} {}){}\n", title.cyan().bold(), count, notice_word, mode);
}

/// Render a projected board for the terminal
pub fn render_board(view: &BoardView, filter: Filter, admin: bool) {
    match view {
        BoardView::Empty => {
            println!("{}", EMPTY_BOARD_MESSAGE.dimmed());
        }
        BoardView::Cards(cards) => {
            render_board_header(filter, cards.len(), admin);
            for card in cards {
                render_card(card);
            }
        }
    }
}

/// Title on the left, category badge right-aligned when it fits
fn render_title_line(card: &NoticeCard) {
    let terminal_width = get_terminal_width();
    let left_section = format!("  {}", card.title);
    let badge = colored_badge(&card.badge);

    // Brackets around the badge
    let total_content = left_section.chars().count() + card.badge.chars().count() + 2;
    if total_content + 4 < terminal_width {
        let padding = terminal_width - total_content - 2;
        println!(
            "{}{}{}",
            left_section.bold(),
            " ".repeat(padding),
            badge
        );
    } else {
        // Not enough space for right alignment, just print normally
        println!("{}  {}", left_section.bold(), badge);
    }
}

fn render_card(card: &NoticeCard) {
    render_title_line(card);
    println!("  {}", card.author.dimmed());

    for line in card.message.lines() {
        println!("    {}", line);
    }

    let mut footer = card.posted.clone();
    if let Some(expires) = &card.expires {
        footer.push_str(&format!(" • Expires: {}", expires));
    }
    println!("  {}", footer.dimmed());

    if !card.affordances.is_empty() {
        let actions: Vec<String> = card
            .affordances
            .iter()
            .map(|affordance| match affordance {
                Affordance::Edit(_) => format!("notices edit {}", card.display_id),
                Affordance::Delete(_) => format!("notices delete {}", card.display_id),
            })
            .collect();
        println!(
            "  {} {}",
            card.display_id.yellow(),
            actions.join("  ·  ").dimmed()
        );
    }

    println!("  {}", "─".repeat(30).dimmed());
    println!();
}
