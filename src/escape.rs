/// Where projected text ends up. Each surface has its own total escaping
/// function that every free-text field goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Html,
    Terminal,
}

impl Surface {
    pub fn escape(self, text: &str) -> String {
        match self {
            Surface::Html => escape_html(text),
            Surface::Terminal => escape_terminal(text),
        }
    }
}

/// Escapes `& < > " '` so the result is safe in element content and in
/// quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Replaces control characters (ESC included) so stored text cannot drive
/// the terminal. Newlines and tabs are kept.
pub fn escape_terminal(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\t' => c,
            c if c.is_control() => char::REPLACEMENT_CHARACTER,
            c => c,
        })
        .collect()
}
