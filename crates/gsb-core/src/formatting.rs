//! Reply texts and result-list rendering.

use std::borrow::Cow;

use crate::domain::GroupEntry;

pub const HELP_TEXT: &str = "👋 Hi! I'm a Telegram group directory bot.\n\n\
Available commands:\n\
/add <name> <link> → add a group\n\
/list → show the latest groups\n\
/search <term> → search groups by name";

pub const ADD_USAGE: &str = "Usage: /add <name> <link>";
pub const SEARCH_USAGE: &str = "Usage: /search <term>";
pub const NO_GROUPS_SAVED: &str = "❌ No groups saved.";
pub const NO_GROUPS_FOUND: &str = "❌ No groups found.";

const BULLET: &str = "🔹";

/// Telegram rejects messages longer than this many UTF-16 code units.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

// Per-field caps (in chars) keeping a full page of results under the limit,
// even when every char takes two UTF-16 units.
const MAX_NAME_CHARS: usize = 80;
const MAX_LINK_CHARS: usize = 100;

pub fn group_added(name: &str, link: &str) -> String {
    format!(
        "✅ Group added: {} ({})",
        truncate_chars(name, MAX_NAME_CHARS),
        truncate_chars(link, MAX_LINK_CHARS)
    )
}

/// One `🔹 name → link` line per entry, in the given order.
///
/// Over-long names and links are clipped for display only.
pub fn format_entries(entries: &[GroupEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            format!(
                "{BULLET} {} → {}",
                truncate_chars(&e.name, MAX_NAME_CHARS),
                truncate_chars(&e.link, MAX_LINK_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `s` cut to at most `max` chars, ending in `…` when clipped.
fn truncate_chars(s: &str, max: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max) {
        None => Cow::Borrowed(s),
        Some(_) => {
            let keep = max.saturating_sub(1);
            let mut out: String = s.chars().take(keep).collect();
            out.push('…');
            Cow::Owned(out)
        }
    }
}

/// Render `entries`, or `empty` when there is nothing to show.
pub fn format_entries_or(entries: &[GroupEntry], empty: &str) -> String {
    if entries.is_empty() {
        empty.to_string()
    } else {
        format_entries(entries)
    }
}
