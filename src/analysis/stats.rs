//! Headline counts and the busiest-user ranking.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::Tally;
use crate::core::filter::TableView;

fn link_regex() -> &'static Regex {
    static LINK_RE: OnceLock<Regex> = OnceLock::new();
    LINK_RE.get_or_init(|| Regex::new(r"https?://\S+|www\.\S+").expect("valid link regex"))
}

/// Top-line statistics for one selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MessageStats {
    /// Every row, notifications included
    pub messages: usize,
    /// Whitespace tokens of text bodies
    pub words: usize,
    /// Attachment placeholders
    pub media: usize,
    /// URL-like substrings across all bodies
    pub links: usize,
}

/// Counts messages, words, media placeholders and links.
///
/// Words skip notifications, media placeholders and deleted markers.
///
/// ```
/// use chatlens::MessageTable;
/// use chatlens::analysis::fetch_stats;
/// use chatlens::core::{UserSelection, filter};
///
/// let table = MessageTable::from_export(
///     "1/1/24, 10:00 - Alice: hello world\n\
///      1/1/24, 10:05 - Bob: <Media omitted>\n\
///      1/1/24, 10:06 - group_notification: Alice added Bob",
/// );
/// let stats = fetch_stats(&filter(&table, &UserSelection::Overall));
/// assert_eq!((stats.messages, stats.words, stats.media, stats.links), (3, 2, 1, 0));
/// ```
pub fn fetch_stats(view: &TableView<'_>) -> MessageStats {
    let mut stats = MessageStats {
        messages: view.len(),
        ..MessageStats::default()
    };

    for record in view.iter() {
        if record.is_media() {
            stats.media += 1;
        } else if record.has_text() {
            stats.words += record.body.split_whitespace().count();
        }
        stats.links += count_links(&record.body);
    }

    stats
}

/// Counts URL-like substrings.
pub fn count_links(text: &str) -> usize {
    link_regex().find_iter(text).count()
}

/// Messages sent by one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCount {
    pub user: String,
    pub count: usize,
}

/// One participant's share of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserShare {
    pub user: String,
    /// Percentage of non-notification messages, two decimals
    pub percent: f64,
}

/// Busiest-user ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BusyUsers {
    /// The `top_n` most active senders
    pub top: Vec<UserCount>,
    /// Every sender's share, in the same order
    pub shares: Vec<UserShare>,
}

impl BusyUsers {
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// Ranks senders by message count.
///
/// Notifications are excluded. Ties keep first-seen order.
pub fn most_busy_users(view: &TableView<'_>, top_n: usize) -> BusyUsers {
    let mut tally = Tally::new();
    for record in view.iter().filter(|r| !r.is_notification()) {
        tally.add(record.sender.as_str());
    }

    let total = tally.total();
    let ranked = tally.ranked();

    let shares = ranked
        .iter()
        .map(|&(user, count)| UserShare {
            user: user.to_string(),
            percent: round2(count as f64 * 100.0 / total as f64),
        })
        .collect();

    let top = ranked
        .into_iter()
        .take(top_n)
        .map(|(user, count)| UserCount {
            user: user.to_string(),
            count,
        })
        .collect();

    BusyUsers { top, shares }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
