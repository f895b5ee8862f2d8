//! The message table.
//!
//! [`MessageTable`] is the structured form of one export: the records in
//! source order, how many boundary lines were dropped because their
//! timestamp didn't parse, and which line format was detected.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::filter::{OVERALL, TableView, UserSelection, filter};
use crate::message::{GROUP_NOTIFICATION, MessageRecord};
use crate::parser::{LineParser, RawMessage};

/// Parsed messages of one export, immutable after construction.
///
/// # Example
///
/// ```rust
/// use chatlens::MessageTable;
///
/// let text = "1/1/24, 10:00 - Alice: hello world\n\
///             1/1/24, 10:05 - Bob: <Media omitted>\n\
///             1/1/24, 10:06 - group_notification: Alice added Bob";
/// let table = MessageTable::from_export(text);
///
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.users(), vec!["Alice", "Bob"]);
/// assert_eq!(table.user_options(), vec!["Overall", "Alice", "Bob"]);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageTable {
    records: Vec<MessageRecord>,
    dropped: usize,
    format: Option<String>,
}

impl MessageTable {
    /// Parses export text with the built-in formats.
    pub fn from_export(text: &str) -> Self {
        Self::from_export_with(text, &LineParser::default())
    }

    /// Parses export text with a configured parser.
    pub fn from_export_with(text: &str, parser: &LineParser) -> Self {
        let messages = parser.parse(text);
        let format = messages.pattern().map(|p| p.name().to_string());
        let mut table = Self::from_raw(messages);
        table.format = format;
        table
    }

    /// Builds a table from raw messages.
    ///
    /// Messages whose timestamp doesn't parse are dropped and counted.
    pub fn from_raw<'a, I>(messages: I) -> Self
    where
        I: IntoIterator<Item = RawMessage<'a>>,
    {
        let mut records = Vec::new();
        let mut dropped = 0;

        for raw in messages {
            match raw.timestamp() {
                Some(ts) => {
                    let sender = raw.sender.unwrap_or(GROUP_NOTIFICATION);
                    records.push(MessageRecord::new(ts, sender, raw.body));
                }
                None => {
                    debug!(date = raw.date, time = raw.time, "unparseable timestamp");
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            warn!(dropped, kept = records.len(), "dropped messages with unparseable timestamps");
        }
        debug!(records = records.len(), "built message table");

        Self {
            records,
            dropped,
            format: None,
        }
    }

    /// Wraps already-built records.
    ///
    /// Calendar fields are derived again from each timestamp, so edited
    /// copies can't disagree with it.
    pub fn from_records(records: Vec<MessageRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|r| MessageRecord::new(r.timestamp, r.sender, r.body))
            .collect();
        Self {
            records,
            dropped: 0,
            format: None,
        }
    }

    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of messages dropped for unparseable timestamps.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Name of the detected line format, if the table came from export text.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Sorted unique senders, without the notification sentinel.
    pub fn users(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| !r.is_notification())
            .map(|r| r.sender.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// `"Overall"` followed by [`users`](Self::users).
    pub fn user_options(&self) -> Vec<&str> {
        let mut options = vec![OVERALL];
        options.extend(self.users());
        options
    }

    /// Shorthand for [`filter`](crate::core::filter::filter).
    pub fn select(&self, user: &UserSelection) -> TableView<'_> {
        filter(self, user)
    }
}

impl<'a> IntoIterator for &'a MessageTable {
    type Item = &'a MessageRecord;
    type IntoIter = std::slice::Iter<'a, MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1/1/24, 10:00 - Alice: hello world\n\
                          1/1/24, 10:05 - Bob: <Media omitted>\n\
                          1/1/24, 10:06 - group_notification: Alice added Bob";

    #[test]
    fn test_from_export() {
        let table = MessageTable::from_export(SAMPLE);
        assert_eq!(table.len(), 3);
        assert_eq!(table.dropped(), 0);
        assert_eq!(table.format(), Some("eu_slash"));

        let senders: Vec<_> = table.iter().map(|r| r.sender.as_str()).collect();
        assert_eq!(senders, vec!["Alice", "Bob", "group_notification"]);
    }

    #[test]
    fn test_system_line_becomes_notification() {
        let table = MessageTable::from_export("1/1/24, 10:06 - Alice added Bob\n1/1/24, 10:07 - Bob: hi");
        assert!(table.records()[0].is_notification());
        assert_eq!(table.records()[0].body, "Alice added Bob");
        assert_eq!(table.users(), vec!["Bob"]);
    }

    #[test]
    fn test_unparseable_timestamps_dropped() {
        // 31/02 matches the boundary but isn't a date
        let text = "15/01/2024, 10:00 - Alice: a\n31/02/2024, 10:00 - Bob: b\n16/01/2024, 10:00 - Alice: c";
        let table = MessageTable::from_export(text);
        assert_eq!(table.len(), 2);
        assert_eq!(table.dropped(), 1);
        assert_eq!(table.users(), vec!["Alice"]);
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert!(MessageTable::from_export("").is_empty());

        let table = MessageTable::from_export("no dates here\nat all");
        assert!(table.is_empty());
        assert!(table.format().is_none());
        assert_eq!(table.user_options(), vec!["Overall"]);
    }

    #[test]
    fn test_users_sorted_unique() {
        let text = "1/1/24, 10:00 - Zoe: a\n1/1/24, 10:01 - Alice: b\n1/1/24, 10:02 - Zoe: c";
        let table = MessageTable::from_export(text);
        assert_eq!(table.users(), vec!["Alice", "Zoe"]);
    }

    #[test]
    fn test_rows_keep_source_order() {
        let text = "2/1/24, 10:00 - Alice: later\n1/1/24, 10:00 - Bob: earlier";
        let table = MessageTable::from_export(text);
        assert_eq!(table.records()[0].body, "later");
        assert_eq!(table.records()[1].body, "earlier");
    }
}
