//! Emoji usage ranking.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::Tally;
use crate::core::filter::TableView;

fn emoji_regex() -> &'static Regex {
    static EMOJI_RE: OnceLock<Regex> = OnceLock::new();
    EMOJI_RE.get_or_init(|| Regex::new(r"\p{Extended_Pictographic}").expect("valid emoji regex"))
}

/// An emoji and how often it was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiCount {
    pub emoji: String,
    pub count: usize,
}

/// Emoji code points in `text`, in order.
///
/// Skin-tone modifiers and joiners aren't pictographs, so `👍🏽` yields
/// `👍` and a ZWJ family yields each member.
pub fn extract_emojis(text: &str) -> impl Iterator<Item = &str> {
    emoji_regex().find_iter(text).map(|m| m.as_str())
}

/// Ranks emojis by use, ties in first-seen order.
///
/// Every body is scanned, notifications included.
pub fn emoji_helper(view: &TableView<'_>) -> Vec<EmojiCount> {
    let mut tally = Tally::new();
    for record in view.iter() {
        for emoji in extract_emojis(&record.body) {
            tally.add(emoji);
        }
    }

    tally
        .ranked()
        .into_iter()
        .map(|(emoji, count)| EmojiCount {
            emoji: emoji.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessageTable;
    use crate::core::filter::{UserSelection, filter};

    #[test]
    fn test_extract_emojis() {
        let found: Vec<_> = extract_emojis("hi 😂 there ❤️ 123 #").collect();
        assert_eq!(found, vec!["😂", "❤"]);
    }

    #[test]
    fn test_emoji_ranking() {
        let table = MessageTable::from_export(
            "1/1/24, 10:00 - Alice: 😂 good one 🎉\n\
             1/1/24, 10:01 - Bob: 🎉🎉\n\
             1/1/24, 10:02 - Alice: 😂 lol 👍",
        );
        let ranking = emoji_helper(&filter(&table, &UserSelection::Overall));
        let pairs: Vec<_> = ranking.iter().map(|e| (e.emoji.as_str(), e.count)).collect();
        assert_eq!(pairs, vec![("🎉", 3), ("😂", 2), ("👍", 1)]);
    }

    #[test]
    fn test_no_emojis() {
        let table = MessageTable::from_export("1/1/24, 10:00 - Alice: plain text only");
        assert!(emoji_helper(&filter(&table, &UserSelection::Overall)).is_empty());
    }

    #[test]
    fn test_empty_view() {
        let table = MessageTable::from_export("1/1/24, 10:00 - Alice: 😂");
        assert!(emoji_helper(&filter(&table, &"Bob".into())).is_empty());
    }
}
