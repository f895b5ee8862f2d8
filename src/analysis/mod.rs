//! Read-only aggregation queries over a [`TableView`].
//!
//! Every query takes the view produced by
//! [`filter`](crate::core::filter::filter), so the participant selection
//! is always applied first. Each returns one serializable shape; empty
//! input yields the empty form of that shape.
//!
//! | Query | Result |
//! |-------|--------|
//! | [`fetch_stats`] | [`MessageStats`] |
//! | [`monthly_timeline`] | `Vec<MonthlyCount>` |
//! | [`daily_timeline`] | `Vec<DailyCount>` |
//! | [`week_activity_map`] / [`month_activity_map`] | `Vec<CategoryCount>` |
//! | [`activity_heatmap`] | [`Heatmap`] |
//! | [`most_busy_users`] | [`BusyUsers`] |
//! | [`create_wordcloud`] | [`WordFrequencies`] |
//! | [`most_common_words`] | `Vec<WordCount>` |
//! | [`emoji_helper`] | `Vec<EmojiCount>` |
//! | [`sentiment_analysis`] | [`SentimentReport`] |
//!
//! [`analyze`] runs all of them for one selection.
//!
//! # Example
//!
//! ```rust
//! use chatlens::MessageTable;
//! use chatlens::analysis::analyze;
//! use chatlens::config::AnalysisConfig;
//! use chatlens::core::FilterConfig;
//!
//! # fn main() -> chatlens::Result<()> {
//! let table = MessageTable::from_export(
//!     "1/1/24, 10:00 - Alice: hello world\n1/1/24, 10:05 - Bob: <Media omitted>",
//! );
//! let report = analyze(&table, &FilterConfig::new(), &AnalysisConfig::default())?;
//!
//! assert_eq!(report.stats.messages, 2);
//! assert_eq!(report.monthly_timeline[0].label, "January-2024");
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod emoji;
pub mod sentiment;
pub mod stats;
pub mod timeline;
pub mod words;

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;
use tracing::debug;

pub use activity::{CategoryCount, Heatmap, activity_heatmap, month_activity_map, week_activity_map};
pub use emoji::{EmojiCount, emoji_helper};
pub use sentiment::{SentimentAnalyzer, SentimentLabel, SentimentReport, sentiment_analysis};
pub use stats::{BusyUsers, MessageStats, UserCount, UserShare, fetch_stats, most_busy_users};
pub use timeline::{DailyCount, MonthlyCount, daily_timeline, monthly_timeline};
pub use words::{StopWords, WordCount, WordFrequencies, create_wordcloud, most_common_words};

use crate::config::AnalysisConfig;
use crate::core::filter::{FilterConfig, TableView, UserSelection, apply_filters};
use crate::error::Result;
use crate::table::MessageTable;

/// Counter that remembers the order keys were first seen.
#[derive(Debug, Clone)]
pub(crate) struct Tally<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub(crate) fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Entries in first-seen order.
    pub(crate) fn into_entries(self) -> Vec<(K, usize)> {
        self.entries
    }

    /// Entries by count descending; the sort is stable, so ties stay in
    /// first-seen order.
    pub(crate) fn ranked(self) -> Vec<(K, usize)> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// Every query for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub user: UserSelection,
    pub stats: MessageStats,
    pub monthly_timeline: Vec<MonthlyCount>,
    pub daily_timeline: Vec<DailyCount>,
    pub week_activity: Vec<CategoryCount>,
    pub month_activity: Vec<CategoryCount>,
    pub heatmap: Heatmap,
    /// Only for the whole conversation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busy_users: Option<BusyUsers>,
    pub word_cloud: WordFrequencies,
    pub common_words: Vec<WordCount>,
    pub emojis: Vec<EmojiCount>,
    pub sentiment: SentimentReport,
}

/// Runs every query on the filtered table.
///
/// Fails only if the configured stop-word file can't be read.
pub fn analyze(
    table: &MessageTable,
    filter: &FilterConfig,
    config: &AnalysisConfig,
) -> Result<AnalysisReport> {
    let stop_words = StopWords::from_config(config)?;
    let analyzer = SentimentAnalyzer::from_config(config);
    let view = apply_filters(table, filter);
    debug!(user = %filter.user, rows = view.len(), "running analysis");

    Ok(report_for(&view, &filter.user, &stop_words, &analyzer, config))
}

/// Runs every query on an already filtered view.
pub fn report_for(
    view: &TableView<'_>,
    user: &UserSelection,
    stop_words: &StopWords,
    analyzer: &SentimentAnalyzer,
    config: &AnalysisConfig,
) -> AnalysisReport {
    let mut emojis = emoji_helper(view);
    if let Some(n) = config.top_emojis {
        emojis.truncate(n);
    }

    AnalysisReport {
        user: user.clone(),
        stats: fetch_stats(view),
        monthly_timeline: monthly_timeline(view),
        daily_timeline: daily_timeline(view),
        week_activity: week_activity_map(view),
        month_activity: month_activity_map(view),
        heatmap: activity_heatmap(view),
        busy_users: user
            .is_overall()
            .then(|| most_busy_users(view, config.top_users)),
        word_cloud: create_wordcloud(view, stop_words),
        common_words: most_common_words(view, stop_words, config.top_words),
        emojis,
        sentiment: sentiment_analysis(view, analyzer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_first_seen_ties() {
        let mut tally = Tally::new();
        for key in ["b", "a", "c", "a", "b", "d"] {
            tally.add(key);
        }
        assert_eq!(tally.total(), 6);
        assert_eq!(
            tally.clone().into_entries(),
            vec![("b", 2), ("a", 2), ("c", 1), ("d", 1)]
        );
        assert_eq!(tally.ranked(), vec![("b", 2), ("a", 2), ("c", 1), ("d", 1)]);
    }

    #[test]
    fn test_analyze_overall_has_busy_users() {
        let table = MessageTable::from_export(
            "1/1/24, 10:00 - Alice: hello world\n\
             1/1/24, 10:05 - Bob: <Media omitted>\n\
             1/1/24, 10:06 - group_notification: Alice added Bob",
        );
        let report = analyze(&table, &FilterConfig::new(), &AnalysisConfig::default()).unwrap();

        assert_eq!(report.stats.messages, 3);
        assert_eq!(report.stats.words, 2);
        let busy = report.busy_users.unwrap();
        assert_eq!(busy.top.len(), 2);
        assert!(busy.top.iter().all(|u| u.user != "group_notification"));
    }

    #[test]
    fn test_analyze_single_user() {
        let table = MessageTable::from_export(
            "1/1/24, 10:00 - Alice: pizza 🍕\n1/1/24, 10:05 - Bob: pasta",
        );
        let filter = FilterConfig::new().with_user("Alice");
        let report = analyze(&table, &filter, &AnalysisConfig::default()).unwrap();

        assert!(report.busy_users.is_none());
        assert_eq!(report.stats.messages, 1);
        assert_eq!(report.common_words[0].word, "pizza");
        assert_eq!(report.emojis[0].emoji, "🍕");
    }

    #[test]
    fn test_analyze_top_emojis() {
        let table = MessageTable::from_export("1/1/24, 10:00 - Alice: 😂😂 🎉 👍");
        let config = AnalysisConfig::new().with_top_emojis(1);
        let report = analyze(&table, &FilterConfig::new(), &config).unwrap();
        assert_eq!(report.emojis.len(), 1);
        assert_eq!(report.emojis[0].emoji, "😂");
    }

    #[test]
    fn test_analyze_empty_table() {
        let table = MessageTable::default();
        let report = analyze(&table, &FilterConfig::new(), &AnalysisConfig::default()).unwrap();
        assert_eq!(report.stats, MessageStats::default());
        assert!(report.heatmap.is_empty());
        assert!(report.emojis.is_empty());
        assert!(report.busy_users.unwrap().is_empty());
    }
}
