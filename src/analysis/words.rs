//! Word frequencies and stop-words.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use stop_words::{LANGUAGE, get};
use tracing::debug;

use super::Tally;
use crate::config::AnalysisConfig;
use crate::core::filter::TableView;
use crate::error::Result;

/// Words left out of frequency counts, stored lowercase.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The `stop-words` English list.
    pub fn english() -> Self {
        let mut stop = Self::new();
        stop.extend(get(LANGUAGE::English).iter().map(ToString::to_string));
        stop
    }

    /// Builds the list described by the analysis config.
    ///
    /// Fails only if the stop-word file can't be read.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        let mut stop = if config.use_builtin_stop_words {
            Self::english()
        } else {
            Self::new()
        };
        stop.extend(config.extra_stop_words.iter().cloned());
        if let Some(path) = &config.stop_words_file {
            stop.load_file(path)?;
        }
        debug!(count = stop.len(), "loaded stop-words");
        Ok(stop)
    }

    /// Adds every non-empty line of a file.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let text = crate::error::read_utf8(path)?;
        self.extend_from_text(&text);
        Ok(())
    }

    /// Adds every non-empty line of newline-separated text.
    pub fn extend_from_text(&mut self, text: &str) {
        self.extend(text.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from));
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Extend<String> for StopWords {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.words.extend(iter.into_iter().map(|w| w.to_lowercase()));
    }
}

impl<S: Into<String>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut stop = Self::new();
        stop.extend(iter.into_iter().map(Into::into));
        stop
    }
}

/// A word and how often it appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Word counts for a word cloud, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WordFrequencies {
    entries: Vec<WordCount>,
}

impl WordFrequencies {
    pub fn entries(&self) -> &[WordCount] {
        &self.entries
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.word == word).map(|e| e.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by count descending, ties in first-seen order.
    pub fn top(&self, n: usize) -> Vec<WordCount> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}

fn tally_words(view: &TableView<'_>, stop_words: &StopWords) -> Tally<String> {
    let mut tally = Tally::new();
    for record in view.iter().filter(|r| r.has_text()) {
        for word in record.body.to_lowercase().split_whitespace() {
            if !stop_words.contains(word) {
                tally.add(word.to_string());
            }
        }
    }
    tally
}

/// Counts words for a word cloud.
///
/// Notifications, media placeholders and deleted markers are skipped;
/// words are lowercased and split on whitespace.
pub fn create_wordcloud(view: &TableView<'_>, stop_words: &StopWords) -> WordFrequencies {
    WordFrequencies {
        entries: tally_words(view, stop_words)
            .into_entries()
            .into_iter()
            .map(|(word, count)| WordCount { word, count })
            .collect(),
    }
}

/// The `n` most frequent words, ties in first-seen order.
pub fn most_common_words(view: &TableView<'_>, stop_words: &StopWords, n: usize) -> Vec<WordCount> {
    tally_words(view, stop_words)
        .ranked()
        .into_iter()
        .take(n)
        .map(|(word, count)| WordCount { word, count })
        .collect()
}
