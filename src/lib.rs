//! # Chatlens
//!
//! A Rust library for turning exported WhatsApp chats into statistics and
//! chart-ready data.
//!
//! ## Overview
//!
//! Chatlens reads the plain-text export of a group or private chat and
//! builds a table of timestamped messages. Read-only queries over that
//! table give:
//! - **Counts** - messages, words, media and links
//! - **Timelines** - per month and per day
//! - **Activity** - busiest weekdays, months and a weekday by hour heatmap
//! - **Participants** - busiest users and their share of the chat
//! - **Words and emojis** - frequency rankings with stop-word removal
//! - **Sentiment** - a per-message lexicon score and label
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let text = "1/1/24, 10:00 - Alice: hello world\n\
//!                 1/1/24, 10:05 - Bob: <Media omitted>\n\
//!                 1/1/24, 10:06 - group_notification: Alice added Bob";
//!
//!     let table = MessageTable::from_export(text);
//!     let view = filter(&table, &UserSelection::Overall);
//!
//!     let stats = fetch_stats(&view);
//!     assert_eq!((stats.messages, stats.words, stats.media, stats.links), (3, 2, 1, 0));
//!
//!     let busy = most_busy_users(&view, 5);
//!     assert_eq!(busy.top[0].user, "Alice");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Whole Report
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let table = MessageTable::from_export("15/01/2024, 10:30 - Alice: great news 🎉");
//! let filter = FilterConfig::new().with_user("Alice");
//! let report = analyze(&table, &filter, &AnalysisConfig::default())?;
//!
//! assert_eq!(report.emojis[0].emoji, "🎉");
//! assert_eq!(report.sentiment.counts.positive, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`LineParser`](parser::LineParser), a lazy iterator of raw messages
//! - [`parsing`] - line formats ([`DateFormat`](parsing::DateFormat)) and detection
//! - [`table`] - [`MessageTable`] with derived calendar fields
//! - [`message`] - [`MessageRecord`], [`MonthPeriod`](message::MonthPeriod), body classification
//! - [`core`] - [`filter`](core::filter()), [`UserSelection`](core::UserSelection), [`FilterConfig`](core::FilterConfig)
//! - [`analysis`] - every aggregation query and [`analyze`](analysis::analyze)
//! - [`format`] - text and JSON rendering of reports
//! - [`config`] - [`Config`](config::Config) loaded from JSON
//! - [`cli`] - CLI argument types
//! - [`error`] - Unified error types ([`ChatlensError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod table;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use message::MessageRecord;
pub use table::MessageTable;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    // Table types
    pub use crate::message::{GROUP_NOTIFICATION, MessageRecord, MonthPeriod};
    pub use crate::table::MessageTable;

    // Error types
    pub use crate::error::{ChatlensError, Result};

    // Parsing
    pub use crate::parser::LineParser;
    pub use crate::parsing::DateFormat;

    // Configuration
    pub use crate::config::{AnalysisConfig, Config, CustomFormat, ParserConfig};

    // Filtering
    pub use crate::core::filter::{
        FilterConfig, TableView, UserSelection, apply_filters, filter,
    };

    // Queries
    pub use crate::analysis::{
        AnalysisReport, SentimentAnalyzer, StopWords, activity_heatmap, analyze,
        create_wordcloud, daily_timeline, emoji_helper, fetch_stats, month_activity_map,
        monthly_timeline, most_busy_users, most_common_words, sentiment_analysis,
        week_activity_map,
    };

    // Rendering
    pub use crate::format::{OutputFormat, render};
}
