//! Report rendering.
//!
//! This module turns an [`AnalysisReport`] into text for a terminal or
//! JSON for other programs. It has no CLI framework dependencies.
//!
//! # Example
//!
//! ```rust
//! use chatlens::MessageTable;
//! use chatlens::analysis::analyze;
//! use chatlens::config::AnalysisConfig;
//! use chatlens::core::FilterConfig;
//! use chatlens::format::{OutputFormat, render};
//!
//! # fn main() -> chatlens::Result<()> {
//! let table = MessageTable::from_export("1/1/24, 10:00 - Alice: hello world");
//! let report = analyze(&table, &FilterConfig::new(), &AnalysisConfig::default())?;
//!
//! let text = render(&report, OutputFormat::Text)?;
//! assert!(text.contains("Top Statistics"));
//!
//! let json = render(&report, OutputFormat::Json)?;
//! assert!(json.starts_with('{'));
//! # Ok(())
//! # }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisReport, CategoryCount};
use crate::error::ChatlensError;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Human-readable sections (default)
    #[default]
    Text,

    /// Pretty-printed JSON of the whole report
    Json,
}

impl OutputFormat {
    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "json"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Text, OutputFormat::Json]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Renders a report in the given format.
pub fn render(report: &AnalysisReport, format: OutputFormat) -> Result<String, ChatlensError> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

const NO_DATA: &str = "⚠️  No data for this selection";

/// Plain-text view of a report.
///
/// Empty sections print a warning line instead of an empty table.
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a>(pub &'a AnalysisReport);

/// Renders every section as plain text.
pub fn render_text(report: &AnalysisReport) -> String {
    TextReport(report).to_string()
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "## {title}")
}

fn categories(f: &mut fmt::Formatter<'_>, items: &[CategoryCount]) -> fmt::Result {
    if items.is_empty() {
        writeln!(f, "{NO_DATA}")?;
    }
    for item in items {
        writeln!(f, "   {:<10} {}", item.label, item.count)?;
    }
    Ok(())
}

impl TextReport<'_> {
    fn heatmap(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heatmap = &self.0.heatmap;
        if heatmap.is_empty() {
            return writeln!(f, "⚠️  No activity data available to display heatmap");
        }
        write!(f, "   {:<10}", "")?;
        for column in &heatmap.columns {
            write!(f, " {column:>5}")?;
        }
        writeln!(f)?;
        for (row, values) in heatmap.rows.iter().zip(&heatmap.values) {
            write!(f, "   {row:<10}")?;
            for value in values {
                write!(f, " {value:>5}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "📊 Analysis for: {}", report.user)?;

        section(f, "Top Statistics")?;
        let s = &report.stats;
        writeln!(f, "   Total Messages: {}", s.messages)?;
        writeln!(f, "   Total Words:    {}", s.words)?;
        writeln!(f, "   Media Shared:   {}", s.media)?;
        writeln!(f, "   Links Shared:   {}", s.links)?;

        section(f, "Monthly Timeline")?;
        if report.monthly_timeline.is_empty() {
            writeln!(f, "{NO_DATA}")?;
        }
        for month in &report.monthly_timeline {
            writeln!(f, "   {:<16} {}", month.label, month.count)?;
        }

        section(f, "Daily Timeline")?;
        if report.daily_timeline.is_empty() {
            writeln!(f, "{NO_DATA}")?;
        }
        for day in &report.daily_timeline {
            writeln!(f, "   {}  {}", day.date, day.count)?;
        }

        section(f, "Most Busy Day")?;
        categories(f, &report.week_activity)?;

        section(f, "Most Busy Month")?;
        categories(f, &report.month_activity)?;

        section(f, "Weekly Activity Map")?;
        self.heatmap(f)?;

        if let Some(busy) = &report.busy_users {
            section(f, "Most Busy Users")?;
            if busy.is_empty() {
                writeln!(f, "{NO_DATA}")?;
            }
            for user in &busy.top {
                writeln!(f, "   {:<20} {}", user.user, user.count)?;
            }
            if !busy.shares.is_empty() {
                writeln!(f)?;
                writeln!(f, "   {:<20} percent", "name")?;
                for share in &busy.shares {
                    writeln!(f, "   {:<20} {:.2}", share.user, share.percent)?;
                }
            }
        }

        section(f, "Wordcloud")?;
        if report.word_cloud.is_empty() {
            writeln!(f, "{NO_DATA}")?;
        } else {
            writeln!(f, "   {} distinct words", report.word_cloud.len())?;
        }

        section(f, "Most Common Words")?;
        if report.common_words.is_empty() {
            writeln!(f, "{NO_DATA}")?;
        }
        for word in &report.common_words {
            writeln!(f, "   {:<20} {}", word.word, word.count)?;
        }

        section(f, "Emoji Analysis")?;
        if report.emojis.is_empty() {
            writeln!(f, "⚠️  No emojis found in this chat")?;
        }
        for emoji in &report.emojis {
            writeln!(f, "   {}  {}", emoji.emoji, emoji.count)?;
        }

        section(f, "Sentiment Analysis")?;
        let counts = &report.sentiment.counts;
        if counts.total() == 0 {
            writeln!(f, "{NO_DATA}")
        } else {
            writeln!(f, "   Positive: {}", counts.positive)?;
            writeln!(f, "   Neutral:  {}", counts.neutral)?;
            writeln!(f, "   Negative: {}", counts.negative)
        }
    }
}
