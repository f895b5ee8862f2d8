//! Configuration types for parsing and analysis.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. Every struct implements
//! [`Default`], builder-style `with_*` methods and serde, so a whole
//! [`Config`] can be loaded from a JSON file.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{AnalysisConfig, Config, ParserConfig};
//! use chatlens::parsing::whatsapp::DateFormat;
//!
//! let config = Config::new()
//!     .with_parser(ParserConfig::new().with_formats(vec![DateFormat::EuSlash]))
//!     .with_analysis(AnalysisConfig::new().with_top_words(10));
//!
//! assert_eq!(config.analysis.top_words, 10);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChatlensError, Result};
use crate::parsing::whatsapp::DateFormat;

/// Top-level configuration, as loaded from `--config`.
///
/// Missing sections and fields fall back to their defaults:
///
/// ```rust
/// use chatlens::config::Config;
///
/// let config = Config::from_json_str(r#"{"analysis": {"top_words": 5}}"#)?;
/// assert_eq!(config.analysis.top_words, 5);
/// assert_eq!(config.analysis.top_users, 5);
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Line parser settings
    pub parser: ParserConfig,

    /// Aggregation settings
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from a JSON string and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = crate::error::read_utf8(path)?;
        Self::from_json_str(&json)
    }

    /// Replaces the parser section.
    #[must_use]
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Replaces the analysis section.
    #[must_use]
    pub fn with_analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = analysis;
        self
    }

    /// Checks cross-field constraints that serde can't express.
    pub fn validate(&self) -> Result<()> {
        if self.parser.formats.is_empty() && self.parser.custom_formats.is_empty() {
            return Err(ChatlensError::invalid_config(
                "parser needs at least one date format",
            ));
        }
        if self.parser.sample_lines == 0 {
            return Err(ChatlensError::invalid_config(
                "parser.sample_lines must be positive",
            ));
        }
        let a = &self.analysis;
        if a.sentiment_negative_threshold > a.sentiment_positive_threshold {
            return Err(ChatlensError::invalid_config(format!(
                "sentiment thresholds overlap: negative {} > positive {}",
                a.sentiment_negative_threshold, a.sentiment_positive_threshold
            )));
        }
        Ok(())
    }
}

/// A user-defined message boundary pattern.
///
/// `pattern` must define the named groups `date`, `time` and `rest`;
/// `rest` holds everything after the timestamp prefix (`"Sender: text"` or
/// a bare system notice). `timestamp_formats` are chrono format strings
/// tried in order against `"{date}, {time}"`.
///
/// ```rust
/// use chatlens::config::CustomFormat;
///
/// let iso = CustomFormat::new(
///     r"^(?P<date>\d{4}-\d{2}-\d{2}) (?P<time>\d{2}:\d{2}) \| (?P<rest>.*)$",
///     ["%Y-%m-%d, %H:%M"],
/// );
/// assert_eq!(iso.timestamp_formats.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFormat {
    /// Regular expression with `date`, `time` and `rest` groups
    pub pattern: String,

    /// chrono formats for `"{date}, {time}"`
    pub timestamp_formats: Vec<String>,
}

impl CustomFormat {
    /// Creates a custom format from a pattern and its timestamp formats.
    pub fn new<I, S>(pattern: impl Into<String>, timestamp_formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pattern: pattern.into(),
            timestamp_formats: timestamp_formats.into_iter().map(Into::into).collect(),
        }
    }
}

/// Configuration for the line parser.
///
/// Exports vary by locale and platform, so the parser tries every listed
/// format against the first `sample_lines` lines and keeps the best one.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParserConfig;
/// use chatlens::parsing::whatsapp::DateFormat;
///
/// // Only accept Android exports, month first
/// let config = ParserConfig::new()
///     .with_formats(vec![DateFormat::UsDash])
///     .with_sample_lines(50);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Built-in formats to try, in tie-break order (default: all)
    pub formats: Vec<DateFormat>,

    /// User-defined formats, tried after the built-in ones
    pub custom_formats: Vec<CustomFormat>,

    /// Number of leading lines used for format detection (default: 100)
    pub sample_lines: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            formats: DateFormat::all().to_vec(),
            custom_formats: Vec::new(),
            sample_lines: 100,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts detection to the given built-in formats.
    #[must_use]
    pub fn with_formats(mut self, formats: Vec<DateFormat>) -> Self {
        self.formats = formats;
        self
    }

    /// Adds a user-defined format.
    #[must_use]
    pub fn with_custom_format(mut self, format: CustomFormat) -> Self {
        self.custom_formats.push(format);
        self
    }

    /// Sets how many leading lines are sampled for detection.
    #[must_use]
    pub fn with_sample_lines(mut self, lines: usize) -> Self {
        self.sample_lines = lines;
        self
    }
}

/// Configuration for the aggregation engine.
///
/// # Example
///
/// ```rust
/// use chatlens::config::AnalysisConfig;
///
/// let config = AnalysisConfig::new()
///     .with_top_words(10)
///     .with_extra_stop_words(["hai", "bhi"]);
/// assert!(config.extra_stop_words.contains(&"hai".to_string()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of entries in the most-common-words ranking (default: 20)
    pub top_words: usize,

    /// Number of entries in the busiest-users ranking (default: 5)
    pub top_users: usize,

    /// Truncate the emoji ranking (default: keep all)
    pub top_emojis: Option<usize>,

    /// Include the built-in English stop-word list (default: true)
    pub use_builtin_stop_words: bool,

    /// Additional stop-words, matched case-insensitively
    pub extra_stop_words: Vec<String>,

    /// Newline-separated stop-word file
    pub stop_words_file: Option<PathBuf>,

    /// Compound score at or above which a message is positive (default: 0.05)
    pub sentiment_positive_threshold: f64,

    /// Compound score at or below which a message is negative (default: -0.05)
    pub sentiment_negative_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_words: 20,
            top_users: 5,
            top_emojis: None,
            use_builtin_stop_words: true,
            extra_stop_words: Vec::new(),
            stop_words_file: None,
            sentiment_positive_threshold: 0.05,
            sentiment_negative_threshold: -0.05,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the length of the most-common-words ranking.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets the length of the busiest-users ranking.
    #[must_use]
    pub fn with_top_users(mut self, n: usize) -> Self {
        self.top_users = n;
        self
    }

    /// Truncates the emoji ranking to `n` entries.
    #[must_use]
    pub fn with_top_emojis(mut self, n: usize) -> Self {
        self.top_emojis = Some(n);
        self
    }

    /// Enables or disables the built-in stop-word list.
    #[must_use]
    pub fn with_builtin_stop_words(mut self, enabled: bool) -> Self {
        self.use_builtin_stop_words = enabled;
        self
    }

    /// Adds stop-words on top of the configured lists.
    #[must_use]
    pub fn with_extra_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_stop_words
            .extend(words.into_iter().map(Into::into));
        self
    }

    /// Sets the stop-word file.
    #[must_use]
    pub fn with_stop_words_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stop_words_file = Some(path.into());
        self
    }

    /// Sets both sentiment label thresholds.
    #[must_use]
    pub fn with_sentiment_thresholds(mut self, negative: f64, positive: f64) -> Self {
        self.sentiment_negative_threshold = negative;
        self.sentiment_positive_threshold = positive;
        self
    }
}
