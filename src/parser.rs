//! Line parser for chat export text.
//!
//! [`LineParser::parse`] turns the raw export into a lazy iterator of
//! [`RawMessage`]s. Each message starts at a boundary line (date, time,
//! separator, optional `"sender: "`); every following line that is not a
//! boundary belongs to the same message body.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::LineParser;
//!
//! let text = "1/1/24, 10:00 - Alice: hello\nsecond line\n1/1/24, 10:06 - Alice added Bob";
//! let parser = LineParser::default();
//! let messages: Vec<_> = parser.parse(text).collect();
//!
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[0].sender, Some("Alice"));
//! assert_eq!(messages[0].body, "hello\nsecond line");
//! assert_eq!(messages[1].sender, None);
//! ```
//!
//! Malformed input never fails: stray lines before the first boundary are
//! discarded, and text with no recognizable format yields no messages.

use std::str::Lines;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::config::ParserConfig;
use crate::error::Result;
use crate::parsing::whatsapp::{LinePattern, detect_format, split_sender, strip_marks};

/// One message as it appears in the export, before timestamp parsing.
#[derive(Debug, Clone)]
pub struct RawMessage<'a> {
    /// Date as written in the export
    pub date: &'a str,

    /// Time as written in the export
    pub time: &'a str,

    /// Sender, or `None` for system notices
    pub sender: Option<&'a str>,

    /// Message text, continuation lines joined with `'\n'`
    pub body: String,

    pattern: &'a LinePattern,
}

impl RawMessage<'_> {
    /// Parses the timestamp with the format this message was matched by.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.pattern.parse_timestamp(self.date, self.time)
    }

    fn finish(mut self) -> Self {
        let len = self.body.trim_end().len();
        self.body.truncate(len);
        self
    }
}

/// Splits export text into [`RawMessage`]s.
///
/// Holds the compiled candidate formats; detection happens per call to
/// [`parse`](Self::parse), so one parser can be reused across exports.
#[derive(Debug, Clone)]
pub struct LineParser {
    patterns: Vec<LinePattern>,
    sample_lines: usize,
}

impl LineParser {
    /// Creates a parser from configuration.
    ///
    /// Fails only when a custom format is invalid.
    pub fn new(config: &ParserConfig) -> Result<Self> {
        let mut patterns: Vec<LinePattern> = config
            .formats
            .iter()
            .map(|&f| LinePattern::builtin(f))
            .collect();

        for custom in &config.custom_formats {
            patterns.push(LinePattern::custom(custom)?);
        }

        Ok(Self {
            patterns,
            sample_lines: config.sample_lines.max(1),
        })
    }

    /// Returns the candidate patterns, in tie-break order.
    pub fn patterns(&self) -> &[LinePattern] {
        &self.patterns
    }

    /// Detects the export format.
    ///
    /// The leading `sample_lines` lines give a first guess. If any later
    /// boundary line fails to parse under that guess, every line of the
    /// export is scored again.
    pub fn detect<'p>(&'p self, text: &str) -> Option<&'p LinePattern> {
        let sample = text.lines().take(self.sample_lines);
        let guess = &self.patterns[detect_format(sample, &self.patterns)?];

        if text.lines().skip(self.sample_lines).any(|line| guess.rejects(line)) {
            debug!(guess = guess.name(), "sample guess rejects later lines, rescoring whole export");
            return detect_format(text.lines(), &self.patterns).map(|i| &self.patterns[i]);
        }

        Some(guess)
    }

    /// Parses export text lazily.
    ///
    /// If no format is recognized, the returned iterator is empty.
    pub fn parse<'a>(&'a self, text: &'a str) -> RawMessages<'a> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let pattern = self.detect(text);

        match pattern {
            Some(p) => debug!(format = p.name(), "detected export format"),
            None => warn!("no known message format found in export text"),
        }

        RawMessages {
            lines: text.lines(),
            pattern,
            current: None,
            orphans: 0,
        }
    }
}

impl Default for LineParser {
    fn default() -> Self {
        let config = ParserConfig::default();
        Self {
            patterns: config
                .formats
                .iter()
                .map(|&f| LinePattern::builtin(f))
                .collect(),
            sample_lines: config.sample_lines,
        }
    }
}

/// Lazy iterator over the messages of one export.
#[derive(Debug)]
pub struct RawMessages<'a> {
    lines: Lines<'a>,
    pattern: Option<&'a LinePattern>,
    current: Option<RawMessage<'a>>,
    orphans: usize,
}

impl<'a> RawMessages<'a> {
    /// Returns the detected format, if any.
    pub fn pattern(&self) -> Option<&'a LinePattern> {
        self.pattern
    }

    /// Number of lines discarded so far because no message preceded them.
    pub fn orphan_lines(&self) -> usize {
        self.orphans
    }
}

impl<'a> Iterator for RawMessages<'a> {
    type Item = RawMessage<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let pattern = self.pattern?;

        for line in self.lines.by_ref() {
            if let Some(header) = pattern.match_header(strip_marks(line)) {
                let (sender, body) = split_sender(header.rest);
                let started = RawMessage {
                    date: header.date,
                    time: header.time,
                    sender,
                    body: body.to_string(),
                    pattern,
                };
                if let Some(done) = self.current.replace(started) {
                    return Some(done.finish());
                }
            } else if let Some(current) = self.current.as_mut() {
                // Continuation of previous message (multiline)
                current.body.push('\n');
                current.body.push_str(line);
            } else {
                self.orphans += 1;
            }
        }

        self.current.take().map(RawMessage::finish)
    }
}
