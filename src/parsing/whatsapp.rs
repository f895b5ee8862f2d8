//! WhatsApp line formats.
//!
//! Exports vary by locale and platform. Each [`DateFormat`] describes one
//! message boundary: a date, a time and a separator, followed by the rest
//! of the line (`"Sender: text"` or a bare system notice). [`LinePattern`]
//! is the compiled form shared by built-in and user-defined formats.

use std::fmt;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::CustomFormat;
use crate::error::{ChatlensError, Result};

/// Built-in date format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// iOS, month first, 12h or 24h clock
    /// Example: [1/15/24, 10:30:45 AM] Sender: Message
    US,
    /// Dots in brackets: DD.MM.YY or DD.MM.YYYY
    /// Example: [15.01.24, 10:30:45] Sender: Message
    EuDotBracketed,
    /// Dots, no brackets
    /// Example: 26.10.2025, 20:40 - Sender: Message
    EuDotNoBracket,
    /// Android, day first, 24h clock
    /// Example: 15/01/2024, 10:30 - Sender: Message
    EuSlash,
    /// Bracketed, day first
    /// Example: [15/01/2024, 10:30:45] Sender: Message
    EuSlashBracketed,
    /// Android, month first, 12h or 24h clock
    /// Example: 1/15/24, 10:30 AM - Sender: Message
    UsDash,
}

impl DateFormat {
    /// Returns the boundary regex, with `date`, `time` and `rest` groups.
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::US => {
                r"^\[(?P<date>\d{1,2}/\d{1,2}/\d{2,4}),\s(?P<time>\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)\]\s(?P<rest>.*)$"
            }
            DateFormat::EuDotBracketed => {
                r"^\[(?P<date>\d{1,2}\.\d{1,2}\.\d{2,4}),\s(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\]\s(?P<rest>.*)$"
            }
            DateFormat::EuDotNoBracket => {
                r"^(?P<date>\d{1,2}\.\d{1,2}\.\d{2,4}),\s(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\s-\s(?P<rest>.*)$"
            }
            DateFormat::EuSlash => {
                r"^(?P<date>\d{1,2}/\d{1,2}/\d{2,4}),\s(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\s-\s(?P<rest>.*)$"
            }
            DateFormat::EuSlashBracketed => {
                r"^\[(?P<date>\d{1,2}/\d{1,2}/\d{2,4}),\s(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\]\s(?P<rest>.*)$"
            }
            DateFormat::UsDash => {
                r"^(?P<date>\d{1,2}/\d{1,2}/\d{2,4}),\s(?P<time>\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)\s-\s(?P<rest>.*)$"
            }
        }
    }

    /// Returns date parsing format strings for chrono.
    pub fn date_parse_formats(self) -> &'static [&'static str] {
        match self {
            DateFormat::US | DateFormat::UsDash => &[
                "%m/%d/%y, %I:%M:%S %p",
                "%m/%d/%y, %I:%M %p",
                "%m/%d/%Y, %I:%M:%S %p",
                "%m/%d/%Y, %I:%M %p",
                "%m/%d/%y, %H:%M:%S",
                "%m/%d/%y, %H:%M",
                "%m/%d/%Y, %H:%M:%S",
                "%m/%d/%Y, %H:%M",
            ],
            DateFormat::EuDotBracketed | DateFormat::EuDotNoBracket => &[
                "%d.%m.%y, %H:%M:%S",
                "%d.%m.%y, %H:%M",
                "%d.%m.%Y, %H:%M:%S",
                "%d.%m.%Y, %H:%M",
            ],
            DateFormat::EuSlash | DateFormat::EuSlashBracketed => &[
                "%d/%m/%y, %H:%M:%S",
                "%d/%m/%y, %H:%M",
                "%d/%m/%Y, %H:%M:%S",
                "%d/%m/%Y, %H:%M",
            ],
        }
    }

    /// Returns the config key of this format.
    pub fn name(self) -> &'static str {
        match self {
            DateFormat::US => "us",
            DateFormat::EuDotBracketed => "eu_dot_bracketed",
            DateFormat::EuDotNoBracket => "eu_dot_no_bracket",
            DateFormat::EuSlash => "eu_slash",
            DateFormat::EuSlashBracketed => "eu_slash_bracketed",
            DateFormat::UsDash => "us_dash",
        }
    }

    /// Returns all format variants, in default tie-break order.
    ///
    /// Day-first `EuSlash` precedes `UsDash`, so an ambiguous Android
    /// export such as `1/2/24, 10:00 - ...` is read as 1 February.
    pub fn all() -> &'static [DateFormat] {
        &[
            DateFormat::US,
            DateFormat::EuDotBracketed,
            DateFormat::EuDotNoBracket,
            DateFormat::EuSlash,
            DateFormat::EuSlashBracketed,
            DateFormat::UsDash,
        ]
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three parts of a boundary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    /// Date as written in the export
    pub date: &'a str,
    /// Time as written in the export
    pub time: &'a str,
    /// Everything after the timestamp prefix
    pub rest: &'a str,
}

/// A compiled message boundary pattern.
#[derive(Debug, Clone)]
pub struct LinePattern {
    name: String,
    regex: Regex,
    timestamp_formats: Vec<String>,
}

impl LinePattern {
    /// Compiles a built-in format.
    pub fn builtin(format: DateFormat) -> Self {
        Self {
            name: format.name().to_string(),
            regex: Regex::new(format.pattern()).expect("built-in pattern compiles"),
            timestamp_formats: format
                .date_parse_formats()
                .iter()
                .map(|f| (*f).to_string())
                .collect(),
        }
    }

    /// Compiles a user-defined format.
    ///
    /// Fails if the regex is invalid or lacks one of the `date`, `time`
    /// and `rest` groups.
    pub fn custom(format: &CustomFormat) -> Result<Self> {
        let regex = Regex::new(&format.pattern)
            .map_err(|e| ChatlensError::invalid_pattern(&format.pattern, e))?;

        for group in ["date", "time", "rest"] {
            if !regex.capture_names().flatten().any(|name| name == group) {
                return Err(ChatlensError::invalid_config(format!(
                    "custom pattern '{}' has no '{}' group",
                    format.pattern, group
                )));
            }
        }
        if format.timestamp_formats.is_empty() {
            return Err(ChatlensError::invalid_config(format!(
                "custom pattern '{}' has no timestamp formats",
                format.pattern
            )));
        }

        Ok(Self {
            name: format!("custom:{}", format.pattern),
            regex,
            timestamp_formats: format.timestamp_formats.clone(),
        })
    }

    /// Returns the format name used in logs and reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Splits a boundary line into its parts.
    pub fn match_header<'a>(&self, line: &'a str) -> Option<Header<'a>> {
        let caps = self.regex.captures(line)?;
        Some(Header {
            date: caps.name("date")?.as_str(),
            time: caps.name("time")?.as_str(),
            rest: caps.name("rest").map_or("", |m| m.as_str()),
        })
    }

    /// Parses a timestamp from date and time strings.
    pub fn parse_timestamp(&self, date: &str, time: &str) -> Option<NaiveDateTime> {
        let datetime_str = format!("{date}, {}", normalize_time(time));

        self.timestamp_formats
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(&datetime_str, f).ok())
    }

    /// Returns `true` if the line is a boundary with a parseable timestamp.
    fn accepts(&self, line: &str) -> bool {
        self.match_header(line)
            .is_some_and(|h| self.parse_timestamp(h.date, h.time).is_some())
    }

    /// Returns `true` if the line looks like a boundary but its timestamp
    /// doesn't parse.
    pub fn rejects(&self, line: &str) -> bool {
        self.match_header(strip_marks(line))
            .is_some_and(|h| self.parse_timestamp(h.date, h.time).is_none())
    }
}

/// iOS writes `10:30\u{202f}AM`; chrono only understands plain spaces.
fn normalize_time(time: &str) -> String {
    time.replace(['\u{202f}', '\u{a0}'], " ")
}

/// Strips the invisible marks some exports put at line starts.
pub fn strip_marks(line: &str) -> &str {
    line.trim_start_matches(['\u{feff}', '\u{200e}', '\u{200f}'])
}

/// Splits the remainder of a boundary line into sender and body.
///
/// `"Alice: hi"` has a sender; `"Alice added Bob"` doesn't and is a system
/// notice. Senders never contain a colon.
pub fn split_sender(rest: &str) -> (Option<&str>, &str) {
    let candidate = match rest.split_once(": ") {
        Some((sender, body)) => Some((sender, body)),
        None => rest.strip_suffix(':').map(|sender| (sender, "")),
    };

    match candidate {
        Some((sender, body)) if !sender.trim().is_empty() && !sender.contains(':') => {
            (Some(sender.trim()), body)
        }
        _ => (None, rest),
    }
}

/// Auto-detect the line format by analyzing sample lines.
///
/// A line scores for a pattern when it matches and its timestamp parses,
/// so day-first and month-first exports tell themselves apart as soon as a
/// day above 12 shows up. Returns the index of the winner in `patterns`,
/// the earliest on ties, or `None` if nothing matched.
pub fn detect_format<'a, I>(lines: I, patterns: &[LinePattern]) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scores = vec![0usize; patterns.len()];

    for line in lines {
        let line = strip_marks(line);
        for (i, pattern) in patterns.iter().enumerate() {
            if pattern.accepts(line) {
                scores[i] += 1;
            }
        }
    }

    // Find the winner (highest score)
    let max_score = *scores.iter().max()?;
    if max_score == 0 {
        return None;
    }

    scores.iter().position(|&s| s == max_score)
}
