//! The structured message record.
//!
//! This module provides [`MessageRecord`], one row of the
//! [`MessageTable`](crate::MessageTable). Every record carries a parsed
//! timestamp and the calendar fields derived from it, computed once when
//! the record is built so the aggregation queries never re-derive them.
//!
//! # Examples
//!
//! ```
//! use chatlens::MessageRecord;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//! let record = MessageRecord::new(ts, "Alice", "hello world");
//!
//! assert_eq!(record.month_name, "January");
//! assert_eq!(record.day_name, "Monday");
//! assert_eq!(record.month_period.label(), "January-2024");
//! ```

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

/// Sender used for system events that have no author.
pub const GROUP_NOTIFICATION: &str = "group_notification";

/// English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English weekday names, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Placeholders written in place of attachments.
pub const MEDIA_OMITTED_MARKERS: &[&str] = &[
    "<Media omitted>",
    "<Без медиафайлов>",
    "image omitted",
    "video omitted",
    "audio omitted",
    "sticker omitted",
    "GIF omitted",
    "document omitted",
    "Contact card omitted",
];

/// Placeholders written in place of deleted messages.
pub const DELETED_MARKERS: &[&str] = &[
    "This message was deleted",
    "You deleted this message",
    "Данное сообщение удалено",
    "Вы удалили данное сообщение",
];

/// What a message body holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// Regular text
    Text,
    /// An attachment placeholder
    Media,
    /// A deleted-message placeholder
    Deleted,
}

/// Classifies a message body.
///
/// All media and deletion checks go through here.
///
/// ```
/// use chatlens::message::{BodyKind, classify_body};
///
/// assert_eq!(classify_body("<Media omitted>"), BodyKind::Media);
/// assert_eq!(classify_body("\u{200e}image omitted"), BodyKind::Media);
/// assert_eq!(classify_body("This message was deleted"), BodyKind::Deleted);
/// assert_eq!(classify_body("hello"), BodyKind::Text);
/// ```
pub fn classify_body(body: &str) -> BodyKind {
    if MEDIA_OMITTED_MARKERS.iter().any(|m| body.contains(m)) {
        BodyKind::Media
    } else if DELETED_MARKERS.iter().any(|m| body.contains(m)) {
        BodyKind::Deleted
    } else {
        BodyKind::Text
    }
}

/// A calendar month, used to bucket the monthly timeline.
///
/// Orders by `(year, month)`, so December 2023 sorts before January 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthPeriod {
    /// Calendar year
    pub year: i32,
    /// Month number, 1 to 12
    pub month: u32,
}

impl MonthPeriod {
    /// Creates a period from a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Numeric sort key, `year * 12 + (month - 1)`.
    pub fn key(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// English month name.
    pub fn month_name(self) -> &'static str {
        month_name(self.month)
    }

    /// Label such as `"January-2024"`.
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.month_name(), self.year)
    }
}

impl Serialize for MonthPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

/// One parsed message with its derived calendar fields.
///
/// The derived fields are computed from `timestamp` by [`MessageRecord::new`].
/// Analyses read the timestamp itself, and
/// [`MessageTable::from_records`](crate::MessageTable::from_records) derives
/// the fields again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    /// When the message was sent, as written in the export (no timezone).
    pub timestamp: NaiveDateTime,

    /// Author, or [`GROUP_NOTIFICATION`] for system events.
    pub sender: String,

    /// Message text; may be a media or deleted placeholder.
    pub body: String,

    pub year: i32,
    pub month_name: &'static str,
    pub month_number: u32,
    pub day: u32,
    pub day_name: &'static str,
    pub hour: u32,
    pub minute: u32,
    pub date_only: NaiveDate,
    pub month_period: MonthPeriod,
}

impl MessageRecord {
    /// Builds a record and derives its calendar fields.
    pub fn new(timestamp: NaiveDateTime, sender: impl Into<String>, body: impl Into<String>) -> Self {
        let date = timestamp.date();
        Self {
            timestamp,
            sender: sender.into(),
            body: body.into(),
            year: date.year(),
            month_name: month_name(date.month()),
            month_number: date.month(),
            day: date.day(),
            day_name: WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize],
            hour: timestamp.hour(),
            minute: timestamp.minute(),
            date_only: date,
            month_period: MonthPeriod::from_date(date),
        }
    }

    /// Returns `true` for system events.
    pub fn is_notification(&self) -> bool {
        self.sender == GROUP_NOTIFICATION
    }

    /// Classifies the body.
    pub fn kind(&self) -> BodyKind {
        classify_body(&self.body)
    }

    pub fn is_media(&self) -> bool {
        self.kind() == BodyKind::Media
    }

    pub fn is_deleted(&self) -> bool {
        self.kind() == BodyKind::Deleted
    }

    /// Weekday index, Monday = 0.
    pub fn weekday_index(&self) -> usize {
        self.timestamp.weekday().num_days_from_monday() as usize
    }

    /// Returns `true` if the body counts as the author's own words.
    ///
    /// False for notifications and media or deleted placeholders.
    pub fn has_text(&self) -> bool {
        !self.is_notification() && self.kind() == BodyKind::Text
    }
}
