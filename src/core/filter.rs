//! Narrow the table by participant and date range.
//!
//! This module provides [`UserSelection`] and [`filter`], which pick the
//! rows of one participant (or all of them), and [`FilterConfig`] with
//! [`apply_filters`], which add an inclusive date range on top.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | User | [`with_user`](FilterConfig::with_user) | Messages from one participant, or `"Overall"` |
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//!
//! # Examples
//!
//! ## Filter by User
//!
//! ```
//! use chatlens::MessageTable;
//! use chatlens::core::filter::{UserSelection, filter};
//!
//! let table = MessageTable::from_export(
//!     "1/1/24, 10:00 - Alice: hi\n1/1/24, 10:01 - Bob: yo\n1/1/24, 10:02 - Alice: bye",
//! );
//!
//! let view = filter(&table, &UserSelection::from("Alice"));
//! assert_eq!(view.len(), 2);
//!
//! let all = filter(&table, &UserSelection::Overall);
//! assert_eq!(all.len(), 3);
//! ```
//!
//! ## Filter by Date Range
//!
//! ```
//! use chatlens::MessageTable;
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//!
//! # fn main() -> chatlens::Result<()> {
//! let table = MessageTable::from_export(
//!     "15/01/2024, 10:00 - Alice: old\n15/06/2024, 10:00 - Alice: new",
//! );
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_date_to("2024-12-31")?;
//!
//! let view = apply_filters(&table, &config);
//! assert_eq!(view.len(), 1);
//! assert_eq!(view.records()[0].body, "new");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - User matching is exact; `"alice"` does not match `"Alice"`
//! - Both date bounds are inclusive whole days
//! - Multiple filters are combined with AND logic

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ChatlensError;
use crate::message::MessageRecord;
use crate::table::MessageTable;

/// Selection value meaning "every participant".
pub const OVERALL: &str = "Overall";

/// Which participant to analyze.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum UserSelection {
    /// The whole conversation
    #[default]
    Overall,
    /// One sender, matched exactly
    User(String),
}

impl UserSelection {
    /// Returns `true` if the record belongs to this selection.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        match self {
            UserSelection::Overall => true,
            UserSelection::User(name) => record.sender == *name,
        }
    }

    pub fn is_overall(&self) -> bool {
        matches!(self, UserSelection::Overall)
    }
}

impl From<&str> for UserSelection {
    fn from(value: &str) -> Self {
        if value == OVERALL {
            UserSelection::Overall
        } else {
            UserSelection::User(value.to_string())
        }
    }
}

impl From<String> for UserSelection {
    fn from(value: String) -> Self {
        if value == OVERALL {
            UserSelection::Overall
        } else {
            UserSelection::User(value)
        }
    }
}

impl FromStr for UserSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for UserSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserSelection::Overall => f.write_str(OVERALL),
            UserSelection::User(name) => f.write_str(name),
        }
    }
}

impl Serialize for UserSelection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A borrowed, read-only subset of a [`MessageTable`], in table order.
#[derive(Debug, Clone, Default)]
pub struct TableView<'a> {
    records: Vec<&'a MessageRecord>,
}

impl<'a> TableView<'a> {
    /// Wraps a list of borrowed records.
    pub fn new(records: Vec<&'a MessageRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[&'a MessageRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a MessageRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> From<&'a MessageTable> for TableView<'a> {
    fn from(table: &'a MessageTable) -> Self {
        Self::new(table.iter().collect())
    }
}

/// Selects the rows of one participant, or all rows for `Overall`.
///
/// Never mutates the table; row order is preserved.
pub fn filter<'a>(table: &'a MessageTable, user: &UserSelection) -> TableView<'a> {
    TableView::new(table.iter().filter(|r| user.matches(r)).collect())
}

/// User selection plus an optional inclusive date range.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
///
/// # Examples
///
/// ```
/// use chatlens::core::filter::FilterConfig;
///
/// # fn main() -> chatlens::Result<()> {
/// let by_user = FilterConfig::new().with_user("Alice");
///
/// let by_date = FilterConfig::new()
///     .with_date_from("2024-01-01")?
///     .with_date_to("2024-12-31")?;
///
/// let combined = FilterConfig::new()
///     .with_user("Alice")
///     .with_date_from("2024-06-01")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Participant to keep.
    pub user: UserSelection,

    /// Include only messages on or after this date.
    pub after: Option<NaiveDate>,

    /// Include only messages on or before this date.
    pub before: Option<NaiveDate>,
}

impl FilterConfig {
    /// Creates a filter that keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the participant.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<UserSelection>) -> Self {
        self.user = user.into();
        self
    }

    /// Sets the start date filter (inclusive).
    ///
    /// Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        self.after = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive).
    ///
    /// Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        self.before = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the start date directly.
    #[must_use]
    pub fn with_after(mut self, date: NaiveDate) -> Self {
        self.after = Some(date);
        self
    }

    /// Sets the end date directly.
    #[must_use]
    pub fn with_before(mut self, date: NaiveDate) -> Self {
        self.before = Some(date);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || !self.user.is_overall()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if the record passes every active filter.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        self.user.matches(record)
            && self.after.is_none_or(|after| record.timestamp.date() >= after)
            && self.before.is_none_or(|before| record.timestamp.date() <= before)
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatlensError::invalid_date(date_str))
}

/// Applies every active filter.
pub fn apply_filters<'a>(table: &'a MessageTable, config: &FilterConfig) -> TableView<'a> {
    if !config.is_active() {
        return TableView::from(table);
    }
    TableView::new(table.iter().filter(|r| config.matches(r)).collect())
}
