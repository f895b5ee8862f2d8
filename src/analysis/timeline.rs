//! Message counts over time.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::filter::TableView;
use crate::message::MonthPeriod;

/// Messages in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub period: MonthPeriod,
    /// `"<MonthName>-<year>"`
    pub label: String,
    pub count: usize,
}

/// Messages on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Counts messages per month, oldest first.
///
/// Months without messages are left out.
pub fn monthly_timeline(view: &TableView<'_>) -> Vec<MonthlyCount> {
    let mut months: BTreeMap<MonthPeriod, usize> = BTreeMap::new();
    for record in view.iter() {
        *months.entry(MonthPeriod::from_date(record.timestamp.date())).or_default() += 1;
    }

    months
        .into_iter()
        .map(|(period, count)| MonthlyCount {
            period,
            label: period.label(),
            count,
        })
        .collect()
}

/// Counts messages per day, oldest first.
pub fn daily_timeline(view: &TableView<'_>) -> Vec<DailyCount> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in view.iter() {
        *days.entry(record.timestamp.date()).or_default() += 1;
    }

    days.into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}
