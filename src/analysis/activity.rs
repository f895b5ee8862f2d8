//! Activity by weekday, month and hour.

use chrono::{Datelike, Timelike};
use serde::Serialize;

use crate::core::filter::TableView;
use crate::message::{MONTH_NAMES, WEEKDAY_NAMES};

/// A named bucket and its message count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

fn present(labels: &[&str], counts: &[usize]) -> Vec<CategoryCount> {
    labels
        .iter()
        .zip(counts)
        .filter(|&(_, &count)| count > 0)
        .map(|(label, &count)| CategoryCount {
            label: (*label).to_string(),
            count,
        })
        .collect()
}

/// Messages per weekday, Monday to Sunday, days with messages only.
pub fn week_activity_map(view: &TableView<'_>) -> Vec<CategoryCount> {
    let mut counts = [0usize; 7];
    for record in view.iter() {
        counts[record.weekday_index()] += 1;
    }
    present(&WEEKDAY_NAMES, &counts)
}

/// Messages per calendar month, January to December, across all years.
pub fn month_activity_map(view: &TableView<'_>) -> Vec<CategoryCount> {
    let mut counts = [0usize; 12];
    for record in view.iter() {
        counts[record.timestamp.month0() as usize] += 1;
    }
    present(&MONTH_NAMES, &counts)
}

/// Weekday by hour-bucket message counts.
///
/// Rows are weekdays and columns are one-hour buckets such as `"13-14"`;
/// only rows and columns with at least one message are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `values[row][column]`
    pub values: Vec<Vec<usize>>,
}

impl Heatmap {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count for a weekday and bucket label, if both are present.
    pub fn get(&self, row: &str, column: &str) -> Option<usize> {
        let r = self.rows.iter().position(|x| x == row)?;
        let c = self.columns.iter().position(|x| x == column)?;
        Some(self.values[r][c])
    }
}

/// Label of the hour bucket starting at `hour`: `"23-00"`, `"00-01"`.
pub fn hour_bucket(hour: u32) -> String {
    format!("{:02}-{:02}", hour, (hour + 1) % 24)
}

/// Builds the weekday by hour heatmap.
pub fn activity_heatmap(view: &TableView<'_>) -> Heatmap {
    let mut grid = [[0usize; 24]; 7];
    for record in view.iter() {
        grid[record.weekday_index()][record.timestamp.hour() as usize] += 1;
    }

    let rows: Vec<usize> = (0..7).filter(|&d| grid[d].iter().any(|&c| c > 0)).collect();
    let columns: Vec<usize> = (0..24).filter(|&h| grid.iter().any(|row| row[h] > 0)).collect();

    Heatmap {
        rows: rows.iter().map(|&d| WEEKDAY_NAMES[d].to_string()).collect(),
        columns: columns.iter().map(|&h| hour_bucket(h as u32)).collect(),
        values: rows
            .iter()
            .map(|&d| columns.iter().map(|&h| grid[d][h]).collect())
            .collect(),
    }
}
