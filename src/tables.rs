//! Table enhancements: per-cell column labels for the compact layout and click-to-sort headers.
//!
//! A column is offered for sorting when it mostly holds numbers or dates. Sorting is always
//! ascending and stable. Cells are compared numerically when both parse as numbers,
//! chronologically when both parse as dates, and as text otherwise.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y",
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// A pipe table lifted out of the page source.
pub struct Table {
    /// Header cell text, one per column.
    pub headers: Vec<String>,
    /// Body rows; rows may be shorter or longer than the header.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    /// Trimmed header text used as the label of every body cell in `column`.
    ///
    /// Columns without a header, or with a blank one, carry no label.
    pub fn label(&self, column: usize) -> Option<&str> {
        self.headers
            .get(column)
            .map(|h| h.trim())
            .filter(|h| !h.is_empty())
    }

    #[must_use]
    /// Number of columns, taking the widest of the header and every row.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    /// Whether `column` mostly holds numbers or dates.
    ///
    /// Tables with fewer than two body rows are never sortable.
    pub fn is_sortable_column(&self, column: usize) -> bool {
        if self.rows.len() < 2 {
            return false;
        }
        let ordered = self
            .rows
            .iter()
            .filter_map(|row| row.get(column))
            .filter(|cell| is_numeric(cell) || is_date(cell))
            .count();
        ordered * 2 > self.rows.len()
    }

    #[must_use]
    /// Indices of every sortable column.
    pub fn sortable_columns(&self) -> Vec<usize> {
        (0..self.column_count())
            .filter(|&column| self.is_sortable_column(column))
            .collect()
    }

    /// Reorder body rows ascending by `column`.
    pub fn sort_by_column(&mut self, column: usize) {
        self.rows.sort_by(|a, b| {
            let a = a.get(column).map_or("", |c| c.trim());
            let b = b.get(column).map_or("", |c| c.trim());
            compare_cells(a, b)
        });
        tracing::debug!(column, rows = self.rows.len(), "sorted table");
    }
}

#[must_use]
/// Whether the trimmed text is a finite number.
pub fn is_numeric(text: &str) -> bool {
    parse_number(text).is_some()
}

#[must_use]
/// Whether the trimmed text parses as a date or timestamp.
pub fn is_date(text: &str) -> bool {
    parse_date(text).is_some()
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[must_use]
/// Parse the common date spellings found in documentation tables.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
        return Some(stamp.naive_utc());
    }
    if let Ok(stamp) = DateTime::parse_from_rfc2822(text) {
        return Some(stamp.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

enum SortKey<'a> {
    Number(f64),
    Date(NaiveDateTime),
    Text(&'a str),
}

impl<'a> SortKey<'a> {
    fn of(text: &'a str) -> Self {
        if let Some(n) = parse_number(text) {
            Self::Number(n)
        } else if let Some(date) = parse_date(text) {
            Self::Date(date)
        } else {
            Self::Text(text)
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Date(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

#[must_use]
/// Total order over cell text used by [`Table::sort_by_column`].
///
/// Cells of different kinds order numbers before dates before text.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (SortKey::of(a), SortKey::of(b)) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
        (SortKey::Date(x), SortKey::Date(y)) => x.cmp(&y),
        (SortKey::Text(x), SortKey::Text(y)) => x
            .to_lowercase()
            .cmp(&y.to_lowercase())
            .then_with(|| x.cmp(y)),
        (x, y) => x.rank().cmp(&y.rank()),
    }
}

#[cfg(test)]
#[path = "tests/tables.rs"]
mod tests;
