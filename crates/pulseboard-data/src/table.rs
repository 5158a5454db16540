//! Cleaned tables and the column view the aggregator works through.

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use pulseboard_common::{DashError, Result, YearMonth};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Borrowed view of one cell of a typed row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    /// Missing value
    Null,
    /// Categorical text
    Text(&'a str),
    /// Floating point measure
    Number(f64),
    /// Integral calendar field such as year or hour
    Integer(i64),
    /// Full timestamp
    Timestamp(NaiveDateTime),
    /// Calendar date
    Date(NaiveDate),
    /// Calendar month
    Month(YearMonth),
    /// Day of the week
    Weekday(Weekday),
}

impl<'a> CellValue<'a> {
    /// Text cell from an optional value.
    pub fn text(value: Option<&'a str>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }

    /// Numeric reading, for sum reductions.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            #[allow(clippy::cast_precision_loss)]
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Whether the value is missing.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Owned group key; `None` for missing values.
    pub fn to_key(&self) -> Option<GroupKey> {
        Some(match *self {
            Self::Null => return None,
            Self::Text(s) => GroupKey::Text(s.to_string()),
            Self::Number(n) => GroupKey::Number(n),
            Self::Integer(i) => GroupKey::Integer(i),
            Self::Timestamp(ts) => GroupKey::Timestamp(ts),
            Self::Date(d) => GroupKey::Date(d),
            Self::Month(m) => GroupKey::Month(m),
            Self::Weekday(w) => GroupKey::Weekday(w),
        })
    }
}

/// Owned, ordered value of a grouping dimension.
///
/// Keys order lexically for text, numerically for numbers, chronologically
/// for dates and months, and Monday first for weekdays.
#[derive(Debug, Clone)]
pub enum GroupKey {
    /// Categorical text
    Text(String),
    /// Floating point value
    Number(f64),
    /// Integral value
    Integer(i64),
    /// Full timestamp
    Timestamp(NaiveDateTime),
    /// Calendar date
    Date(NaiveDate),
    /// Calendar month
    Month(YearMonth),
    /// Day of the week
    Weekday(Weekday),
}

/// Weekdays Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// English day name used as the weekday label.
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

impl GroupKey {
    /// Display label of the key.
    pub fn label(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Timestamp(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Month(m) => m.to_string(),
            Self::Weekday(w) => weekday_name(*w).to_string(),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Text(_) => 0,
            Self::Number(_) => 1,
            Self::Integer(_) => 2,
            Self::Timestamp(_) => 3,
            Self::Date(_) => 4,
            Self::Month(_) => 5,
            Self::Weekday(_) => 6,
        }
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Month(a), Self::Month(b)) => a.cmp(b),
            (Self::Weekday(a), Self::Weekday(b)) => {
                a.num_days_from_monday().cmp(&b.num_days_from_monday())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl Hash for GroupKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Self::Text(s) => s.hash(state),
            Self::Number(n) => n.to_bits().hash(state),
            Self::Integer(i) => i.hash(state),
            Self::Timestamp(ts) => ts.hash(state),
            Self::Date(d) => d.hash(state),
            Self::Month(m) => m.hash(state),
            Self::Weekday(w) => w.num_days_from_monday().hash(state),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Integer(i) => serializer.serialize_i64(*i),
            _ => serializer.serialize_str(&self.label()),
        }
    }
}

/// Column access by canonical name, implemented by every typed row.
pub trait Record {
    /// Canonical names of every column, derived columns included.
    fn columns() -> &'static [&'static str];

    /// Value of `column` in this row; `None` if the column does not exist.
    fn value(&self, column: &str) -> Option<CellValue<'_>>;
}

/// Homogeneously typed rows produced by the cleaner.
#[derive(Debug, Clone)]
pub struct CleanedTable<R> {
    rows: Vec<R>,
    dropped_rows: usize,
}

impl<R> CleanedTable<R> {
    /// Wraps cleaned rows with the number of rows the cleaner skipped.
    pub const fn new(rows: Vec<R>, dropped_rows: usize) -> Self {
        Self { rows, dropped_rows }
    }

    /// All rows in input order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Iterator over the rows.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows skipped under the drop policy.
    pub const fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }
}

impl<R: Record> CleanedTable<R> {
    /// Fails with a column-not-found error unless `column` exists, even on an empty table.
    pub fn require_column(&self, column: &str) -> Result<()> {
        if R::columns().contains(&column) {
            Ok(())
        } else {
            Err(DashError::column_not_found(column))
        }
    }

    /// The first `limit` rows, every column, for a data preview.
    pub fn preview(&self, limit: usize) -> RowPreview {
        RowPreview {
            columns: R::columns().iter().map(ToString::to_string).collect(),
            rows: self
                .iter()
                .take(limit)
                .map(|row| {
                    R::columns()
                        .iter()
                        .map(|column| row.value(column).and_then(|cell| cell.to_key()))
                        .collect()
                })
                .collect(),
        }
    }
}

/// Leading rows of a table; missing cells are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowPreview {
    /// Column names in record order
    pub columns: Vec<String>,
    /// One value per column for each previewed row
    pub rows: Vec<Vec<Option<GroupKey>>>,
}

impl<'a, R> IntoIterator for &'a CleanedTable<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_weekday_keys_order_monday_first() {
        let keys: BTreeSet<GroupKey> = [Weekday::Sun, Weekday::Wed, Weekday::Mon]
            .into_iter()
            .map(GroupKey::Weekday)
            .collect();
        let labels: Vec<String> = keys.iter().map(GroupKey::label).collect();
        assert_eq!(labels, vec!["Monday", "Wednesday", "Sunday"]);
    }

    #[test]
    fn test_numeric_keys_order_numerically() {
        let mut keys = vec![GroupKey::Number(10.0), GroupKey::Number(9.5), GroupKey::Number(-1.0)];
        keys.sort();
        assert_eq!(
            keys,
            vec![GroupKey::Number(-1.0), GroupKey::Number(9.5), GroupKey::Number(10.0)]
        );
    }

    #[test]
    fn test_month_keys_order_chronologically() {
        let dec = GroupKey::Month(YearMonth::new(2022, 12).unwrap());
        let jan = GroupKey::Month(YearMonth::new(2023, 1).unwrap());
        assert!(dec < jan);
        assert_eq!(jan.label(), "2023-01");
    }

    #[test]
    fn test_null_cell_has_no_key() {
        assert!(CellValue::Null.to_key().is_none());
        assert!(CellValue::text(None).is_null());
        assert_eq!(CellValue::Text("a").to_key(), Some(GroupKey::from("a")));
    }

    #[test]
    fn test_key_serialization() {
        assert_eq!(serde_json::to_string(&GroupKey::Integer(8)).unwrap(), "8");
        assert_eq!(
            serde_json::to_string(&GroupKey::Weekday(Weekday::Tue)).unwrap(),
            "\"Tuesday\""
        );
    }
}
