//! Group-by, top-N, pivot and filtered aggregation over cleaned tables.
//!
//! Every function here is a pure function of its inputs. Rows whose
//! dimension value is missing are not grouped; a count reduction counts the
//! rows whose measure value is present.

use crate::table::{CleanedTable, GroupKey, Record, WEEKDAYS};
use indexmap::IndexSet;
use pulseboard_common::{percentage, truncate_label, DashError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, instrument};

/// How the measure column is reduced per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reducer {
    /// Sum of the numeric measure
    Sum,
    /// Number of rows with a present measure value
    Count,
}

/// Column order of a pivot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOrder {
    /// Order in which category values first appear in the table
    FirstSeen,
    /// Key order: lexical, numeric, chronological or Monday first
    Canonical,
}

/// One group of an aggregate table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    /// Group value
    pub key: GroupKey,
    /// Reduced measure
    pub value: f64,
    /// Display label replacing the key label, e.g. after truncation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl AggregateRow {
    fn new(key: GroupKey, value: f64) -> Self {
        Self {
            key,
            value,
            label: None,
        }
    }

    /// Label shown for this group.
    pub fn display_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.key.label())
    }
}

/// Result of a single-dimension aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateTable {
    /// Grouping column
    pub dimension: String,
    /// Reduced column
    pub measure: String,
    /// Reduction applied
    pub reducer: Reducer,
    /// One row per distinct group value
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    fn empty(dimension: &str, measure: &str, reducer: Reducer) -> Self {
        Self {
            dimension: dimension.to_string(),
            measure: measure.to_string(),
            reducer,
            rows: Vec::new(),
        }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all group values.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|row| row.value).sum()
    }

    /// Value of one group.
    pub fn get(&self, key: &GroupKey) -> Option<f64> {
        self.rows.iter().find(|row| &row.key == key).map(|row| row.value)
    }

    /// First group holding the maximal value.
    pub fn peak(&self) -> Option<&AggregateRow> {
        self.rows.iter().fold(None, |best: Option<&AggregateRow>, row| match best {
            Some(b) if b.value >= row.value => Some(b),
            _ => Some(row),
        })
    }

    /// Percentage share of each group in row order; all zero when the total is zero.
    pub fn shares(&self) -> Vec<f64> {
        let total = self.total();
        self.rows.iter().map(|row| percentage(row.value, total)).collect()
    }

    /// Replaces the rows with exactly `keys`, in that order, filling absent groups with `0.0`.
    #[must_use]
    pub fn reindex(mut self, keys: impl IntoIterator<Item = GroupKey>) -> Self {
        let mut existing: HashMap<GroupKey, AggregateRow> =
            self.rows.drain(..).map(|row| (row.key.clone(), row)).collect();
        self.rows = keys
            .into_iter()
            .map(|key| {
                existing
                    .remove(&key)
                    .unwrap_or_else(|| AggregateRow::new(key, 0.0))
            })
            .collect();
        self
    }

    /// Sets each row's display label from its key.
    #[must_use]
    pub fn with_labels(mut self, label: impl Fn(&GroupKey) -> String) -> Self {
        for row in &mut self.rows {
            row.label = Some(label(&row.key));
        }
        self
    }

    /// Sets each row's display label to its key label truncated to `max_chars`.
    #[must_use]
    pub fn with_truncated_labels(mut self, max_chars: usize) -> Self {
        for row in &mut self.rows {
            row.label = Some(truncate_label(&row.key.label(), max_chars));
        }
        self
    }
}

/// One time bucket of a pivot table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    /// Row dimension value
    pub key: GroupKey,
    /// One value per pivot column, in column order
    pub values: Vec<f64>,
}

/// Dense two-dimension matrix of sums.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    /// Dimension of the rows, usually a time bucket
    pub row_dimension: String,
    /// Dimension of the columns, usually a category
    pub column_dimension: String,
    /// Summed measure
    pub measure: String,
    /// Column keys in display order
    pub columns: Vec<GroupKey>,
    /// Rows in ascending key order
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    /// Cell at (`row`, `column`); `None` if either key is not in the table.
    pub fn value(&self, row: &GroupKey, column: &GroupKey) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| &r.key == row)
            .and_then(|r| r.values.get(col).copied())
    }

    /// Sum over every cell.
    pub fn total(&self) -> f64 {
        self.rows.iter().flat_map(|r| r.values.iter()).sum()
    }
}

fn check_columns<R: Record>(table: &CleanedTable<R>, columns: &[&str]) -> Result<()> {
    columns.iter().try_for_each(|column| table.require_column(column))
}

fn measure_value<R: Record>(row: &R, measure: &str, reducer: Reducer) -> Result<Option<f64>> {
    let cell = row
        .value(measure)
        .ok_or_else(|| DashError::column_not_found(measure))?;
    if cell.is_null() {
        return Ok(None);
    }
    match reducer {
        Reducer::Count => Ok(Some(1.0)),
        Reducer::Sum => cell
            .as_f64()
            .map(Some)
            .ok_or_else(|| DashError::column_type(measure, "cannot sum a non-numeric column")),
    }
}

/// Groups by `dimension` and reduces `measure`; rows are sorted by group key.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn group_by<R: Record>(
    table: &CleanedTable<R>,
    dimension: &str,
    measure: &str,
    reducer: Reducer,
) -> Result<AggregateTable> {
    check_columns(table, &[dimension, measure])?;

    let mut groups: BTreeMap<GroupKey, f64> = BTreeMap::new();
    for row in table {
        let Some(key) = row.value(dimension).and_then(|cell| cell.to_key()) else {
            continue;
        };
        let contribution = measure_value(row, measure, reducer)?.unwrap_or(0.0);
        *groups.entry(key).or_insert(0.0) += contribution;
    }

    let mut result = AggregateTable::empty(dimension, measure, reducer);
    result.rows = groups
        .into_iter()
        .map(|(key, value)| AggregateRow::new(key, value))
        .collect();

    debug!(groups = result.len(), "Aggregated {} by {}", measure, dimension);
    Ok(result)
}

/// Groups and reduces, then keeps the `n` largest groups; ties keep key order.
pub fn top_n<R: Record>(
    table: &CleanedTable<R>,
    dimension: &str,
    measure: &str,
    reducer: Reducer,
    n: usize,
) -> Result<AggregateTable> {
    let mut result = group_by(table, dimension, measure, reducer)?;
    result.rows.sort_by(|a, b| b.value.total_cmp(&a.value));
    result.rows.truncate(n);
    Ok(result)
}

/// Single-dimension aggregate restricted to group labels in `allow`.
/// An empty allow-set yields an empty table.
pub fn filtered<R: Record>(
    table: &CleanedTable<R>,
    dimension: &str,
    measure: &str,
    reducer: Reducer,
    allow: &BTreeSet<String>,
) -> Result<AggregateTable> {
    if allow.is_empty() {
        check_columns(table, &[dimension, measure])?;
        return Ok(AggregateTable::empty(dimension, measure, reducer));
    }

    let mut result = group_by(table, dimension, measure, reducer)?;
    result.rows.retain(|row| allow.contains(&row.key.label()));
    Ok(result)
}

/// Counts rows per weekday, with all seven days present Monday first.
pub fn weekday_counts<R: Record>(
    table: &CleanedTable<R>,
    weekday_column: &str,
    measure: &str,
) -> Result<AggregateTable> {
    let counts = group_by(table, weekday_column, measure, Reducer::Count)?;
    if let Some(row) = counts.rows.iter().find(|row| !matches!(row.key, GroupKey::Weekday(_))) {
        return Err(DashError::column_type(
            weekday_column,
            format!("'{}' is not a weekday", row.key.label()),
        ));
    }
    Ok(counts.reindex(WEEKDAYS.into_iter().map(GroupKey::Weekday)))
}

/// Sums `measure` over (`row_dimension`, `column_dimension`) into a dense matrix.
///
/// Rows ascend by key. Columns follow `order`, except that weekday columns
/// are always Monday first. Missing combinations are `0.0`.
#[instrument(skip(table), fields(rows = table.len()))]
pub fn pivot<R: Record>(
    table: &CleanedTable<R>,
    row_dimension: &str,
    column_dimension: &str,
    measure: &str,
    order: ColumnOrder,
) -> Result<PivotTable> {
    check_columns(table, &[row_dimension, column_dimension, measure])?;

    let mut columns: IndexSet<GroupKey> = IndexSet::new();
    let mut cells: BTreeMap<GroupKey, HashMap<GroupKey, f64>> = BTreeMap::new();

    for row in table {
        let Some(row_key) = row.value(row_dimension).and_then(|cell| cell.to_key()) else {
            continue;
        };
        let Some(column_key) = row.value(column_dimension).and_then(|cell| cell.to_key()) else {
            continue;
        };
        let contribution = measure_value(row, measure, Reducer::Sum)?.unwrap_or(0.0);

        columns.insert(column_key.clone());
        *cells
            .entry(row_key)
            .or_default()
            .entry(column_key)
            .or_insert(0.0) += contribution;
    }

    let mut columns: Vec<GroupKey> = columns.into_iter().collect();
    let weekday_columns = columns.iter().any(|key| matches!(key, GroupKey::Weekday(_)));
    if order == ColumnOrder::Canonical || weekday_columns {
        columns.sort();
    }

    let rows = cells
        .into_iter()
        .map(|(key, values)| PivotRow {
            values: columns
                .iter()
                .map(|column| values.get(column).copied().unwrap_or(0.0))
                .collect(),
            key,
        })
        .collect();

    debug!(columns = columns.len(), "Pivoted {} by {} and {}", measure, row_dimension, column_dimension);
    Ok(PivotTable {
        row_dimension: row_dimension.to_string(),
        column_dimension: column_dimension.to_string(),
        measure: measure.to_string(),
        columns,
        rows,
    })
}

/// Number of distinct present values in `column`.
pub fn distinct_count<R: Record>(table: &CleanedTable<R>, column: &str) -> Result<usize> {
    table.require_column(column)?;
    let distinct: BTreeSet<GroupKey> = table
        .iter()
        .filter_map(|row| row.value(column).and_then(|cell| cell.to_key()))
        .collect();
    Ok(distinct.len())
}

/// Sum of a numeric column over the whole table.
pub fn column_sum<R: Record>(table: &CleanedTable<R>, column: &str) -> Result<f64> {
    table.require_column(column)?;
    table.iter().try_fold(0.0, |acc, row| {
        Ok(acc + measure_value(row, column, Reducer::Sum)?.unwrap_or(0.0))
    })
}
