//! Column normalization and typed row construction.

use crate::raw::{RawRecord, RawValue};
use crate::table::CleanedTable;
use crate::timestamp::parse_timestamp;
use chrono::NaiveDateTime;
use pulseboard_common::{DashError, Result};
use pulseboard_config::RowPolicy;
use tracing::{debug, instrument, warn};

/// Fill value for missing categorical fields.
pub const UNKNOWN: &str = "Unknown";

/// Static column rules applied to every raw record of a dataset.
#[derive(Debug, Clone, Copy)]
pub struct ColumnRules {
    /// Source columns removed before anything else.
    pub denylist: &'static [&'static str],
    /// `(source, canonical)` renames.
    pub renames: &'static [(&'static str, &'static str)],
}

impl ColumnRules {
    /// Rules that leave records untouched.
    pub const NONE: Self = Self {
        denylist: &[],
        renames: &[],
    };

    /// Drops denylisted columns and renames source columns, keeping field order.
    pub fn normalize(&self, record: RawRecord) -> RawRecord {
        record
            .into_iter()
            .filter(|(key, _)| !self.denylist.contains(&key.as_str()))
            .map(|(key, value)| {
                let key = self
                    .renames
                    .iter()
                    .find(|(source, _)| *source == key)
                    .map_or(key, |(_, canonical)| (*canonical).to_string());
                (key, value)
            })
            .collect()
    }
}

/// A typed dataset row built from one normalized raw record.
pub trait FromRawRecord: Sized {
    /// Column rules applied before [`FromRawRecord::from_raw`].
    const RULES: ColumnRules;

    /// Builds a row, failing with a type coercion error on a bad value.
    /// `row` is the record's zero-based position in the upload.
    fn from_raw(record: &RawRecord, row: usize) -> Result<Self>;
}

/// Turns raw records into a cleaned table under a row policy.
#[derive(Debug, Clone, Copy)]
pub struct Cleaner {
    policy: RowPolicy,
}

impl Cleaner {
    /// Creates a cleaner with the given treatment of bad rows.
    pub const fn new(policy: RowPolicy) -> Self {
        Self { policy }
    }

    /// Row policy in effect.
    pub const fn policy(&self) -> RowPolicy {
        self.policy
    }

    /// Normalizes and types every record.
    #[instrument(skip(self, records), fields(records = records.len(), policy = ?self.policy))]
    pub fn clean<R: FromRawRecord>(&self, records: Vec<RawRecord>) -> Result<CleanedTable<R>> {
        let mut rows = Vec::with_capacity(records.len());
        let mut dropped = 0;

        for (index, record) in records.into_iter().enumerate() {
            let record = R::RULES.normalize(record);
            match R::from_raw(&record, index) {
                Ok(row) => rows.push(row),
                Err(err @ DashError::TypeCoercion { .. }) if self.policy == RowPolicy::Drop => {
                    debug!(error = %err, "Skipping row");
                    dropped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        if dropped > 0 {
            warn!(dropped, kept = rows.len(), "Dropped rows with values that could not be coerced");
        }
        debug!(rows = rows.len(), "Cleaned records");
        Ok(CleanedTable::new(rows, dropped))
    }
}

/// Reads a required timestamp column.
pub fn require_timestamp(record: &RawRecord, column: &str, row: usize) -> Result<NaiveDateTime> {
    match record.get(column) {
        Some(RawValue::Text(text)) => parse_timestamp(text).ok_or_else(|| {
            DashError::coercion(column, row, Some(text.clone()), "unrecognised timestamp")
        }),
        Some(RawValue::Null) | None => Err(DashError::coercion(column, row, None, "timestamp is missing")),
        Some(other) => Err(DashError::coercion(
            column,
            row,
            other.to_text(),
            "timestamp must be text",
        )),
    }
}

/// Reads a required numeric column.
pub fn require_number(record: &RawRecord, column: &str, row: usize) -> Result<f64> {
    optional_number(record, column, row)?
        .ok_or_else(|| DashError::coercion(column, row, None, "value is missing"))
}

/// Reads an optional numeric column; missing values are `None`.
pub fn optional_number(record: &RawRecord, column: &str, row: usize) -> Result<Option<f64>> {
    match record.get(column) {
        None | Some(RawValue::Null) => Ok(None),
        Some(value) => value
            .to_f64()
            .map(Some)
            .ok_or_else(|| DashError::coercion(column, row, value.to_text(), "value is not numeric")),
    }
}

/// Reads an optional text column.
pub fn optional_text(record: &RawRecord, column: &str) -> Option<String> {
    record.get(column).and_then(RawValue::to_text)
}

/// Reads a categorical column, filling missing values with [`UNKNOWN`].
pub fn text_or_unknown(record: &RawRecord, column: &str) -> String {
    optional_text(record, column).unwrap_or_else(|| UNKNOWN.to_string())
}
