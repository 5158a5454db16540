//! # Pulseboard Data
//!
//! Data preparation pipeline for the sales and listening dashboards.
//!
//! Uploaded bytes flow one way through this crate:
//!
//! 1. [`ingest`] decodes CSV or JSON into raw records and checks required fields.
//! 2. [`clean`] drops and renames columns, coerces values and builds typed rows.
//! 3. [`aggregate`] and [`metrics`] reduce a cleaned table to chart-ready shapes.
//!
//! Cleaned tables are cached per session by content hash ([`cache`], [`session`]).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod cache;
pub mod clean;
pub mod datasets;
pub mod ingest;
pub mod metrics;
pub mod raw;
pub mod session;
pub mod table;
pub mod timestamp;

pub use aggregate::{
    column_sum, distinct_count, filtered, group_by, pivot, top_n, weekday_counts, AggregateRow,
    AggregateTable, ColumnOrder, PivotRow, PivotTable, Reducer,
};
pub use cache::{CacheStats, UploadCache};
pub use clean::{Cleaner, ColumnRules, FromRawRecord, UNKNOWN};
pub use datasets::{ListeningEvent, SalesRecord};
pub use ingest::{ingest, InputFormat};
pub use metrics::{DiscoverySplit, ListeningSummary, SalesSummary};
pub use raw::{RawRecord, RawValue};
pub use session::{SalesFilters, Session, SessionHandle, SessionStore};
pub use table::{CellValue, CleanedTable, GroupKey, Record, RowPreview, WEEKDAYS};
pub use timestamp::parse_timestamp;
