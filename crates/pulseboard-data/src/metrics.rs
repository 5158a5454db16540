//! Headline figures for the metric cards.

use crate::aggregate::{column_sum, distinct_count};
use crate::datasets::listening::{columns as lc, ListeningEvent};
use crate::datasets::sales::{columns as sc, SalesRecord};
use crate::table::CleanedTable;
use pulseboard_common::{percentage, Result};
use serde::Serialize;

/// Listening totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListeningSummary {
    /// Sum of minutes played
    pub total_minutes: f64,
    /// Sum of hours played
    pub total_hours: f64,
    /// Number of plays
    pub tracks_played: usize,
    /// Distinct calendar dates with at least one play
    pub active_days: usize,
    /// Minutes per active day; days are floored at one so an empty history averages zero.
    pub daily_average_minutes: f64,
    /// Earliest year in the history
    pub first_year: Option<i32>,
    /// Latest year in the history
    pub last_year: Option<i32>,
}

impl ListeningSummary {
    /// Computes the summary of a listening table.
    pub fn from_table(table: &CleanedTable<ListeningEvent>) -> Result<Self> {
        let total_minutes = column_sum(table, lc::MINUTES_PLAYED)?;
        let active_days = distinct_count(table, lc::DATE)?;
        let years = table.iter().map(ListeningEvent::year);

        #[allow(clippy::cast_precision_loss)]
        let daily_average_minutes = total_minutes / active_days.max(1) as f64;

        Ok(Self {
            total_minutes,
            total_hours: total_minutes / 60.0,
            tracks_played: table.len(),
            active_days,
            daily_average_minutes,
            first_year: years.clone().min(),
            last_year: years.max(),
        })
    }
}

/// Split of plays into recent and older years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoverySplit {
    /// Earliest year that counts as new; `None` for an empty table
    pub cutoff_year: Option<i32>,
    /// Plays in or after the cutoff year
    pub new_plays: usize,
    /// Plays before the cutoff year
    pub old_plays: usize,
    /// Share of new plays, 0 to 100
    pub new_percent: f64,
    /// Share of older plays, 0 to 100
    pub old_percent: f64,
}

impl DiscoverySplit {
    /// Plays from `max_year - window_years` onwards are new, where `max_year`
    /// is the latest year in the table.
    pub fn from_table(table: &CleanedTable<ListeningEvent>, window_years: i32) -> Self {
        let cutoff_year = table
            .iter()
            .map(ListeningEvent::year)
            .max()
            .map(|max_year| max_year - window_years);

        let new_plays = cutoff_year.map_or(0, |cutoff| {
            table.iter().filter(|event| event.year() >= cutoff).count()
        });
        let old_plays = table.len() - new_plays;

        #[allow(clippy::cast_precision_loss)]
        let total = table.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let (new_percent, old_percent) = (
            percentage(new_plays as f64, total),
            percentage(old_plays as f64, total),
        );

        Self {
            cutoff_year,
            new_plays,
            old_plays,
            new_percent,
            old_percent,
        }
    }
}

/// Sales totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    /// Sum of all sales amounts
    pub total_sales: f64,
    /// Distinct product categories
    pub product_count: usize,
    /// Distinct regions
    pub region_count: usize,
}

impl SalesSummary {
    /// Computes the summary of a sales table.
    pub fn from_table(table: &CleanedTable<SalesRecord>) -> Result<Self> {
        Ok(Self {
            total_sales: column_sum(table, sc::SALES_AMOUNT)?,
            product_count: distinct_count(table, sc::PRODUCT_CATEGORY)?,
            region_count: distinct_count(table, sc::REGION)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::{listening, sales};
    use pulseboard_common::test_utils::{assert_approx_eq, listening_fixtures, sales_fixtures};
    use pulseboard_config::RowPolicy;

    fn listening_table() -> CleanedTable<ListeningEvent> {
        listening::load(listening_fixtures::small_json().as_bytes(), RowPolicy::Fail).unwrap()
    }

    #[test]
    fn test_listening_summary() {
        let summary = ListeningSummary::from_table(&listening_table()).unwrap();

        // 3 + 4 + 1 + 0.5 + 1.5 minutes over four distinct dates
        assert_approx_eq(summary.total_minutes, 10.0, 1e-9);
        assert_approx_eq(summary.total_hours, 10.0 / 60.0, 1e-9);
        assert_eq!(summary.tracks_played, 5);
        assert_eq!(summary.active_days, 4);
        assert_approx_eq(summary.daily_average_minutes, 2.5, 1e-9);
        assert_eq!(summary.first_year, Some(2021));
        assert_eq!(summary.last_year, Some(2023));
    }

    #[test]
    fn test_empty_listening_summary() {
        let summary = ListeningSummary::from_table(&CleanedTable::new(Vec::new(), 0)).unwrap();
        assert_eq!(summary.active_days, 0);
        assert_approx_eq(summary.daily_average_minutes, 0.0, 1e-12);
        assert_eq!(summary.first_year, None);
    }

    #[test]
    fn test_discovery_split_relative_to_data() {
        let split = DiscoverySplit::from_table(&listening_table(), 1);
        assert_eq!(split.cutoff_year, Some(2022));
        assert_eq!(split.new_plays, 4);
        assert_eq!(split.old_plays, 1);
        assert_approx_eq(split.new_percent, 80.0, 1e-9);
        assert_approx_eq(split.old_percent, 20.0, 1e-9);
    }

    #[test]
    fn test_discovery_split_empty() {
        let split = DiscoverySplit::from_table(&CleanedTable::new(Vec::new(), 0), 1);
        assert_eq!(split.cutoff_year, None);
        assert_eq!((split.new_plays, split.old_plays), (0, 0));
        assert_approx_eq(split.new_percent, 0.0, 1e-12);
        assert_approx_eq(split.old_percent, 0.0, 1e-12);
    }

    #[test]
    fn test_sales_summary() {
        let table = sales::load(sales_fixtures::small_csv().as_bytes(), RowPolicy::Fail).unwrap();
        let summary = SalesSummary::from_table(&table).unwrap();
        assert_approx_eq(summary.total_sales, 500.0, 1e-9);
        assert_eq!(summary.product_count, 3);
        assert_eq!(summary.region_count, 4);
    }
}
