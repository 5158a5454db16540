//! End-to-end tests of the data pipeline from upload bytes to aggregates.

use pulseboard_common::test_utils::{assert_approx_eq, listening_fixtures, sales_fixtures};
use pulseboard_common::{DashError, YearMonth};
use pulseboard_config::{CacheConfig, RowPolicy};
use pulseboard_data::datasets::listening::{self, columns as lc};
use pulseboard_data::datasets::sales::{self, columns as sc};
use pulseboard_data::{
    filtered, group_by, pivot, top_n, weekday_counts, AggregateRow, CellValue, ColumnOrder,
    DiscoverySplit, GroupKey, ListeningSummary, Record, Reducer, SalesFilters, SessionStore,
    WEEKDAYS,
};
use std::collections::BTreeSet;

#[test]
fn test_truncated_listening_upload_is_parse_error() {
    let err = listening::load(listening_fixtures::truncated_json().as_bytes(), RowPolicy::Fail)
        .unwrap_err();
    assert!(matches!(err, DashError::Parse { .. }));
    assert!(err.is_input_error());
}

#[test]
fn test_listening_upload_without_ts_is_schema_error() {
    let err = listening::load(listening_fixtures::missing_ts_json().as_bytes(), RowPolicy::Drop)
        .unwrap_err();
    assert!(matches!(err, DashError::Schema { .. }));
}

#[test]
fn test_sales_upload_without_payment_method_is_schema_error() {
    let err = sales::load(sales_fixtures::missing_column_csv().as_bytes(), RowPolicy::Fail)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Schema error: required field 'Payment_Method' is missing"
    );
}

#[test]
fn test_empty_uploads_produce_empty_aggregates() {
    let sales = sales::load(sales_fixtures::empty_csv().as_bytes(), RowPolicy::Fail).unwrap();
    let by_region = group_by(&sales, sc::REGION, sc::SALES_AMOUNT, Reducer::Sum).unwrap();
    assert!(by_region.is_empty());

    let plays = listening::load(b"[]", RowPolicy::Fail).unwrap();
    let weekly = weekday_counts(&plays, lc::DAY, lc::TS).unwrap();
    assert_eq!(weekly.len(), 7);
    assert_approx_eq(weekly.total(), 0.0, 1e-12);
    assert_eq!(weekly.shares(), vec![0.0; 7]);

    let split = DiscoverySplit::from_table(&plays, 1);
    assert_approx_eq(split.new_percent, 0.0, 1e-12);
}

#[test]
fn test_sales_trend_by_month() {
    let table = sales::load(sales_fixtures::small_csv().as_bytes(), RowPolicy::Fail).unwrap();
    let trend = group_by(&table, sc::MONTH, sc::SALES_AMOUNT, Reducer::Sum).unwrap();

    let jan = GroupKey::Month(YearMonth::new(2023, 1).unwrap());
    let feb = GroupKey::Month(YearMonth::new(2023, 2).unwrap());
    assert_eq!(trend.rows.iter().map(|r| r.key.clone()).collect::<Vec<_>>(), vec![jan.clone(), feb.clone()]);
    assert_approx_eq(trend.get(&jan).unwrap(), 255.0, 1e-9);
    assert_approx_eq(trend.get(&feb).unwrap(), 245.0, 1e-9);
}

#[test]
fn test_region_pivot_matches_region_totals() {
    let table = sales::load(sales_fixtures::small_csv().as_bytes(), RowPolicy::Fail).unwrap();
    let matrix = pivot(&table, sc::MONTH, sc::REGION, sc::SALES_AMOUNT, ColumnOrder::FirstSeen).unwrap();
    let totals = group_by(&table, sc::REGION, sc::SALES_AMOUNT, Reducer::Sum).unwrap();

    for (index, column) in matrix.columns.iter().enumerate() {
        let column_sum: f64 = matrix.rows.iter().map(|row| row.values[index]).sum();
        assert_approx_eq(column_sum, totals.get(column).unwrap(), 1e-9);
    }
}

#[test]
fn test_filters_select_products() {
    let table = sales::load(sales_fixtures::small_csv().as_bytes(), RowPolicy::Fail).unwrap();
    let all = SalesFilters::all_of(&table);
    let everything = filtered(&table, sc::PRODUCT_CATEGORY, sc::SALES_AMOUNT, Reducer::Sum, &all.categories).unwrap();
    assert_approx_eq(everything.total(), 500.0, 1e-9);

    let only_home: BTreeSet<String> = ["Home".to_string()].into();
    let home = filtered(&table, sc::PRODUCT_CATEGORY, sc::SALES_AMOUNT, Reducer::Sum, &only_home).unwrap();
    assert_eq!(home.len(), 1);
    assert_approx_eq(home.total(), 30.0, 1e-9);
}

#[test]
fn test_listening_rankings_and_peaks() {
    let table = listening::load(listening_fixtures::small_json().as_bytes(), RowPolicy::Fail).unwrap();

    let artists = top_n(&table, lc::ARTIST, lc::ARTIST, Reducer::Count, 15).unwrap();
    assert_eq!(artists.len(), 2);
    assert_approx_eq(artists.rows[0].value, 3.0, 1e-12);

    let hourly = group_by(&table, lc::HOUR, lc::TS, Reducer::Count).unwrap();
    let peak = hourly.peak().map(AggregateRow::display_label);
    assert_eq!(peak.as_deref(), Some("8"));

    let platforms = group_by(&table, lc::PLATFORM, lc::TS, Reducer::Count).unwrap();
    assert_approx_eq(platforms.get(&"Unknown".into()).unwrap(), 2.0, 1e-12);

    let summary = ListeningSummary::from_table(&table).unwrap();
    assert_eq!(summary.tracks_played, 5);
}

#[test]
fn test_sessions_cache_uploads_independently() {
    let store = SessionStore::new(&CacheConfig::default());
    let first = store.open();
    let second = store.open();
    let bytes = listening_fixtures::small_json().as_bytes();

    for _ in 0..2 {
        store
            .with_session(first, |session| {
                session
                    .listening
                    .get_or_load(bytes, RowPolicy::Fail, listening::load)
                    .map(|_| ())
            })
            .unwrap();
    }

    let stats = store.get(first).unwrap().lock().listening.stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));
    assert_eq!(store.get(second).unwrap().lock().listening.stats().misses, 0);
}

#[test]
fn test_cleaning_same_listening_bytes_twice_is_identical() {
    let bytes = listening_fixtures::small_json().as_bytes();
    let first = listening::load(bytes, RowPolicy::Fail).unwrap();
    let second = listening::load(bytes, RowPolicy::Fail).unwrap();

    assert_eq!(first.rows(), second.rows());
    for column in [lc::YEAR, lc::HOUR, lc::DAY, lc::DATE] {
        let a: Vec<_> = first.iter().map(|event| event.value(column)).collect();
        let b: Vec<_> = second.iter().map(|event| event.value(column)).collect();
        assert_eq!(a, b, "column {column}");
    }

    let event = &first.rows()[0];
    assert_eq!(event.value(lc::YEAR), Some(CellValue::Integer(2023)));
    assert_eq!(event.value(lc::HOUR), Some(CellValue::Integer(8)));
    assert_eq!(event.value(lc::DAY), Some(CellValue::Weekday(WEEKDAYS[0])));
    assert_eq!(
        event.value(lc::DATE),
        Some(CellValue::Date(chrono::NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()))
    );
}

#[test]
fn test_cleaning_same_sales_bytes_twice_is_identical() {
    let bytes = sales_fixtures::small_csv().as_bytes();
    let first = sales::load(bytes, RowPolicy::Fail).unwrap();
    let second = sales::load(bytes, RowPolicy::Fail).unwrap();

    assert_eq!(first.rows(), second.rows());
    let months: Vec<_> = first.iter().map(|record| record.value(sc::MONTH)).collect();
    assert_eq!(months, second.iter().map(|record| record.value(sc::MONTH)).collect::<Vec<_>>());
    assert_eq!(months[0], Some(CellValue::Month(YearMonth::new(2023, 1).unwrap())));
    assert_eq!(months[5], Some(CellValue::Month(YearMonth::new(2023, 2).unwrap())));
}

#[test]
fn test_sales_preview_keeps_first_rows_in_order() {
    let table = sales::load(sales_fixtures::small_csv().as_bytes(), RowPolicy::Fail).unwrap();
    let preview = table.preview(5);

    assert_eq!(preview.rows.len(), 5);
    assert_eq!(preview.columns[0], sc::PRODUCT_ID);
    let amount = preview.columns.iter().position(|c| c == sc::SALES_AMOUNT).unwrap();
    assert_eq!(preview.rows[0][amount], Some(GroupKey::Number(100.0)));
    assert_eq!(preview.rows[4][0], Some(GroupKey::from("1005")));

    let empty = sales::load(sales_fixtures::empty_csv().as_bytes(), RowPolicy::Fail).unwrap();
    assert!(empty.preview(5).rows.is_empty());
}
