//! Integration tests for pulseboard-common crate.

use chrono::NaiveDate;
use pulseboard_common::{ContentHash, DashError, SessionId, YearMonth};

#[test]
fn test_content_hash_is_stable_and_content_sensitive() {
    let a = ContentHash::of(b"ts,ms_played\n");
    let b = ContentHash::of(b"ts,ms_played\n");
    let c = ContentHash::of(b"ts,ms_played \n");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.to_string().len(), 64);
    assert_eq!(a.short().len(), 12);
}

#[test]
fn test_session_ids_are_unique() {
    let ids: std::collections::HashSet<SessionId> = (0..100).map(|_| SessionId::new()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_year_month_ordering_and_display() {
    let jan = YearMonth::new(2023, 1).unwrap();
    let dec = YearMonth::new(2022, 12).unwrap();
    assert!(dec < jan);
    assert_eq!(jan.to_string(), "2023-01");
    assert_eq!(
        YearMonth::of_date(NaiveDate::from_ymd_opt(2023, 2, 14).unwrap()),
        YearMonth::new(2023, 2).unwrap()
    );
    assert!(YearMonth::new(2023, 13).is_none());
    assert!(YearMonth::new(2023, 0).is_none());
}

#[test]
fn test_csv_error_translates_to_parse_error() {
    let data = "a,b\n1,2\n3\n";
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let err = reader
        .records()
        .find_map(|r| r.err())
        .expect("ragged row must fail");
    let err: DashError = err.into();
    assert!(matches!(err, DashError::Parse { .. }));
    assert!(err.to_string().contains("malformed CSV"));
}
