//! Test utilities and shared test helpers for Pulseboard.
//!
//! Fixtures here are small, hand-checked datasets in both input formats so
//! that every crate in the workspace tests against the same numbers.

use chrono::{NaiveDate, NaiveDateTime};

/// Test fixture for creating a timestamp.
pub fn mock_timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, sec))
        .expect("valid fixture timestamp")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Sales transaction fixtures.
pub mod sales_fixtures {
    /// Six transactions over two months.
    ///
    /// Totals: Electronics 150 + 200 = 350, Home 30, Clothing 75 + 45 = 120;
    /// grand total 500. January 255, February 245.
    pub fn small_csv() -> &'static str {
        concat!(
            "Product_ID,Sale_Date,Sales_Rep,Region,Sales_Amount,Quantity_Sold,Product_Category,Customer_Type,Payment_Method\n",
            "1001,2023-01-05,Alice,North,100.0,2,Electronics,New,Cash\n",
            "1002,2023-01-17,Bob,South,50.0,1,Electronics,Returning,Credit Card\n",
            "1003,2023-01-20,Alice,North,30.0,3,Home,Returning,Cash\n",
            "1004,2023-01-28,Charlie,East,75.0,1,Clothing,New,Bank Transfer\n",
            "1005,2023-02-02,Bob,South,200.0,4,Electronics,New,Credit Card\n",
            "1006,2023-02-14,Charlie,West,45.0,2,Clothing,Returning,Cash\n",
        )
    }

    /// Header only, no rows.
    pub fn empty_csv() -> &'static str {
        "Product_ID,Sale_Date,Sales_Rep,Region,Sales_Amount,Quantity_Sold,Product_Category,Customer_Type,Payment_Method\n"
    }

    /// Missing the `Payment_Method` column.
    pub fn missing_column_csv() -> &'static str {
        concat!(
            "Sale_Date,Sales_Rep,Region,Sales_Amount,Product_Category,Customer_Type\n",
            "2023-01-05,Alice,North,100.0,Electronics,New\n",
        )
    }
}

/// Streaming history fixtures.
pub mod listening_fixtures {
    /// Five plays. 2023-01-02 is a Monday.
    ///
    /// Years: 2021 ×1, 2022 ×1, 2023 ×3; so with max year 2023, four plays are
    /// "new" (≥ 2022) and one is old. Platforms: android ×2, ios ×1, missing ×2.
    pub fn small_json() -> &'static str {
        r#"[
  {"ts": "2023-01-02T08:15:00Z", "platform": "android", "ms_played": 180000,
   "conn_country": "US", "ip_addr": "10.0.0.1",
   "master_metadata_track_name": "Song A", "master_metadata_album_artist_name": "Artist X",
   "master_metadata_album_album_name": "Album One", "spotify_track_uri": "spotify:track:a",
   "reason_start": "trackdone", "reason_end": "trackdone", "shuffle": false, "skipped": null,
   "offline": false, "offline_timestamp": 0, "incognito_mode": false},
  {"ts": "2023-01-02T08:20:00Z", "platform": "android", "ms_played": 240000,
   "conn_country": "US",
   "master_metadata_track_name": "Song B", "master_metadata_album_artist_name": "Artist X",
   "master_metadata_album_album_name": "Album One"},
  {"ts": "2023-01-07T22:05:00Z", "platform": null, "ms_played": 60000,
   "conn_country": "DE",
   "master_metadata_track_name": "Song A", "master_metadata_album_artist_name": "Artist X",
   "master_metadata_album_album_name": "Album One"},
  {"ts": "2022-06-15T13:00:00Z", "platform": "ios", "ms_played": 30000,
   "conn_country": "US",
   "master_metadata_track_name": "Song C", "master_metadata_album_artist_name": "Artist Y",
   "master_metadata_album_album_name": "Album Two"},
  {"ts": "2021-03-10T08:45:00Z", "ms_played": 90000,
   "conn_country": "GB",
   "master_metadata_track_name": null, "master_metadata_album_artist_name": null,
   "master_metadata_album_album_name": null, "episode_name": "Podcast Ep 1"}
]"#
    }

    /// A record without its timestamp field.
    pub fn missing_ts_json() -> &'static str {
        r#"[{"platform": "android", "ms_played": 1000}]"#
    }

    /// Cut off mid-record.
    pub fn truncated_json() -> &'static str {
        r#"[{"ts": "2023-01-02T08:15:00Z", "ms_pla"#
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use chrono::{NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    /// Strategy for timestamps between 2000 and 2030.
    pub fn timestamp_strategy() -> impl Strategy<Value = NaiveDateTime> {
        (946_684_800i64..1_893_456_000i64).prop_map(|secs| {
            chrono::DateTime::from_timestamp(secs, 0)
                .map(|dt| dt.naive_utc())
                .unwrap_or_else(|| NaiveDate::default().and_hms_opt(0, 0, 0).unwrap_or_default())
        })
    }

    /// Strategy for milliseconds-played values up to one day.
    pub fn ms_played_strategy() -> impl Strategy<Value = u64> {
        0u64..86_400_000u64
    }

    /// Strategy for a small set of category labels.
    pub fn category_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Electronics".to_string()),
            Just("Home".to_string()),
            Just("Clothing".to_string()),
            Just("Toys".to_string()),
        ]
    }

    /// Strategy for non-negative amounts with cent precision.
    pub fn amount_strategy() -> impl Strategy<Value = f64> {
        (0u32..1_000_000u32).prop_map(|cents| f64::from(cents) / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_mock_timestamp() {
        let timestamp = mock_timestamp(2024, 1, 1, 12, 0, 0);
        assert_eq!(timestamp.year(), 2024);
        assert_eq!(timestamp.month(), 1);
        assert_eq!(timestamp.day(), 1);
        assert_eq!(timestamp.hour(), 12);
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(1.0, 0.9999, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_fixtures_are_well_formed_json() {
        let value: serde_json::Value = serde_json::from_str(listening_fixtures::small_json()).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(5));
        assert!(serde_json::from_str::<serde_json::Value>(listening_fixtures::truncated_json()).is_err());
    }
}
