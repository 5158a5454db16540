//! Decoding of uploaded bytes into raw records.
//!
//! Ingestion is all-or-nothing: either every record decodes and carries the
//! required fields, or an error is returned and nothing is produced.

use crate::raw::{RawRecord, RawValue};
use csv::{ReaderBuilder, Trim};
use pulseboard_common::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Declared format of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Comma-separated text with a header row
    Csv,
    /// A JSON array of objects
    Json,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Decodes `bytes` as `format` and checks that every field in `required` is present.
#[instrument(skip(bytes, required), fields(len = bytes.len()))]
pub fn ingest(bytes: &[u8], format: InputFormat, required: &[&str]) -> Result<Vec<RawRecord>> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let records = match format {
        InputFormat::Csv => ingest_csv(text, required)?,
        InputFormat::Json => ingest_json(text, required)?,
    };

    debug!(records = records.len(), "Decoded raw records");
    Ok(records)
}

fn ingest_json(text: &str, required: &[&str]) -> Result<Vec<RawRecord>> {
    let document: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Array(items) = document else {
        return Err(DashError::parse("expected a JSON array of records"));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let serde_json::Value::Object(fields) = item else {
                return Err(DashError::parse(format!("record {index} is not a JSON object")));
            };
            if let Some(missing) = required.iter().find(|field| !fields.contains_key(**field)) {
                return Err(DashError::missing_field(*missing));
            }
            Ok(fields
                .into_iter()
                .map(|(key, value)| (key, RawValue::from_json(value)))
                .collect())
        })
        .collect()
}

fn ingest_csv(text: &str, required: &[&str]) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if let Some(missing) = required
        .iter()
        .find(|field| !headers.iter().any(|header| header == **field))
    {
        return Err(DashError::missing_field(*missing));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(
            headers
                .iter()
                .zip(row.iter())
                .map(|(header, cell)| (header.to_string(), RawValue::from_cell(cell)))
                .collect(),
        );
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulseboard_common::test_utils::{listening_fixtures, sales_fixtures};

    const LISTENING_REQUIRED: &[&str] = &["ts", "ms_played"];
    const SALES_REQUIRED: &[&str] = &["Sale_Date", "Sales_Amount", "Payment_Method"];

    #[test]
    fn test_json_records_keep_field_order() {
        let records = ingest(
            listening_fixtures::small_json().as_bytes(),
            InputFormat::Json,
            LISTENING_REQUIRED,
        )
        .unwrap();

        assert_eq!(records.len(), 5);
        let keys: Vec<&str> = records[1].keys().map(String::as_str).collect();
        assert_eq!(&keys[..3], &["ts", "platform", "ms_played"]);
        assert_eq!(records[2]["platform"], RawValue::Null);
    }

    #[test]
    fn test_truncated_json_is_parse_error() {
        let err = ingest(
            listening_fixtures::truncated_json().as_bytes(),
            InputFormat::Json,
            LISTENING_REQUIRED,
        )
        .unwrap_err();
        assert!(matches!(err, DashError::Parse { .. }));
    }

    #[test]
    fn test_missing_ts_is_schema_error() {
        let err = ingest(
            listening_fixtures::missing_ts_json().as_bytes(),
            InputFormat::Json,
            LISTENING_REQUIRED,
        )
        .unwrap_err();
        assert!(matches!(err, DashError::Schema { field: Some(ref f), .. } if f == "ts"));
    }

    #[test]
    fn test_json_must_be_array_of_objects() {
        let err = ingest(br#"{"ts": "x"}"#, InputFormat::Json, &[]).unwrap_err();
        assert!(matches!(err, DashError::Parse { .. }));

        let err = ingest(b"[1, 2]", InputFormat::Json, &[]).unwrap_err();
        assert!(err.to_string().contains("record 0"));
    }

    #[test]
    fn test_empty_json_array_is_valid() {
        let records = ingest(b"[]", InputFormat::Json, LISTENING_REQUIRED).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = ingest(&[0x5b, 0xff, 0x5d], InputFormat::Json, &[]).unwrap_err();
        assert!(matches!(err, DashError::Parse { .. }));
    }

    #[test]
    fn test_csv_cells_are_text_and_empty_cells_null() {
        let csv = "Sale_Date,Sales_Amount,Payment_Method,Region\n2023-01-05, 100.0 ,Cash,\n";
        let records = ingest(csv.as_bytes(), InputFormat::Csv, SALES_REQUIRED).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Sales_Amount"], RawValue::Text("100.0".to_string()));
        assert!(records[0]["Region"].is_null());
    }

    #[test]
    fn test_csv_byte_order_mark_is_ignored() {
        let csv = "\u{feff}Sale_Date,Sales_Amount,Payment_Method\n2023-01-05,1,Cash\n";
        let records = ingest(csv.as_bytes(), InputFormat::Csv, SALES_REQUIRED).unwrap();
        assert!(records[0].contains_key("Sale_Date"));
    }

    #[test]
    fn test_csv_missing_column_is_schema_error() {
        let err = ingest(
            sales_fixtures::missing_column_csv().as_bytes(),
            InputFormat::Csv,
            SALES_REQUIRED,
        )
        .unwrap_err();
        assert!(matches!(err, DashError::Schema { field: Some(ref f), .. } if f == "Payment_Method"));
    }

    #[test]
    fn test_ragged_csv_is_parse_error() {
        let csv = "Sale_Date,Sales_Amount,Payment_Method\n2023-01-05,1\n";
        let err = ingest(csv.as_bytes(), InputFormat::Csv, SALES_REQUIRED).unwrap_err();
        assert!(matches!(err, DashError::Parse { .. }));
    }

    #[test]
    fn test_header_only_csv_is_empty() {
        let records = ingest(
            sales_fixtures::empty_csv().as_bytes(),
            InputFormat::Csv,
            SALES_REQUIRED,
        )
        .unwrap();
        assert!(records.is_empty());
    }
}
