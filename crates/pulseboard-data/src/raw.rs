//! Raw records as they come out of the decoders.

use indexmap::IndexMap;
use serde::Serialize;

/// A single decoded field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    /// JSON `null` or an empty CSV cell
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number
    Number(f64),
    /// Text, including every non-empty CSV cell
    Text(String),
}

/// One transaction or playback event, keyed by source field name in input order.
pub type RawRecord = IndexMap<String, RawValue>;

impl RawValue {
    /// Converts a JSON value. Arrays and objects are kept as their JSON text.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map_or_else(|| Self::Text(n.to_string()), Self::Number),
            serde_json::Value::String(s) => Self::Text(s),
            nested @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Self::Text(nested.to_string())
            }
        }
    }

    /// Converts a CSV cell. Empty cells are missing values.
    pub fn from_cell(cell: &str) -> Self {
        if cell.is_empty() {
            Self::Null
        } else {
            Self::Text(cell.to_string())
        }
    }

    /// Whether the value is missing.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric reading of the value. Text is parsed after trimming.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Self::Null | Self::Bool(_) => None,
        }
    }

    /// Text reading of the value; `None` for missing values.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(RawValue::from_json(json!(null)), RawValue::Null);
        assert_eq!(RawValue::from_json(json!(true)), RawValue::Bool(true));
        assert_eq!(RawValue::from_json(json!(180000)), RawValue::Number(180_000.0));
        assert_eq!(
            RawValue::from_json(json!("android")),
            RawValue::Text("android".to_string())
        );
    }

    #[test]
    fn test_nested_json_kept_as_text() {
        let value = RawValue::from_json(json!({"a": [1, 2]}));
        assert_eq!(value, RawValue::Text(r#"{"a":[1,2]}"#.to_string()));
    }

    #[test]
    fn test_empty_cell_is_null() {
        assert!(RawValue::from_cell("").is_null());
        assert_eq!(RawValue::from_cell("North"), RawValue::Text("North".to_string()));
    }

    #[test]
    fn test_numeric_reading() {
        assert_eq!(RawValue::Text(" 12.5 ".to_string()).to_f64(), Some(12.5));
        assert_eq!(RawValue::Text("twelve".to_string()).to_f64(), None);
        assert_eq!(RawValue::Text("NaN".to_string()).to_f64(), None);
        assert_eq!(RawValue::Bool(true).to_f64(), None);
        assert_eq!(RawValue::Null.to_f64(), None);
    }

    #[test]
    fn test_text_reading() {
        assert_eq!(RawValue::Number(1001.0).to_text().as_deref(), Some("1001"));
        assert_eq!(RawValue::Null.to_text(), None);
    }
}
