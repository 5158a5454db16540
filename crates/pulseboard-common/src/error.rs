//! Error types and utilities for Pulseboard

use thiserror::Error;

/// Result type alias for Pulseboard operations
pub type Result<T> = std::result::Result<T, DashError>;

/// Main error type for Pulseboard operations
#[derive(Error, Debug)]
pub enum DashError {
    /// Input bytes do not decode as the declared format
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A required field is absent after decoding
    #[error("Schema error: {message}")]
    Schema {
        message: String,
        field: Option<String>,
    },

    /// A value cannot be converted to the type its column requires
    #[error("Type coercion error in column '{column}'{}: {message}", row_suffix(.row))]
    TypeCoercion {
        column: String,
        row: Option<usize>,
        value: Option<String>,
        message: String,
    },

    /// An aggregation referenced a column the table does not have
    #[error("Column not found: '{column}'")]
    ColumnNotFound { column: String },

    /// A session id that is unknown or has expired
    #[error("Session error: session {session} not found or expired")]
    SessionNotFound { session: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internationalization and localization errors
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
    },
}

fn row_suffix(row: &Option<usize>) -> String {
    row.map(|r| format!(" at row {r}")).unwrap_or_default()
}

impl DashError {
    /// Create a new parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new parse error with source
    pub fn parse_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a schema error for a missing field
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::Schema {
            message: format!("required field '{field}' is missing"),
            field: Some(field),
        }
    }

    /// Create a schema error with a custom message
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a type coercion error for a single cell
    pub fn coercion(
        column: impl Into<String>,
        row: usize,
        value: Option<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::TypeCoercion {
            column: column.into(),
            row: Some(row),
            value,
            message: msg.into(),
        }
    }

    /// Create a type coercion error that is not tied to one row
    pub fn column_type(column: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::TypeCoercion {
            column: column.into(),
            row: None,
            value: None,
            message: msg.into(),
        }
    }

    /// Create a column-not-found error
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Create a session-not-found error
    pub fn session_not_found(session: impl std::fmt::Display) -> Self {
        Self::SessionNotFound {
            session: session.to_string(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new localization error
    pub fn localization(msg: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: None,
        }
    }

    /// Create a new localization error with locale
    pub fn localization_with_locale(msg: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: Some(locale.into()),
        }
    }

    /// Whether the error was caused by the uploaded data rather than the caller
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Schema { .. } | Self::TypeCoercion { .. }
        )
    }
}

// Error conversion implementations for decoder types

/// Convert from serde_json::Error to DashError
impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        let msg = if err.is_eof() {
            "JSON input ended unexpectedly".to_string()
        } else if err.is_syntax() {
            format!("malformed JSON at line {}, column {}", err.line(), err.column())
        } else {
            "JSON input has an unexpected shape".to_string()
        };
        Self::parse_with_source(msg, err)
    }
}

/// Convert from csv::Error to DashError
impl From<csv::Error> for DashError {
    fn from(err: csv::Error) -> Self {
        let msg = match err.position() {
            Some(pos) => format!("malformed CSV at line {}", pos.line()),
            None => "malformed CSV".to_string(),
        };
        Self::parse_with_source(msg, err)
    }
}

/// Convert from std::str::Utf8Error to DashError
impl From<std::str::Utf8Error> for DashError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::parse_with_source("input is not valid UTF-8", err)
    }
}
