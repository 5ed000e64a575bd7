//! Structured error types for spangrid.

use crate::types::Axis;

/// All errors that can occur while resolving or rendering a span table.
#[derive(Debug, thiserror::Error)]
pub enum SpangridError {
    /// A span request that the configured policy refuses (negative, or too large).
    #[error("Invalid {axis} span {value} at row {row}, column `{column}`")]
    InvalidSpan {
        row: usize,
        column: String,
        axis: Axis,
        value: i64,
    },

    /// Two columns share the same key.
    #[error("Duplicate column key: {0}")]
    DuplicateColumn(String),

    /// A span directive names a column the grid does not have.
    #[error("Unknown column key: {0}")]
    UnknownColumn(String),

    /// The caller's span source failed; the whole pass is aborted.
    #[error("Span request failed at row {row}, column `{column}`: {source}")]
    Request {
        row: usize,
        column: String,
        #[source]
        source: Box<SpangridError>,
    },

    /// General parse error (CSV input, CLI arguments).
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors raised by span sources.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpangridError>;

impl From<String> for SpangridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for SpangridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<SpangridError> for wasm_bindgen::JsValue {
    fn from(e: SpangridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
