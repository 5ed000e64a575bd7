use serde::{Deserialize, Serialize};
use std::fmt;

/// Column descriptor. Merge bookkeeping is keyed by `key`, so keys must be
/// unique within a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Stable column identity
    pub key: String,
    /// Header text (renderers fall back to `key`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Column {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Header label for rendering
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.key)
    }
}

/// What a span source asks for at one cell. Missing or zero extents mean 1.
///
/// Values are signed so that negative requests can reach the adapter and be
/// handled by [`NegativeSpanPolicy`](crate::options::NegativeSpanPolicy)
/// instead of failing deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rowspan: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colspan: Option<i64>,
}

impl SpanRequest {
    pub fn new(rowspan: i64, colspan: i64) -> Self {
        Self {
            rowspan: Some(rowspan),
            colspan: Some(colspan),
        }
    }

    pub fn rows(rowspan: i64) -> Self {
        Self {
            rowspan: Some(rowspan),
            colspan: None,
        }
    }

    pub fn cols(colspan: i64) -> Self {
        Self {
            rowspan: None,
            colspan: Some(colspan),
        }
    }
}

/// Normalized extents of a cell: both axes are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub rowspan: u32,
    pub colspan: u32,
}

impl Span {
    pub const SINGLE: Self = Self {
        rowspan: 1,
        colspan: 1,
    };

    /// Rows still owed below the origin row
    pub fn lefted_rows(self) -> u32 {
        self.rowspan.saturating_sub(1)
    }

    /// Columns still owed right of the origin column
    pub fn lefted_cols(self) -> u32 {
        self.colspan.saturating_sub(1)
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}
