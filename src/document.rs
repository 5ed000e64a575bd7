//! Self-describing grid input used by the CLI and the JS bindings.
//!
//! ```json
//! {
//!   "columns": [{ "key": "region", "title": "Region" }, { "key": "q1" }],
//!   "rows": [{ "region": "North", "q1": 10 }, { "q1": 12 }],
//!   "spans": [{ "row": 0, "column": "region", "rowspan": 2 }],
//!   "options": { "negativeSpans": "reject", "overflow": "keep" }
//! }
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::csv::{parse_delimited, Delimiter};
use crate::error::{Result, SpangridError};
use crate::layout::{SpanList, SpanResolver};
use crate::options::ResolveOptions;
use crate::types::{Column, SpanRequest, SpanTable};

/// One data row: column key to cell value.
pub type Record = Map<String, Value>;

/// A merge request addressed by row index and column key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanDirective {
    pub row: usize,
    pub column: String,
    #[serde(flatten)]
    pub request: SpanRequest,
}

/// Parses `ROW:KEY:ROWSPAN:COLSPAN`; the key itself may contain `:`.
impl FromStr for SpanDirective {
    type Err = SpangridError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || SpangridError::Parse(format!("expected ROW:KEY:ROWSPAN:COLSPAN, got `{s}`"));
        let mut tail = s.rsplitn(3, ':');
        let colspan = tail.next().ok_or_else(bad)?;
        let rowspan = tail.next().ok_or_else(bad)?;
        let head = tail.next().ok_or_else(bad)?;
        let (row, column) = head.split_once(':').ok_or_else(bad)?;
        if column.is_empty() {
            return Err(bad());
        }
        Ok(SpanDirective {
            row: row.trim().parse().map_err(|_| bad())?,
            column: column.to_string(),
            request: SpanRequest::new(
                rowspan.trim().parse().map_err(|_| bad())?,
                colspan.trim().parse().map_err(|_| bad())?,
            ),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDocument {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Record>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<SpanDirective>,
    #[serde(default)]
    pub options: ResolveOptions,
}

impl GridDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a CSV/TSV file whose first line names the columns.
    pub fn from_delimited(data: &[u8], delim: Delimiter) -> Result<Self> {
        parse_delimited(data, delim)
    }

    /// Add a merge request.
    pub fn push_span(&mut self, row: usize, column: impl Into<String>, request: SpanRequest) {
        self.spans.push(SpanDirective {
            row,
            column: column.into(),
            request,
        });
    }

    /// Directives as a span source; fails on unknown column keys.
    pub fn span_list(&self) -> Result<SpanList> {
        let mut list = SpanList::new();
        for directive in &self.spans {
            list.insert(directive.row, directive.column.clone(), directive.request);
        }
        list.check_columns(&self.columns)?;
        Ok(list)
    }

    /// Run span resolution over the document's rows with its own options.
    pub fn resolve(&self) -> Result<SpanTable> {
        let spans = self.span_list()?;
        SpanResolver::new(self.options).resolve(&self.rows, &self.columns, &spans)
    }

    /// Display text of one cell; missing and null values are empty.
    pub fn cell_text(&self, row: usize, column: &Column) -> String {
        match self.rows.get(row).and_then(|r| r.get(&column.key)) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}
