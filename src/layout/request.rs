//! Span sources and the adapter that normalizes their requests.

use std::collections::HashMap;

use crate::error::{Result, SpangridError};
use crate::options::{NegativeSpanPolicy, ResolveOptions, SpanOverflow};
use crate::types::{Axis, Column, Span, SpanRequest};

/// Supplies the merge a cell should originate, if any.
///
/// Returning `Ok(None)` means "no merge here". An `Err` aborts the whole
/// resolution pass.
pub trait SpanSource<R> {
    fn request(
        &self,
        row: &R,
        row_index: usize,
        column: &Column,
        col_index: usize,
    ) -> Result<Option<SpanRequest>>;
}

impl<R, F> SpanSource<R> for F
where
    F: Fn(&R, usize, &Column, usize) -> Result<Option<SpanRequest>>,
{
    fn request(
        &self,
        row: &R,
        row_index: usize,
        column: &Column,
        col_index: usize,
    ) -> Result<Option<SpanRequest>> {
        self(row, row_index, column, col_index)
    }
}

/// Source for grids without merges.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpans;

impl<R> SpanSource<R> for NoSpans {
    fn request(&self, _: &R, _: usize, _: &Column, _: usize) -> Result<Option<SpanRequest>> {
        Ok(None)
    }
}

/// Declarative requests addressed by (row index, column key).
#[derive(Debug, Clone, Default)]
pub struct SpanList {
    by_column: HashMap<String, HashMap<usize, SpanRequest>>,
}

impl SpanList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request; a later insert for the same cell replaces the earlier one.
    pub fn insert(&mut self, row: usize, key: impl Into<String>, request: SpanRequest) {
        self.by_column
            .entry(key.into())
            .or_default()
            .insert(row, request);
    }

    #[must_use]
    pub fn with(mut self, row: usize, key: impl Into<String>, request: SpanRequest) -> Self {
        self.insert(row, key, request);
        self
    }

    pub fn len(&self) -> usize {
        self.by_column.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fail on requests naming a column the grid does not have.
    pub fn check_columns(&self, columns: &[Column]) -> Result<()> {
        for key in self.by_column.keys() {
            if !columns.iter().any(|c| &c.key == key) {
                return Err(SpangridError::UnknownColumn(key.clone()));
            }
        }
        Ok(())
    }
}

impl<R> SpanSource<R> for SpanList {
    fn request(
        &self,
        _: &R,
        row_index: usize,
        column: &Column,
        _: usize,
    ) -> Result<Option<SpanRequest>> {
        Ok(self
            .by_column
            .get(column.key.as_str())
            .and_then(|rows| rows.get(&row_index))
            .copied())
    }
}

/// Turns raw requests into spans of at least 1 in each axis.
pub(crate) struct SpanAdapter {
    options: ResolveOptions,
    row_count: usize,
    column_count: usize,
}

impl SpanAdapter {
    pub(crate) fn new(options: ResolveOptions, row_count: usize, column_count: usize) -> Self {
        SpanAdapter {
            options,
            row_count,
            column_count,
        }
    }

    /// Ask `source` for the span of one cell and normalize the answer.
    pub(crate) fn span_at<R, S>(
        &self,
        source: &S,
        row: &R,
        row_index: usize,
        column: &Column,
        col_index: usize,
    ) -> Result<Span>
    where
        S: SpanSource<R> + ?Sized,
    {
        let request = source
            .request(row, row_index, column, col_index)
            .map_err(|e| SpangridError::Request {
                row: row_index,
                column: column.key.clone(),
                source: Box::new(e),
            })?;
        self.normalize(request, row_index, column, col_index)
    }

    pub(crate) fn normalize(
        &self,
        request: Option<SpanRequest>,
        row_index: usize,
        column: &Column,
        col_index: usize,
    ) -> Result<Span> {
        let Some(request) = request else {
            return Ok(Span::SINGLE);
        };
        let mut rowspan = self.extent(request.rowspan, Axis::Row, row_index, column)?;
        let mut colspan = self.extent(request.colspan, Axis::Column, row_index, column)?;

        if self.options.overflow == SpanOverflow::Clip {
            rowspan = rowspan.min(remaining(self.row_count, row_index));
            colspan = colspan.min(remaining(self.column_count, col_index));
        }

        Ok(Span { rowspan, colspan })
    }

    fn extent(
        &self,
        value: Option<i64>,
        axis: Axis,
        row_index: usize,
        column: &Column,
    ) -> Result<u32> {
        let invalid = |value: i64| SpangridError::InvalidSpan {
            row: row_index,
            column: column.key.clone(),
            axis,
            value,
        };
        match value {
            None | Some(0) => Ok(1),
            Some(v) if v < 0 => match self.options.negative_spans {
                NegativeSpanPolicy::Reject => Err(invalid(v)),
                NegativeSpanPolicy::Clamp => Ok(1),
            },
            Some(v) => u32::try_from(v).map_err(|_| invalid(v)),
        }
    }
}

/// Positions from `index` to the end of an axis of length `len`, at least 1.
fn remaining(len: usize, index: usize) -> u32 {
    u32::try_from(len.saturating_sub(index))
        .unwrap_or(u32::MAX)
        .max(1)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    fn adapter(options: ResolveOptions) -> SpanAdapter {
        SpanAdapter::new(options, 4, 3)
    }

    fn col() -> Column {
        Column::new("name")
    }

    #[test]
    fn test_absent_request_is_single() {
        let span = adapter(ResolveOptions::default())
            .normalize(None, 0, &col(), 0)
            .unwrap();
        assert_eq!(span, Span::SINGLE);
    }

    #[test]
    fn test_zero_and_missing_extents_default_to_one() {
        let a = adapter(ResolveOptions::default());
        let span = a
            .normalize(
                Some(SpanRequest {
                    rowspan: Some(0),
                    colspan: None,
                }),
                0,
                &col(),
                0,
            )
            .unwrap();
        assert_eq!(span, Span::SINGLE);
    }

    #[test]
    fn test_negative_rejected_by_default() {
        let err = adapter(ResolveOptions::default())
            .normalize(Some(SpanRequest::rows(-5)), 2, &col(), 0)
            .unwrap_err();
        match err {
            SpangridError::InvalidSpan {
                row, axis, value, ..
            } => {
                assert_eq!(row, 2);
                assert_eq!(axis, Axis::Row);
                assert_eq!(value, -5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_clamped_when_configured() {
        let opts = ResolveOptions::default().with_negative_spans(NegativeSpanPolicy::Clamp);
        let span = adapter(opts)
            .normalize(Some(SpanRequest::new(-1, 3)), 0, &col(), 0)
            .unwrap();
        assert_eq!(
            span,
            Span {
                rowspan: 1,
                colspan: 3
            }
        );
    }

    #[test]
    fn test_oversized_extent_rejected() {
        let err = adapter(ResolveOptions::default())
            .normalize(Some(SpanRequest::cols(i64::MAX)), 0, &col(), 0)
            .unwrap_err();
        assert!(matches!(
            err,
            SpangridError::InvalidSpan {
                axis: Axis::Column,
                ..
            }
        ));
    }

    #[test]
    fn test_clip_to_grid_bounds() {
        let opts = ResolveOptions::default().with_overflow(SpanOverflow::Clip);
        let span = adapter(opts)
            .normalize(Some(SpanRequest::new(10, 10)), 2, &col(), 1)
            .unwrap();
        assert_eq!(
            span,
            Span {
                rowspan: 2,
                colspan: 2
            }
        );
    }

    #[test]
    fn test_source_failure_is_wrapped_with_position() {
        let failing = |_: &(), _: usize, _: &Column, _: usize| -> Result<Option<SpanRequest>> {
            Err("boom".into())
        };
        let err = adapter(ResolveOptions::default())
            .span_at(&failing, &(), 1, &col(), 0)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Span request failed at row 1, column `name`: boom"
        );
    }

    #[test]
    fn test_span_list_lookup_and_unknown_columns() {
        let list = SpanList::new()
            .with(1, "name", SpanRequest::rows(2))
            .with(0, "ghost", SpanRequest::cols(2));
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.request(&(), 1, &col(), 0).unwrap(),
            Some(SpanRequest::rows(2))
        );
        assert_eq!(list.request(&(), 0, &col(), 0).unwrap(), None);
        assert!(matches!(
            list.check_columns(&[col()]),
            Err(SpangridError::UnknownColumn(k)) if k == "ghost"
        ));
    }
}
