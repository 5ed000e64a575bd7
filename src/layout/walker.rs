//! Row-major walk that decides, for every grid position, whether it renders
//! and with which extents.
//!
//! Each position is settled from three inputs only: its own request, the
//! leftover state recorded for the row above, and the state already recorded
//! for the column to its left in the same row. The row axis is decided
//! before the column axis.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::leftover::{AxisDecision, LeftoverState, LeftoverTable, ShadowMarker};
use super::request::{NoSpans, SpanAdapter, SpanSource};
use crate::error::{Result, SpangridError};
use crate::options::ResolveOptions;
use crate::types::{Axis, Column, ResolvedCell, Span, SpanRequest, SpanTable};

/// Entry point for span resolution.
///
/// A resolver holds only options; every call to [`resolve`](Self::resolve)
/// builds and drops its own bookkeeping, so one resolver can serve any number
/// of grids, including concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanResolver {
    options: ResolveOptions,
}

impl SpanResolver {
    pub fn new(options: ResolveOptions) -> Self {
        SpanResolver { options }
    }

    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    /// Resolve every position of `rows` x `columns` against `source`.
    ///
    /// # Errors
    /// Fails on duplicate column keys, on a span the options refuse, or when
    /// `source` fails; no partial table is returned.
    pub fn resolve<R, S>(&self, rows: &[R], columns: &[Column], source: &S) -> Result<SpanTable>
    where
        S: SpanSource<R> + ?Sized,
    {
        let mut key_index = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if key_index.insert(column.key.clone(), i).is_some() {
                return Err(SpangridError::DuplicateColumn(column.key.clone()));
            }
        }

        debug!(
            rows = rows.len(),
            columns = columns.len(),
            "resolving spans"
        );

        let walker = GridWalker::new(self.options, rows, columns, source);
        let cells = walker.walk()?;
        let keys = columns.iter().map(|c| c.key.clone()).collect();
        let table = SpanTable::new(keys, key_index, cells);

        debug!(skipped = table.skipped_count(), "span resolution complete");
        Ok(table)
    }

    /// [`resolve`](Self::resolve) with a closure as the span source.
    pub fn resolve_with<R, F>(
        &self,
        rows: &[R],
        columns: &[Column],
        request: F,
    ) -> Result<SpanTable>
    where
        F: Fn(&R, usize, &Column, usize) -> Result<Option<SpanRequest>>,
    {
        self.resolve(rows, columns, &request)
    }

    /// Resolve a grid without merges.
    pub fn resolve_plain<R>(&self, rows: &[R], columns: &[Column]) -> Result<SpanTable> {
        self.resolve(rows, columns, &NoSpans)
    }
}

/// Resolve with default options.
pub fn resolve_spans<R, S>(rows: &[R], columns: &[Column], source: &S) -> Result<SpanTable>
where
    S: SpanSource<R> + ?Sized,
{
    SpanResolver::default().resolve(rows, columns, source)
}

struct GridWalker<'a, R, S: ?Sized> {
    rows: &'a [R],
    columns: &'a [Column],
    source: &'a S,
    adapter: SpanAdapter,
    leftovers: LeftoverTable,
    shadow: ShadowMarker,
}

impl<'a, R, S> GridWalker<'a, R, S>
where
    S: SpanSource<R> + ?Sized,
{
    fn new(options: ResolveOptions, rows: &'a [R], columns: &'a [Column], source: &'a S) -> Self {
        GridWalker {
            rows,
            columns,
            source,
            adapter: SpanAdapter::new(options, rows.len(), columns.len()),
            leftovers: LeftoverTable::new(columns.len()),
            shadow: ShadowMarker::default(),
        }
    }

    fn walk(mut self) -> Result<Vec<Vec<ResolvedCell>>> {
        let mut resolved = Vec::with_capacity(self.rows.len());
        let rows = self.rows;
        for (row_index, row) in rows.iter().enumerate() {
            let cells = self.walk_row(row_index, row)?;
            resolved.push(cells);
            self.leftovers.advance();
        }
        Ok(resolved)
    }

    /// Settle one row, left to right.
    fn walk_row(&mut self, row_index: usize, row: &R) -> Result<Vec<ResolvedCell>> {
        let mut cells = vec![ResolvedCell::SINGLE; self.columns.len()];
        for col_index in 0..self.columns.len() {
            self.visit(row_index, row, col_index, &mut cells)?;
        }
        Ok(cells)
    }

    /// Settle one row right to left.
    #[cfg(test)]
    fn walk_row_reversed(&mut self, row_index: usize, row: &R) -> Result<Vec<ResolvedCell>> {
        let mut cells = vec![ResolvedCell::SINGLE; self.columns.len()];
        for col_index in (0..self.columns.len()).rev() {
            self.visit(row_index, row, col_index, &mut cells)?;
        }
        Ok(cells)
    }

    fn visit(
        &mut self,
        row_index: usize,
        row: &R,
        col_index: usize,
        cells: &mut [ResolvedCell],
    ) -> Result<()> {
        let Some(column) = self.columns.get(col_index) else {
            return Ok(());
        };
        let span = self
            .adapter
            .span_at(self.source, row, row_index, column, col_index)?;
        let state = self.settle(row_index, col_index, span);
        self.leftovers.record(col_index, state);
        if let Some(slot) = cells.get_mut(col_index) {
            *slot = to_cell(state);
        }
        Ok(())
    }

    fn settle(&mut self, row_index: usize, col_index: usize, span: Span) -> LeftoverState {
        let above = self.leftovers.above(col_index);
        let (lefted_rowspan, rows) = self.row_axis(row_index, col_index, span, above);
        let (lefted_colspan, cols) =
            self.column_axis(row_index, col_index, span, above, lefted_rowspan, rows);
        LeftoverState {
            lefted_rowspan,
            lefted_colspan,
            rows,
            cols,
        }
    }

    fn row_axis(
        &mut self,
        row_index: usize,
        col_index: usize,
        span: Span,
        above: Option<LeftoverState>,
    ) -> (u32, AxisDecision) {
        if row_index == 0 || span.rowspan > 1 {
            if span.rowspan > 1 {
                trace!(
                    row = row_index,
                    col = col_index,
                    rowspan = span.rowspan,
                    colspan = span.colspan,
                    "vertical merge"
                );
                if col_index == 0 {
                    self.shadow
                        .mark(row_index.saturating_add(span.lefted_rows() as usize));
                }
            }
            return (span.lefted_rows(), AxisDecision::Originate(span.rowspan));
        }

        match above.map_or(0, |s| s.lefted_rowspan) {
            0 => (0, AxisDecision::Originate(span.rowspan)),
            owed => (owed - 1, AxisDecision::Absorbed),
        }
    }

    fn column_axis(
        &mut self,
        row_index: usize,
        col_index: usize,
        span: Span,
        above: Option<LeftoverState>,
        lefted_rowspan: u32,
        rows: AxisDecision,
    ) -> (u32, AxisDecision) {
        let own = AxisDecision::Originate(span.colspan);
        // Columns owed by the merge covering this position from above
        let carried = above.map_or(0, |s| s.lefted_colspan);

        if col_index == 0 {
            // Read on every row so a mark never outlives its row.
            let closes_merge = self.shadow.take(row_index);
            let inside_merge = span.rowspan <= 1 && (lefted_rowspan > 0 || closes_merge);
            if inside_merge {
                // The live first-column merge sets the width, not this request.
                return (carried, AxisDecision::Originate(carried.saturating_add(1)));
            }
            return (span.lefted_cols(), own);
        }

        // A live chain from the left wins over anything this cell asks for.
        if let Some(left) = self.leftovers.left(col_index) {
            if left.lefted_colspan > 0 {
                let owed = (left.lefted_colspan - 1).max(span.lefted_cols());
                return (owed, AxisDecision::Absorbed);
            }
        }

        if rows.is_absorbed() {
            if span.colspan > 1 {
                return (span.lefted_cols(), own);
            }
            return (carried, own);
        }

        if span.colspan > 1 {
            trace!(
                row = row_index,
                col = col_index,
                colspan = span.colspan,
                "horizontal merge"
            );
            return (span.lefted_cols(), own);
        }

        // Two-axis merge whose origin column is directly up-left
        if let Some(up_left) = self.leftovers.above_left(col_index) {
            if up_left.lefted_colspan > 0 && up_left.lefted_rowspan > 0 {
                return (up_left.lefted_colspan - 1, AxisDecision::Absorbed);
            }
        }

        (0, own)
    }
}

fn to_cell(state: LeftoverState) -> ResolvedCell {
    match (state.rows, state.cols) {
        (AxisDecision::Absorbed, _) => ResolvedCell::Skip { by: Axis::Row },
        (_, AxisDecision::Absorbed) => ResolvedCell::Skip { by: Axis::Column },
        (AxisDecision::Originate(rowspan), AxisDecision::Originate(colspan)) => {
            ResolvedCell::Render { rowspan, colspan }
        }
    }
}
