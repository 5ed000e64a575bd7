//! Per-column merge bookkeeping carried from one row to the next.
//!
//! Only two rows of state are ever alive: the row being walked and the one
//! above it. Slots are addressed by column position; the walker has already
//! checked that column keys are unique, so a position stands for exactly one
//! key in every row.

use std::collections::HashSet;

/// Outcome of one axis for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AxisDecision {
    /// The position starts (or is an ordinary 1-wide) span of this extent
    Originate(u32),
    /// The position lies inside an earlier cell's merge
    Absorbed,
}

impl AxisDecision {
    pub(crate) fn is_absorbed(self) -> bool {
        matches!(self, AxisDecision::Absorbed)
    }
}

/// State recorded for one (row, column) position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LeftoverState {
    /// Rows below this one still owed to the merge covering this position
    pub(crate) lefted_rowspan: u32,
    /// Columns right of this one still owed within this row
    pub(crate) lefted_colspan: u32,
    pub(crate) rows: AxisDecision,
    pub(crate) cols: AxisDecision,
}

impl Default for LeftoverState {
    fn default() -> Self {
        LeftoverState {
            lefted_rowspan: 0,
            lefted_colspan: 0,
            rows: AxisDecision::Originate(1),
            cols: AxisDecision::Originate(1),
        }
    }
}

/// Rolling two-row table of [`LeftoverState`].
pub(crate) struct LeftoverTable {
    previous: Vec<LeftoverState>,
    current: Vec<LeftoverState>,
    has_previous: bool,
}

impl LeftoverTable {
    pub(crate) fn new(columns: usize) -> Self {
        LeftoverTable {
            previous: vec![LeftoverState::default(); columns],
            current: vec![LeftoverState::default(); columns],
            has_previous: false,
        }
    }

    /// State recorded for `col` in the row above, `None` on the first row
    pub(crate) fn above(&self, col: usize) -> Option<LeftoverState> {
        if !self.has_previous {
            return None;
        }
        self.previous.get(col).copied()
    }

    /// State recorded for the column left of `col` in the row above
    pub(crate) fn above_left(&self, col: usize) -> Option<LeftoverState> {
        self.above(col.checked_sub(1)?)
    }

    /// State already recorded for the column left of `col` in this row
    pub(crate) fn left(&self, col: usize) -> Option<LeftoverState> {
        self.current.get(col.checked_sub(1)?).copied()
    }

    pub(crate) fn record(&mut self, col: usize, state: LeftoverState) {
        if let Some(slot) = self.current.get_mut(col) {
            *slot = state;
        }
    }

    /// Finish the current row: it becomes the row above.
    pub(crate) fn advance(&mut self) {
        std::mem::swap(&mut self.previous, &mut self.current);
        self.current.fill(LeftoverState::default());
        self.has_previous = true;
    }
}

/// Rows that close a first-column vertical merge.
///
/// A mark is consumed by the first read, so each row is answered once.
#[derive(Debug, Default)]
pub(crate) struct ShadowMarker {
    rows: HashSet<usize>,
}

impl ShadowMarker {
    pub(crate) fn mark(&mut self, row: usize) {
        self.rows.insert(row);
    }

    pub(crate) fn take(&mut self, row: usize) -> bool {
        self.rows.remove(&row)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}
