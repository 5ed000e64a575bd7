use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

use super::{Axis, Span};

/// Resolution outcome for one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedCell {
    /// Emit a cell with these extents
    Render { rowspan: u32, colspan: u32 },
    /// Covered by an earlier cell's merge; emit nothing.
    /// `by` is the axis on which the position was absorbed first.
    Skip { by: Axis },
}

impl ResolvedCell {
    pub const SINGLE: Self = Self::Render {
        rowspan: 1,
        colspan: 1,
    };

    pub fn is_skip(self) -> bool {
        matches!(self, Self::Skip { .. })
    }

    /// Extents of a rendered cell, `None` for skipped ones
    pub fn span(self) -> Option<Span> {
        match self {
            Self::Render { rowspan, colspan } => Some(Span { rowspan, colspan }),
            Self::Skip { .. } => None,
        }
    }
}

/// Wire form of a [`ResolvedCell`]: `{rowspan, colspan, skip}`.
///
/// Skipped cells carry zero extents since they occupy no markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellProps {
    pub rowspan: u32,
    pub colspan: u32,
    pub skip: bool,
}

impl From<ResolvedCell> for CellProps {
    fn from(cell: ResolvedCell) -> Self {
        match cell {
            ResolvedCell::Render { rowspan, colspan } => CellProps {
                rowspan,
                colspan,
                skip: false,
            },
            ResolvedCell::Skip { .. } => CellProps {
                rowspan: 0,
                colspan: 0,
                skip: true,
            },
        }
    }
}

/// A rendered (non-skipped) cell as seen by a renderer walking one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedCell<'a> {
    pub col_index: usize,
    pub key: &'a str,
    pub span: Span,
}

/// Resolved matrix for a whole grid, addressable by `[row][column key]` or by
/// position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanTable {
    keys: Vec<String>,
    key_index: HashMap<String, usize>,
    cells: Vec<Vec<ResolvedCell>>,
}

impl SpanTable {
    pub(crate) fn new(
        keys: Vec<String>,
        key_index: HashMap<String, usize>,
        cells: Vec<Vec<ResolvedCell>>,
    ) -> Self {
        SpanTable {
            keys,
            key_index,
            cells,
        }
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn column_count(&self) -> usize {
        self.keys.len()
    }

    /// Column keys in grid order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Position of a column key
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.key_index.get(key).copied()
    }

    /// Cell at (row, column position)
    pub fn cell(&self, row: usize, col: usize) -> Option<ResolvedCell> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Cell at (row, column key)
    pub fn get(&self, row: usize, key: &str) -> Option<ResolvedCell> {
        self.cell(row, self.column_index(key)?)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[ResolvedCell]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Cells a renderer must emit for `row`, left to right
    pub fn rendered_cells(&self, row: usize) -> impl Iterator<Item = RenderedCell<'_>> + '_ {
        let keys = &self.keys;
        self.cells.get(row).into_iter().flat_map(move |cells| {
            cells
                .iter()
                .zip(keys)
                .enumerate()
                .filter_map(|(col_index, (cell, key))| {
                    cell.span().map(|span| RenderedCell {
                        col_index,
                        key: key.as_str(),
                        span,
                    })
                })
        })
    }

    /// Number of skipped positions across the grid
    pub fn skipped_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_skip())
            .count()
    }
}

struct RowProps<'a> {
    keys: &'a [String],
    cells: &'a [ResolvedCell],
}

impl Serialize for RowProps<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (key, cell) in self.keys.iter().zip(self.cells) {
            map.serialize_entry(key, &CellProps::from(*cell))?;
        }
        map.end()
    }
}

/// Serializes as `[{ "<key>": {rowspan, colspan, skip}, ... }, ...]`.
impl Serialize for SpanTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.cells.len()))?;
        for cells in &self.cells {
            seq.serialize_element(&RowProps {
                keys: &self.keys,
                cells,
            })?;
        }
        seq.end()
    }
}
