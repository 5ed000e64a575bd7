//! Builders for test grids.
//!
//! Columns are named `c0`, `c1`, ... so tests can address cells by position.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use spangrid::{Column, ResolveOptions, SpanList, SpanRequest, SpanResolver, SpanTable};

/// A merge placed at (row, col) with the given extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    pub row: usize,
    pub col: usize,
    pub rowspan: i64,
    pub colspan: i64,
}

/// Fluent builder for an R x C grid with span requests.
#[derive(Debug, Clone)]
pub struct GridBuilder {
    rows: usize,
    cols: usize,
    merges: Vec<Merge>,
    options: ResolveOptions,
}

impl GridBuilder {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            merges: Vec::new(),
            options: ResolveOptions::default(),
        }
    }

    /// Request `rowspan` x `colspan` at (row, col).
    pub fn merge(mut self, row: usize, col: usize, rowspan: i64, colspan: i64) -> Self {
        self.merges.push(Merge {
            row,
            col,
            rowspan,
            colspan,
        });
        self
    }

    pub fn rowspan(self, row: usize, col: usize, rowspan: i64) -> Self {
        self.merge(row, col, rowspan, 1)
    }

    pub fn colspan(self, row: usize, col: usize, colspan: i64) -> Self {
        self.merge(row, col, 1, colspan)
    }

    pub fn options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn columns(&self) -> Vec<Column> {
        columns(self.cols)
    }

    pub fn span_list(&self) -> SpanList {
        let mut list = SpanList::new();
        for m in &self.merges {
            list.insert(m.row, key(m.col), SpanRequest::new(m.rowspan, m.colspan));
        }
        list
    }

    pub fn try_resolve(&self) -> spangrid::Result<SpanTable> {
        let rows = vec![(); self.rows];
        SpanResolver::new(self.options).resolve(&rows, &self.columns(), &self.span_list())
    }

    pub fn resolve(&self) -> SpanTable {
        self.try_resolve().expect("span resolution failed")
    }
}

pub fn key(col: usize) -> String {
    format!("c{col}")
}

pub fn columns(n: usize) -> Vec<Column> {
    (0..n).map(|i| Column::new(key(i))).collect()
}
