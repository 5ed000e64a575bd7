//! Common test utilities and assertion helpers.
//!
//! Besides cell assertions this module holds a brute-force coverage model:
//! it paints every merge rectangle onto a grid and is the reference the
//! single-pass resolver is compared against.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

// Re-export fixtures for convenience
pub use super::fixtures::*;

use spangrid::{ResolvedCell, SpanTable};

// ============================================================================
// Cell assertions
// ============================================================================

pub fn assert_render(table: &SpanTable, row: usize, col: usize, rowspan: u32, colspan: u32) {
    assert_eq!(
        table.cell(row, col),
        Some(ResolvedCell::Render { rowspan, colspan }),
        "cell ({row}, {col})"
    );
}

pub fn assert_baseline(table: &SpanTable, row: usize, col: usize) {
    assert_render(table, row, col, 1, 1);
}

pub fn assert_skip(table: &SpanTable, row: usize, col: usize) {
    let cell = table
        .cell(row, col)
        .unwrap_or_else(|| panic!("cell ({row}, {col}) out of range"));
    assert!(cell.is_skip(), "cell ({row}, {col}) should be skipped, got {cell:?}");
}

/// Compact picture of a table: `1x1`, `2x3`, `--` for skipped cells.
pub fn picture(table: &SpanTable) -> Vec<String> {
    table
        .rows()
        .map(|cells| {
            cells
                .iter()
                .map(|cell| match cell.span() {
                    Some(s) => format!("{}x{}", s.rowspan, s.colspan),
                    None => "--".to_string(),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

// ============================================================================
// Reference model
// ============================================================================

/// Paint `merges` onto an R x C grid. `None` marks covered positions.
///
/// Merges are expected not to overlap; parts running past the grid edge are
/// ignored.
pub fn coverage_model(rows: usize, cols: usize, merges: &[Merge]) -> Vec<Vec<Option<(u32, u32)>>> {
    let mut grid = vec![vec![Some((1u32, 1u32)); cols]; rows];
    for m in merges {
        let (rs, cs) = (m.rowspan.max(1) as usize, m.colspan.max(1) as usize);
        for r in m.row..(m.row + rs).min(rows) {
            for c in m.col..(m.col + cs).min(cols) {
                grid[r][c] = None;
            }
        }
        grid[m.row][m.col] = Some((rs as u32, cs as u32));
    }
    grid
}

/// Compare a resolved table against the reference model cell by cell.
pub fn assert_matches_model(table: &SpanTable, model: &[Vec<Option<(u32, u32)>>]) {
    assert_eq!(table.row_count(), model.len());
    for (r, row) in model.iter().enumerate() {
        for (c, expected) in row.iter().enumerate() {
            let actual = table.cell(r, c).unwrap();
            match expected {
                Some((rowspan, colspan)) => assert_eq!(
                    actual,
                    ResolvedCell::Render {
                        rowspan: *rowspan,
                        colspan: *colspan
                    },
                    "cell ({r}, {c})\nresolved:\n{}",
                    picture(table).join("\n")
                ),
                None => assert!(
                    actual.is_skip(),
                    "cell ({r}, {c}) should be covered\nresolved:\n{}",
                    picture(table).join("\n")
                ),
            }
        }
    }
}
