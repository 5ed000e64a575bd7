//! Span resolution for merged cells.
//!
//! This module handles:
//! - Normalizing per-cell span requests (`request`)
//! - Carrying owed rows/columns of in-progress merges between rows (`leftover`)
//! - Walking the grid row by row, column by column, to settle every position (`walker`)

mod leftover;
mod request;
mod walker;

pub use request::{NoSpans, SpanList, SpanSource};
pub use walker::{resolve_spans, SpanResolver};
