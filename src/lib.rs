//! spangrid - merged-cell span resolution for table rendering
//!
//! Given rows, columns and a per-cell span request, decides for every grid
//! position whether it renders and with which `rowspan`/`colspan`:
//! - Row-major, single forward pass with O(columns) rolling state
//! - Overlapping row and column merges
//! - Explicit `Render`/`Skip` results instead of sentinel spans
//! - HTML output, a CLI, and WebAssembly bindings
//!
//! # Usage
//!
//! ```
//! use spangrid::{Column, ResolvedCell, SpanRequest, SpanResolver};
//!
//! let columns = vec![Column::new("region"), Column::new("sales")];
//! let rows = vec!["north", "north", "south"];
//! let table = SpanResolver::default()
//!     .resolve_with(&rows, &columns, |_, row_index, _, col_index| {
//!         Ok((row_index == 0 && col_index == 0).then(|| SpanRequest::rows(2)))
//!     })
//!     .unwrap();
//!
//! assert_eq!(table.get(0, "region"), Some(ResolvedCell::Render { rowspan: 2, colspan: 1 }));
//! assert!(table.get(1, "region").unwrap().is_skip());
//! ```

pub mod bindings;
pub mod csv;
pub mod document;
pub mod error;
pub mod layout;
pub mod options;
pub mod render;
pub mod types;

pub use document::{GridDocument, SpanDirective};
pub use error::{Result, SpangridError};
pub use layout::{resolve_spans, NoSpans, SpanList, SpanResolver, SpanSource};
pub use options::{NegativeSpanPolicy, ResolveOptions, SpanOverflow};
pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
