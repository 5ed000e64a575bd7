//! JavaScript entry points.
//!
//! ```javascript
//! import init, { resolve_with_callback } from 'spangrid';
//! await init();
//! const props = resolve_with_callback(data, columns, ({ row, rowIndex, col, colIndex }) =>
//!   rowIndex === 0 && colIndex === 0 ? { rowspan: 2 } : undefined);
//! // props[rowIndex][colKey] -> { rowspan, colspan, skip }
//! ```

use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::document::GridDocument;
use crate::error::{Result, SpangridError};
use crate::layout::{SpanResolver, SpanSource};
use crate::options::ResolveOptions;
use crate::types::{Column, SpanRequest};

/// Resolve a JSON grid document and return the resolved matrix as JSON.
///
/// # Errors
/// Returns an error if the document is malformed or resolution fails.
#[wasm_bindgen]
pub fn resolve_document(json: &str) -> std::result::Result<String, JsValue> {
    let doc = GridDocument::from_json(json).map_err(JsValue::from)?;
    let table = doc.resolve().map_err(JsValue::from)?;
    serde_json::to_string(&table)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Resolve `rows` x `columns`, asking `callback` for each cell's span.
///
/// The callback receives `{ row, rowIndex, col, colIndex }` and returns
/// `{ rowspan?, colspan? }` or nothing. If it throws, resolution stops and the
/// error is returned.
///
/// # Errors
/// Returns an error for malformed columns/options, refused spans, or a
/// throwing callback.
#[wasm_bindgen]
pub fn resolve_with_callback(
    rows: &Array,
    columns: JsValue,
    callback: &Function,
    options: JsValue,
) -> std::result::Result<JsValue, JsValue> {
    let columns: Vec<Column> = serde_wasm_bindgen::from_value(columns)?;
    let options: ResolveOptions = if options.is_undefined() || options.is_null() {
        ResolveOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };
    let rows: Vec<JsValue> = rows.iter().collect();

    let source = JsCallback { callback };
    let table = SpanResolver::new(options)
        .resolve(&rows, &columns, &source)
        .map_err(JsValue::from)?;

    // Plain objects rather than JS `Map`s for the keyed rows
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(table.serialize(&serializer)?)
}

struct JsCallback<'a> {
    callback: &'a Function,
}

impl SpanSource<JsValue> for JsCallback<'_> {
    fn request(
        &self,
        row: &JsValue,
        row_index: usize,
        column: &Column,
        col_index: usize,
    ) -> Result<Option<SpanRequest>> {
        let arg = Object::new();
        set(&arg, "row", row)?;
        set(&arg, "rowIndex", &JsValue::from(row_index))?;
        let col = serde_wasm_bindgen::to_value(column)
            .map_err(|e| SpangridError::Other(e.to_string()))?;
        set(&arg, "col", &col)?;
        set(&arg, "colIndex", &JsValue::from(col_index))?;

        let out = self.callback.call1(&JsValue::NULL, &arg).map_err(js_error)?;
        if out.is_undefined() || out.is_null() {
            return Ok(None);
        }
        serde_wasm_bindgen::from_value(out)
            .map(Some)
            .map_err(|e| SpangridError::Other(e.to_string()))
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<()> {
    Reflect::set(target, &JsValue::from_str(key), value).map_err(js_error)?;
    Ok(())
}

fn js_error(e: JsValue) -> SpangridError {
    SpangridError::Other(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}
