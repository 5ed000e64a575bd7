//! HTML table output.
//!
//! Every rendered cell becomes one `<td>`; `rowspan`/`colspan` attributes are
//! written only when greater than 1. Skipped cells produce no markup.

use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::types::{Column, SpanTable};

/// Render `<table>` with a header row and the resolved body.
///
/// `text` supplies the content of the cell at (row index, column).
pub fn render_table<F>(table: &SpanTable, columns: &[Column], text: F) -> String
where
    F: Fn(usize, &Column) -> String,
{
    let mut out = String::with_capacity(256 + table.row_count() * table.column_count() * 16);
    out.push_str("<table>\n");
    write_head(&mut out, columns);
    write_body(&mut out, table, columns, &text);
    out.push_str("</table>\n");
    out
}

/// Render only the `<tbody>` element.
pub fn render_body<F>(table: &SpanTable, columns: &[Column], text: F) -> String
where
    F: Fn(usize, &Column) -> String,
{
    let mut out = String::new();
    write_body(&mut out, table, columns, &text);
    out
}

fn write_head(out: &mut String, columns: &[Column]) {
    out.push_str("<thead><tr>");
    for column in columns {
        out.push_str("<th>");
        out.push_str(&escape(column.label()));
        out.push_str("</th>");
    }
    out.push_str("</tr></thead>\n");
}

fn write_body<F>(out: &mut String, table: &SpanTable, columns: &[Column], text: &F)
where
    F: Fn(usize, &Column) -> String,
{
    out.push_str("<tbody>\n");
    for row in 0..table.row_count() {
        out.push_str("<tr>");
        for cell in table.rendered_cells(row) {
            out.push_str("<td");
            if cell.span.rowspan > 1 {
                let _ = write!(out, " rowspan=\"{}\"", cell.span.rowspan);
            }
            if cell.span.colspan > 1 {
                let _ = write!(out, " colspan=\"{}\"", cell.span.colspan);
            }
            out.push('>');
            if let Some(column) = columns.get(cell.col_index) {
                out.push_str(&escape(text(row, column).as_str()));
            }
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n");
}
