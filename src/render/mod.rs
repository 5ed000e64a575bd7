//! Markup output for resolved span tables.

pub mod html;

pub use html::{render_body, render_table};
