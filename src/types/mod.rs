//! Data types shared by the resolver, renderers and bindings.

mod grid;
mod resolved;

pub use grid::*;
pub use resolved::*;
