//! Derived views over the sample collection.
//!
//! Pipeline: search filter → status filter → stable sort → pagination

mod pagination;
mod pipeline;

pub use pagination::*;
pub use pipeline::*;
